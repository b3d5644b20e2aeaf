use chrono::{DateTime, NaiveDate, Utc};
use core_types::ReportRecord;
use serde::Deserialize;

use crate::error::DataSourceError;

/// One row as the external COT feed delivers it.
///
/// The feed is loosely typed: keys vary between snake_case and dash-cased
/// spellings across endpoints, dates arrive as strings, and counts arrive as
/// JSON numbers that may be missing or non-finite. This struct absorbs all
/// of those spellings; `into_record` is the single place where a raw row
/// either becomes a canonical `ReportRecord` or is rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct RawReportRow {
    #[serde(alias = "report_date", alias = "report-date")]
    pub date: String,

    #[serde(alias = "long_positions", alias = "noncomm-positions-long")]
    pub longs: Option<f64>,

    #[serde(alias = "short_positions", alias = "noncomm-positions-short")]
    pub shorts: Option<f64>,
}

impl RawReportRow {
    /// Maps this raw row onto the canonical record shape.
    ///
    /// Rejects rows whose date fails to parse (RFC 3339 or plain
    /// `YYYY-MM-DD`) or whose counts are missing or non-finite, so a
    /// malformed row surfaces as `InvalidRecord` instead of a silent zero.
    pub fn into_record(self) -> Result<ReportRecord, DataSourceError> {
        let date = parse_report_date(&self.date)?;
        let longs = parse_count(self.longs, "longs", &self.date)?;
        let shorts = parse_count(self.shorts, "shorts", &self.date)?;
        Ok(ReportRecord::new(date, longs, shorts))
    }
}

/// Decodes a JSON feed payload into per-row outcomes.
///
/// A payload that is not a JSON array fails as a whole; individual bad rows
/// come back as `Err` entries so the caller can drop or flag them without
/// losing the rest of the series.
pub fn decode_reports(
    payload: &str,
) -> Result<Vec<Result<ReportRecord, DataSourceError>>, DataSourceError> {
    let rows: Vec<RawReportRow> = serde_json::from_str(payload)?;
    Ok(rows.into_iter().map(RawReportRow::into_record).collect())
}

fn parse_report_date(raw: &str) -> Result<DateTime<Utc>, DataSourceError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = raw.parse::<NaiveDate>() {
        if let Some(midnight) = parsed.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(DataSourceError::InvalidRecord(format!(
        "unparseable date '{raw}'"
    )))
}

fn parse_count(value: Option<f64>, field: &str, date: &str) -> Result<i64, DataSourceError> {
    match value {
        Some(v) if v.is_finite() => Ok(v.round() as i64),
        Some(_) => Err(DataSourceError::InvalidRecord(format!(
            "non-finite {field} on {date}"
        ))),
        None => Err(DataSourceError::InvalidRecord(format!(
            "missing {field} on {date}"
        ))),
    }
}
