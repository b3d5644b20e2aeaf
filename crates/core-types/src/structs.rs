use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enums::Trend;

/// One COT report for one currency: the raw position counts plus every
/// derived field the dashboard displays.
///
/// `net_position`, `percent_long`, and `percent_short` are filled by
/// `ReportRecord::new` and always satisfy:
/// - `net_position == longs - shorts`
/// - `percent_long + percent_short ≈ 100` when `longs + shorts > 0`,
///   both exactly `0.0` otherwise.
///
/// The change fields compare against the chronologically preceding report of
/// the same series and are populated by the delta calculator; `None` means
/// "no prior report", which is the deterministic policy for the earliest
/// record in a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub date: DateTime<Utc>,
    pub longs: i64,
    pub shorts: i64,
    pub net_position: i64,
    pub percent_long: f64,
    pub percent_short: f64,
    pub change_long: Option<i64>,
    pub change_short: Option<i64>,
}

impl ReportRecord {
    /// Builds a record from raw counts, computing the derived fields.
    ///
    /// A zero total is a valid degenerate input (both percentages become 0.0
    /// rather than dividing by zero). No further validation happens here:
    /// the acquisition boundary is responsible for rejecting malformed rows.
    pub fn new(date: DateTime<Utc>, longs: i64, shorts: i64) -> Self {
        let total = longs + shorts;
        let (percent_long, percent_short) = if total == 0 {
            (0.0, 0.0)
        } else {
            let pct_long = longs as f64 / total as f64 * 100.0;
            (pct_long, 100.0 - pct_long)
        };

        Self {
            date,
            longs,
            shorts,
            net_position: longs - shorts,
            percent_long,
            percent_short,
            change_long: None,
            change_short: None,
        }
    }
}

/// One daily price observation, used only for chart overlays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: DateTime<Utc>,
    pub price: Decimal,
}

/// The output of the sentiment scorer: a small bounded-ish score and the
/// three-way classification derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub score: f64,
    pub trend: Trend,
}

impl SentimentResult {
    /// The neutral zero result returned for an empty input series.
    pub fn neutral() -> Self {
        Self {
            score: 0.0,
            trend: Trend::Neutral,
        }
    }
}
