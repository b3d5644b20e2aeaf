use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use core_types::ReportRecord;
use serde::Serialize;

/// One time-keyed row merging the primary series with an optional
/// comparison-currency record on the same normalized date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub date: DateTime<Utc>,
    pub primary: ReportRecord,
    pub comparison: Option<ReportRecord>,
}

/// Inner-join alignment for the side-by-side comparison table.
///
/// A row is produced only where both currencies reported on the same
/// normalized date; unmatched primary rows are discarded. Rows come back
/// newest first, the table's default order.
pub fn align_for_table(
    primary: &[ReportRecord],
    comparison: &[ReportRecord],
) -> Vec<ComparisonRow> {
    let keyed = key_by_date(comparison);

    let mut rows: Vec<ComparisonRow> = primary
        .iter()
        .filter_map(|record| {
            keyed.get(&record.date.date_naive()).map(|&matched| ComparisonRow {
                date: record.date,
                primary: record.clone(),
                comparison: Some(matched.clone()),
            })
        })
        .collect();

    rows.sort_by(|a, b| b.date.cmp(&a.date));
    tracing::debug!(
        "Table alignment: {} of {} primary row(s) matched",
        rows.len(),
        primary.len()
    );
    rows
}

/// Left-join alignment for chart overlays.
///
/// Every primary record produces a row; the comparison record is attached
/// where its series reported on the same normalized date and left absent
/// otherwise — never interpolated or carried forward. Rows come back oldest
/// first for chart x-axes.
pub fn align_for_chart(
    primary: &[ReportRecord],
    comparison: &[ReportRecord],
) -> Vec<ComparisonRow> {
    let keyed = key_by_date(comparison);

    let mut rows: Vec<ComparisonRow> = primary
        .iter()
        .map(|record| ComparisonRow {
            date: record.date,
            primary: record.clone(),
            comparison: keyed.get(&record.date.date_naive()).map(|&r| r.clone()),
        })
        .collect();

    rows.sort_by_key(|row| row.date);
    rows
}

fn key_by_date(records: &[ReportRecord]) -> BTreeMap<NaiveDate, &ReportRecord> {
    records.iter().map(|r| (r.date.date_naive(), r)).collect()
}
