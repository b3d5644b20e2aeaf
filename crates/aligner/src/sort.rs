use std::cmp::Ordering;

use core_types::{ReportRecord, SortConfig, SortDirection, SortKey};

/// Returns a new series ordered by the requested field and direction; the
/// input is never mutated.
///
/// Date sorts by timestamp, count fields by value, and percentage fields by
/// `f64::total_cmp`. Change fields order their `None` ("no prior report")
/// entries first ascending. The underlying sort is stable, so ties keep
/// their incoming relative order.
pub fn sort_records(records: &[ReportRecord], config: &SortConfig) -> Vec<ReportRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare_by_key(a, b, config.key);
        match config.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    sorted
}

fn compare_by_key(a: &ReportRecord, b: &ReportRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.date.cmp(&b.date),
        SortKey::Longs => a.longs.cmp(&b.longs),
        SortKey::Shorts => a.shorts.cmp(&b.shorts),
        SortKey::ChangeLong => a.change_long.cmp(&b.change_long),
        SortKey::ChangeShort => a.change_short.cmp(&b.change_short),
        SortKey::PercentLong => a.percent_long.total_cmp(&b.percent_long),
        SortKey::PercentShort => a.percent_short.total_cmp(&b.percent_short),
        SortKey::NetPosition => a.net_position.cmp(&b.net_position),
    }
}
