use core_types::ReportRecord;

/// Fills the period-over-period change fields of a report series.
///
/// Records may arrive in any order; the calculation always runs over a
/// chronologically ascending copy, and the result is returned in that order.
/// The earliest record of the series has no predecessor, so its change
/// fields stay `None` — an explicit "no prior data" marker rather than a
/// fabricated value.
pub fn populate_changes(records: Vec<ReportRecord>) -> Vec<ReportRecord> {
    let mut sorted = records;
    sorted.sort_by_key(|r| r.date);

    tracing::debug!("Populating change fields for {} report(s)", sorted.len());

    for i in 1..sorted.len() {
        let previous = &sorted[i - 1];
        let change_long = sorted[i].longs - previous.longs;
        let change_short = sorted[i].shorts - previous.shorts;
        sorted[i].change_long = Some(change_long);
        sorted[i].change_short = Some(change_short);
    }

    sorted
}
