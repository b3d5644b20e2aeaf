use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use core_types::{PricePoint, ReportRecord};
use rust_decimal::Decimal;
use serde::Serialize;

/// One row of the price-driven overlay timeline: a daily price, with COT
/// fields attached on the days a report exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayRow {
    pub date: DateTime<Utc>,
    pub price: Decimal,
    pub net_position: Option<i64>,
    pub percent_long: Option<f64>,
    /// Net position rescaled into the observed price range, for plotting
    /// both lines against a single price axis.
    pub scaled_net_position: Option<Decimal>,
}

/// One row of the COT-dated overlay: a report's net position with the price
/// point closest to it in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportPricePoint {
    pub date: DateTime<Utc>,
    pub net_position: i64,
    pub price: Option<Decimal>,
}

/// Builds the combined timeline for the price-overlay chart.
///
/// The denser price series drives the timeline: one row per price point,
/// oldest first. COT fields are attached only where a report's normalized
/// date exactly matches the price date — weekly reports appear as sparse
/// markers on the daily line, with no nearest-neighbor matching on this
/// path. Rows carrying a net position also get it rescaled into the price
/// range (see `scale_net_to_price_range`).
pub fn overlay_on_price_timeline(
    reports: &[ReportRecord],
    prices: &[PricePoint],
) -> Vec<OverlayRow> {
    let keyed: BTreeMap<NaiveDate, &ReportRecord> = reports
        .iter()
        .map(|r| (r.date.date_naive(), r))
        .collect();

    let mut rows: Vec<OverlayRow> = prices
        .iter()
        .map(|point| {
            let report = keyed.get(&point.date.date_naive());
            OverlayRow {
                date: point.date,
                price: point.price,
                net_position: report.map(|r| r.net_position),
                percent_long: report.map(|r| r.percent_long),
                scaled_net_position: None,
            }
        })
        .collect();
    rows.sort_by_key(|row| row.date);

    // Scaling needs the observed extremes of both axes.
    let nets: Vec<i64> = rows.iter().filter_map(|r| r.net_position).collect();
    if let (Some(&net_min), Some(&net_max)) = (nets.iter().min(), nets.iter().max()) {
        let price_min = rows.iter().map(|r| r.price).min().unwrap_or_default();
        let price_max = rows.iter().map(|r| r.price).max().unwrap_or_default();

        for row in &mut rows {
            row.scaled_net_position = row
                .net_position
                .map(|net| scale_net_to_price_range(net, net_min, net_max, price_min, price_max));
        }
    }

    rows
}

/// Builds the COT-dated overlay timeline.
///
/// For each report, the price point with the smallest absolute time
/// distance is attached — the variant used when a single price line is
/// drawn onto a report-dated x-axis. `price` is `None` only when the price
/// series is empty. Rows come back oldest first.
pub fn nearest_price_for_reports(
    reports: &[ReportRecord],
    prices: &[PricePoint],
) -> Vec<ReportPricePoint> {
    let mut rows: Vec<ReportPricePoint> = reports
        .iter()
        .map(|report| {
            let nearest = prices
                .iter()
                .min_by_key(|point| (point.date - report.date).abs())
                .map(|point| point.price);
            ReportPricePoint {
                date: report.date,
                net_position: report.net_position,
                price: nearest,
            }
        })
        .collect();

    rows.sort_by_key(|row| row.date);
    rows
}

/// Linearly rescales a net-position value into the observed price range:
/// `(value - net_min) / (net_max - net_min) * (price_max - price_min) + price_min`.
///
/// A degenerate net range (`net_max == net_min`) maps everything to
/// `price_min` instead of dividing by zero.
pub fn scale_net_to_price_range(
    value: i64,
    net_min: i64,
    net_max: i64,
    price_min: Decimal,
    price_max: Decimal,
) -> Decimal {
    if net_max == net_min {
        return price_min;
    }

    let ratio = Decimal::from(value - net_min) / Decimal::from(net_max - net_min);
    ratio * (price_max - price_min) + price_min
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn report(day: u32, longs: i64, shorts: i64) -> ReportRecord {
        let date = Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap();
        ReportRecord::new(date, longs, shorts)
    }

    fn price(day: u32, price: Decimal) -> PricePoint {
        let date = Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap();
        PricePoint { date, price }
    }

    #[test]
    fn timeline_is_price_driven_with_sparse_cot_markers() {
        let reports = vec![report(5, 100, 80), report(12, 120, 70)];
        let prices = vec![
            price(4, dec!(1.08)),
            price(5, dec!(1.09)),
            price(6, dec!(1.10)),
            price(12, dec!(1.11)),
        ];

        let rows = overlay_on_price_timeline(&reports, &prices);
        assert_eq!(rows.len(), prices.len());
        assert_eq!(rows[0].net_position, None);
        assert_eq!(rows[1].net_position, Some(20));
        assert_eq!(rows[2].net_position, None);
        assert_eq!(rows[3].net_position, Some(50));
        assert!(rows.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn scaled_net_spans_the_price_range() {
        let reports = vec![report(5, 100, 80), report(12, 120, 70)];
        let prices = vec![price(5, dec!(1.00)), price(12, dec!(1.50))];

        let rows = overlay_on_price_timeline(&reports, &prices);
        // Net 20 is the observed minimum, net 50 the maximum.
        assert_eq!(rows[0].scaled_net_position, Some(dec!(1.00)));
        assert_eq!(rows[1].scaled_net_position, Some(dec!(1.50)));
    }

    #[test]
    fn degenerate_net_range_maps_to_price_min() {
        assert_eq!(
            scale_net_to_price_range(42, 42, 42, dec!(1.05), dec!(1.20)),
            dec!(1.05)
        );

        // Single report on the timeline: min == max.
        let reports = vec![report(5, 100, 80)];
        let prices = vec![price(4, dec!(1.10)), price(5, dec!(1.30))];
        let rows = overlay_on_price_timeline(&reports, &prices);
        assert_eq!(rows[1].scaled_net_position, Some(dec!(1.10)));
    }

    #[test]
    fn midpoint_scales_linearly() {
        let scaled = scale_net_to_price_range(0, -100, 100, dec!(1.0), dec!(2.0));
        assert_eq!(scaled, dec!(1.5));
    }

    #[test]
    fn nearest_join_picks_closest_price_by_absolute_distance() {
        let reports = vec![report(5, 100, 80)];
        // March 6 is closer to the report than March 3.
        let prices = vec![price(3, dec!(1.00)), price(6, dec!(1.20))];

        let rows = nearest_price_for_reports(&reports, &prices);
        assert_eq!(rows[0].price, Some(dec!(1.20)));
        assert_eq!(rows[0].net_position, 20);
    }

    #[test]
    fn nearest_join_tolerates_empty_price_series() {
        let reports = vec![report(5, 100, 80)];
        let rows = nearest_price_for_reports(&reports, &[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].price, None);
    }

    #[test]
    fn empty_inputs_yield_empty_or_unmarked_output() {
        assert!(overlay_on_price_timeline(&[], &[]).is_empty());

        let prices = vec![price(4, dec!(1.08))];
        let rows = overlay_on_price_timeline(&[], &prices);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].net_position, None);
        assert_eq!(rows[0].scaled_net_position, None);
    }
}
