use chrono::{Datelike, NaiveDate, Weekday};
use core_types::{Currency, PricePoint, ReportRecord};
use rand::Rng;
use rust_decimal::Decimal;

/// Per-currency baseline long/short contract counts for the mock feed.
fn base_positions(currency: Currency) -> (f64, f64) {
    match currency {
        Currency::Eur => (200_000.0, 180_000.0),
        Currency::Gbp => (150_000.0, 160_000.0),
        Currency::Usd => (250_000.0, 220_000.0),
        Currency::Jpy => (120_000.0, 140_000.0),
        Currency::Chf => (100_000.0, 90_000.0),
        Currency::Aud | Currency::Cad | Currency::Nzd => (180_000.0, 170_000.0),
    }
}

/// Per-currency baseline price for the mock daily walk.
fn base_price(currency: Currency) -> f64 {
    match currency {
        Currency::Eur => 1.08,
        Currency::Gbp => 1.25,
        Currency::Usd => 1.0,
        Currency::Jpy => 0.0067,
        Currency::Chf => 1.12,
        Currency::Aud => 0.65,
        Currency::Cad => 0.73,
        Currency::Nzd => 0.6,
    }
}

/// Generates a mock COT series for the given currency and date range.
///
/// Reports land on Tuesdays (the real publication cadence); a range without
/// a Tuesday still yields one report on the start date. Counts follow a slow
/// sine-wave positioning cycle (±20%) with ±5% per-report noise, shorts
/// moving counter to longs. Records come back newest first, matching the
/// feed, and with change fields unset — running the delta calculator is the
/// caller's job, so deltas have exactly one source of truth.
///
/// All randomness comes from the supplied `rng`; seed it for reproducible
/// series.
pub fn mock_report_series<R: Rng>(
    currency: Currency,
    start: NaiveDate,
    end: NaiveDate,
    rng: &mut R,
) -> Vec<ReportRecord> {
    let (base_longs, base_shorts) = base_positions(currency);

    let mut report_dates: Vec<NaiveDate> = start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| d.weekday() == Weekday::Tue)
        .collect();
    if report_dates.is_empty() {
        report_dates.push(start);
    }

    tracing::debug!(
        "Generating {} mock COT report(s) for {}",
        report_dates.len(),
        currency
    );

    let mut records: Vec<ReportRecord> = report_dates
        .iter()
        .enumerate()
        .map(|(index, date)| {
            let trend = (index as f64 / 2.0).sin();
            let trend_factor = 1.0 + trend * 0.2;

            let longs =
                (base_longs * trend_factor * (1.0 + rng.gen_range(-0.05..0.05))).round() as i64;
            let shorts = (base_shorts * (2.0 - trend_factor) * (1.0 + rng.gen_range(-0.05..0.05)))
                .round() as i64;

            let timestamp = date
                .and_hms_opt(0, 0, 0)
                .unwrap_or_default()
                .and_utc();
            ReportRecord::new(timestamp, longs, shorts)
        })
        .collect();

    // Newest first, like the real feed.
    records.sort_by(|a, b| b.date.cmp(&a.date));
    records
}

/// Generates a mock daily price series that loosely cycles with the COT
/// positioning data.
///
/// Weekdays only. Each day multiplies the running price by a cyclical
/// component (`sin(day / 20) * 0.02`), daily noise of ±0.25%, and a coin-flip
/// drift of ±2 bp. Prices are emitted oldest first.
pub fn mock_price_series<R: Rng>(
    currency: Currency,
    start: NaiveDate,
    end: NaiveDate,
    rng: &mut R,
) -> Vec<PricePoint> {
    let mut current_price = base_price(currency);
    let mut points = Vec::new();

    for date in start.iter_days().take_while(|d| *d <= end) {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }

        let days_since_start = (date - start).num_days() as f64;
        let cyclical = (days_since_start / 20.0).sin() * 0.02;
        let noise = rng.gen_range(-0.0025..0.0025);
        let drift = if rng.gen_bool(0.5) { 0.0002 } else { -0.0002 };

        current_price *= 1.0 + cyclical + noise + drift;

        points.push(PricePoint {
            date: date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc(),
            price: Decimal::from_f64_retain(current_price).unwrap_or_default(),
        });
    }

    points
}
