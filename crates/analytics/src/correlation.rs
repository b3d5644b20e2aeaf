use std::collections::BTreeMap;

use chrono::NaiveDate;
use core_types::{Currency, ReportRecord};
use rand::Rng;
use serde::Serialize;

/// Number of currencies in the fixed universe (`Currency::ALL`).
pub const UNIVERSE: usize = Currency::ALL.len();

/// Adjacency window within `Currency::ALL` that implies a higher base
/// correlation in the simulated matrix.
const NEIGHBOR_DISTANCE: usize = 3;

/// A square correlation matrix over the fixed currency universe.
///
/// Rows and columns follow `Currency::ALL`. The diagonal is exactly 1.0 and
/// every cell lies in [-1, 1]; both generators produce symmetric matrices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    cells: [[f64; UNIVERSE]; UNIVERSE],
}

impl CorrelationMatrix {
    /// The correlation between two currencies.
    pub fn value(&self, a: Currency, b: Currency) -> f64 {
        self.cells[a.index()][b.index()]
    }

    /// One full row, in `Currency::ALL` column order.
    pub fn row(&self, currency: Currency) -> &[f64; UNIVERSE] {
        &self.cells[currency.index()]
    }
}

/// Generates the simulated correlation matrix used by the heatmap.
///
/// This is a declared stand-in, not a statistical computation: cells start
/// from a base of 0.7 for near neighbors in the universe ordering (0.2
/// otherwise), get a uniform perturbation in [-0.3, 0.3), and are clamped
/// to [-1, 1]. The upper triangle is generated and mirrored, so symmetry is
/// structural. Pass a seeded `StdRng` for reproducible output.
pub fn simulated_matrix<R: Rng>(rng: &mut R) -> CorrelationMatrix {
    let mut cells = [[1.0; UNIVERSE]; UNIVERSE];

    for i in 0..UNIVERSE {
        for j in (i + 1)..UNIVERSE {
            let base: f64 = if j - i < NEIGHBOR_DISTANCE { 0.7 } else { 0.2 };
            let perturbation = rng.gen_range(-0.3..0.3);
            let value = (base + perturbation).clamp(-1.0, 1.0);
            cells[i][j] = value;
            cells[j][i] = value;
        }
    }

    CorrelationMatrix { cells }
}

/// Computes the real Pearson correlation of net positions across the
/// universe, pairing reports by normalized date.
///
/// Currencies missing from the input, pairs with fewer than two shared
/// report dates, and zero-variance series all produce a 0.0 cell; the
/// diagonal stays exactly 1.0 regardless.
pub fn pearson_matrix(
    series_by_currency: &BTreeMap<Currency, Vec<ReportRecord>>,
) -> CorrelationMatrix {
    let mut cells = [[1.0; UNIVERSE]; UNIVERSE];

    let keyed: BTreeMap<Currency, BTreeMap<NaiveDate, f64>> = series_by_currency
        .iter()
        .map(|(&currency, records)| {
            let by_date = records
                .iter()
                .map(|r| (r.date.date_naive(), r.net_position as f64))
                .collect();
            (currency, by_date)
        })
        .collect();

    for (i, &a) in Currency::ALL.iter().enumerate() {
        for (j, &b) in Currency::ALL.iter().enumerate().skip(i + 1) {
            let value = match (keyed.get(&a), keyed.get(&b)) {
                (Some(series_a), Some(series_b)) => paired_pearson(series_a, series_b),
                _ => 0.0,
            };
            cells[i][j] = value;
            cells[j][i] = value;
        }
    }

    CorrelationMatrix { cells }
}

/// Pearson coefficient over the date intersection of two keyed series.
fn paired_pearson(a: &BTreeMap<NaiveDate, f64>, b: &BTreeMap<NaiveDate, f64>) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .filter_map(|(date, &x)| b.get(date).map(|&y| (x, y)))
        .collect();

    if pairs.len() < 2 {
        tracing::debug!("Fewer than two shared report dates; correlation defaults to 0");
        return 0.0;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return 0.0;
    }

    (covariance / (var_x * var_y).sqrt()).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{DateTime, TimeZone, Utc};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn record(day: u32, longs: i64, shorts: i64) -> ReportRecord {
        let date: DateTime<Utc> = Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap();
        ReportRecord::new(date, longs, shorts)
    }

    #[test]
    fn simulated_matrix_has_unit_diagonal_and_bounded_cells() {
        let mut rng = StdRng::seed_from_u64(42);
        let matrix = simulated_matrix(&mut rng);

        for a in Currency::ALL {
            assert_eq!(matrix.value(a, a), 1.0);
            for b in Currency::ALL {
                let value = matrix.value(a, b);
                assert!((-1.0..=1.0).contains(&value));
                assert_relative_eq!(value, matrix.value(b, a));
            }
        }
    }

    #[test]
    fn simulated_matrix_is_reproducible_for_a_seed() {
        let first = simulated_matrix(&mut StdRng::seed_from_u64(7));
        let second = simulated_matrix(&mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
    }

    #[test]
    fn pearson_detects_perfect_positive_and_negative_correlation() {
        let eur = vec![record(5, 100, 0), record(12, 200, 0), record(19, 300, 0)];
        // GBP nets move in lockstep with EUR, JPY nets are the exact inverse.
        let gbp = vec![record(5, 110, 0), record(12, 210, 0), record(19, 310, 0)];
        let jpy = vec![record(5, 0, 100), record(12, 0, 200), record(19, 0, 300)];

        let mut series = BTreeMap::new();
        series.insert(Currency::Eur, eur);
        series.insert(Currency::Gbp, gbp);
        series.insert(Currency::Jpy, jpy);

        let matrix = pearson_matrix(&series);
        assert_relative_eq!(matrix.value(Currency::Eur, Currency::Gbp), 1.0, epsilon = 1e-9);
        assert_relative_eq!(matrix.value(Currency::Eur, Currency::Jpy), -1.0, epsilon = 1e-9);
        assert_relative_eq!(
            matrix.value(Currency::Gbp, Currency::Eur),
            matrix.value(Currency::Eur, Currency::Gbp)
        );
    }

    #[test]
    fn missing_or_thin_series_default_to_zero() {
        let mut series = BTreeMap::new();
        series.insert(Currency::Eur, vec![record(5, 100, 0), record(12, 200, 0)]);
        // CHF only overlaps EUR on a single date.
        series.insert(Currency::Chf, vec![record(5, 50, 0), record(26, 60, 0)]);

        let matrix = pearson_matrix(&series);
        assert_eq!(matrix.value(Currency::Eur, Currency::Chf), 0.0);
        assert_eq!(matrix.value(Currency::Eur, Currency::Usd), 0.0);
        assert_eq!(matrix.value(Currency::Usd, Currency::Usd), 1.0);
    }

    #[test]
    fn zero_variance_series_yields_zero_not_nan() {
        let mut series = BTreeMap::new();
        series.insert(Currency::Eur, vec![record(5, 100, 0), record(12, 200, 0)]);
        series.insert(Currency::Gbp, vec![record(5, 70, 0), record(12, 70, 0)]);

        let matrix = pearson_matrix(&series);
        assert_eq!(matrix.value(Currency::Eur, Currency::Gbp), 0.0);
    }
}
