use core_types::{ReportRecord, SentimentResult, Trend};

/// Maximum number of recent reports the scorer looks at.
const WINDOW: usize = 4;

/// Net-position divisor for the base score, before clamping to [-5, 5].
const BASE_SCALE: f64 = 20_000.0;

/// Reduces a report series to a sentiment score and trend classification.
///
/// Only the most recent `WINDOW` reports contribute. The base score comes
/// from the latest net position, clamped to [-5, 5]; each consecutive pair
/// of reports then adds a long-percentage swing term, weighted down the
/// further back the pair sits (`1 / (pair index + 1)`), and votes on the
/// trend direction via the sign of the net-position change.
///
/// Classification is deliberately asymmetric-guarded: a strongly positive
/// score with a flat or falling net position stays neutral, because
/// conviction without direction is not actionable.
///
/// The input may arrive in any order; the scorer works on its own
/// newest-first copy. An empty series yields `{0.0, Neutral}`.
pub fn sentiment_score(records: &[ReportRecord]) -> SentimentResult {
    if records.is_empty() {
        return SentimentResult::neutral();
    }

    let mut recent: Vec<&ReportRecord> = records.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(WINDOW);

    let base_score = (recent[0].net_position as f64 / BASE_SCALE).clamp(-5.0, 5.0);

    let mut trend_score = 0.0;
    let mut trend_direction: i32 = 0;

    for (i, pair) in recent.windows(2).enumerate() {
        let current = pair[0];
        let previous = pair[1];

        trend_direction += (current.net_position - previous.net_position).signum() as i32;

        let long_percent_change = current.percent_long - previous.percent_long;
        let weight = 1.0 / (i as f64 + 1.0);
        trend_score += long_percent_change * 10.0 * weight;
    }

    let score = base_score + trend_score;

    let trend = if score > 2.0 && trend_direction > 0 {
        Trend::Bullish
    } else if score < -2.0 && trend_direction < 0 {
        Trend::Bearish
    } else {
        Trend::Neutral
    };

    tracing::debug!(
        score,
        trend_direction,
        "Sentiment over {} report(s): {}",
        recent.len(),
        trend
    );

    SentimentResult { score, trend }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{DateTime, TimeZone, Utc};

    fn record(day: u32, longs: i64, shorts: i64) -> ReportRecord {
        let date: DateTime<Utc> = Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap();
        ReportRecord::new(date, longs, shorts)
    }

    #[test]
    fn empty_series_is_neutral_zero() {
        let result = sentiment_score(&[]);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.trend, Trend::Neutral);
    }

    #[test]
    fn single_record_is_clamped_base_score_with_neutral_trend() {
        let result = sentiment_score(&[record(5, 30_000, 10_000)]);
        assert_relative_eq!(result.score, 1.0); // 20_000 / 20_000
        assert_eq!(result.trend, Trend::Neutral);

        // Far beyond the clamp bound.
        let extreme = sentiment_score(&[record(5, 500_000, 0)]);
        assert_relative_eq!(extreme.score, 5.0);
        assert_eq!(extreme.trend, Trend::Neutral);
    }

    #[test]
    fn rising_net_position_and_long_share_reads_bullish() {
        // Newest first after the internal sort: day 26 has the largest net
        // position and long share, day 5 the smallest.
        let series = vec![
            record(5, 100_000, 95_000),
            record(12, 110_000, 90_000),
            record(19, 125_000, 85_000),
            record(26, 140_000, 80_000),
        ];
        let result = sentiment_score(&series);
        assert!(result.score > 2.0);
        assert_eq!(result.trend, Trend::Bullish);
    }

    #[test]
    fn falling_net_position_reads_bearish() {
        let series = vec![
            record(5, 140_000, 80_000),
            record(12, 125_000, 85_000),
            record(19, 110_000, 90_000),
            record(26, 100_000, 95_000),
        ];
        let result = sentiment_score(&series);
        assert!(result.score < -2.0);
        assert_eq!(result.trend, Trend::Bearish);
    }

    #[test]
    fn high_score_without_direction_stays_neutral() {
        // Huge net long, but positioning is flat week over week: the
        // direction vote is 0, so the classification must not be bullish.
        let series = vec![record(12, 300_000, 100_000), record(19, 300_000, 100_000)];
        let result = sentiment_score(&series);
        assert!(result.score > 2.0);
        assert_eq!(result.trend, Trend::Neutral);
    }

    #[test]
    fn only_four_most_recent_reports_contribute() {
        let mut series = vec![
            record(1, 100_000, 95_000),
            record(8, 110_000, 90_000),
            record(15, 125_000, 85_000),
            record(22, 140_000, 80_000),
        ];
        let windowed = sentiment_score(&series);

        // An older fifth report must not change the result.
        series.insert(0, record(25, 1, 1_000_000));
        series[0].date = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let with_stale = sentiment_score(&series);

        assert_relative_eq!(windowed.score, with_stale.score);
        assert_eq!(windowed.trend, with_stale.trend);
    }

    #[test]
    fn pair_weights_decay_with_age() {
        let series = vec![
            record(5, 100, 100),   // 50% long
            record(12, 150, 100),  // 60% long
            record(19, 300, 100),  // 75% long
        ];
        let result = sentiment_score(&series);

        // base = 200/20000; pair0 (19 vs 12): +15 * 10 * 1; pair1 (12 vs 5): +10 * 10 * 0.5
        let expected = 200.0 / 20_000.0 + 15.0 * 10.0 + 10.0 * 10.0 * 0.5;
        assert_relative_eq!(result.score, expected, epsilon = 1e-9);
        assert_eq!(result.trend, Trend::Bullish);
    }
}
