use std::collections::BTreeMap;
use std::str::FromStr;

use aligner::{align_for_table, nearest_price_for_reports, overlay_on_price_timeline, sort_records};
use analytics::{pearson_matrix, populate_changes, sentiment_score, simulated_matrix};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::Config;
use core_types::{Currency, PricePoint, ReportRecord, SortConfig, Trend};
use data_source::{mock_price_series, mock_report_series};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// The main entry point for the COT dashboard CLI.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = configuration::load_config().context("Failed to load config.toml")?;
    let view = View::resolve(&cli, &config)?;

    match cli.command {
        Commands::Report => handle_report(&view),
        Commands::Sentiment => handle_sentiment(&view),
        Commands::Correlation { pearson } => handle_correlation(&view, pearson),
        Commands::Overlay { nearest } => handle_overlay(&view, nearest),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Commitment of Traders analytics for the major forex currencies.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Primary currency symbol, overriding config.toml (e.g., "EUR").
    #[arg(long, global = true)]
    currency: Option<String>,

    /// Comparison currency symbol; pass "none" to disable a configured one.
    #[arg(long, global = true)]
    compare: Option<String>,

    /// Start of the report window (format: YYYY-MM-DD).
    #[arg(long, global = true)]
    from: Option<NaiveDate>,

    /// End of the report window (format: YYYY-MM-DD).
    #[arg(long, global = true)]
    to: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the COT data table, sentiment summary, and (when a comparison
    /// currency is set) the side-by-side comparison table.
    Report,

    /// Print the sentiment score and trend for the selected currency.
    Sentiment,

    /// Print the currency correlation matrix.
    Correlation {
        /// Compute real Pearson correlation over net positions instead of
        /// the simulated heatmap values.
        #[arg(long)]
        pearson: bool,
    },

    /// Print the price/COT overlay timeline.
    Overlay {
        /// Match the closest price point to each report date instead of
        /// building the exact-date, price-driven timeline.
        #[arg(long)]
        nearest: bool,
    },
}

/// The fully resolved view selection: config.toml defaults with CLI
/// overrides applied.
struct View {
    currency: Currency,
    comparison: Option<Currency>,
    start: NaiveDate,
    end: NaiveDate,
    sort: SortConfig,
    show_price_overlay: bool,
    seed: u64,
}

impl View {
    fn resolve(cli: &Cli, config: &Config) -> anyhow::Result<Self> {
        let currency = match &cli.currency {
            Some(symbol) => Currency::from_str(symbol)?,
            None => config.dashboard.currency,
        };

        let comparison = match &cli.compare {
            Some(symbol) if symbol.eq_ignore_ascii_case("none") => None,
            Some(symbol) => Some(Currency::from_str(symbol)?),
            None => config.dashboard.comparison_currency,
        };

        if comparison == Some(currency) {
            anyhow::bail!("Comparison currency must differ from the primary ({currency})");
        }

        let start = cli.from.unwrap_or(config.dashboard.start_date);
        let end = cli.to.unwrap_or(config.dashboard.end_date);
        if start > end {
            anyhow::bail!("Start date {start} is after end date {end}");
        }

        Ok(Self {
            currency,
            comparison,
            start,
            end,
            sort: SortConfig {
                key: config.dashboard.sort.key,
                direction: config.dashboard.sort.direction,
            },
            show_price_overlay: config.dashboard.show_price_overlay,
            seed: config.data.mock_seed,
        })
    }

    /// Fetches and enriches the report series for one currency.
    fn fetch_reports(&self, currency: Currency, rng: &mut StdRng) -> Vec<ReportRecord> {
        let raw = mock_report_series(currency, self.start, self.end, rng);
        populate_changes(raw)
    }
}

// ==============================================================================
// Command Handlers
// ==============================================================================

fn handle_report(view: &View) -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(view.seed);
    let records = view.fetch_reports(view.currency, &mut rng);
    let sorted = sort_records(&records, &view.sort);

    println!(
        "COT report for {} ({} to {})",
        view.currency, view.start, view.end
    );

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Date",
        "Longs",
        "Shorts",
        "Change Long",
        "Change Short",
        "%Long",
        "%Short",
        "Net Position",
    ]);
    for record in &sorted {
        table.add_row(vec![
            record.date.format("%Y-%m-%d").to_string(),
            record.longs.to_string(),
            record.shorts.to_string(),
            format_change(record.change_long),
            format_change(record.change_short),
            format!("{:.2}%", record.percent_long),
            format!("{:.2}%", record.percent_short),
            record.net_position.to_string(),
        ]);
    }
    println!("{table}");

    print_sentiment_summary(&records);

    if let Some(comparison) = view.comparison {
        let comparison_records = view.fetch_reports(comparison, &mut rng);
        let rows = align_for_table(&records, &comparison_records);

        println!("\nComparison: {} vs {}", view.currency, comparison);
        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(vec![
            "Date".to_string(),
            format!("{} Longs", view.currency),
            format!("{} Shorts", view.currency),
            format!("{} Net", view.currency),
            format!("{} Longs", comparison),
            format!("{} Shorts", comparison),
            format!("{} Net", comparison),
        ]);
        for row in &rows {
            // Inner join: the comparison slot is always present here.
            let Some(other) = &row.comparison else {
                continue;
            };
            table.add_row(vec![
                row.date.format("%Y-%m-%d").to_string(),
                row.primary.longs.to_string(),
                row.primary.shorts.to_string(),
                row.primary.net_position.to_string(),
                other.longs.to_string(),
                other.shorts.to_string(),
                other.net_position.to_string(),
            ]);
        }
        println!("{table}");
    }

    if view.show_price_overlay {
        let prices = mock_price_series(view.currency, view.start, view.end, &mut rng);
        println!("\nPrice overlay for {}", view.currency);
        println!("{}", render_price_timeline(&records, &prices));
    }

    Ok(())
}

fn handle_sentiment(view: &View) -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(view.seed);
    let records = view.fetch_reports(view.currency, &mut rng);

    println!("Market sentiment for {}", view.currency);
    print_sentiment_summary(&records);
    Ok(())
}

fn print_sentiment_summary(records: &[ReportRecord]) {
    let sentiment = sentiment_score(records);
    let description = match sentiment.trend {
        Trend::Bullish => "Institutional traders are net long and increasing positions",
        Trend::Bearish => "Institutional traders are net short and increasing positions",
        Trend::Neutral => "Mixed signals or consolidating market",
    };
    println!(
        "Sentiment: {:.1} ({}) - {}",
        sentiment.score, sentiment.trend, description
    );
}

fn handle_correlation(view: &View, pearson: bool) -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(view.seed);

    let matrix = if pearson {
        let mut series = BTreeMap::new();
        for currency in Currency::ALL {
            series.insert(
                currency,
                mock_report_series(currency, view.start, view.end, &mut rng),
            );
        }
        pearson_matrix(&series)
    } else {
        simulated_matrix(&mut rng)
    };

    println!(
        "Net-position correlation ({})",
        if pearson { "Pearson" } else { "simulated" }
    );

    let mut table = Table::new();
    let mut header = vec![String::new()];
    header.extend(Currency::ALL.iter().map(|c| c.to_string()));
    table.load_preset(UTF8_FULL).set_header(header);

    for row_currency in Currency::ALL {
        let mut row = vec![row_currency.to_string()];
        row.extend(
            matrix
                .row(row_currency)
                .iter()
                .map(|value| format!("{value:.2}")),
        );
        table.add_row(row);
    }
    println!("{table}");

    Ok(())
}

fn handle_overlay(view: &View, nearest: bool) -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(view.seed);
    let records = view.fetch_reports(view.currency, &mut rng);
    let prices = mock_price_series(view.currency, view.start, view.end, &mut rng);

    println!(
        "Price vs COT overlay for {} ({} to {})",
        view.currency, view.start, view.end
    );

    let table = if nearest {
        render_nearest_prices(&records, &prices)
    } else {
        render_price_timeline(&records, &prices)
    };
    println!("{table}");

    Ok(())
}

/// The price-driven timeline: one row per trading day, COT fields where a
/// report landed on that date.
fn render_price_timeline(records: &[ReportRecord], prices: &[PricePoint]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Date",
        "Price",
        "Net Position",
        "%Long",
        "Scaled Net",
    ]);
    for row in overlay_on_price_timeline(records, prices) {
        table.add_row(vec![
            row.date.format("%Y-%m-%d").to_string(),
            format!("{:.4}", row.price),
            row.net_position
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            row.percent_long
                .map(|p| format!("{p:.2}%"))
                .unwrap_or_else(|| "-".to_string()),
            row.scaled_net_position
                .map(|s| format!("{s:.4}"))
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    table
}

/// The report-dated timeline: one row per COT report with its closest price.
fn render_nearest_prices(records: &[ReportRecord], prices: &[PricePoint]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Report Date", "Net Position", "Nearest Price"]);
    for row in nearest_price_for_reports(records, prices) {
        table.add_row(vec![
            row.date.format("%Y-%m-%d").to_string(),
            row.net_position.to_string(),
            row.price
                .map(|p| format!("{p:.4}"))
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    table
}

fn format_change(change: Option<i64>) -> String {
    match change {
        Some(value) if value > 0 => format!("+{value}"),
        Some(value) => value.to_string(),
        None => "-".to_string(),
    }
}
