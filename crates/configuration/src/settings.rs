use chrono::NaiveDate;
use core_types::{Currency, SortDirection, SortKey};
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub dashboard: Dashboard,
    pub data: DataSettings,
}

/// The default dashboard view: which currency, which window, which order.
#[derive(Debug, Clone, Deserialize)]
pub struct Dashboard {
    /// The primary currency whose COT series is analyzed.
    pub currency: Currency,
    /// Optional second currency for side-by-side comparison views.
    pub comparison_currency: Option<Currency>,
    /// Start of the report window (inclusive).
    pub start_date: NaiveDate,
    /// End of the report window (inclusive).
    pub end_date: NaiveDate,
    /// Default ordering for the data table.
    pub sort: SortSettings,
    /// Whether the net-position chart also draws the daily price line.
    pub show_price_overlay: bool,
}

/// Table/chart ordering, as stored in `config.toml`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SortSettings {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Parameters for the mock data feed.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    /// Seed for the mock generators; the same seed reproduces the same
    /// series and simulated correlation matrix.
    pub mock_seed: u64,
}
