//! # Data Source
//!
//! The acquisition boundary of the dashboard. Everything upstream of here
//! (HTTP transport, scheduling, retries) is out of scope; this crate owns
//! the two things the core needs from the outside world:
//!
//! - a typed adapter from the feed's loosely keyed JSON rows to the
//!   canonical `ReportRecord`, surfacing malformed rows as
//!   `DataSourceError::InvalidRecord` instead of silent zeros, and
//! - seeded mock COT/price generators standing in for the real feed, with
//!   all randomness injected through `rand::Rng` so output is reproducible.

pub mod error;
pub mod mock;
pub mod raw;

// Re-export the key components to create a clean, public-facing API.
pub use error::DataSourceError;
pub use mock::{mock_price_series, mock_report_series};
pub use raw::{RawReportRow, decode_reports};
