pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{Currency, SortConfig, SortDirection, SortKey, Trend};
pub use error::ParseCurrencyError;
pub use structs::{PricePoint, ReportRecord, SentimentResult};
