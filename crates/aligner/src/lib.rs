//! # Series Aligner
//!
//! Merges heterogeneous time series for joint display: two currencies on
//! different report calendars, or weekly COT reports against daily prices.
//! Also home to the sort view that tables and charts share.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** Pure functions over in-memory series; depends only
//!   on `core-types`.
//! - **Two join semantics, by design:** the comparison table inner-joins
//!   (rows only where both currencies reported) while chart overlays
//!   left-join from the primary series. Both are deliberate product
//!   behaviors and are exposed as separately named operations.
//! - **No synthesis:** a missing companion value is absent, never
//!   interpolated or carried forward.
//!
//! ## Public API
//!
//! - `align_for_table` / `align_for_chart`: currency-to-currency modes.
//! - `overlay_on_price_timeline` / `nearest_price_for_reports`: the two
//!   price-overlay matching strategies.
//! - `scale_net_to_price_range`: linear rescale for the shared price axis.
//! - `sort_records`: stable field/direction ordering for view consumers.

pub mod comparison;
pub mod overlay;
pub mod sort;

// Re-export the key components to create a clean, public-facing API.
pub use comparison::{ComparisonRow, align_for_chart, align_for_table};
pub use overlay::{
    OverlayRow, ReportPricePoint, nearest_price_for_reports, overlay_on_price_timeline,
    scale_net_to_price_range,
};
pub use sort::sort_records;
