//! # COT Analytics
//!
//! The derived-metric layer of the dashboard: everything that turns raw
//! per-report position counts into the numbers the presentation layer shows.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems and depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Every operation is a plain function over
//!   in-memory series. Nothing here caches, suspends, or performs I/O;
//!   recomputation on input change is the caller's job.
//!
//! ## Public API
//!
//! - `populate_changes`: fills period-over-period change fields.
//! - `sentiment_score`: reduces recent reports to a bounded score and a
//!   bullish/bearish/neutral classification.
//! - `simulated_matrix` / `pearson_matrix`: the correlation heatmap inputs,
//!   as the declared simulation and as a real Pearson computation.

pub mod correlation;
pub mod delta;
pub mod sentiment;

// Re-export the key components to create a clean, public-facing API.
pub use correlation::{CorrelationMatrix, pearson_matrix, simulated_matrix};
pub use delta::populate_changes;
pub use sentiment::sentiment_score;
