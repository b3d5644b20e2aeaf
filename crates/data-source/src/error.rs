use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataSourceError {
    /// A row from the external feed could not be mapped to a `ReportRecord`.
    /// The caller decides whether to drop the row or flag it; the core never
    /// zero-fills malformed input silently.
    #[error("Invalid report row: {0}")]
    InvalidRecord(String),

    #[error("Failed to decode feed payload: {0}")]
    Decode(#[from] serde_json::Error),
}
