use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown currency symbol: {0}")]
pub struct ParseCurrencyError(pub String);
