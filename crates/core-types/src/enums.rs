use crate::error::ParseCurrencyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed universe of tracked currencies.
///
/// The ordering of `Currency::ALL` is significant: the correlation heatmap
/// treats adjacency in this list as a proxy for market relatedness, and the
/// matrix rows/columns follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Gbp,
    Usd,
    Jpy,
    Chf,
    Aud,
    Cad,
    Nzd,
}

impl Currency {
    /// All tracked currencies, in heatmap order.
    pub const ALL: [Currency; 8] = [
        Currency::Eur,
        Currency::Gbp,
        Currency::Usd,
        Currency::Jpy,
        Currency::Chf,
        Currency::Aud,
        Currency::Cad,
        Currency::Nzd,
    ];

    /// The standard three-letter symbol (e.g., "EUR").
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Usd => "USD",
            Currency::Jpy => "JPY",
            Currency::Chf => "CHF",
            Currency::Aud => "AUD",
            Currency::Cad => "CAD",
            Currency::Nzd => "NZD",
        }
    }

    /// Position of this currency within `Currency::ALL`.
    pub fn index(&self) -> usize {
        Currency::ALL
            .iter()
            .position(|c| c == self)
            .unwrap_or_default()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = ParseCurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            "USD" => Ok(Currency::Usd),
            "JPY" => Ok(Currency::Jpy),
            "CHF" => Ok(Currency::Chf),
            "AUD" => Ok(Currency::Aud),
            "CAD" => Ok(Currency::Cad),
            "NZD" => Ok(Currency::Nzd),
            other => Err(ParseCurrencyError(other.to_string())),
        }
    }
}

/// Three-way classification produced by the sentiment scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Trend::Bullish => "bullish",
            Trend::Bearish => "bearish",
            Trend::Neutral => "neutral",
        };
        f.write_str(s)
    }
}

/// The record field a table or chart consumer wants to order by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Date,
    Longs,
    Shorts,
    ChangeLong,
    ChangeShort,
    PercentLong,
    PercentShort,
    NetPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    ///
    /// Repeated selection of the same column flips the order; that toggle is
    /// a caller convenience, not something the sorter tracks.
    pub fn toggle(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// A complete sort request: which field, and which way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    /// Newest report first, matching the default table view.
    fn default() -> Self {
        Self {
            key: SortKey::Date,
            direction: SortDirection::Desc,
        }
    }
}
