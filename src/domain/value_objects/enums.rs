//! # Domain Enums
//!
//! Enumeration types for aggregation requests.
//!
//! - [`TradeSide`] - Sell an exact input amount or buy an exact output amount
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of an aggregation request.
///
/// Both sides are optimized in the same terms: a fill's `input` is the
/// dimension capped by the requested amount and its `output` is the
/// dimension being optimized. For a sell the output is maximized; for a
/// buy the output is the cost paid and is minimized.
///
/// # Examples
///
/// ```
/// use liquidity_aggregator::domain::value_objects::enums::TradeSide;
///
/// assert!(TradeSide::Buy.minimizes_output());
/// assert!(!TradeSide::Sell.minimizes_output());
/// assert_eq!(TradeSide::Sell.to_string(), "SELL");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum TradeSide {
    /// Sell an exact amount of the taker asset for as much maker asset as possible.
    Sell = 0,
    /// Buy an exact amount of the maker asset for as little taker asset as possible.
    Buy = 1,
}

impl TradeSide {
    /// Returns true if this is a buy request.
    #[inline]
    #[must_use]
    pub const fn is_buy(self) -> bool {
        matches!(self, Self::Buy)
    }

    /// Returns true if this is a sell request.
    #[inline]
    #[must_use]
    pub const fn is_sell(self) -> bool {
        matches!(self, Self::Sell)
    }

    /// Returns true if a lower path output is better on this side.
    #[inline]
    #[must_use]
    pub const fn minimizes_output(self) -> bool {
        self.is_buy()
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sell => write!(f, "SELL"),
            Self::Buy => write!(f, "BUY"),
        }
    }
}

impl FromStr for TradeSide {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SELL" => Ok(Self::Sell),
            "BUY" => Ok(Self::Buy),
            _ => Err(ParseEnumError::InvalidValue("TradeSide", s.to_string())),
        }
    }
}

/// Error returned when parsing an enum from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The value is not a valid variant (enum name, offending value).
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}
