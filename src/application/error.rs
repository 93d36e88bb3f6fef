//! # Application Errors
//!
//! Error types for the aggregation entry points.
//!
//! # Error Hierarchy
//!
//! ```text
//! AggregationError
//! ├── EmptyOrderPool              - No native orders supplied
//! ├── InsufficientLiquidity       - No path covers the requested amount
//! ├── Sampler(SamplerError)       - Sampling failed or returned a bad batch
//! ├── InvalidOptions(String)      - Amount or options out of range
//! └── Domain(DomainError)         - Arithmetic overflow, too many sources
//! ```
//!
//! # Examples
//!
//! ```
//! use liquidity_aggregator::application::error::AggregationError;
//! use liquidity_aggregator::infrastructure::sampler::SamplerError;
//!
//! let err: AggregationError = SamplerError::timeout("slow node").into();
//! assert!(err.is_retryable());
//!
//! let err = AggregationError::invalid_options("slippage must be below 1");
//! assert!(!err.is_retryable());
//! ```

use crate::domain::errors::DomainError;
use crate::infrastructure::sampler::SamplerError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned by `improve_sell` and `improve_buy`.
///
/// No variant carries a partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregationError {
    /// The native order pool was empty.
    #[error("native order pool is empty")]
    EmptyOrderPool,

    /// No complete path covers the requested amount.
    ///
    /// Usually `available < requested`. When no single source covers the
    /// amount and the run limit is spent before a covering combination is
    /// found, `available` can be at least `requested`; raising the run
    /// limit may then succeed.
    #[error("insufficient liquidity: requested {requested}, available {available}")]
    InsufficientLiquidity {
        /// Amount the caller asked for.
        requested: Decimal,
        /// Total amount the sampled sources could provide.
        available: Decimal,
    },

    /// The sampler failed.
    #[error("sampler failure: {0}")]
    Sampler(#[from] SamplerError),

    /// The request or its options are out of range.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// A domain operation failed.
    #[error("domain error: {0}")]
    Domain(DomainError),
}

impl AggregationError {
    /// Creates an invalid options error.
    #[must_use]
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions(message.into())
    }

    /// Returns true if repeating the call may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Sampler(error) => error.is_retryable(),
            _ => false,
        }
    }
}

impl From<DomainError> for AggregationError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::EmptyOrderPool => Self::EmptyOrderPool,
            other => Self::Domain(other),
        }
    }
}

/// Result type for aggregation calls.
pub type AggregationResult<T> = Result<T, AggregationError>;
