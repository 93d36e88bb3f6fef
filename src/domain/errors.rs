//! # Domain Errors
//!
//! Error types for fill-forest construction and path arithmetic.
//!
//! Search-internal conditions (contiguity, exclusion, budget exhaustion)
//! are never errors; they prune branches. Only conditions that make the
//! whole request impossible to evaluate surface here.

use crate::domain::value_objects::{ArithmeticError, VenueId};
use thiserror::Error;

/// Domain layer error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Checked arithmetic failed.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),

    /// No native orders were supplied.
    #[error("native order pool is empty")]
    EmptyOrderPool,

    /// More venues were sampled than the source mask can address.
    #[error("too many liquidity sources: {count} venues, at most {max} supported")]
    TooManySources {
        /// Number of venues requested.
        count: usize,
        /// Maximum number of venues supported.
        max: usize,
    },

    /// The fillable snapshot does not line up with the order pool.
    #[error("fillable snapshot covers {snapshots} orders, pool has {orders}")]
    SnapshotMismatch {
        /// Number of orders in the pool.
        orders: usize,
        /// Number of fillable amounts supplied.
        snapshots: usize,
    },

    /// A native order carries an amount that cannot be priced.
    #[error("invalid order {order}: {reason}")]
    InvalidOrder {
        /// The offending order id.
        order: String,
        /// Why the order was rejected.
        reason: &'static str,
    },

    /// A venue fill references a venue without a configured adapter.
    #[error("venue {0} is not in the catalog")]
    UnknownVenue(VenueId),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_converts() {
        let err: DomainError = ArithmeticError::Overflow.into();
        assert_eq!(err.to_string(), "arithmetic error: arithmetic overflow");
    }

    #[test]
    fn too_many_sources_message() {
        let err = DomainError::TooManySources { count: 70, max: 63 };
        assert!(err.to_string().contains("70 venues"));
    }
}
