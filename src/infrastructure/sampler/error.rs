//! # Sampler Errors
//!
//! Error types for the liquidity sampler port.
//!
//! Sampler failures are never retried or masked by the aggregator; they are
//! surfaced to the caller, who can use [`SamplerError::is_retryable`] to
//! decide whether to try again.
//!
//! # Examples
//!
//! ```
//! use liquidity_aggregator::infrastructure::sampler::error::SamplerError;
//!
//! let error = SamplerError::timeout("on-chain query timed out");
//! assert!(error.is_retryable());
//!
//! let error = SamplerError::malformed_batch("sample count mismatch");
//! assert!(!error.is_retryable());
//! ```

use crate::domain::value_objects::VenueId;
use thiserror::Error;

/// Error type for sampler operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SamplerError {
    /// The sampling call timed out.
    #[error("sampler timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Timeout duration in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// Network or node connection error.
    #[error("sampler connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// A venue could not be sampled.
    #[error("venue unavailable: {venue_id} - {message}")]
    VenueUnavailable {
        /// The venue ID.
        venue_id: VenueId,
        /// Error message.
        message: String,
    },

    /// The returned batch does not describe the request.
    #[error("malformed sample batch: {message}")]
    MalformedBatch {
        /// Error message.
        message: String,
    },

    /// Internal sampler error.
    #[error("sampler internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl SamplerError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with duration.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a venue unavailable error.
    #[must_use]
    pub fn venue_unavailable(venue_id: VenueId, message: impl Into<String>) -> Self {
        Self::VenueUnavailable {
            venue_id,
            message: message.into(),
        }
    }

    /// Creates a malformed batch error.
    #[must_use]
    pub fn malformed_batch(message: impl Into<String>) -> Self {
        Self::MalformedBatch {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if repeating the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Connection { .. } | Self::VenueUnavailable { .. }
        )
    }
}

/// Result type for sampler operations.
pub type SamplerResult<T> = Result<T, SamplerError>;
