//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`OrderId`]: UUID of a native resting order
//! - [`VenueId`]: String id of an external venue
//!
//! ## Arithmetic
//!
//! - [`ArithmeticError`]: Error type for arithmetic failures
//! - [`CheckedArithmetic`]: Trait for safe arithmetic operations
//! - [`Rounding`]: Enum for explicit rounding direction
//!
//! ## Liquidity Description
//!
//! - [`SourceFlags`]: Bitmask of liquidity sources
//! - [`VenueSamples`]: Cumulative venue price samples
//!
//! ## Domain Enums
//!
//! - [`TradeSide`]: Sell or Buy

pub mod arithmetic;
pub mod enums;
pub mod ids;
pub mod sample;
pub mod source_flags;
pub mod timestamp;

pub use arithmetic::{
    ArithmeticError, ArithmeticResult, CheckedArithmetic, Rounding, mul_div, round_to_units,
};
pub use enums::{ParseEnumError, TradeSide};
pub use ids::{OrderId, VenueId};
pub use sample::{Sample, VenueSamples};
pub use source_flags::SourceFlags;
pub use timestamp::Timestamp;
