//! # Checked Arithmetic
//!
//! Traits and utilities for safe arithmetic on fill amounts.
//!
//! This module provides:
//! - [`ArithmeticError`] - Error type for arithmetic failures
//! - [`CheckedArithmetic`] - Trait for safe arithmetic operations
//! - [`Rounding`] - Enum for explicit rounding direction
//! - [`mul_div`] - Prorating helper (`value * numerator / denominator`)
//! - [`round_to_units`] - Rounds an amount to whole base units
//!
//! # Examples
//!
//! ```
//! use liquidity_aggregator::domain::value_objects::arithmetic::{CheckedArithmetic, ArithmeticError};
//! use rust_decimal::Decimal;
//!
//! let a = Decimal::new(100, 0);
//! let b = Decimal::new(3, 0);
//! assert!(a.safe_div(b).is_ok());
//! assert_eq!(a.safe_div(Decimal::ZERO), Err(ArithmeticError::DivisionByZero));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error type for arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ArithmeticError {
    /// Arithmetic operation resulted in overflow.
    #[error("arithmetic overflow")]
    Overflow,

    /// Arithmetic operation resulted in underflow.
    #[error("arithmetic underflow")]
    Underflow,

    /// Division by zero attempted.
    #[error("division by zero")]
    DivisionByZero,
}

/// Result type for arithmetic operations.
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// Rounding direction for amounts handed to a counterparty.
///
/// Amounts the counterparty must deliver round [`Rounding::Down`];
/// amounts the counterparty may demand round [`Rounding::Up`].
///
/// # Examples
///
/// ```
/// use liquidity_aggregator::domain::value_objects::arithmetic::{Rounding, round_to_units};
/// use rust_decimal::Decimal;
///
/// let value = Decimal::new(1005, 1); // 100.5
/// assert_eq!(round_to_units(value, Rounding::Down), Decimal::new(100, 0));
/// assert_eq!(round_to_units(value, Rounding::Up), Decimal::new(101, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rounding {
    /// Round towards negative infinity.
    Down,
    /// Round towards positive infinity.
    Up,
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Down => write!(f, "Down"),
            Self::Up => write!(f, "Up"),
        }
    }
}

/// Rounds an amount to whole base units in the given direction.
#[inline]
#[must_use]
pub fn round_to_units(value: Decimal, rounding: Rounding) -> Decimal {
    match rounding {
        Rounding::Down => value.floor(),
        Rounding::Up => value.ceil(),
    }
}

/// Computes `value * numerator / denominator` with checked arithmetic.
///
/// The multiplication happens before the division so exact ratios stay
/// exact (e.g. prorating `90` by `1/3` yields `30`, not `29.99..`).
///
/// # Errors
///
/// - `ArithmeticError::DivisionByZero` if `denominator` is zero
/// - `ArithmeticError::Overflow` if an intermediate value overflows
///
/// # Examples
///
/// ```
/// use liquidity_aggregator::domain::value_objects::arithmetic::mul_div;
/// use rust_decimal::Decimal;
///
/// let prorated = mul_div(Decimal::new(90, 0), Decimal::new(1, 0), Decimal::new(3, 0)).unwrap();
/// assert_eq!(prorated, Decimal::new(30, 0));
/// ```
#[inline]
pub fn mul_div(
    value: Decimal,
    numerator: Decimal,
    denominator: Decimal,
) -> ArithmeticResult<Decimal> {
    value.safe_mul(numerator)?.safe_div(denominator)
}

/// Trait for checked arithmetic operations.
///
/// Implementations never panic: overflow, underflow and division by zero
/// are reported through [`ArithmeticError`].
pub trait CheckedArithmetic: Sized {
    /// Safely add two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely subtract two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Underflow` if the result would underflow.
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely multiply two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely divide two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::DivisionByZero` if the divisor is zero.
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self>;
}

impl CheckedArithmetic for Decimal {
    #[inline]
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_add(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_sub(rhs).ok_or(ArithmeticError::Underflow)
    }

    #[inline]
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_mul(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        self.checked_div(rhs).ok_or(ArithmeticError::Overflow)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod arithmetic_error {
        use super::*;

        #[test]
        fn display_formats_correctly() {
            assert_eq!(ArithmeticError::Overflow.to_string(), "arithmetic overflow");
            assert_eq!(
                ArithmeticError::DivisionByZero.to_string(),
                "division by zero"
            );
        }
    }

    mod rounding {
        use super::*;

        #[test]
        fn round_down_floors() {
            assert_eq!(
                round_to_units(Decimal::new(1999, 1), Rounding::Down),
                Decimal::new(199, 0)
            );
        }

        #[test]
        fn round_up_ceils() {
            assert_eq!(
                round_to_units(Decimal::new(1991, 1), Rounding::Up),
                Decimal::new(200, 0)
            );
        }

        #[test]
        fn whole_values_untouched() {
            let value = Decimal::new(42, 0);
            assert_eq!(round_to_units(value, Rounding::Down), value);
            assert_eq!(round_to_units(value, Rounding::Up), value);
        }

        #[test]
        fn serde_roundtrip() {
            let json = serde_json::to_string(&Rounding::Up).unwrap();
            let back: Rounding = serde_json::from_str(&json).unwrap();
            assert_eq!(back, Rounding::Up);
        }
    }

    mod mul_div_tests {
        use super::*;

        #[test]
        fn prorates_exactly() {
            let out = mul_div(Decimal::new(200, 0), Decimal::new(25, 0), Decimal::new(100, 0))
                .unwrap();
            assert_eq!(out, Decimal::new(50, 0));
        }

        #[test]
        fn zero_denominator_fails() {
            let out = mul_div(Decimal::ONE, Decimal::ONE, Decimal::ZERO);
            assert_eq!(out, Err(ArithmeticError::DivisionByZero));
        }

        #[test]
        fn overflow_reported() {
            let out = mul_div(Decimal::MAX, Decimal::TWO, Decimal::ONE);
            assert_eq!(out, Err(ArithmeticError::Overflow));
        }
    }

    mod checked_arithmetic_decimal {
        use super::*;

        #[test]
        fn safe_add_works() {
            let a = Decimal::new(100, 0);
            assert_eq!(a.safe_add(Decimal::new(50, 0)).unwrap(), Decimal::new(150, 0));
        }

        #[test]
        fn safe_sub_works() {
            let a = Decimal::new(100, 0);
            assert_eq!(a.safe_sub(Decimal::new(50, 0)).unwrap(), Decimal::new(50, 0));
        }

        #[test]
        fn safe_add_overflow_fails() {
            assert_eq!(Decimal::MAX.safe_add(Decimal::MAX), Err(ArithmeticError::Overflow));
        }

        #[test]
        fn safe_div_by_zero_fails() {
            assert_eq!(
                Decimal::new(100, 0).safe_div(Decimal::ZERO),
                Err(ArithmeticError::DivisionByZero)
            );
        }
    }
}
