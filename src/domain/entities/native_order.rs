//! # Native Order
//!
//! A pre-existing resting order that can be filled independently of any
//! other liquidity. Its price does not depend on the filled size.
//!
//! # Examples
//!
//! ```
//! use liquidity_aggregator::domain::entities::native_order::NativeOrder;
//! use liquidity_aggregator::domain::value_objects::{OrderId, Timestamp};
//! use ethers::types::Address;
//! use rust_decimal::Decimal;
//!
//! let order = NativeOrder::new(
//!     OrderId::new_v4(),
//!     Address::zero(),
//!     Address::from_low_u64_be(1),
//!     Address::from_low_u64_be(2),
//!     Decimal::new(200, 0),
//!     Decimal::new(100, 0),
//!     Timestamp::from_secs(1_900_000_000).unwrap(),
//! )
//! .unwrap();
//!
//! // Half the taker amount buys half the maker amount.
//! assert_eq!(order.maker_amount_for(Decimal::new(50, 0)).unwrap(), Decimal::new(100, 0));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{OrderId, Timestamp, mul_div};
use ethers::types::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A resting limit order from the native order pool.
///
/// The maker gives `maker_amount` of `maker_asset` in exchange for
/// `taker_amount` of `taker_asset`. Amounts are exact decimals; rounding
/// to base units happens only when orders are synthesized for venues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeOrder {
    id: OrderId,
    maker: Address,
    maker_asset: Address,
    taker_asset: Address,
    maker_amount: Decimal,
    taker_amount: Decimal,
    expires_at: Timestamp,
}

impl NativeOrder {
    /// Creates a native order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidOrder` if either amount is not positive.
    pub fn new(
        id: OrderId,
        maker: Address,
        maker_asset: Address,
        taker_asset: Address,
        maker_amount: Decimal,
        taker_amount: Decimal,
        expires_at: Timestamp,
    ) -> DomainResult<Self> {
        if maker_amount <= Decimal::ZERO || taker_amount <= Decimal::ZERO {
            return Err(DomainError::InvalidOrder {
                order: id.to_string(),
                reason: "amounts must be positive",
            });
        }
        Ok(Self {
            id,
            maker,
            maker_asset,
            taker_asset,
            maker_amount,
            taker_amount,
            expires_at,
        })
    }

    /// Returns the order id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the maker address.
    #[inline]
    #[must_use]
    pub const fn maker(&self) -> Address {
        self.maker
    }

    /// Returns the asset the maker gives.
    #[inline]
    #[must_use]
    pub const fn maker_asset(&self) -> Address {
        self.maker_asset
    }

    /// Returns the asset the maker wants.
    #[inline]
    #[must_use]
    pub const fn taker_asset(&self) -> Address {
        self.taker_asset
    }

    /// Returns the full maker amount.
    #[inline]
    #[must_use]
    pub const fn maker_amount(&self) -> Decimal {
        self.maker_amount
    }

    /// Returns the full taker amount.
    #[inline]
    #[must_use]
    pub const fn taker_amount(&self) -> Decimal {
        self.taker_amount
    }

    /// Returns the expiry.
    #[inline]
    #[must_use]
    pub const fn expires_at(&self) -> Timestamp {
        self.expires_at
    }

    /// Maker amount received for `taker_fill` of taker asset, prorated at
    /// the order's fixed price without rounding.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` on overflow.
    pub fn maker_amount_for(&self, taker_fill: Decimal) -> DomainResult<Decimal> {
        Ok(mul_div(self.maker_amount, taker_fill, self.taker_amount)?)
    }
}

impl fmt::Display for NativeOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NativeOrder({} maker={} taker={})",
            self.id, self.maker_amount, self.taker_amount
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn order(maker: i64, taker: i64) -> DomainResult<NativeOrder> {
        order_with(Decimal::new(maker, 0), Decimal::new(taker, 0))
    }

    fn order_with(maker: Decimal, taker: Decimal) -> DomainResult<NativeOrder> {
        NativeOrder::new(
            OrderId::new_v4(),
            Address::zero(),
            Address::from_low_u64_be(1),
            Address::from_low_u64_be(2),
            maker,
            taker,
            Timestamp::from_secs(1_900_000_000).unwrap(),
        )
    }

    #[test]
    fn rejects_zero_amounts() {
        assert!(matches!(order(0, 10), Err(DomainError::InvalidOrder { .. })));
        assert!(matches!(order(10, 0), Err(DomainError::InvalidOrder { .. })));
    }

    #[test]
    fn maker_amount_for_keeps_fractions() {
        let o = order(10, 4).unwrap();
        assert_eq!(o.maker_amount_for(Decimal::ONE).unwrap(), Decimal::new(25, 1));
    }

    #[test]
    fn fractional_order_prices_exactly() {
        let o = order_with(Decimal::new(15, 1), Decimal::ONE).unwrap();
        assert_eq!(o.maker_amount_for(Decimal::ONE).unwrap(), Decimal::new(15, 1));

        let half = order_with(Decimal::new(5, 1), Decimal::ONE).unwrap();
        assert_eq!(half.maker_amount_for(Decimal::ONE).unwrap(), Decimal::new(5, 1));
    }

    #[test]
    fn maker_amount_for_full_fill() {
        let o = order(250, 100).unwrap();
        assert_eq!(
            o.maker_amount_for(Decimal::new(100, 0)).unwrap(),
            Decimal::new(250, 0)
        );
    }
}
