//! # Orders
//!
//! The order list returned to callers: native orders passed through
//! unchanged, plus orders synthesized against venue adapters.

use crate::domain::entities::native_order::NativeOrder;
use crate::domain::value_objects::{Timestamp, VenueId};
use ethers::types::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An order synthesized from sampled venue liquidity.
///
/// The maker is the venue's adapter contract. Amounts already include
/// slippage compensation and are whole base units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueOrder {
    venue: VenueId,
    adapter: Address,
    maker_asset: Address,
    taker_asset: Address,
    maker_amount: Decimal,
    taker_amount: Decimal,
    expires_at: Timestamp,
}

impl VenueOrder {
    /// Creates a venue order.
    #[must_use]
    pub fn new(
        venue: VenueId,
        adapter: Address,
        maker_asset: Address,
        taker_asset: Address,
        maker_amount: Decimal,
        taker_amount: Decimal,
        expires_at: Timestamp,
    ) -> Self {
        Self {
            venue,
            adapter,
            maker_asset,
            taker_asset,
            maker_amount,
            taker_amount,
            expires_at,
        }
    }

    /// Returns the venue this order routes through.
    #[inline]
    #[must_use]
    pub fn venue(&self) -> &VenueId {
        &self.venue
    }

    /// Returns the adapter address acting as maker.
    #[inline]
    #[must_use]
    pub const fn adapter(&self) -> Address {
        self.adapter
    }

    /// Returns the asset the adapter gives.
    #[inline]
    #[must_use]
    pub const fn maker_asset(&self) -> Address {
        self.maker_asset
    }

    /// Returns the asset the adapter wants.
    #[inline]
    #[must_use]
    pub const fn taker_asset(&self) -> Address {
        self.taker_asset
    }

    /// Returns the maker amount.
    #[inline]
    #[must_use]
    pub const fn maker_amount(&self) -> Decimal {
        self.maker_amount
    }

    /// Returns the taker amount.
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
}

/// One entry of an aggregation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Order {
    /// A resting order from the native pool, unchanged.
    Native(NativeOrder),
    /// An order synthesized against a venue adapter.
    Venue(VenueOrder),
}

impl Order {
    /// Returns the maker amount of either kind.
    #[must_use]
    pub fn maker_amount(&self) -> Decimal {
        match self {
            Self::Native(order) => order.maker_amount(),
            Self::Venue(order) => order.maker_amount(),
        }
    }

    /// Returns the taker amount of either kind.
    #[must_use]
    pub fn taker_amount(&self) -> Decimal {
        match self {
            Self::Native(order) => order.taker_amount(),
            Self::Venue(order) => order.taker_amount(),
        }
    }

    /// Returns the native order, if this is one.
    #[must_use]
    pub fn as_native(&self) -> Option<&NativeOrder> {
        match self {
            Self::Native(order) => Some(order),
            Self::Venue(_) => None,
        }
    }

    /// Returns the venue order, if this is one.
    #[must_use]
    pub fn as_venue(&self) -> Option<&VenueOrder> {
        match self {
            Self::Venue(order) => Some(order),
            Self::Native(_) => None,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(order) => write!(f, "{order}"),
            Self::Venue(order) => write!(
                f,
                "VenueOrder({} maker={} taker={})",
                order.venue, order.maker_amount, order.taker_amount
            ),
        }
    }
}
