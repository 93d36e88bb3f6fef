//! # Order Materializer
//!
//! Converts a simplified winning path into orders.
//!
//! Native fills pass through as the referenced [`NativeOrder`]. Venue
//! fills become [`VenueOrder`]s addressed to the venue's adapter, with
//! the sampled rate degraded by the slippage tolerance:
//!
//! | Side | Maker amount | Taker amount |
//! |------|--------------|--------------|
//! | Sell | `floor(output * (1 - slippage))` | `input` |
//! | Buy  | `input` | `ceil(output * (1 + slippage))` |
//!
//! Asset pair and expiry are copied from the first order of the pool.

use crate::domain::entities::{Fill, FillSource, NativeOrder, Order, VenueCatalog, VenueOrder};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{
    CheckedArithmetic, Rounding, TradeSide, VenueId, round_to_units,
};
use rust_decimal::Decimal;

/// Builds orders from a path for one side and slippage tolerance.
#[derive(Debug, Clone, Copy)]
pub struct OrderMaterializer<'c> {
    catalog: &'c VenueCatalog,
    side: TradeSide,
    slippage_tolerance: Decimal,
}

impl<'c> OrderMaterializer<'c> {
    /// Creates a materializer.
    #[must_use]
    pub const fn new(catalog: &'c VenueCatalog, side: TradeSide, slippage_tolerance: Decimal) -> Self {
        Self {
            catalog,
            side,
            slippage_tolerance,
        }
    }

    /// Converts `path` into orders, one per fill, in path order.
    ///
    /// # Errors
    ///
    /// - `DomainError::EmptyOrderPool` if `pool` is empty
    /// - `DomainError::InvalidOrder` if a native fill points outside `pool`
    /// - `DomainError::UnknownVenue` if a venue has no catalog entry
    /// - `DomainError::Arithmetic` on overflow
    pub fn materialize(&self, path: &[Fill], pool: &[NativeOrder]) -> DomainResult<Vec<Order>> {
        let reference = pool.first().ok_or(DomainError::EmptyOrderPool)?;
        path.iter()
            .map(|fill| match fill.source() {
                FillSource::Native { order_index, .. } => pool
                    .get(*order_index)
                    .cloned()
                    .map(Order::Native)
                    .ok_or_else(|| DomainError::InvalidOrder {
                        order: format!("#{order_index}"),
                        reason: "not in the order pool",
                    }),
                FillSource::Venue(venue) => self.venue_order(fill, venue, reference).map(Order::Venue),
            })
            .collect()
    }

    fn venue_order(
        &self,
        fill: &Fill,
        venue: &VenueId,
        reference: &NativeOrder,
    ) -> DomainResult<VenueOrder> {
        let adapter = self
            .catalog
            .get(venue)
            .ok_or_else(|| DomainError::UnknownVenue(venue.clone()))?
            .adapter();

        let (maker_amount, taker_amount) = match self.side {
            TradeSide::Sell => {
                let factor = Decimal::ONE.safe_sub(self.slippage_tolerance)?;
                let maker = round_to_units(fill.output().safe_mul(factor)?, Rounding::Down);
                (maker, fill.input())
            }
            TradeSide::Buy => {
                let factor = Decimal::ONE.safe_add(self.slippage_tolerance)?;
                let taker = round_to_units(fill.output().safe_mul(factor)?, Rounding::Up);
                (fill.input(), taker)
            }
        };

        Ok(VenueOrder::new(
            venue.clone(),
            adapter,
            reference.maker_asset(),
            reference.taker_asset(),
            maker_amount,
            taker_amount,
            reference.expires_at(),
        ))
    }
}
