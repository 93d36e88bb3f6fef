//! # Fill Forest
//!
//! Converts native order snapshots and venue samples into the arena of
//! fills the optimizer searches.
//!
//! - Every native order with fillable liquidity becomes one root fill
//!   flagged [`SourceFlags::NATIVE`] with an empty exclusion mask.
//! - Every venue's cumulative samples become a chain of marginal fills,
//!   each the child of the previous sample's fill.
//!
//! Fills are oriented so the optimizer always caps `input` and optimizes
//! `output`: for buys native fills are mirrored (`input` = maker amount
//! received, `output` = taker amount paid).
//!
//! # Examples
//!
//! ```
//! use liquidity_aggregator::domain::entities::NativeOrder;
//! use liquidity_aggregator::domain::services::fill_forest::FillForestBuilder;
//! use liquidity_aggregator::domain::value_objects::{
//!     OrderId, Sample, Timestamp, TradeSide, VenueId, VenueSamples,
//! };
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
//! let samples = VenueSamples::new(
//!     VenueId::new("uniswap"),
//!     vec![
//!         Sample::new(Decimal::new(50, 0), Decimal::new(110, 0)),
//!         Sample::new(Decimal::new(100, 0), Decimal::new(205, 0)),
//!     ],
//! );
//!
//! let forest = FillForestBuilder::new(TradeSide::Sell)
//!     .build(&[order], &[Decimal::new(100, 0)], &[samples])
//!     .unwrap();
//!
//! assert_eq!(forest.len(), 3);
//! assert_eq!(forest.venue_chains().len(), 1);
//! ```

use crate::domain::entities::fill::{Fill, FillId, FillSource};
use crate::domain::entities::native_order::NativeOrder;
use crate::domain::entities::venue::VenueCatalog;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::services::fill_path::sort_best_first;
use crate::domain::value_objects::{
    CheckedArithmetic, SourceFlags, TradeSide, VenueId, VenueSamples,
};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Arena of fills built for one aggregation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillForest {
    side: TradeSide,
    fills: Vec<Fill>,
}

impl FillForest {
    /// Returns the side the forest is oriented for.
    #[inline]
    #[must_use]
    pub const fn side(&self) -> TradeSide {
        self.side
    }

    /// Returns every fill in arena order.
    #[inline]
    #[must_use]
    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    /// Looks up a fill by id.
    #[must_use]
    pub fn get(&self, id: FillId) -> Option<&Fill> {
        self.fills.get(id.index())
    }

    /// Number of fills.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fills.len()
    }

    /// Returns true if the forest holds no liquidity at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fills.is_empty()
    }

    /// Native fills in arena (pool) order.
    pub fn native_fills(&self) -> impl Iterator<Item = &Fill> {
        self.fills.iter().filter(|f| f.is_native())
    }

    /// Each venue's chain, root first, in sampling order.
    #[must_use]
    pub fn venue_chains(&self) -> Vec<Vec<&Fill>> {
        let mut chains: Vec<Vec<&Fill>> = Vec::new();
        for fill in self.fills.iter().filter(|f| !f.is_native()) {
            match chains.last_mut() {
                Some(chain) if fill.parent().is_some() => chain.push(fill),
                _ => chains.push(vec![fill]),
            }
        }
        chains
    }

    /// Every fill ordered best marginal rate first for this forest's side.
    ///
    /// Ties keep arena order.
    #[must_use]
    pub fn sorted_by_rate(&self) -> Vec<&Fill> {
        let mut sorted: Vec<&Fill> = self.fills.iter().collect();
        sort_best_first(&mut sorted, self.side);
        sorted
    }

    /// Total input available across all sources.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` on overflow.
    pub fn total_input(&self) -> DomainResult<Decimal> {
        let mut total = Decimal::ZERO;
        for fill in &self.fills {
            total = total.safe_add(fill.input())?;
        }
        Ok(total)
    }
}

/// Builds a [`FillForest`] from sampled liquidity.
#[derive(Debug, Clone)]
pub struct FillForestBuilder<'a> {
    side: TradeSide,
    conflicts: Option<&'a VenueCatalog>,
}

impl<'a> FillForestBuilder<'a> {
    /// Creates a builder for the given side with no conflict policy.
    #[must_use]
    pub fn new(side: TradeSide) -> Self {
        Self {
            side,
            conflicts: None,
        }
    }

    /// Applies the catalog's conflict groups to the exclusion masks.
    #[must_use]
    pub fn with_conflict_policy(mut self, catalog: &'a VenueCatalog) -> Self {
        self.conflicts = Some(catalog);
        self
    }

    /// Builds the forest.
    ///
    /// `fillable_taker_amounts[i]` is the taker amount of `orders[i]` still
    /// fillable. Venue bits are assigned in the order of `venues`.
    ///
    /// # Errors
    ///
    /// - `DomainError::EmptyOrderPool` if `orders` is empty
    /// - `DomainError::SnapshotMismatch` if the snapshot length differs
    /// - `DomainError::TooManySources` if `venues` exceeds the mask width
    /// - `DomainError::Arithmetic` on overflow
    pub fn build(
        &self,
        orders: &[NativeOrder],
        fillable_taker_amounts: &[Decimal],
        venues: &[VenueSamples],
    ) -> DomainResult<FillForest> {
        if orders.is_empty() {
            return Err(DomainError::EmptyOrderPool);
        }
        if orders.len() != fillable_taker_amounts.len() {
            return Err(DomainError::SnapshotMismatch {
                orders: orders.len(),
                snapshots: fillable_taker_amounts.len(),
            });
        }

        let mut fills = Vec::new();
        for (order_index, (order, fillable)) in
            orders.iter().zip(fillable_taker_amounts).enumerate()
        {
            if let Some(fill) = self.native_fill(FillId::new(fills.len()), order_index, order, *fillable)? {
                fills.push(fill);
            }
        }

        let flags = venue_flags(venues)?;
        for samples in venues {
            let own = flags.get(samples.venue()).copied().unwrap_or_default();
            let mask = self.exclusion_mask(samples.venue(), own, &flags);
            push_venue_chain(&mut fills, samples, own, mask)?;
        }

        Ok(FillForest {
            side: self.side,
            fills,
        })
    }

    fn native_fill(
        &self,
        id: FillId,
        order_index: usize,
        order: &NativeOrder,
        fillable: Decimal,
    ) -> DomainResult<Option<Fill>> {
        let taker = fillable.min(order.taker_amount());
        if taker <= Decimal::ZERO {
            return Ok(None);
        }
        let maker = order.maker_amount_for(taker)?;
        if maker <= Decimal::ZERO {
            return Ok(None);
        }
        let (input, output) = match self.side {
            TradeSide::Sell => (taker, maker),
            TradeSide::Buy => (maker, taker),
        };
        Ok(Some(Fill::new(
            id,
            input,
            output,
            SourceFlags::NATIVE,
            SourceFlags::EMPTY,
            None,
            FillSource::Native {
                order_index,
                fillable_taker_amount: taker,
            },
        )))
    }

    fn exclusion_mask(
        &self,
        venue: &VenueId,
        own: SourceFlags,
        flags: &HashMap<VenueId, SourceFlags>,
    ) -> SourceFlags {
        let Some(catalog) = self.conflicts else {
            return own;
        };
        catalog
            .conflicts_of(venue)
            .filter_map(|other| flags.get(other).copied())
            .fold(own, |mask, other| mask | other)
    }
}

fn venue_flags(venues: &[VenueSamples]) -> DomainResult<HashMap<VenueId, SourceFlags>> {
    if venues.len() > SourceFlags::MAX_VENUES {
        return Err(DomainError::TooManySources {
            count: venues.len(),
            max: SourceFlags::MAX_VENUES,
        });
    }
    let mut flags = HashMap::with_capacity(venues.len());
    for (slot, samples) in venues.iter().enumerate() {
        let flag = SourceFlags::venue(slot).ok_or(DomainError::TooManySources {
            count: venues.len(),
            max: SourceFlags::MAX_VENUES,
        })?;
        flags.insert(samples.venue().clone(), flag);
    }
    Ok(flags)
}

/// Appends one venue's marginal fills, each chained to the previous one.
fn push_venue_chain(
    fills: &mut Vec<Fill>,
    samples: &VenueSamples,
    flags: SourceFlags,
    mask: SourceFlags,
) -> DomainResult<()> {
    let mut prev_input = Decimal::ZERO;
    let mut prev_output = Decimal::ZERO;
    let mut parent: Option<FillId> = None;

    for sample in samples.samples() {
        let input = sample.input.safe_sub(prev_input)?;
        if input <= Decimal::ZERO {
            continue;
        }
        let output = sample.output.safe_sub(prev_output)?;
        if output <= Decimal::ZERO {
            break;
        }
        let id = FillId::new(fills.len());
        fills.push(Fill::new(
            id,
            input,
            output,
            flags,
            mask,
            parent,
            FillSource::Venue(samples.venue().clone()),
        ));
        parent = Some(id);
        prev_input = sample.input;
        prev_output = sample.output;
    }
    Ok(())
}
