//! # Liquidity Sampler Trait
//!
//! Port definition for the component that reads live liquidity.
//!
//! A sampler answers one batched request per aggregation call: how much
//! of each native order is still fillable, and what each venue would
//! return at a series of cumulative trade sizes up to the requested
//! amount.
//!
//! # Examples
//!
//! ```ignore
//! use liquidity_aggregator::infrastructure::sampler::traits::{
//!     LiquiditySampler, SampleBatch, SampleRequest,
//! };
//! use liquidity_aggregator::infrastructure::sampler::error::SamplerResult;
//!
//! struct OnChainSampler { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl LiquiditySampler for OnChainSampler {
//!     async fn sample(&self, request: &SampleRequest) -> SamplerResult<SampleBatch> {
//!         // ... query the chain
//!     }
//! }
//! ```

use crate::domain::entities::NativeOrder;
use crate::domain::value_objects::{TradeSide, VenueId, VenueSamples};
use crate::infrastructure::sampler::error::{SamplerError, SamplerResult};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One batched sampling request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRequest {
    side: TradeSide,
    orders: Vec<NativeOrder>,
    amount: Decimal,
    venues: Vec<VenueId>,
}

impl SampleRequest {
    /// Creates a request.
    ///
    /// `amount` is the sell amount for sells and the buy amount for buys.
    #[must_use]
    pub fn new(side: TradeSide, orders: Vec<NativeOrder>, amount: Decimal, venues: Vec<VenueId>) -> Self {
        Self {
            side,
            orders,
            amount,
            venues,
        }
    }

    /// Returns the trade side.
    #[inline]
    #[must_use]
    pub const fn side(&self) -> TradeSide {
        self.side
    }

    /// Returns the native orders to snapshot.
    #[inline]
    #[must_use]
    pub fn orders(&self) -> &[NativeOrder] {
        &self.orders
    }

    /// Returns the amount venues should be sampled up to.
    #[inline]
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the venues to sample.
    #[inline]
    #[must_use]
    pub fn venues(&self) -> &[VenueId] {
        &self.venues
    }
}

/// Sampler response for one [`SampleRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleBatch {
    /// Fillable taker amount of each requested order, in request order.
    pub fillable_taker_amounts: Vec<Decimal>,
    /// Cumulative samples of each venue that returned quotes.
    pub venue_samples: Vec<VenueSamples>,
}

impl SampleBatch {
    /// Creates a batch.
    #[must_use]
    pub fn new(fillable_taker_amounts: Vec<Decimal>, venue_samples: Vec<VenueSamples>) -> Self {
        Self {
            fillable_taker_amounts,
            venue_samples,
        }
    }

    /// Decodes a batch from its JSON form.
    ///
    /// Amounts may be JSON strings or numbers.
    ///
    /// # Errors
    ///
    /// Returns `SamplerError::MalformedBatch` if the payload does not parse.
    pub fn from_json(payload: &str) -> SamplerResult<Self> {
        serde_json::from_str(payload)
            .map_err(|e| SamplerError::malformed_batch(format!("invalid JSON batch: {e}")))
    }

    /// Checks that the batch describes `request`.
    ///
    /// # Errors
    ///
    /// Returns `SamplerError::MalformedBatch` if:
    /// - the number of fillable amounts differs from the number of orders
    /// - any fillable amount is negative
    /// - a venue was not requested or appears twice
    /// - a venue's cumulative samples decrease or go negative
    pub fn validate(&self, request: &SampleRequest) -> SamplerResult<()> {
        if self.fillable_taker_amounts.len() != request.orders().len() {
            return Err(SamplerError::malformed_batch(format!(
                "{} fillable amounts for {} orders",
                self.fillable_taker_amounts.len(),
                request.orders().len()
            )));
        }
        if self.fillable_taker_amounts.iter().any(Decimal::is_sign_negative) {
            return Err(SamplerError::malformed_batch("negative fillable amount"));
        }

        let mut seen: Vec<&VenueId> = Vec::with_capacity(self.venue_samples.len());
        for samples in &self.venue_samples {
            let venue = samples.venue();
            if !request.venues().contains(venue) {
                return Err(SamplerError::malformed_batch(format!(
                    "venue {venue} was not requested"
                )));
            }
            if seen.contains(&venue) {
                return Err(SamplerError::malformed_batch(format!(
                    "venue {venue} sampled twice"
                )));
            }
            if !samples.is_monotonic() {
                return Err(SamplerError::malformed_batch(format!(
                    "venue {venue} samples are not cumulative"
                )));
            }
            seen.push(venue);
        }
        Ok(())
    }
}

impl fmt::Display for SampleBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SampleBatch(orders={}, venues={})",
            self.fillable_taker_amounts.len(),
            self.venue_samples.len()
        )
    }
}

/// Reads live liquidity for an aggregation request.
///
/// Implementations must be thread-safe; one instance is shared by every
/// concurrent aggregation call.
#[async_trait]
pub trait LiquiditySampler: Send + Sync + fmt::Debug {
    /// Samples every order and venue of `request` in one batch.
    ///
    /// # Errors
    ///
    /// Returns a `SamplerError` if the liquidity could not be read.
    async fn sample(&self, request: &SampleRequest) -> SamplerResult<SampleBatch>;
}
