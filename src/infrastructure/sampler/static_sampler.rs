//! # Static Sampler
//!
//! In-memory implementation of [`LiquiditySampler`] for tests and
//! benchmarks.
//!
//! Venue curves are registered per side and returned verbatim; order
//! fillability defaults to the order's full taker amount unless
//! overridden, and is zero once the order has expired. The sampler
//! counts its calls so tests can assert how often liquidity was read.

use crate::domain::value_objects::{OrderId, Sample, TradeSide, VenueId, VenueSamples};
use crate::infrastructure::sampler::error::{SamplerError, SamplerResult};
use crate::infrastructure::sampler::traits::{LiquiditySampler, SampleBatch, SampleRequest};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory [`LiquiditySampler`].
#[derive(Debug, Default)]
pub struct StaticSampler {
    fillable: HashMap<OrderId, Decimal>,
    curves: HashMap<(TradeSide, VenueId), Vec<Sample>>,
    failure: Option<SamplerError>,
    calls: AtomicUsize,
}

impl StaticSampler {
    /// Creates a sampler with no venues and fully fillable orders.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sampler whose every call fails with `error`.
    #[must_use]
    pub fn failing(error: SamplerError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Overrides the fillable taker amount of one order.
    #[must_use]
    pub fn with_fillable(mut self, order: OrderId, fillable_taker_amount: Decimal) -> Self {
        self.fillable.insert(order, fillable_taker_amount);
        self
    }

    /// Registers the cumulative samples a venue returns for `side`.
    #[must_use]
    pub fn with_curve(mut self, side: TradeSide, venue: VenueId, samples: Vec<Sample>) -> Self {
        self.curves.insert((side, venue), samples);
        self
    }

    /// Number of `sample` calls served so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl LiquiditySampler for StaticSampler {
    async fn sample(&self, request: &SampleRequest) -> SamplerResult<SampleBatch> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let fillable_taker_amounts = request
            .orders()
            .iter()
            .map(|order| {
                if order.expires_at().is_expired() {
                    return Decimal::ZERO;
                }
                self.fillable
                    .get(&order.id())
                    .copied()
                    .unwrap_or_else(|| order.taker_amount())
            })
            .collect();

        let venue_samples = request
            .venues()
            .iter()
            .filter_map(|venue| {
                self.curves
                    .get(&(request.side(), venue.clone()))
                    .map(|samples| VenueSamples::new(venue.clone(), samples.clone()))
            })
            .collect();

        Ok(SampleBatch::new(fillable_taker_amounts, venue_samples))
    }
}
