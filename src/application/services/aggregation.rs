//! # Liquidity Aggregation
//!
//! The `improve_sell` / `improve_buy` entry points.
//!
//! One call runs the whole pipeline:
//!
//! 1. validate the request and sample live liquidity in one batch
//! 2. build the fill forest
//! 3. select the single-source baseline
//! 4. search for a better combination within the run limit
//! 5. merge adjacent venue slices and materialize orders
//!
//! Each call owns its forest and search state, so one
//! [`LiquidityAggregator`] can serve concurrent callers.
//!
//! # Examples
//!
//! ```
//! use liquidity_aggregator::application::services::aggregation::{
//!     ImproveOptions, LiquidityAggregator,
//! };
//! use liquidity_aggregator::domain::entities::{NativeOrder, Order, VenueCatalog};
//! use liquidity_aggregator::domain::value_objects::{OrderId, Timestamp};
//! use liquidity_aggregator::infrastructure::sampler::StaticSampler;
//! use ethers::types::Address;
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
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
//! let aggregator = LiquidityAggregator::new(VenueCatalog::new());
//! let options = ImproveOptions::new(Arc::new(StaticSampler::new()));
//! let orders = aggregator
//!     .improve_sell(&[order.clone()], Decimal::new(100, 0), &options)
//!     .await
//!     .unwrap();
//!
//! assert_eq!(orders, vec![Order::Native(order)]);
//! # });
//! ```

use crate::application::error::{AggregationError, AggregationResult};
use crate::application::services::baseline::select_baseline;
use crate::application::services::order_materializer::OrderMaterializer;
use crate::application::services::path_optimizer::PathOptimizer;
use crate::domain::entities::{NativeOrder, Order, VenueCatalog};
use crate::domain::services::FillForestBuilder;
use crate::domain::services::fill_path::simplify;
use crate::domain::value_objects::{TradeSide, VenueId};
use crate::infrastructure::config::{
    AggregatorSettings, DEFAULT_RUN_LIMIT, DEFAULT_SLIPPAGE_TOLERANCE,
};
use crate::infrastructure::sampler::{
    LiquiditySampler, SampleBatch, SampleRequest, SamplerError, SamplerResult,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

/// Per-call options.
#[derive(Debug, Clone)]
pub struct ImproveOptions {
    /// Venues omitted from sampling and search.
    pub excluded_sources: Vec<VenueId>,
    /// Allow at most one venue of each conflict group per path.
    pub disable_conflicting_venues: bool,
    /// Node-visit budget; 0 returns the best single source.
    pub run_limit: u64,
    /// Fractional rate degradation applied to venue orders, in `[0, 1)`.
    pub slippage_tolerance: Decimal,
    /// Upper bound on the sampling round-trip; unbounded if `None`.
    pub sampler_timeout: Option<Duration>,
    /// Source of live liquidity.
    pub sampler: Arc<dyn LiquiditySampler>,
}

impl ImproveOptions {
    /// Creates options with default budget and slippage.
    #[must_use]
    pub fn new(sampler: Arc<dyn LiquiditySampler>) -> Self {
        Self {
            excluded_sources: Vec::new(),
            disable_conflicting_venues: false,
            run_limit: DEFAULT_RUN_LIMIT,
            slippage_tolerance: DEFAULT_SLIPPAGE_TOLERANCE,
            sampler_timeout: None,
            sampler,
        }
    }

    /// Creates options from loaded settings.
    #[must_use]
    pub fn from_settings(settings: &AggregatorSettings, sampler: Arc<dyn LiquiditySampler>) -> Self {
        Self {
            excluded_sources: Vec::new(),
            disable_conflicting_venues: settings.disable_conflicting_venues,
            run_limit: settings.default_run_limit,
            slippage_tolerance: settings.default_slippage_tolerance,
            sampler_timeout: settings.sampler_timeout_ms.map(Duration::from_millis),
            sampler,
        }
    }

    /// Sets the node-visit budget.
    #[must_use]
    pub fn with_run_limit(mut self, run_limit: u64) -> Self {
        self.run_limit = run_limit;
        self
    }

    /// Sets the slippage tolerance.
    #[must_use]
    pub fn with_slippage_tolerance(mut self, slippage_tolerance: Decimal) -> Self {
        self.slippage_tolerance = slippage_tolerance;
        self
    }

    /// Bounds the sampling round-trip.
    #[must_use]
    pub fn with_sampler_timeout(mut self, limit: Duration) -> Self {
        self.sampler_timeout = Some(limit);
        self
    }

    /// Excludes one venue.
    #[must_use]
    pub fn with_excluded_source(mut self, venue: VenueId) -> Self {
        self.excluded_sources.push(venue);
        self
    }

    /// Sets whether conflicting venues are mutually exclusive.
    #[must_use]
    pub fn with_conflicting_venues_disabled(mut self, disabled: bool) -> Self {
        self.disable_conflicting_venues = disabled;
        self
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `AggregationError::InvalidOptions` if the slippage tolerance
    /// is outside `[0, 1)`.
    pub fn validate(&self) -> AggregationResult<()> {
        if self.slippage_tolerance.is_sign_negative() || self.slippage_tolerance >= Decimal::ONE {
            return Err(AggregationError::invalid_options(format!(
                "slippage tolerance {} is outside [0, 1)",
                self.slippage_tolerance
            )));
        }
        Ok(())
    }
}

/// Aggregates native orders and venue liquidity into an order list.
#[derive(Debug, Clone, Default)]
pub struct LiquidityAggregator {
    catalog: VenueCatalog,
}

impl LiquidityAggregator {
    /// Creates an aggregator over the given venues.
    #[must_use]
    pub fn new(catalog: VenueCatalog) -> Self {
        Self { catalog }
    }

    /// Creates an aggregator over the venues of `settings`.
    #[must_use]
    pub fn from_settings(settings: &AggregatorSettings) -> Self {
        Self::new(settings.catalog())
    }

    /// Returns the venue catalog.
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &VenueCatalog {
        &self.catalog
    }

    /// Finds the orders that sell exactly `exact_input` of the taker asset
    /// for the most maker asset.
    ///
    /// # Errors
    ///
    /// - `AggregationError::EmptyOrderPool` if `orders` is empty
    /// - `AggregationError::InvalidOptions` if the amount or options are out of range
    /// - `AggregationError::Sampler` if sampling fails
    /// - `AggregationError::InsufficientLiquidity` if no path covers the amount
    pub async fn improve_sell(
        &self,
        orders: &[NativeOrder],
        exact_input: Decimal,
        options: &ImproveOptions,
    ) -> AggregationResult<Vec<Order>> {
        self.improve(TradeSide::Sell, orders, exact_input, options).await
    }

    /// Finds the orders that buy exactly `exact_output` of the maker asset
    /// for the least taker asset.
    ///
    /// # Errors
    ///
    /// Same as [`Self::improve_sell`].
    pub async fn improve_buy(
        &self,
        orders: &[NativeOrder],
        exact_output: Decimal,
        options: &ImproveOptions,
    ) -> AggregationResult<Vec<Order>> {
        self.improve(TradeSide::Buy, orders, exact_output, options).await
    }

    #[instrument(skip(self, orders, options), fields(orders = orders.len(), run_limit = options.run_limit))]
    async fn improve(
        &self,
        side: TradeSide,
        orders: &[NativeOrder],
        amount: Decimal,
        options: &ImproveOptions,
    ) -> AggregationResult<Vec<Order>> {
        if orders.is_empty() {
            return Err(AggregationError::EmptyOrderPool);
        }
        if amount <= Decimal::ZERO {
            return Err(AggregationError::invalid_options(format!(
                "amount must be positive, got {amount}"
            )));
        }
        options.validate()?;

        let venues: Vec<VenueId> = self
            .catalog
            .venues()
            .iter()
            .map(|venue| venue.id().clone())
            .filter(|id| !options.excluded_sources.contains(id))
            .collect();
        let request = SampleRequest::new(side, orders.to_vec(), amount, venues);

        let batch = sample(options, &request).await.map_err(|e| {
            warn!(error = %e, retryable = e.is_retryable(), "liquidity sampling failed");
            e
        })?;
        batch.validate(&request)?;

        let mut builder = FillForestBuilder::new(side);
        if options.disable_conflicting_venues {
            builder = builder.with_conflict_policy(&self.catalog);
        }
        let forest = builder.build(orders, &batch.fillable_taker_amounts, &batch.venue_samples)?;
        debug!(fills = forest.len(), venues = batch.venue_samples.len(), "fill forest built");

        let baseline = select_baseline(&forest, amount)?;
        debug!(
            baseline_output = ?baseline.as_ref().map(|b| b.output),
            "baseline selected"
        );

        let outcome = PathOptimizer::new(options.run_limit).optimize(&forest, amount, baseline)?;
        let Some(best) = outcome.best else {
            let available = forest.total_input()?;
            if available >= amount {
                warn!(
                    %available,
                    visits = outcome.visits,
                    run_limit = options.run_limit,
                    "no path found within run limit"
                );
            } else {
                info!(%available, visits = outcome.visits, "no path covers the requested amount");
            }
            return Err(AggregationError::InsufficientLiquidity {
                requested: amount,
                available,
            });
        };

        let path = simplify(best.fills.iter().copied())?;
        let result = OrderMaterializer::new(&self.catalog, side, options.slippage_tolerance)
            .materialize(&path, orders)?;

        info!(
            output = %best.output,
            visits = outcome.visits,
            improved = outcome.improved,
            orders = result.len(),
            "aggregation complete"
        );
        Ok(result)
    }
}

/// One sampler round-trip, bounded by the configured timeout.
async fn sample(options: &ImproveOptions, request: &SampleRequest) -> SamplerResult<SampleBatch> {
    let Some(limit) = options.sampler_timeout else {
        return options.sampler.sample(request).await;
    };
    match timeout(limit, options.sampler.sample(request)).await {
        Ok(result) => result,
        Err(_) => Err(SamplerError::timeout_with_duration(
            "liquidity sampling timed out",
            u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        )),
    }
}
