//! # Liquidity Aggregator
//!
//! Budget-bounded aggregation of native resting orders and size-dependent
//! venue liquidity.
//!
//! Given an exact amount to sell or buy, the aggregator samples every
//! source once, builds a forest of priced fills, and searches for the
//! combination with the best total output (sells) or lowest total cost
//! (buys) within a node-visit budget. The winning path is returned as a
//! list of orders: native orders unchanged, venue liquidity as orders
//! addressed to the venue's adapter with slippage applied.
//!
//! ## Layers
//!
//! - [`domain`]: fills, fill forest, path arithmetic
//! - [`application`]: baseline, optimizer, materializer, entry points
//! - [`infrastructure`]: sampler port, settings, tracing setup

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{AggregationError, AggregationResult, ImproveOptions, LiquidityAggregator};
pub use domain::entities::{NativeOrder, Order, VenueCatalog, VenueConfig, VenueOrder};
pub use infrastructure::sampler::{LiquiditySampler, SampleBatch, SampleRequest, SamplerError};
