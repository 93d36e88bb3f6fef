//! # Application Layer
//!
//! Use cases built on the domain: baseline selection, path search, order
//! materialization and the aggregation entry points.

pub mod error;
pub mod services;

pub use error::{AggregationError, AggregationResult};
pub use services::{ImproveOptions, LiquidityAggregator};
