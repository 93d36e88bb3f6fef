//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! This module provides application-level services including:
//! - [`LiquidityAggregator`]: The `improve_sell` / `improve_buy` entry points
//! - [`PathOptimizer`]: Budget-bounded path search
//! - [`OrderMaterializer`]: Path to order conversion

pub mod aggregation;
pub mod baseline;
pub mod order_materializer;
pub mod path_optimizer;

pub use aggregation::{ImproveOptions, LiquidityAggregator};
pub use baseline::{CandidatePath, select_baseline};
pub use order_materializer::OrderMaterializer;
pub use path_optimizer::{PathOptimizer, SearchOutcome};
