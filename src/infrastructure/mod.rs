//! # Infrastructure Layer
//!
//! Adapters around the pure core: the liquidity sampler port, settings
//! loading and log wiring.

pub mod config;
pub mod sampler;
pub mod telemetry;

pub use self::config::{AggregatorSettings, SettingsError};
pub use telemetry::{init_tracing, init_tracing_from};
