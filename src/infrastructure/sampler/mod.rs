//! # Liquidity Sampling
//!
//! The port through which the aggregator reads live liquidity, plus an
//! in-memory implementation.

pub mod error;
pub mod static_sampler;
pub mod traits;

pub use error::{SamplerError, SamplerResult};
pub use static_sampler::StaticSampler;
pub use traits::{LiquiditySampler, SampleBatch, SampleRequest};
