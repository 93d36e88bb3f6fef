//! # Domain Services
//!
//! Stateless operations over fills that don't belong to a single entity.
//!
//! ## Services
//!
//! - [`fill_forest::FillForestBuilder`]: Builds the fill arena from sampled liquidity
//! - [`fill_path`]: Path totals, capping, merging and comparison

pub mod fill_forest;
pub mod fill_path;

pub use fill_forest::{FillForest, FillForestBuilder};
