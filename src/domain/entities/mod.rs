//! # Domain Entities
//!
//! - [`Fill`]: One atomic slice of liquidity in the fill forest
//! - [`NativeOrder`]: A resting order from the native pool
//! - [`Order`]: Aggregation output (native or synthesized venue order)
//! - [`VenueCatalog`]: Venues, adapters and conflict policy

pub mod fill;
pub mod native_order;
pub mod order;
pub mod venue;

pub use fill::{Fill, FillId, FillSource, accumulate_exclusion};
pub use native_order::NativeOrder;
pub use order::{Order, VenueOrder};
pub use venue::{VenueCatalog, VenueConfig};
