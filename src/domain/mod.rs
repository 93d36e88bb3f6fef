//! # Domain Layer
//!
//! Pure types and services of the aggregator: fills, the fill forest and
//! path arithmetic. Nothing here performs I/O.

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
