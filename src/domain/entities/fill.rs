//! # Fill
//!
//! One atomic, priced slice of liquidity.
//!
//! Fills live in an arena ([`FillForest`](crate::domain::services::fill_forest::FillForest))
//! and reference their chain parent by [`FillId`] rather than by pointer.
//! Venue fills form one singly-linked chain per venue; native fills are
//! always roots.
//!
//! # Examples
//!
//! ```
//! use liquidity_aggregator::domain::entities::fill::{Fill, FillId, FillSource, accumulate_exclusion};
//! use liquidity_aggregator::domain::value_objects::{SourceFlags, VenueId};
//! use rust_decimal::Decimal;
//!
//! let venue = SourceFlags::venue(0).unwrap();
//! let root = Fill::new(
//!     FillId::new(0),
//!     Decimal::new(10, 0),
//!     Decimal::new(20, 0),
//!     venue,
//!     venue,
//!     None,
//!     FillSource::Venue(VenueId::new("curve")),
//! );
//!
//! let accumulated = accumulate_exclusion([&root]);
//! assert!(!SourceFlags::NATIVE.intersects(accumulated));
//! assert!(root.is_excluded_by(accumulated));
//! ```

use crate::domain::value_objects::{SourceFlags, VenueId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Index of a fill inside its forest arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FillId(usize);

impl FillId {
    /// Creates a fill id from an arena index.
    #[inline]
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Source-specific payload of a fill.
///
/// Opaque to the optimizer; only the order materializer branches on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillSource {
    /// A resting order from the native pool.
    Native {
        /// Position of the order in the caller's order pool.
        order_index: usize,
        /// Taker amount still fillable when the pool was sampled.
        fillable_taker_amount: Decimal,
    },
    /// A sampled slice of an external venue.
    Venue(VenueId),
}

impl FillSource {
    /// Returns the venue id for venue fills.
    #[must_use]
    pub fn venue_id(&self) -> Option<&VenueId> {
        match self {
            Self::Venue(venue) => Some(venue),
            Self::Native { .. } => None,
        }
    }
}

/// A node of the fill forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    id: FillId,
    input: Decimal,
    output: Decimal,
    flags: SourceFlags,
    exclusion_mask: SourceFlags,
    parent: Option<FillId>,
    source: FillSource,
}

impl Fill {
    /// Creates a fill.
    #[must_use]
    pub fn new(
        id: FillId,
        input: Decimal,
        output: Decimal,
        flags: SourceFlags,
        exclusion_mask: SourceFlags,
        parent: Option<FillId>,
        source: FillSource,
    ) -> Self {
        Self {
            id,
            input,
            output,
            flags,
            exclusion_mask,
            parent,
            source,
        }
    }

    /// Returns the arena id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> FillId {
        self.id
    }

    /// Amount of the capped dimension consumed by this fill.
    #[inline]
    #[must_use]
    pub const fn input(&self) -> Decimal {
        self.input
    }

    /// Amount of the optimized dimension produced by this fill.
    #[inline]
    #[must_use]
    pub const fn output(&self) -> Decimal {
        self.output
    }

    /// Source identity bits.
    #[inline]
    #[must_use]
    pub const fn flags(&self) -> SourceFlags {
        self.flags
    }

    /// Sources forbidden for the rest of a path once this fill is chosen.
    #[inline]
    #[must_use]
    pub const fn exclusion_mask(&self) -> SourceFlags {
        self.exclusion_mask
    }

    /// The fill that must immediately precede this one, if any.
    #[inline]
    #[must_use]
    pub const fn parent(&self) -> Option<FillId> {
        self.parent
    }

    /// Returns true for chain roots (every native fill and the first
    /// sample of each venue).
    #[inline]
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns true for fills sourced from the native order pool.
    #[inline]
    #[must_use]
    pub const fn is_native(&self) -> bool {
        matches!(self.source, FillSource::Native { .. })
    }

    /// Returns the source payload.
    #[inline]
    #[must_use]
    pub fn source(&self) -> &FillSource {
        &self.source
    }

    /// Returns true if the accumulated exclusion of already-chosen fills
    /// forbids this fill.
    #[inline]
    #[must_use]
    pub const fn is_excluded_by(&self, accumulated: SourceFlags) -> bool {
        self.flags.intersects(accumulated)
    }

    /// Compares the marginal rates `output / input` of two fills without
    /// dividing: `a.output * b.input` against `b.output * a.input`.
    ///
    /// Products that overflow fall back to a lossy division.
    #[must_use]
    pub fn cmp_rate(&self, other: &Self) -> Ordering {
        match (
            self.output.checked_mul(other.input),
            other.output.checked_mul(self.input),
        ) {
            (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
            _ => self.rate().cmp(&other.rate()),
        }
    }

    /// Marginal rate `output / input`, zero for empty fills.
    #[must_use]
    pub fn rate(&self) -> Decimal {
        self.output
            .checked_div(self.input)
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns a copy carrying different amounts (used when merging runs).
    #[must_use]
    pub(crate) fn with_amounts(&self, input: Decimal, output: Decimal) -> Self {
        Self {
            input,
            output,
            ..self.clone()
        }
    }
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fill({} in={} out={} flags={})",
            self.id, self.input, self.output, self.flags
        )
    }
}

/// ORs the exclusion masks of every chosen fill.
#[must_use]
pub fn accumulate_exclusion<'a, I>(chosen: I) -> SourceFlags
where
    I: IntoIterator<Item = &'a Fill>,
{
    chosen
        .into_iter()
        .fold(SourceFlags::EMPTY, |mask, fill| mask | fill.exclusion_mask())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn venue_fill(id: usize, slot: usize, input: i64, output: i64, mask: SourceFlags) -> Fill {
        let flags = SourceFlags::venue(slot).unwrap();
        Fill::new(
            FillId::new(id),
            Decimal::new(input, 0),
            Decimal::new(output, 0),
            flags,
            mask | flags,
            None,
            FillSource::Venue(VenueId::new(format!("venue-{slot}"))),
        )
    }

    fn native_fill(id: usize, input: i64, output: i64) -> Fill {
        Fill::new(
            FillId::new(id),
            Decimal::new(input, 0),
            Decimal::new(output, 0),
            SourceFlags::NATIVE,
            SourceFlags::EMPTY,
            None,
            FillSource::Native {
                order_index: id,
                fillable_taker_amount: Decimal::new(input, 0),
            },
        )
    }

    #[test]
    fn native_fill_never_excluded_by_venues() {
        let a = venue_fill(0, 0, 1, 1, SourceFlags::EMPTY);
        let b = venue_fill(1, 1, 1, 1, SourceFlags::EMPTY);
        let native = native_fill(2, 1, 1);
        let mask = accumulate_exclusion([&a, &b]);
        assert!(!native.is_excluded_by(mask));
    }

    #[test]
    fn conflicting_mask_excludes_other_venue() {
        let conflict = SourceFlags::venue(1).unwrap();
        let a = venue_fill(0, 0, 1, 1, conflict);
        let b = venue_fill(1, 1, 1, 1, SourceFlags::EMPTY);
        assert!(b.is_excluded_by(accumulate_exclusion([&a])));
    }

    #[test]
    fn empty_accumulation_excludes_nothing() {
        let a = venue_fill(0, 0, 1, 1, SourceFlags::EMPTY);
        assert!(!a.is_excluded_by(accumulate_exclusion(std::iter::empty())));
    }

    #[test]
    fn cmp_rate_orders_by_output_per_input() {
        let cheap = native_fill(0, 10, 30);
        let dear = native_fill(1, 10, 20);
        assert_eq!(cheap.cmp_rate(&dear), Ordering::Greater);
        assert_eq!(dear.cmp_rate(&cheap), Ordering::Less);
        assert_eq!(cheap.cmp_rate(&native_fill(2, 1, 3)), Ordering::Equal);
    }

    #[test]
    fn root_and_native_predicates() {
        let native = native_fill(0, 1, 1);
        assert!(native.is_root());
        assert!(native.is_native());
        assert!(native.source().venue_id().is_none());
    }
}
