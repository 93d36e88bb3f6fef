//! # Source Flags
//!
//! Bitmask identifying liquidity sources.
//!
//! Bit 0 is reserved for native resting orders; every sampled venue is
//! assigned one of the remaining 63 bits for the duration of a request.
//!
//! # Examples
//!
//! ```
//! use liquidity_aggregator::domain::value_objects::SourceFlags;
//!
//! let a = SourceFlags::venue(0).unwrap();
//! let b = SourceFlags::venue(1).unwrap();
//! let both = a | b;
//!
//! assert!(both.intersects(a));
//! assert!(!a.intersects(b));
//! assert!(!SourceFlags::NATIVE.intersects(both));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// A set of liquidity sources encoded as a `u64` bitmask.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SourceFlags(u64);

impl SourceFlags {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// The native resting-order source.
    pub const NATIVE: Self = Self(1);

    /// Number of bits available to venues.
    pub const MAX_VENUES: usize = 63;

    /// Returns the flag of the venue with the given slot, or `None` when
    /// the slot does not fit in the mask.
    #[must_use]
    pub fn venue(slot: usize) -> Option<Self> {
        if slot >= Self::MAX_VENUES {
            return None;
        }
        Some(Self(1u64 << (slot + 1)))
    }

    /// Returns the raw bits.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Returns true if no source is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the two sets share at least one source.
    #[inline]
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns true if this set contains the native source.
    #[inline]
    #[must_use]
    pub const fn is_native(self) -> bool {
        self.intersects(Self::NATIVE)
    }
}

impl BitOr for SourceFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for SourceFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for SourceFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#b}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn venue_slots_skip_native_bit() {
        assert_eq!(SourceFlags::venue(0).unwrap().bits(), 0b10);
        assert_eq!(SourceFlags::venue(2).unwrap().bits(), 0b1000);
    }

    #[test]
    fn last_slot_fits() {
        assert_eq!(SourceFlags::venue(62).unwrap().bits(), 1u64 << 63);
        assert!(SourceFlags::venue(63).is_none());
    }

    #[test]
    fn or_assign_accumulates() {
        let mut mask = SourceFlags::EMPTY;
        mask |= SourceFlags::venue(1).unwrap();
        mask |= SourceFlags::NATIVE;
        assert_eq!(mask.bits(), 0b101);
        assert!(mask.is_native());
    }
}
