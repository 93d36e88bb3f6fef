//! # Venue Catalog
//!
//! Configuration of the external venues an aggregator may sample.
//!
//! Each venue is reached through an adapter contract; synthesized orders
//! name that adapter as maker. Conflict groups are a policy table: when
//! conflicting venues are disabled for a request, at most one venue of
//! each group may appear in a result path.
//!
//! # Examples
//!
//! ```
//! use liquidity_aggregator::domain::entities::venue::{VenueCatalog, VenueConfig};
//! use liquidity_aggregator::domain::value_objects::VenueId;
//! use ethers::types::Address;
//!
//! let catalog = VenueCatalog::new()
//!     .with_venue(VenueConfig::new(VenueId::new("kyber"), Address::from_low_u64_be(1)))
//!     .with_venue(VenueConfig::new(VenueId::new("uniswap"), Address::from_low_u64_be(2)))
//!     .with_conflict_group(vec![VenueId::new("kyber"), VenueId::new("uniswap")]);
//!
//! let kyber = VenueId::new("kyber");
//! let conflicts: Vec<_> = catalog.conflicts_of(&kyber).collect();
//! assert_eq!(conflicts, vec![&VenueId::new("uniswap")]);
//! ```

use crate::domain::value_objects::VenueId;
use ethers::types::Address;
use serde::{Deserialize, Serialize};

/// A venue and the adapter address its orders are addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueConfig {
    id: VenueId,
    adapter: Address,
}

impl VenueConfig {
    /// Creates a venue configuration.
    #[must_use]
    pub fn new(id: VenueId, adapter: Address) -> Self {
        Self { id, adapter }
    }

    /// Returns the venue id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &VenueId {
        &self.id
    }

    /// Returns the adapter address.
    #[inline]
    #[must_use]
    pub const fn adapter(&self) -> Address {
        self.adapter
    }
}

/// Registered venues plus their conflict policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueCatalog {
    #[serde(default)]
    venues: Vec<VenueConfig>,
    #[serde(default)]
    conflict_groups: Vec<Vec<VenueId>>,
}

impl VenueCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a venue, replacing any previous entry with the same id.
    #[must_use]
    pub fn with_venue(mut self, venue: VenueConfig) -> Self {
        self.venues.retain(|v| v.id() != venue.id());
        self.venues.push(venue);
        self
    }

    /// Adds a group of mutually conflicting venues.
    #[must_use]
    pub fn with_conflict_group(mut self, group: Vec<VenueId>) -> Self {
        self.conflict_groups.push(group);
        self
    }

    /// Returns the registered venues in registration order.
    #[must_use]
    pub fn venues(&self) -> &[VenueConfig] {
        &self.venues
    }

    /// Looks up a venue by id.
    #[must_use]
    pub fn get(&self, id: &VenueId) -> Option<&VenueConfig> {
        self.venues.iter().find(|v| v.id() == id)
    }

    /// Every other venue sharing a conflict group with `id`.
    pub fn conflicts_of<'a>(&'a self, id: &'a VenueId) -> impl Iterator<Item = &'a VenueId> + 'a {
        self.conflict_groups
            .iter()
            .filter(move |group| group.contains(id))
            .flat_map(|group| group.iter())
            .filter(move |other| *other != id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog() -> VenueCatalog {
        VenueCatalog::new()
            .with_venue(VenueConfig::new(VenueId::new("a"), Address::from_low_u64_be(1)))
            .with_venue(VenueConfig::new(VenueId::new("b"), Address::from_low_u64_be(2)))
            .with_venue(VenueConfig::new(VenueId::new("c"), Address::from_low_u64_be(3)))
    }

    #[test]
    fn default_policy_has_no_conflicts() {
        let catalog = catalog();
        assert_eq!(catalog.conflicts_of(&VenueId::new("a")).count(), 0);
    }

    #[test]
    fn conflicts_are_symmetric_within_group() {
        let catalog = catalog().with_conflict_group(vec![VenueId::new("a"), VenueId::new("c")]);
        let a = VenueId::new("a");
        let c = VenueId::new("c");
        let of_a: Vec<_> = catalog.conflicts_of(&a).collect();
        let of_c: Vec<_> = catalog.conflicts_of(&c).collect();
        assert_eq!(of_a, vec![&VenueId::new("c")]);
        assert_eq!(of_c, vec![&VenueId::new("a")]);
        assert_eq!(catalog.conflicts_of(&VenueId::new("b")).count(), 0);
    }

    #[test]
    fn re_registering_replaces_adapter() {
        let catalog = catalog().with_venue(VenueConfig::new(
            VenueId::new("a"),
            Address::from_low_u64_be(9),
        ));
        assert_eq!(catalog.venues().len(), 3);
        assert_eq!(
            catalog.get(&VenueId::new("a")).unwrap().adapter(),
            Address::from_low_u64_be(9)
        );
    }
}
