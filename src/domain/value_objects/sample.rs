//! # Venue Samples
//!
//! Cumulative price samples of a size-dependent venue.
//!
//! Sample *k* states that trading `input` through the venue yields
//! `output`. Samples are ordered by ascending cumulative input and are
//! oriented like fills: for sells `input` is the amount sold, for buys it
//! is the amount bought and `output` is its cost.

use crate::domain::value_objects::VenueId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One cumulative `(input, output)` observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Cumulative amount tried against the venue.
    pub input: Decimal,
    /// Cumulative amount observed for `input`.
    pub output: Decimal,
}

impl Sample {
    /// Creates a sample.
    #[must_use]
    pub const fn new(input: Decimal, output: Decimal) -> Self {
        Self { input, output }
    }
}

/// All samples gathered for one venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueSamples {
    venue: VenueId,
    samples: Vec<Sample>,
}

impl VenueSamples {
    /// Creates the sample set of a venue.
    #[must_use]
    pub fn new(venue: VenueId, samples: Vec<Sample>) -> Self {
        Self { venue, samples }
    }

    /// Returns the venue id.
    #[inline]
    #[must_use]
    pub fn venue(&self) -> &VenueId {
        &self.venue
    }

    /// Returns the ordered samples.
    #[inline]
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Returns true if the cumulative series never decreases and holds no
    /// negative amounts.
    #[must_use]
    pub fn is_monotonic(&self) -> bool {
        let mut prev = Sample::new(Decimal::ZERO, Decimal::ZERO);
        for sample in &self.samples {
            if sample.input < prev.input || sample.output < prev.output {
                return false;
            }
            prev = *sample;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(points: &[(i64, i64)]) -> VenueSamples {
        VenueSamples::new(
            VenueId::new("v"),
            points
                .iter()
                .map(|(i, o)| Sample::new(Decimal::new(*i, 0), Decimal::new(*o, 0)))
                .collect(),
        )
    }

    #[test]
    fn ascending_series_is_monotonic() {
        assert!(samples(&[(10, 20), (20, 38), (30, 50)]).is_monotonic());
    }

    #[test]
    fn decreasing_output_is_not_monotonic() {
        assert!(!samples(&[(10, 20), (20, 18)]).is_monotonic());
    }

    #[test]
    fn negative_amount_is_not_monotonic() {
        assert!(!samples(&[(-1, 0)]).is_monotonic());
    }
}
