//! # Baseline Selector
//!
//! Best single-source plan, used as the floor the path search must beat.
//!
//! Each source is evaluated on its own: the native pool as one lumped
//! source (its fills taken best rate first), and each venue as its full
//! sample chain. Sources that cannot cover the target on their own are
//! ignored. The work is linear in the number of fills; no combinations
//! are tried.

use crate::domain::entities::Fill;
use crate::domain::errors::DomainResult;
use crate::domain::services::FillForest;
use crate::domain::services::fill_path::{
    clip_to_input, compare_paths, path_input, path_output, sort_best_first,
};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;

/// A complete path together with its totals capped at the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePath<'a> {
    /// Fills in execution order, borrowed from the forest.
    pub fills: Vec<&'a Fill>,
    /// Input used, at most the target.
    pub input: Decimal,
    /// Output for `input`, the crossing fill prorated.
    pub output: Decimal,
}

impl<'a> CandidatePath<'a> {
    /// Prices `fills` against `target`.
    ///
    /// Returns `None` if the fills cannot cover the target.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` on overflow.
    pub fn complete(fills: Vec<&'a Fill>, target: Decimal) -> DomainResult<Option<Self>> {
        let total = path_input(fills.iter().copied())?;
        if total < target {
            return Ok(None);
        }
        let output = path_output(fills.iter().copied(), Some(target))?;
        Ok(Some(Self {
            fills,
            input: target,
            output,
        }))
    }

    /// Returns true if this path beats `other`.
    #[must_use]
    pub fn is_better_than(&self, other: &Self, minimize: bool) -> bool {
        compare_paths(self.output, other.output, minimize) == Ordering::Greater
    }
}

impl fmt::Display for CandidatePath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CandidatePath(fills={} input={} output={})",
            self.fills.len(),
            self.input,
            self.output
        )
    }
}

/// Selects the best single source able to cover `target`.
///
/// Returns `None` if no source covers the target alone.
///
/// # Errors
///
/// Returns `DomainError::Arithmetic` on overflow.
pub fn select_baseline(forest: &FillForest, target: Decimal) -> DomainResult<Option<CandidatePath<'_>>> {
    let minimize = forest.side().minimizes_output();

    let mut natives: Vec<&Fill> = forest.native_fills().collect();
    sort_best_first(&mut natives, forest.side());

    let mut best: Option<CandidatePath<'_>> = None;
    for source in std::iter::once(natives).chain(forest.venue_chains()) {
        if source.is_empty() {
            continue;
        }
        let fills = clip_to_input(&source, target)?;
        let Some(candidate) = CandidatePath::complete(fills, target)? else {
            continue;
        };
        best = match best {
            Some(current) if !candidate.is_better_than(&current, minimize) => Some(current),
            _ => Some(candidate),
        };
    }
    Ok(best)
}
