//! # Path Optimizer
//!
//! Budget-bounded depth-first search over the fill forest.
//!
//! Fills are visited best marginal rate first. At every node each
//! remaining fill that satisfies contiguity (a root, or the child of the
//! path's last fill) and exclusion (roots only, against the accumulated
//! exclusion mask) extends the path. A path that reaches the target is
//! compared with the incumbent and never extended further.
//!
//! Each extension consumes one visit of the run limit. Once the budget is
//! spent no further extension happens; the incumbent at that point is the
//! result. The search is deterministic, so a larger budget replays the
//! same extensions first and can only improve the result.
//!
//! # Examples
//!
//! ```
//! use liquidity_aggregator::application::services::baseline::select_baseline;
//! use liquidity_aggregator::application::services::path_optimizer::PathOptimizer;
//! use liquidity_aggregator::domain::entities::NativeOrder;
//! use liquidity_aggregator::domain::services::FillForestBuilder;
//! use liquidity_aggregator::domain::value_objects::{OrderId, Timestamp, TradeSide};
//! use ethers::types::Address;
//! use rust_decimal::Decimal;
//!
//! let order = NativeOrder::new(
//!     OrderId::new_v4(),
//!     Address::zero(),
//!     Address::from_low_u64_be(1),
//!     Address::from_low_u64_be(2),
//!     Decimal::new(200, 0),
//!     Decimal::new(100, 0),
//!     Timestamp::from_secs(1_900_000_000).unwrap(),
//! )
//! .unwrap();
//! let forest = FillForestBuilder::new(TradeSide::Sell)
//!     .build(&[order], &[Decimal::new(100, 0)], &[])
//!     .unwrap();
//!
//! let target = Decimal::new(100, 0);
//! let baseline = select_baseline(&forest, target).unwrap();
//! let outcome = PathOptimizer::new(1_000).optimize(&forest, target, baseline).unwrap();
//!
//! assert_eq!(outcome.best.unwrap().output, Decimal::new(200, 0));
//! assert!(!outcome.improved);
//! ```

use crate::application::services::baseline::CandidatePath;
use crate::domain::entities::Fill;
use crate::domain::errors::DomainResult;
use crate::domain::services::FillForest;
use crate::domain::services::fill_path::{compare_paths, partial_output};
use crate::domain::value_objects::{CheckedArithmetic, SourceFlags};
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Result of one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome<'a> {
    /// Best complete path found, or the baseline if nothing beat it.
    pub best: Option<CandidatePath<'a>>,
    /// Extensions performed.
    pub visits: u64,
    /// True if the search found a path strictly better than the baseline.
    pub improved: bool,
}

/// Depth-first path search with a node-visit budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathOptimizer {
    run_limit: u64,
}

impl PathOptimizer {
    /// Creates an optimizer allowed `run_limit` extensions per search.
    #[must_use]
    pub const fn new(run_limit: u64) -> Self {
        Self { run_limit }
    }

    /// Returns the visit budget.
    #[inline]
    #[must_use]
    pub const fn run_limit(&self) -> u64 {
        self.run_limit
    }

    /// Searches `forest` for the best path covering `target`, starting
    /// from `baseline` as incumbent.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` on overflow.
    pub fn optimize<'a>(
        &self,
        forest: &'a FillForest,
        target: Decimal,
        baseline: Option<CandidatePath<'a>>,
    ) -> DomainResult<SearchOutcome<'a>> {
        let mut state = SearchState {
            target,
            minimize: forest.side().minimizes_output(),
            budget: self.run_limit,
            visits: 0,
            best: baseline,
            improved: false,
        };

        let candidates = forest.sorted_by_rate();
        let mut path = Vec::new();
        state.search(&mut path, Decimal::ZERO, Decimal::ZERO, SourceFlags::EMPTY, &candidates)?;

        Ok(SearchOutcome {
            best: state.best,
            visits: state.visits,
            improved: state.improved,
        })
    }
}

/// Mutable state threaded through one search.
struct SearchState<'a> {
    target: Decimal,
    minimize: bool,
    budget: u64,
    visits: u64,
    best: Option<CandidatePath<'a>>,
    improved: bool,
}

impl<'a> SearchState<'a> {
    fn search(
        &mut self,
        path: &mut Vec<&'a Fill>,
        input: Decimal,
        output: Decimal,
        excluded: SourceFlags,
        remaining: &[&'a Fill],
    ) -> DomainResult<()> {
        for &fill in remaining {
            if self.visits >= self.budget {
                return Ok(());
            }
            if !is_eligible(fill, path.last().copied(), excluded) {
                continue;
            }
            self.visits += 1;

            let next_input = input.safe_add(fill.input())?;
            path.push(fill);

            if next_input >= self.target {
                let needed = self.target.safe_sub(input)?;
                let next_output = output.safe_add(partial_output(fill, needed)?)?;
                self.offer(path, next_output);
            } else {
                let next_output = output.safe_add(fill.output())?;
                let next_excluded = excluded | fill.exclusion_mask();
                let next: Vec<&'a Fill> = remaining
                    .iter()
                    .copied()
                    .filter(|f| f.id() != fill.id())
                    .filter(|f| f.parent().is_some() || !f.is_excluded_by(next_excluded))
                    .collect();
                if self.can_improve(next_input, next_output, &next)? {
                    self.search(path, next_input, next_output, next_excluded, &next)?;
                }
            }

            path.pop();
        }
        Ok(())
    }

    fn offer(&mut self, path: &[&'a Fill], output: Decimal) {
        let better = match &self.best {
            Some(best) => compare_paths(output, best.output, self.minimize) == Ordering::Greater,
            None => true,
        };
        if better {
            self.best = Some(CandidatePath {
                fills: path.to_vec(),
                input: self.target,
                output,
            });
            self.improved = true;
        }
    }

    /// Optimistic bound: the rest of the target filled at the best rate
    /// still available. `remaining` is sorted best rate first.
    fn can_improve(&self, input: Decimal, output: Decimal, remaining: &[&'a Fill]) -> DomainResult<bool> {
        let Some(best_rate) = remaining.first().map(|f| f.rate()) else {
            return Ok(false);
        };
        let Some(best) = &self.best else {
            return Ok(true);
        };
        let needed = self.target.safe_sub(input)?;
        let Some(extra) = needed.checked_mul(best_rate) else {
            return Ok(true);
        };
        let bound = output.safe_add(extra)?;
        Ok(compare_paths(bound, best.output, self.minimize) == Ordering::Greater)
    }
}

/// Contiguity and exclusion check for extending a path ending at `last`.
fn is_eligible(fill: &Fill, last: Option<&Fill>, excluded: SourceFlags) -> bool {
    match fill.parent() {
        Some(parent) => last.is_some_and(|l| l.id() == parent),
        None => !fill.is_excluded_by(excluded),
    }
}
