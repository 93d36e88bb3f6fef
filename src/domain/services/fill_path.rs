//! # Fill Paths
//!
//! Pure functions over ordered sequences of fills.
//!
//! A path is any iterator of `&Fill`; the optimizer keeps candidate paths
//! as `Vec<&Fill>` borrowing from the forest arena.
//!
//! - [`path_input`]: total input, uncapped
//! - [`path_output`]: output, optionally capped at a maximum input with
//!   the crossing fill prorated
//! - [`simplify`]: merges adjacent slices of the same venue
//! - [`compare_paths`]: side-aware output comparison
//! - [`sort_best_first`]: side-aware marginal rate ordering
//! - [`clip_to_input`]: shortest prefix reaching a target input
//!
//! # Examples
//!
//! ```
//! use liquidity_aggregator::domain::entities::fill::{Fill, FillId, FillSource};
//! use liquidity_aggregator::domain::services::fill_path::{path_input, path_output};
//! use liquidity_aggregator::domain::value_objects::{SourceFlags, VenueId};
//! use rust_decimal::Decimal;
//!
//! let flags = SourceFlags::venue(0).unwrap();
//! let fill = Fill::new(
//!     FillId::new(0),
//!     Decimal::new(100, 0),
//!     Decimal::new(300, 0),
//!     flags,
//!     flags,
//!     None,
//!     FillSource::Venue(VenueId::new("v")),
//! );
//! let path = vec![&fill];
//!
//! assert_eq!(path_input(path.iter().copied()).unwrap(), Decimal::new(100, 0));
//! // Capping at 50 takes half the fill.
//! let capped = path_output(path.iter().copied(), Some(Decimal::new(50, 0))).unwrap();
//! assert_eq!(capped, Decimal::new(150, 0));
//! ```

use crate::domain::entities::fill::Fill;
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::{CheckedArithmetic, TradeSide, mul_div};
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Sums the input of every fill.
///
/// # Errors
///
/// Returns `DomainError::Arithmetic` on overflow.
pub fn path_input<'a, I>(path: I) -> DomainResult<Decimal>
where
    I: IntoIterator<Item = &'a Fill>,
{
    let mut total = Decimal::ZERO;
    for fill in path {
        total = total.safe_add(fill.input())?;
    }
    Ok(total)
}

/// Output of `fill` when only `partial_input` of its input is used.
///
/// Linear interpolation, never more than the fill's full output.
///
/// # Errors
///
/// Returns `DomainError::Arithmetic` on overflow.
pub fn partial_output(fill: &Fill, partial_input: Decimal) -> DomainResult<Decimal> {
    if partial_input >= fill.input() {
        return Ok(fill.output());
    }
    if partial_input <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    Ok(mul_div(fill.output(), partial_input, fill.input())?)
}

/// Accumulates the output of a path.
///
/// With `max_input`, input beyond the cap is ignored and the fill that
/// crosses the cap contributes a prorated share of its output.
///
/// # Errors
///
/// Returns `DomainError::Arithmetic` on overflow.
pub fn path_output<'a, I>(path: I, max_input: Option<Decimal>) -> DomainResult<Decimal>
where
    I: IntoIterator<Item = &'a Fill>,
{
    let mut input = Decimal::ZERO;
    let mut output = Decimal::ZERO;
    for fill in path {
        let Some(cap) = max_input else {
            output = output.safe_add(fill.output())?;
            continue;
        };
        let remaining = cap.safe_sub(input)?;
        if remaining <= Decimal::ZERO {
            break;
        }
        if fill.input() <= remaining {
            input = input.safe_add(fill.input())?;
            output = output.safe_add(fill.output())?;
        } else {
            output = output.safe_add(partial_output(fill, remaining)?)?;
            break;
        }
    }
    Ok(output)
}

/// Merges runs of adjacent non-native fills from the same venue.
///
/// Each run collapses into one fill carrying the run's exact input and
/// output sums and the identity of its first element. Native fills are
/// copied as they are. Source order is preserved.
///
/// # Errors
///
/// Returns `DomainError::Arithmetic` on overflow.
pub fn simplify<'a, I>(path: I) -> DomainResult<Vec<Fill>>
where
    I: IntoIterator<Item = &'a Fill>,
{
    let mut merged: Vec<Fill> = Vec::new();
    for fill in path {
        if let Some(last) = merged.last_mut()
            && !fill.is_native()
            && !last.is_native()
            && last.source() == fill.source()
        {
            let input = last.input().safe_add(fill.input())?;
            let output = last.output().safe_add(fill.output())?;
            *last = last.with_amounts(input, output);
            continue;
        }
        merged.push(fill.clone());
    }
    Ok(merged)
}

/// Compares two path outputs from the requester's point of view.
///
/// Returns `Ordering::Greater` when `a` is better than `b`. Higher output
/// is better for sells; with `minimize` (buys) lower output, i.e. lower
/// cost, is better.
///
/// # Examples
///
/// ```
/// use liquidity_aggregator::domain::services::fill_path::compare_paths;
/// use rust_decimal::Decimal;
/// use std::cmp::Ordering;
///
/// let (a, b) = (Decimal::new(10, 0), Decimal::new(12, 0));
/// assert_eq!(compare_paths(a, b, false), Ordering::Less);
/// assert_eq!(compare_paths(a, b, true), Ordering::Greater);
/// ```
#[must_use]
pub fn compare_paths(a: Decimal, b: Decimal, minimize: bool) -> Ordering {
    if minimize { b.cmp(&a) } else { a.cmp(&b) }
}

/// Orders fills best marginal rate first: highest `output / input` for
/// sells, lowest for buys. The sort is stable.
pub fn sort_best_first(fills: &mut [&Fill], side: TradeSide) {
    match side {
        TradeSide::Sell => fills.sort_by(|a, b| b.cmp_rate(a)),
        TradeSide::Buy => fills.sort_by(|a, b| a.cmp_rate(b)),
    }
}

/// Shortest prefix of `path` whose total input reaches `target`.
///
/// Returns the whole path if it never reaches the target.
///
/// # Errors
///
/// Returns `DomainError::Arithmetic` on overflow.
pub fn clip_to_input<'a>(path: &[&'a Fill], target: Decimal) -> DomainResult<Vec<&'a Fill>> {
    let mut input = Decimal::ZERO;
    let mut clipped = Vec::with_capacity(path.len());
    for fill in path {
        if input >= target {
            break;
        }
        input = input.safe_add(fill.input())?;
        clipped.push(*fill);
    }
    Ok(clipped)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::fill::{FillId, FillSource};
    use crate::domain::value_objects::{SourceFlags, VenueId};

    fn dec(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    fn venue(id: usize, slot: usize, parent: Option<usize>, input: i64, output: i64) -> Fill {
        let flags = SourceFlags::venue(slot).unwrap();
        Fill::new(
            FillId::new(id),
            dec(input),
            dec(output),
            flags,
            flags,
            parent.map(FillId::new),
            FillSource::Venue(VenueId::new(format!("venue-{slot}"))),
        )
    }

    fn native(id: usize, input: i64, output: i64) -> Fill {
        Fill::new(
            FillId::new(id),
            dec(input),
            dec(output),
            SourceFlags::NATIVE,
            SourceFlags::EMPTY,
            None,
            FillSource::Native {
                order_index: id,
                fillable_taker_amount: dec(input),
            },
        )
    }

    mod output {
        use super::*;

        #[test]
        fn uncapped_sums_everything() {
            let fills = [native(0, 10, 20), venue(1, 0, None, 5, 7)];
            assert_eq!(path_output(fills.iter(), None).unwrap(), dec(27));
        }

        #[test]
        fn cap_prorates_crossing_fill() {
            let fills = [native(0, 10, 20), native(1, 10, 40)];
            // 10 fully + 5/10 of the second fill
            assert_eq!(path_output(fills.iter(), Some(dec(15))).unwrap(), dec(40));
        }

        #[test]
        fn cap_above_total_has_no_effect() {
            let fills = [native(0, 10, 20), native(1, 10, 40)];
            assert_eq!(
                path_output(fills.iter(), Some(dec(1_000))).unwrap(),
                path_output(fills.iter(), None).unwrap()
            );
        }

        #[test]
        fn zero_cap_yields_nothing() {
            let fills = [native(0, 10, 20)];
            assert_eq!(path_output(fills.iter(), Some(Decimal::ZERO)).unwrap(), Decimal::ZERO);
        }

        #[test]
        fn partial_output_never_exceeds_full() {
            let fill = native(0, 3, 10);
            assert_eq!(partial_output(&fill, dec(5)).unwrap(), dec(10));
            assert_eq!(partial_output(&fill, dec(3)).unwrap(), dec(10));
        }

        #[test]
        fn empty_path_is_zero() {
            assert_eq!(path_output(std::iter::empty(), Some(dec(5))).unwrap(), Decimal::ZERO);
            assert_eq!(path_input(std::iter::empty()).unwrap(), Decimal::ZERO);
        }
    }

    mod simplify_path {
        use super::*;

        #[test]
        fn merges_adjacent_venue_run() {
            let a = venue(0, 0, None, 10, 30);
            let b = venue(1, 0, Some(0), 10, 25);
            let c = venue(2, 0, Some(1), 10, 20);
            let merged = simplify([&a, &b, &c]).unwrap();
            assert_eq!(merged.len(), 1);
            assert_eq!(merged[0].input(), dec(30));
            assert_eq!(merged[0].output(), dec(75));
            assert_eq!(merged[0].id(), a.id());
        }

        #[test]
        fn never_merges_natives() {
            let a = native(0, 10, 30);
            let b = native(1, 10, 30);
            assert_eq!(simplify([&a, &b]).unwrap().len(), 2);
        }

        #[test]
        fn keeps_distinct_venues_and_order() {
            let a = venue(0, 0, None, 10, 30);
            let n = native(1, 5, 5);
            let b = venue(2, 1, None, 10, 20);
            let merged = simplify([&a, &n, &b]).unwrap();
            assert_eq!(merged.len(), 3);
            assert!(merged[1].is_native());
            assert_eq!(merged[2].source(), b.source());
        }

        #[test]
        fn preserves_totals() {
            let a = venue(0, 0, None, 7, 11);
            let b = venue(1, 0, Some(0), 3, 2);
            let n = native(2, 5, 9);
            let path = [&a, &b, &n];
            let merged = simplify(path).unwrap();
            assert_eq!(
                path_input(merged.iter()).unwrap(),
                path_input(path.iter().copied()).unwrap()
            );
            assert_eq!(
                path_output(merged.iter(), None).unwrap(),
                path_output(path.iter().copied(), None).unwrap()
            );
        }
    }

    mod compare {
        use super::*;

        #[test]
        fn equal_outputs_compare_equal_on_both_sides() {
            assert_eq!(compare_paths(dec(5), dec(5), false), Ordering::Equal);
            assert_eq!(compare_paths(dec(5), dec(5), true), Ordering::Equal);
        }

        #[test]
        fn sell_prefers_higher_output() {
            assert_eq!(compare_paths(dec(6), dec(5), false), Ordering::Greater);
        }

        #[test]
        fn buy_prefers_lower_cost() {
            assert_eq!(compare_paths(dec(4), dec(5), true), Ordering::Greater);
        }
    }

    mod sorting {
        use super::*;

        #[test]
        fn sell_puts_highest_rate_first() {
            let (a, b, c) = (native(0, 10, 10), native(1, 10, 30), native(2, 10, 20));
            let mut fills = vec![&a, &b, &c];
            sort_best_first(&mut fills, TradeSide::Sell);
            let ids: Vec<usize> = fills.iter().map(|f| f.id().index()).collect();
            assert_eq!(ids, vec![1, 2, 0]);
        }

        #[test]
        fn buy_puts_lowest_rate_first_and_keeps_ties_stable() {
            let (a, b, c) = (native(0, 10, 20), native(1, 10, 10), native(2, 20, 20));
            let mut fills = vec![&a, &b, &c];
            sort_best_first(&mut fills, TradeSide::Buy);
            let ids: Vec<usize> = fills.iter().map(|f| f.id().index()).collect();
            assert_eq!(ids, vec![1, 2, 0]);
        }
    }

    mod clip {
        use super::*;

        #[test]
        fn stops_once_target_reached() {
            let fills = [native(0, 10, 1), native(1, 10, 1), native(2, 10, 1)];
            let path: Vec<&Fill> = fills.iter().collect();
            assert_eq!(clip_to_input(&path, dec(15)).unwrap().len(), 2);
            assert_eq!(clip_to_input(&path, dec(10)).unwrap().len(), 1);
        }

        #[test]
        fn short_path_kept_whole() {
            let fills = [native(0, 10, 1)];
            let path: Vec<&Fill> = fills.iter().collect();
            assert_eq!(clip_to_input(&path, dec(50)).unwrap().len(), 1);
        }
    }
}
