// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Validation utilities for lower-bound estimators. The search is only exact
//! if the estimator never overestimates, so this module provides a brute-force
//! harness that compares an estimator against the true cheapest completion of
//! every reachable partial tour of a small instance.
//!
//! True completions come from a Held-Karp table over subsets of unvisited
//! cities, which limits the check to `MAX_VALIDATION_CITIES` cities. Partial
//! tours are enumerated by depth-first search over existing edges; the
//! enumeration stops after `max_states` nodes so larger instances can still
//! be spot-checked.

use crate::{bound::estimator::LowerBoundEstimator, state::PathState};
use hamilton_model::{
    index::CityIndex,
    matrix::CostMatrix,
    num::{Cost, EdgeWeight, INFINITY},
};

/// The largest instance the exhaustive check accepts.
pub const MAX_VALIDATION_CITIES: usize = 16;

/// Returns `true` if `estimator` does not overestimate on any of the first
/// `max_states` reachable partial tours of `matrix`.
///
/// A state is checked against `cost_so_far + completion`, where `completion`
/// is the cheapest way to visit every remaining city and return to the origin.
/// States without any completion are skipped, every bound is admissible there.
///
/// # Panics
///
/// Panics if `matrix` has more than `MAX_VALIDATION_CITIES` cities.
pub fn is_admissible_exhaustive<W, E>(
    estimator: &E,
    matrix: &CostMatrix<W>,
    max_states: usize,
) -> bool
where
    W: EdgeWeight,
    E: LowerBoundEstimator<W> + ?Sized,
{
    let n = matrix.num_cities();
    assert!(
        n <= MAX_VALIDATION_CITIES,
        "called `is_admissible_exhaustive` with {} cities, at most {} are supported",
        n,
        MAX_VALIDATION_CITIES
    );

    let table = CompletionTable::new(matrix);
    let mut state = PathState::root(n);
    let mut budget = max_states;
    check_subtree(estimator, matrix, &table, &mut state, &mut budget)
}

fn check_subtree<W, E>(
    estimator: &E,
    matrix: &CostMatrix<W>,
    table: &CompletionTable,
    state: &mut PathState,
    budget: &mut usize,
) -> bool
where
    W: EdgeWeight,
    E: LowerBoundEstimator<W> + ?Sized,
{
    if *budget == 0 {
        return true;
    }
    *budget -= 1;

    let mask = state.visited().visited().fold(0usize, |m, c| m | (1 << c.get()));
    let completion = table.completion(mask, state.current());
    if completion != INFINITY
        && estimator.lower_bound(matrix, state) > state.cost_so_far() + completion
    {
        return false;
    }

    let current = state.current();
    for (next, w) in matrix.outgoing(current) {
        if !state.can_visit(next) {
            continue;
        }
        let w = w.to_cost();
        state.advance(next, w);
        let ok = check_subtree(estimator, matrix, table, state, budget);
        state.retreat(w);
        if !ok {
            return false;
        }
    }
    true
}

/// `completion(mask, v)`: the cheapest path that starts at `v`, visits every
/// city outside `mask` and ends at the origin. `mask` must contain `v` and the
/// origin.
struct CompletionTable {
    num_cities: usize,
    table: Vec<Cost>,
}

impl CompletionTable {
    fn new<W>(matrix: &CostMatrix<W>) -> Self
    where
        W: EdgeWeight,
    {
        let n = matrix.num_cities();
        let full = (1usize << n) - 1;
        let mut table = vec![INFINITY; (1usize << n) * n];

        // Fill from the largest masks down; a mask only depends on supersets.
        for mask in (0..=full).rev() {
            if mask & 1 == 0 {
                continue;
            }
            for v in 0..n {
                if mask & (1 << v) == 0 {
                    continue;
                }
                let from = CityIndex::new(v);
                let best = if mask == full {
                    matrix.closing_cost(from).unwrap_or(INFINITY)
                } else {
                    matrix
                        .outgoing(from)
                        .filter(|(to, _)| mask & (1 << to.get()) == 0)
                        .map(|(to, w)| {
                            let rest = table[(mask | (1 << to.get())) * n + to.get()];
                            if rest == INFINITY {
                                INFINITY
                            } else {
                                rest + w.to_cost()
                            }
                        })
                        .min()
                        .unwrap_or(INFINITY)
                };
                table[mask * n + v] = best;
            }
        }

        Self {
            num_cities: n,
            table,
        }
    }

    #[inline]
    fn completion(&self, mask: usize, current: CityIndex) -> Cost {
        self.table[mask * self.num_cities + current.get()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bound::{min_edge::MinimumEdgeBound, two_smallest::TwoSmallestEdgesBound},
        testing::random_matrix,
    };
    use hamilton_model::visited::VisitedSet;
    use rand::{SeedableRng, rngs::StdRng};

    /// A hundred times the coarse bound.
    struct Overestimate;

    impl LowerBoundEstimator<u32> for Overestimate {
        fn name(&self) -> &str {
            "Overestimate"
        }

        fn estimate_remaining_cost(
            &self,
            matrix: &CostMatrix<u32>,
            visited: &VisitedSet,
            current: CityIndex,
        ) -> Option<Cost> {
            MinimumEdgeBound
                .estimate_remaining_cost(matrix, visited, current)
                .map(|h| h * 100)
        }
    }

    fn asymmetric() -> CostMatrix<u32> {
        CostMatrix::from_rows(&[
            vec![0, 1, 0, 9],
            vec![1000, 0, 1, 7],
            vec![1, 1000, 0, 3],
            vec![2, 8, 6, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_builtin_estimators_are_admissible() {
        let m = asymmetric();
        assert!(is_admissible_exhaustive(
            &TwoSmallestEdgesBound::new(&m),
            &m,
            usize::MAX
        ));
        assert!(is_admissible_exhaustive(&MinimumEdgeBound, &m, usize::MAX));
    }

    #[test]
    fn test_builtin_estimators_are_admissible_on_random_instances() {
        let mut rng = StdRng::seed_from_u64(0xAD15);
        let mut checked = 0;
        for n in 1..=8 {
            for &density in &[1.0, 0.7, 0.4] {
                for symmetric in [true, false] {
                    let m = random_matrix(&mut rng, n, 50, density, symmetric);
                    let two_smallest = TwoSmallestEdgesBound::new(&m);
                    assert!(
                        is_admissible_exhaustive(&two_smallest, &m, usize::MAX),
                        "two smallest edges overestimates on {:?}",
                        m
                    );
                    assert!(
                        is_admissible_exhaustive(&MinimumEdgeBound, &m, usize::MAX),
                        "minimum edge overestimates on {:?}",
                        m
                    );
                    checked += 1;
                }
            }
        }
        assert_eq!(checked, 48);
    }

    #[test]
    fn test_single_edge_city_on_symmetric_pair() {
        // City 1 has one edge, used once in each direction by the only tour.
        let m = CostMatrix::<u32>::from_rows(&[vec![0, 6], vec![6, 0]]).unwrap();
        let bound = TwoSmallestEdgesBound::new(&m);
        assert!(bound.is_symmetric());
        assert!(is_admissible_exhaustive(&bound, &m, usize::MAX));

        let root = PathState::for_matrix(&m);
        let estimate = bound.lower_bound(&m, &root);
        assert!(estimate > 0 && estimate <= 12, "estimate {}", estimate);
    }

    #[test]
    fn test_detects_overestimation() {
        let m = asymmetric();
        assert!(!is_admissible_exhaustive(&Overestimate, &m, usize::MAX));
    }

    #[test]
    fn test_zero_budget_checks_nothing() {
        let m = asymmetric();
        assert!(is_admissible_exhaustive(&Overestimate, &m, 0));
    }

    #[test]
    fn test_completion_table_on_two_cities() {
        let m = CostMatrix::<u32>::from_rows(&[vec![0, 3], vec![4, 0]]).unwrap();
        let t = CompletionTable::new(&m);
        assert_eq!(t.completion(0b01, CityIndex::new(0)), 7);
        assert_eq!(t.completion(0b11, CityIndex::new(1)), 4);
    }

    #[test]
    #[should_panic(expected = "at most 16 are supported")]
    fn test_rejects_large_instances() {
        let rows = vec![vec![1u32; 17]; 17];
        let m = CostMatrix::from_rows(&rows).unwrap();
        is_admissible_exhaustive(&MinimumEdgeBound, &m, 1);
    }
}
