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

//! # Two Smallest Edges Bound
//!
//! Every unvisited city still needs one edge into it and one edge out of it in
//! any completion of the tour. Charging each unvisited city the two cheapest
//! edges it could use and halving the sum gives an admissible bound: every
//! edge of the remaining path is charged at most once from each endpoint.
//!
//! How a city's two edges are picked depends on the matrix:
//!
//! - **Symmetric**: the two smallest non-zero entries of its row. In and out
//!   edges come from the same row, so these are exactly its two cheapest
//!   incident edges. A city with a single edge is charged that edge twice.
//! - **Asymmetric**: its cheapest outgoing plus its cheapest incoming edge.
//!   Two outgoing edges would overcharge a city whose cheap edges all point
//!   inward.
//!
//! A city without any usable edge has no completion, which makes the whole
//! estimate `None`. The per-city charges only depend on the matrix and are
//! computed once in `new`, so a node costs one pass over its unvisited cities.

use crate::bound::estimator::LowerBoundEstimator;
use hamilton_model::{
    index::CityIndex,
    matrix::CostMatrix,
    num::{Cost, EdgeWeight},
    visited::VisitedSet,
};

/// Halved sum of the two cheapest incident edges of every unvisited city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoSmallestEdgesBound {
    /// `None` marks a city with no way in or no way out.
    charges: Vec<Option<Cost>>,
    symmetric: bool,
}

impl TwoSmallestEdgesBound {
    /// Precomputes the per-city charges of `matrix`.
    pub fn new<W>(matrix: &CostMatrix<W>) -> Self
    where
        W: EdgeWeight,
    {
        let symmetric = matrix.is_symmetric();
        let charges = (0..matrix.num_cities())
            .map(CityIndex::new)
            .map(|city| {
                if symmetric {
                    symmetric_charge(matrix, city)
                } else {
                    asymmetric_charge(matrix, city)
                }
            })
            .collect();

        Self { charges, symmetric }
    }

    /// Returns the charge of `city`, `None` if it cannot be part of a cycle.
    #[inline]
    pub fn charge(&self, city: CityIndex) -> Option<Cost> {
        self.charges[city.get()]
    }

    /// Returns `true` if the charges were computed from a symmetric matrix.
    #[inline]
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }
}

fn symmetric_charge<W>(matrix: &CostMatrix<W>, city: CityIndex) -> Option<Cost>
where
    W: EdgeWeight,
{
    let mut first: Option<Cost> = None;
    let mut second: Option<Cost> = None;
    for (_, w) in matrix.outgoing(city) {
        let w = w.to_cost();
        match first {
            Some(f) if w >= f => {
                if second.is_none_or(|s| w < s) {
                    second = Some(w);
                }
            }
            _ => {
                second = first;
                first = Some(w);
            }
        }
    }
    let first = first?;
    Some(first + second.unwrap_or(first))
}

fn asymmetric_charge<W>(matrix: &CostMatrix<W>, city: CityIndex) -> Option<Cost>
where
    W: EdgeWeight,
{
    let out = matrix.outgoing(city).map(|(_, w)| w.to_cost()).min()?;
    let into = matrix.incoming(city).map(|(_, w)| w.to_cost()).min()?;
    Some(out + into)
}

impl<W> LowerBoundEstimator<W> for TwoSmallestEdgesBound
where
    W: EdgeWeight,
{
    fn name(&self) -> &str {
        "TwoSmallestEdgesBound"
    }

    #[inline]
    fn estimate_remaining_cost(
        &self,
        matrix: &CostMatrix<W>,
        visited: &VisitedSet,
        _current: CityIndex,
    ) -> Option<Cost> {
        debug_assert_eq!(
            self.charges.len(),
            matrix.num_cities(),
            "called `TwoSmallestEdgesBound::estimate_remaining_cost` with a matrix it was not built for"
        );

        let mut sum: Cost = 0;
        for city in visited.unvisited() {
            sum = sum.saturating_add(self.charge(city)?);
        }
        Some(sum / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PathState;
    use hamilton_model::num::INFINITY;

    fn ci(i: usize) -> CityIndex {
        CityIndex::new(i)
    }

    fn symmetric4() -> CostMatrix<u32> {
        CostMatrix::from_rows(&[
            vec![0, 10, 15, 20],
            vec![10, 0, 35, 25],
            vec![15, 35, 0, 30],
            vec![20, 25, 30, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_symmetric_charges_use_two_smallest_in_row() {
        let m = symmetric4();
        let b = TwoSmallestEdgesBound::new(&m);
        assert!(b.is_symmetric());
        assert_eq!(b.charge(ci(0)), Some(25));
        assert_eq!(b.charge(ci(1)), Some(35));
        assert_eq!(b.charge(ci(2)), Some(45));
        assert_eq!(b.charge(ci(3)), Some(45));
    }

    #[test]
    fn test_root_bound_on_symmetric_instance() {
        let m = symmetric4();
        let b = TwoSmallestEdgesBound::new(&m);
        // (35 + 45 + 45) / 2 = 62; the optimum is 10 + 25 + 30 + 15 = 80.
        assert_eq!(b.lower_bound(&m, &PathState::root(4)), 62);
    }

    #[test]
    fn test_floor_division() {
        let m = CostMatrix::<u32>::from_rows(&[vec![0, 3, 4], vec![3, 0, 5], vec![4, 5, 0]])
            .unwrap();
        let b = TwoSmallestEdgesBound::new(&m);
        // (8 + 9) / 2 = 8
        assert_eq!(b.lower_bound(&m, &PathState::root(3)), 8);
    }

    #[test]
    fn test_single_edge_city_is_charged_twice() {
        let m = CostMatrix::<u32>::from_rows(&[vec![0, 7], vec![7, 0]]).unwrap();
        let b = TwoSmallestEdgesBound::new(&m);
        assert_eq!(b.charge(ci(1)), Some(14));
        assert_eq!(b.lower_bound(&m, &PathState::root(2)), 7);
    }

    #[test]
    fn test_asymmetric_charges_use_in_and_out_edges() {
        // Cheap edges 0->1->2->0; the reverse direction is expensive.
        let m = CostMatrix::<u32>::from_rows(&[
            vec![0, 1, 0],
            vec![1000, 0, 1],
            vec![1, 1000, 0],
        ])
        .unwrap();
        let b = TwoSmallestEdgesBound::new(&m);
        assert!(!b.is_symmetric());
        assert_eq!(b.charge(ci(1)), Some(2));
        assert_eq!(b.charge(ci(2)), Some(2));

        // Two cheapest outgoing edges would give (1001 + 1001) / 2 = 1001,
        // far above the only tour of cost 3.
        let root = b.lower_bound(&m, &PathState::root(3));
        assert_eq!(root, 2);
        assert!(root <= 3);
    }

    #[test]
    fn test_isolated_city_makes_bound_infinite() {
        let m = CostMatrix::<u32>::from_rows(&[
            vec![0, 2, 3],
            vec![2, 0, 0],
            vec![0, 0, 0],
        ])
        .unwrap();
        let b = TwoSmallestEdgesBound::new(&m);
        assert_eq!(b.charge(ci(2)), None);
        assert_eq!(b.lower_bound(&m, &PathState::root(3)), INFINITY);

        // Once the isolated city is on the route it no longer matters.
        let s = PathState::root(3).child(ci(2), 3);
        assert_ne!(b.lower_bound(&m, &s), INFINITY);
    }

    #[test]
    fn test_bound_grows_with_cost_so_far() {
        let m = symmetric4();
        let b = TwoSmallestEdgesBound::new(&m);
        let visited = VisitedSet::with_origin(4).with_city(ci(1));
        let low = b.estimate(&m, &visited, 10, ci(1));
        let high = b.estimate(&m, &visited, 50, ci(1));
        assert_eq!(high - low, 40);
    }
}
