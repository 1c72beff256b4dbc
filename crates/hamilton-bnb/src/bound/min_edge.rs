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

use crate::bound::estimator::LowerBoundEstimator;
use hamilton_model::{
    index::CityIndex,
    matrix::CostMatrix,
    num::{Cost, EdgeWeight},
    visited::VisitedSet,
};

/// The coarse bound: every remaining hop costs at least the cheapest edge of
/// the whole matrix.
///
/// With `k` unvisited cities a completion uses `k + 1` more edges, so the
/// estimate is `(k + 1) * min_edge`. It is cheaper to evaluate than
/// `TwoSmallestEdgesBound` but prunes far less.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinimumEdgeBound;

impl MinimumEdgeBound {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl<W> LowerBoundEstimator<W> for MinimumEdgeBound
where
    W: EdgeWeight,
{
    fn name(&self) -> &str {
        "MinimumEdgeBound"
    }

    #[inline]
    fn estimate_remaining_cost(
        &self,
        matrix: &CostMatrix<W>,
        visited: &VisitedSet,
        _current: CityIndex,
    ) -> Option<Cost> {
        let min_edge = matrix.min_edge()?.to_cost();
        let hops = (visited.num_cities() - visited.len() + 1) as Cost;
        Some(hops.saturating_mul(min_edge))
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

    #[test]
    fn test_counts_remaining_hops() {
        let m = CostMatrix::<u32>::from_rows(&[
            vec![0, 10, 15, 20],
            vec![10, 0, 35, 25],
            vec![15, 35, 0, 30],
            vec![20, 25, 30, 0],
        ])
        .unwrap();
        let b = MinimumEdgeBound::new();

        // Three unvisited cities, four edges left.
        assert_eq!(b.lower_bound(&m, &PathState::root(4)), 40);

        let s = PathState::root(4).child(ci(2), 15);
        assert_eq!(b.lower_bound(&m, &s), 15 + 30);
    }

    #[test]
    fn test_complete_route_is_exact() {
        let m = CostMatrix::<u32>::from_rows(&[vec![0, 3, 9], vec![9, 0, 4], vec![5, 9, 0]])
            .unwrap();
        let s = PathState::root(3).child(ci(1), 3).child(ci(2), 4);
        assert_eq!(MinimumEdgeBound.lower_bound(&m, &s), 12);
    }

    #[test]
    fn test_no_edges_at_all() {
        let m = CostMatrix::<u32>::from_rows(&[vec![0, 0], vec![0, 0]]).unwrap();
        assert_eq!(
            MinimumEdgeBound.lower_bound(&m, &PathState::root(2)),
            INFINITY
        );
    }
}
