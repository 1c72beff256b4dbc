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

use crate::state::PathState;
use hamilton_model::{
    index::CityIndex,
    matrix::CostMatrix,
    num::{Cost, EdgeWeight, INFINITY},
    visited::VisitedSet,
};

/// A strategy for bounding the cost of any completion of a partial tour.
///
/// The engine calls `lower_bound` at every non-terminal node and prunes when
/// the result reaches the incumbent. Implementations must be admissible: the
/// returned value never exceeds `cost_so_far` plus the cheapest way to visit
/// every remaining city and return to the origin.
///
/// Estimators are immutable once constructed and shared by reference between
/// worker threads.
pub trait LowerBoundEstimator<W>
where
    W: EdgeWeight,
{
    /// Returns the name of the estimator.
    fn name(&self) -> &str;

    /// Bounds the cost still needed to leave `current`, visit every city not in
    /// `visited` and return to the origin.
    ///
    /// Only called while at least one city is unvisited. Returns `None` if the
    /// estimator can tell that no completion exists.
    fn estimate_remaining_cost(
        &self,
        matrix: &CostMatrix<W>,
        visited: &VisitedSet,
        current: CityIndex,
    ) -> Option<Cost>;

    /// Computes the total bound `cost_so_far + h`.
    ///
    /// For a complete `visited` the bound is exact: the cost of the closing
    /// edge, or `INFINITY` if it is missing. An impossible completion is
    /// `INFINITY` as well. Additions saturate at `INFINITY`.
    fn estimate(
        &self,
        matrix: &CostMatrix<W>,
        visited: &VisitedSet,
        cost_so_far: Cost,
        current: CityIndex,
    ) -> Cost {
        let remaining = if visited.is_complete() {
            matrix.closing_cost(current)
        } else {
            self.estimate_remaining_cost(matrix, visited, current)
        };
        match remaining {
            Some(h) => cost_so_far.saturating_add(h),
            None => INFINITY,
        }
    }

    /// Computes the bound of a search node.
    #[inline]
    fn lower_bound(&self, matrix: &CostMatrix<W>, state: &PathState) -> Cost {
        self.estimate(
            matrix,
            state.visited(),
            state.cost_so_far(),
            state.current(),
        )
    }
}

impl<W> std::fmt::Debug for dyn LowerBoundEstimator<W>
where
    W: EdgeWeight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LowerBoundEstimator({})", self.name())
    }
}

impl<W> std::fmt::Display for dyn LowerBoundEstimator<W>
where
    W: EdgeWeight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LowerBoundEstimator({})", self.name())
    }
}

impl<W, E> LowerBoundEstimator<W> for &E
where
    W: EdgeWeight,
    E: LowerBoundEstimator<W> + ?Sized,
{
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn estimate_remaining_cost(
        &self,
        matrix: &CostMatrix<W>,
        visited: &VisitedSet,
        current: CityIndex,
    ) -> Option<Cost> {
        (**self).estimate_remaining_cost(matrix, visited, current)
    }

    #[inline]
    fn estimate(
        &self,
        matrix: &CostMatrix<W>,
        visited: &VisitedSet,
        cost_so_far: Cost,
        current: CityIndex,
    ) -> Cost {
        (**self).estimate(matrix, visited, cost_so_far, current)
    }
}
