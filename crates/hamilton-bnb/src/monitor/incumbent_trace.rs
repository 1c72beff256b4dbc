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

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    state::PathState,
    stats::BnbSolverStatistics,
};
use hamilton_model::{
    matrix::CostMatrix,
    num::{Cost, EdgeWeight},
    tour::Tour,
};

/// Records the incumbent value every node was evaluated against.
///
/// Consecutive repeats are collapsed, so `observed()` is the sequence of
/// distinct values in the order the search saw them. Because the incumbent
/// only ever decreases, this sequence must be strictly decreasing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncumbentTraceMonitor {
    observed: Vec<Cost>,
}

impl IncumbentTraceMonitor {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// The distinct incumbent values in observation order.
    #[inline]
    pub fn observed(&self) -> &[Cost] {
        &self.observed
    }

    /// Returns `true` if no observed value is larger than its predecessor.
    pub fn is_non_increasing(&self) -> bool {
        self.observed.windows(2).all(|w| w[1] <= w[0])
    }

    #[inline]
    fn record(&mut self, value: Cost) {
        if self.observed.last() != Some(&value) {
            self.observed.push(value);
        }
    }
}

impl<W> TreeSearchMonitor<W> for IncumbentTraceMonitor
where
    W: EdgeWeight,
{
    fn name(&self) -> &str {
        "IncumbentTraceMonitor"
    }

    fn on_enter_search(&mut self, _matrix: &CostMatrix<W>, _statistics: &BnbSolverStatistics) {
        self.observed.clear();
    }

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {}

    fn on_step(&mut self, _state: &PathState, upper_bound: Cost, _statistics: &BnbSolverStatistics) {
        self.record(upper_bound);
    }

    fn on_lower_bound_computed(
        &mut self,
        _state: &PathState,
        _lower_bound: Cost,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    fn on_prune(
        &mut self,
        _state: &PathState,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    fn on_descend(&mut self, _state: &PathState, _statistics: &BnbSolverStatistics) {}

    fn on_backtrack(&mut self, _state: &PathState, _statistics: &BnbSolverStatistics) {}

    fn on_solution_found(&mut self, tour: &Tour, _statistics: &BnbSolverStatistics) {
        self.record(tour.cost());
    }
}
