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

//! Tree search monitoring interface
//!
//! Declares the `TreeSearchMonitor` trait and `PruneReason`. Callbacks follow
//! the node lifecycle of the engine:
//!
//! - enter → step → {lower bound → prune | descend → ... → backtrack} → exit
//! - a complete route yields either `on_solution_found` or `on_prune`.
//!
//! `BnbSolverStatistics` is provided to every callback for telemetry.

use crate::{state::PathState, stats::BnbSolverStatistics};
use hamilton_model::{
    matrix::CostMatrix,
    num::{Cost, EdgeWeight},
    tour::Tour,
};

/// Reasons for abandoning a search node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// The lower bound of the node reached the incumbent.
    BoundDominated,
    /// The route is complete but its last city has no edge back to the origin.
    DeadEnd,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
            PruneReason::DeadEnd => write!(f, "DeadEnd"),
        }
    }
}

/// Trait for observing the search process of the engine.
pub trait TreeSearchMonitor<W>
where
    W: EdgeWeight,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called when the search starts.
    fn on_enter_search(&mut self, matrix: &CostMatrix<W>, statistics: &BnbSolverStatistics);
    /// Called when the search ends.
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics);
    /// Called when a node is entered, with the incumbent cost the node
    /// compares against.
    fn on_step(&mut self, state: &PathState, upper_bound: Cost, statistics: &BnbSolverStatistics);
    /// Called when the lower bound of a non-terminal node is computed.
    fn on_lower_bound_computed(
        &mut self,
        state: &PathState,
        lower_bound: Cost,
        statistics: &BnbSolverStatistics,
    );
    /// Called when a node is abandoned.
    fn on_prune(&mut self, state: &PathState, reason: PruneReason, statistics: &BnbSolverStatistics);
    /// Called after extending the route by one city.
    fn on_descend(&mut self, state: &PathState, statistics: &BnbSolverStatistics);
    /// Called after removing the last city of the route again.
    fn on_backtrack(&mut self, state: &PathState, statistics: &BnbSolverStatistics);
    /// Called when a tour improves the incumbent.
    fn on_solution_found(&mut self, tour: &Tour, statistics: &BnbSolverStatistics);
}

impl<W> std::fmt::Debug for dyn TreeSearchMonitor<W>
where
    W: EdgeWeight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl<W> std::fmt::Display for dyn TreeSearchMonitor<W>
where
    W: EdgeWeight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl<W, M> TreeSearchMonitor<W> for &mut M
where
    W: EdgeWeight,
    M: TreeSearchMonitor<W> + ?Sized,
{
    #[inline(always)]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline(always)]
    fn on_enter_search(&mut self, matrix: &CostMatrix<W>, statistics: &BnbSolverStatistics) {
        (**self).on_enter_search(matrix, statistics);
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics) {
        (**self).on_exit_search(statistics);
    }

    #[inline(always)]
    fn on_step(&mut self, state: &PathState, upper_bound: Cost, statistics: &BnbSolverStatistics) {
        (**self).on_step(state, upper_bound, statistics);
    }

    #[inline(always)]
    fn on_lower_bound_computed(
        &mut self,
        state: &PathState,
        lower_bound: Cost,
        statistics: &BnbSolverStatistics,
    ) {
        (**self).on_lower_bound_computed(state, lower_bound, statistics);
    }

    #[inline(always)]
    fn on_prune(&mut self, state: &PathState, reason: PruneReason, statistics: &BnbSolverStatistics) {
        (**self).on_prune(state, reason, statistics);
    }

    #[inline(always)]
    fn on_descend(&mut self, state: &PathState, statistics: &BnbSolverStatistics) {
        (**self).on_descend(state, statistics);
    }

    #[inline(always)]
    fn on_backtrack(&mut self, state: &PathState, statistics: &BnbSolverStatistics) {
        (**self).on_backtrack(state, statistics);
    }

    #[inline(always)]
    fn on_solution_found(&mut self, tour: &Tour, statistics: &BnbSolverStatistics) {
        (**self).on_solution_found(tour, statistics);
    }
}
