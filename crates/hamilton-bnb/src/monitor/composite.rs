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

//! Monitoring combinators for tree search
//!
//! Provides `CompositeTreeSearchMonitor`, a fan-out monitor that forwards every
//! event to its children in insertion order. This lets you combine logging
//! and tracing without coupling them to the engine.

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

/// A tree search monitor that forwards events to all of its children.
pub struct CompositeTreeSearchMonitor<'a, W>
where
    W: EdgeWeight,
{
    monitors: Vec<Box<dyn TreeSearchMonitor<W> + 'a>>,
}

impl<'a, W> Default for CompositeTreeSearchMonitor<'a, W>
where
    W: EdgeWeight,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, W> CompositeTreeSearchMonitor<'a, W>
where
    W: EdgeWeight,
{
    /// Creates a new empty `CompositeTreeSearchMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: TreeSearchMonitor<W> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn TreeSearchMonitor<W> + 'a>) {
        self.monitors.push(monitor);
    }

    #[inline(always)]
    pub fn monitors(&self) -> &[Box<dyn TreeSearchMonitor<W> + 'a>] {
        &self.monitors
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, W> FromIterator<Box<dyn TreeSearchMonitor<W> + 'a>> for CompositeTreeSearchMonitor<'a, W>
where
    W: EdgeWeight,
{
    #[inline(always)]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn TreeSearchMonitor<W> + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<W> TreeSearchMonitor<W> for CompositeTreeSearchMonitor<'_, W>
where
    W: EdgeWeight,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "CompositeTreeSearchMonitor"
    }

    #[inline(always)]
    fn on_enter_search(&mut self, matrix: &CostMatrix<W>, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(matrix, statistics);
        }
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }

    #[inline(always)]
    fn on_step(&mut self, state: &PathState, upper_bound: Cost, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_step(state, upper_bound, statistics);
        }
    }

    #[inline(always)]
    fn on_lower_bound_computed(
        &mut self,
        state: &PathState,
        lower_bound: Cost,
        statistics: &BnbSolverStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_lower_bound_computed(state, lower_bound, statistics);
        }
    }

    #[inline(always)]
    fn on_prune(&mut self, state: &PathState, reason: PruneReason, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_prune(state, reason, statistics);
        }
    }

    #[inline(always)]
    fn on_descend(&mut self, state: &PathState, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_descend(state, statistics);
        }
    }

    #[inline(always)]
    fn on_backtrack(&mut self, state: &PathState, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_backtrack(state, statistics);
        }
    }

    #[inline(always)]
    fn on_solution_found(&mut self, tour: &Tour, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(tour, statistics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{incumbent_trace::IncumbentTraceMonitor, no_op::NoOperationMonitor};

    /// Counts `on_step` calls into a shared cell.
    struct Counting<'c> {
        steps: &'c std::cell::Cell<usize>,
    }

    impl TreeSearchMonitor<u32> for Counting<'_> {
        fn name(&self) -> &str {
            "Counting"
        }
        fn on_enter_search(&mut self, _: &CostMatrix<u32>, _: &BnbSolverStatistics) {}
        fn on_exit_search(&mut self, _: &BnbSolverStatistics) {}
        fn on_step(&mut self, _: &PathState, _: Cost, _: &BnbSolverStatistics) {
            self.steps.set(self.steps.get() + 1);
        }
        fn on_lower_bound_computed(&mut self, _: &PathState, _: Cost, _: &BnbSolverStatistics) {}
        fn on_prune(&mut self, _: &PathState, _: PruneReason, _: &BnbSolverStatistics) {}
        fn on_descend(&mut self, _: &PathState, _: &BnbSolverStatistics) {}
        fn on_backtrack(&mut self, _: &PathState, _: &BnbSolverStatistics) {}
        fn on_solution_found(&mut self, _: &Tour, _: &BnbSolverStatistics) {}
    }

    #[test]
    fn test_fans_out_to_every_child() {
        let steps = std::cell::Cell::new(0);
        let mut composite = CompositeTreeSearchMonitor::<u32>::new();
        composite.add_monitor(Counting { steps: &steps });
        composite.add_monitor(Counting { steps: &steps });
        composite.add_monitor(NoOperationMonitor);
        assert_eq!(composite.len(), 3);

        let state = PathState::root(2);
        let stats = BnbSolverStatistics::default();
        composite.on_step(&state, 10, &stats);
        composite.on_step(&state, 9, &stats);
        assert_eq!(steps.get(), 4);
    }

    #[test]
    fn test_from_iterator() {
        let composite: CompositeTreeSearchMonitor<'_, u32> = vec![
            Box::new(NoOperationMonitor) as Box<dyn TreeSearchMonitor<u32>>,
            Box::new(IncumbentTraceMonitor::new()),
        ]
        .into_iter()
        .collect();
        assert_eq!(composite.len(), 2);
        assert!(!composite.is_empty());
        assert_eq!(composite.monitors()[1].name(), "IncumbentTraceMonitor");
    }
}
