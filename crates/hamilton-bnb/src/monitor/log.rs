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
use log::{info, trace};
use std::time::{Duration, Instant};

/// Reports search progress through the `log` facade.
///
/// A progress line is emitted at `info` level at most once per `log_interval`;
/// the clock is only consulted when `nodes_explored & clock_check_mask == 0`.
/// Improvements are reported at `info` as well, per-node events at `trace`.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_cost: Option<Cost>,
}

impl LogMonitor {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_cost: None,
        }
    }

    /// Returns the best cost reported so far.
    #[inline]
    pub fn best_cost(&self) -> Option<Cost> {
        self.best_cost
    }

    fn log_header(&self) {
        info!(
            "{:<9} | {:<14} | {:<7} | {:<14} | {:<14} | {:<14}",
            "Elapsed", "Nodes", "Depth", "Best Tour", "Current Cost", "Pruned (Bound)"
        );
    }

    fn log_line(&mut self, state: &PathState, stats: &BnbSolverStatistics) {
        let now = Instant::now();
        let elapsed = format!("{:.1}s", now.duration_since(self.start_time).as_secs_f32());
        let best = match self.best_cost {
            Some(c) => c.to_string(),
            None => "Inf".to_string(),
        };

        info!(
            "{:<9} | {:<14} | {:<7} | {:<14} | {:<14} | {:<14}",
            elapsed,
            stats.nodes_explored,
            state.depth(),
            best,
            state.cost_so_far(),
            stats.prunings_bound
        );

        self.last_log_time = now;
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl<W> TreeSearchMonitor<W> for LogMonitor
where
    W: EdgeWeight,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, matrix: &CostMatrix<W>, _stats: &BnbSolverStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_cost = None;
        info!(
            "search started on {} cities (symmetric: {})",
            matrix.num_cities(),
            matrix.is_symmetric()
        );
        self.log_header();
    }

    fn on_exit_search(&mut self, stats: &BnbSolverStatistics) {
        match self.best_cost {
            Some(c) => info!(
                "search finished after {} nodes, best tour {}",
                stats.nodes_explored, c
            ),
            None => info!(
                "search finished after {} nodes, no Hamiltonian cycle",
                stats.nodes_explored
            ),
        }
    }

    fn on_step(&mut self, state: &PathState, _upper_bound: Cost, stats: &BnbSolverStatistics) {
        if (stats.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(state, stats);
        }
    }

    fn on_lower_bound_computed(
        &mut self,
        state: &PathState,
        lower_bound: Cost,
        _stats: &BnbSolverStatistics,
    ) {
        trace!("bound {} at {}", lower_bound, state);
    }

    fn on_prune(&mut self, state: &PathState, reason: PruneReason, _stats: &BnbSolverStatistics) {
        trace!("pruned ({}) at {}", reason, state);
    }

    fn on_descend(&mut self, _state: &PathState, _stats: &BnbSolverStatistics) {}

    fn on_backtrack(&mut self, _state: &PathState, _stats: &BnbSolverStatistics) {}

    fn on_solution_found(&mut self, tour: &Tour, stats: &BnbSolverStatistics) {
        self.best_cost = Some(tour.cost());
        info!(
            "new incumbent {} after {} nodes",
            tour.cost(),
            stats.nodes_explored
        );
    }
}
