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

use hamilton_model::num::Cost;
use std::time::Duration;

/// Statistics collected by one branch-and-bound run.
///
/// Every parallel task counts into its own instance; the coordinator merges
/// them at the join barrier, so the totals match what a single thread would
/// have recorded for the same set of nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BnbSolverStatistics {
    /// Total nodes evaluated.
    pub nodes_explored: u64,
    /// Subtrees cut because their lower bound reached the incumbent. Includes
    /// complete tours that did not beat it.
    pub prunings_bound: u64,
    /// Complete routes whose last city has no edge back to the origin.
    pub dead_ends: u64,
    /// Tours that strictly improved the incumbent.
    pub solutions_found: u64,
    /// The deepest level reached in the tree (number of edges on the route).
    pub max_depth: u64,
    /// Subtrees handed to the worker pool as independent tasks.
    pub tasks_spawned: u64,
    /// The lower bound of the root node.
    pub root_lower_bound: Cost,
    /// Total time spent in the search.
    pub time_total: Duration,
}

impl Default for BnbSolverStatistics {
    fn default() -> Self {
        Self {
            nodes_explored: 0,
            prunings_bound: 0,
            dead_ends: 0,
            solutions_found: 0,
            max_depth: 0,
            tasks_spawned: 0,
            root_lower_bound: 0,
            time_total: Duration::ZERO,
        }
    }
}

impl BnbSolverStatistics {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_dead_end(&mut self) {
        self.dead_ends = self.dead_ends.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_task_spawned(&mut self) {
        self.tasks_spawned = self.tasks_spawned.saturating_add(1);
    }

    #[inline]
    pub fn set_root_lower_bound(&mut self, bound: Cost) {
        self.root_lower_bound = bound;
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Folds the counters of a finished subtree into `self`.
    ///
    /// Counters add up and `max_depth` takes the maximum. The root bound and
    /// the total time belong to the run, not to a subtree, and are left alone.
    pub fn merge(&mut self, other: &BnbSolverStatistics) {
        self.nodes_explored = self.nodes_explored.saturating_add(other.nodes_explored);
        self.prunings_bound = self.prunings_bound.saturating_add(other.prunings_bound);
        self.dead_ends = self.dead_ends.saturating_add(other.dead_ends);
        self.solutions_found = self.solutions_found.saturating_add(other.solutions_found);
        self.tasks_spawned = self.tasks_spawned.saturating_add(other.tasks_spawned);
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

impl std::fmt::Display for BnbSolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Hamilton-BnB Solver Statistics:")?;
        writeln!(f, "  Nodes explored:       {}", self.nodes_explored)?;
        writeln!(f, "  Max depth reached:    {}", self.max_depth)?;
        writeln!(f, "  Prunings (bound):     {}", self.prunings_bound)?;
        writeln!(f, "  Dead ends:            {}", self.dead_ends)?;
        writeln!(f, "  Solutions found:      {}", self.solutions_found)?;
        writeln!(f, "  Tasks spawned:        {}", self.tasks_spawned)?;
        writeln!(f, "  Root lower bound:     {}", self.root_lower_bound)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}
