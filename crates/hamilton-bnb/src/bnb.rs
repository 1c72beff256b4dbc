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

//! Branch-and-bound search engine for the Traveling Salesman Problem.
//!
//! The engine is a depth-first recursion over partial tours starting at the
//! origin. Every node passes through the same small state machine:
//!
//! - **Evaluate**: tighten the session's upper bound against the incumbent store.
//! - **Accept**: a complete route is closed with the edge back to the origin
//!   and offered to the store if it is cheaper. A missing closing edge is a
//!   dead end.
//! - **Prune**: an incomplete route whose lower bound reaches the incumbent is
//!   abandoned; the bound is admissible, so nothing below can win.
//! - **Branch**: otherwise every unvisited city reachable from the current one
//!   is appended in ascending index order and explored recursively.
//!
//! A sequential session owns a single `PathState` that it mutates on the way
//! down and restores on the way back. The same session type explores the
//! inline subtrees of the parallel coordinator, in which case it starts from
//! a task-owned copy of the state and talks to the shared incumbent.

use crate::{
    bound::estimator::LowerBoundEstimator,
    incumbent::{IncumbentStore, NoSharedIncumbent, SharedIncumbentAdapter},
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    result::BnbSolverOutcome,
    state::PathState,
    stats::BnbSolverStatistics,
};
use hamilton_model::{
    matrix::CostMatrix,
    num::{Cost, EdgeWeight},
    tour::Tour,
};
use hamilton_search::incumbent::SharedIncumbent;
use log::{debug, info};
use std::time::Instant;

/// A sequential branch-and-bound solver.
///
/// Bounding is delegated to a `LowerBoundEstimator` and observation to a
/// `TreeSearchMonitor`; the solver only drives the recursion.
#[derive(Debug, Clone, Copy, Default)]
pub struct BnbSolver;

impl BnbSolver {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Solves `matrix` on the calling thread.
    pub fn solve<W, E, S>(
        &self,
        matrix: &CostMatrix<W>,
        estimator: &E,
        mut monitor: S,
    ) -> BnbSolverOutcome
    where
        W: EdgeWeight,
        E: LowerBoundEstimator<W> + ?Sized,
        S: TreeSearchMonitor<W>,
    {
        info!(
            "sequential search on {} cities with {}",
            matrix.num_cities(),
            estimator.name()
        );
        let session = SearchSession::new(
            matrix,
            estimator,
            &mut monitor,
            NoSharedIncumbent::new(),
            PathState::for_matrix(matrix),
        );
        let (tour, stats) = session.run();
        let outcome = BnbSolverOutcome::from_incumbent(tour, stats);
        info!("sequential search finished: {}", outcome.result());
        outcome
    }

    /// Solves `matrix` on the calling thread, reading and lowering `incumbent`.
    ///
    /// The outcome reports the incumbent's tour, which may have been installed
    /// by someone else, for example as a warm start.
    pub fn solve_with_incumbent<W, E, S>(
        &self,
        matrix: &CostMatrix<W>,
        estimator: &E,
        mut monitor: S,
        incumbent: &SharedIncumbent,
    ) -> BnbSolverOutcome
    where
        W: EdgeWeight,
        E: LowerBoundEstimator<W> + ?Sized,
        S: TreeSearchMonitor<W>,
    {
        let session = SearchSession::new(
            matrix,
            estimator,
            &mut monitor,
            SharedIncumbentAdapter::new(incumbent),
            PathState::for_matrix(matrix),
        );
        let (_, stats) = session.run();
        BnbSolverOutcome::from_incumbent(incumbent.snapshot(), stats)
    }
}

/// What the engine does after evaluating a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeAction {
    /// Accepted, rejected or pruned; nothing below this node.
    Terminal,
    /// The children have to be explored.
    Branch,
}

/// The state of one search run over one (sub)tree.
pub(crate) struct SearchSession<'a, W, E, S, I>
where
    W: EdgeWeight,
    E: ?Sized,
{
    matrix: &'a CostMatrix<W>,
    estimator: &'a E,
    monitor: &'a mut S,
    incumbent: I,
    state: PathState,
    best_cost: Cost,
    best_tour: Option<Tour>,
    stats: BnbSolverStatistics,
}

impl<'a, W, E, S, I> std::fmt::Debug for SearchSession<'a, W, E, S, I>
where
    W: EdgeWeight,
    E: ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("state", &self.state)
            .field("best_cost", &self.best_cost)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, W, E, S, I> SearchSession<'a, W, E, S, I>
where
    W: EdgeWeight,
    E: LowerBoundEstimator<W> + ?Sized,
    S: TreeSearchMonitor<W>,
    I: IncumbentStore,
{
    #[inline]
    pub(crate) fn new(
        matrix: &'a CostMatrix<W>,
        estimator: &'a E,
        monitor: &'a mut S,
        incumbent: I,
        state: PathState,
    ) -> Self {
        debug_assert_eq!(
            state.visited().num_cities(),
            matrix.num_cities(),
            "called `SearchSession::new` with a state for a different matrix"
        );
        let best_cost = incumbent.initial_upper_bound();
        Self {
            matrix,
            estimator,
            monitor,
            incumbent,
            state,
            best_cost,
            best_tour: None,
            stats: BnbSolverStatistics::default(),
        }
    }

    /// Runs a complete search from the session's state, with monitor
    /// enter/exit events and timing.
    fn run(mut self) -> (Option<Tour>, BnbSolverStatistics) {
        let start = Instant::now();
        let root_bound = self.estimator.lower_bound(self.matrix, &self.state);
        self.stats.set_root_lower_bound(root_bound);
        self.monitor.on_enter_search(self.matrix, &self.stats);

        self.visit();

        self.stats.set_total_time(start.elapsed());
        self.monitor.on_exit_search(&self.stats);
        (self.best_tour, self.stats)
    }

    /// Explores the subtree below the session's state and returns its counters.
    #[inline]
    pub(crate) fn explore(mut self) -> BnbSolverStatistics {
        self.visit();
        self.stats
    }

    /// Splits the session after `evaluate` into its node and its counters.
    #[inline]
    pub(crate) fn into_parts(self) -> (PathState, BnbSolverStatistics) {
        (self.state, self.stats)
    }

    fn visit(&mut self) {
        if self.evaluate() == NodeAction::Terminal {
            return;
        }

        let matrix = self.matrix;
        let current = self.state.current();
        for (next, w) in matrix.outgoing(current) {
            if !self.state.can_visit(next) {
                continue;
            }
            let w = w.to_cost();
            self.state.advance(next, w);
            self.monitor.on_descend(&self.state, &self.stats);

            self.visit();

            self.state.retreat(w);
            self.monitor.on_backtrack(&self.state, &self.stats);
        }
    }

    /// Evaluates the session's current node: accepts or prunes it, or reports
    /// that its children must be explored.
    pub(crate) fn evaluate(&mut self) -> NodeAction {
        self.best_cost = self.incumbent.tighten(self.best_cost);
        self.stats.on_node_explored();
        self.stats.on_depth_update(self.state.depth() as u64);
        self.monitor
            .on_step(&self.state, self.best_cost, &self.stats);

        if self.state.is_complete() {
            self.accept();
            return NodeAction::Terminal;
        }

        let bound = self.estimator.lower_bound(self.matrix, &self.state);
        self.monitor
            .on_lower_bound_computed(&self.state, bound, &self.stats);

        if bound >= self.best_cost {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(&self.state, PruneReason::BoundDominated, &self.stats);
            return NodeAction::Terminal;
        }

        NodeAction::Branch
    }

    fn accept(&mut self) {
        let Some(closing) = self.matrix.closing_cost(self.state.current()) else {
            self.stats.on_dead_end();
            self.monitor
                .on_prune(&self.state, PruneReason::DeadEnd, &self.stats);
            return;
        };

        let total = self.state.cost_so_far() + closing;
        if total >= self.best_cost {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(&self.state, PruneReason::BoundDominated, &self.stats);
            return;
        }

        self.best_cost = total;
        let tour = self.state.to_tour(total);
        if self.incumbent.on_tour_found(&tour) {
            debug!("incumbent improved to {}", total);
            self.stats.on_solution_found();
            self.monitor.on_solution_found(&tour, &self.stats);
            self.best_tour = Some(tour);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bound::{min_edge::MinimumEdgeBound, two_smallest::TwoSmallestEdgesBound},
        monitor::{incumbent_trace::IncumbentTraceMonitor, no_op::NoOperationMonitor},
        testing::{brute_force, random_matrix},
    };
    use hamilton_model::{index::CityIndex, num::INFINITY};
    use hamilton_search::result::TerminationReason;
    use rand::{SeedableRng, rngs::StdRng};

    fn ci(i: usize) -> CityIndex {
        CityIndex::new(i)
    }

    fn solve_refined(m: &CostMatrix<u32>) -> BnbSolverOutcome {
        BnbSolver::new().solve(m, &TwoSmallestEdgesBound::new(m), NoOperationMonitor)
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
    fn test_optimal_on_small_symmetric_instance() {
        let m = symmetric4();
        let outcome = solve_refined(&m);

        assert_eq!(outcome.termination_reason(), TerminationReason::OptimalityProven);
        assert_eq!(outcome.cost(), 80);
        let tour = outcome.result().tour().unwrap();
        assert_eq!(m.tour_cost(tour.route()), Some(80));
    }

    #[test]
    fn test_single_city_costs_nothing() {
        let m = CostMatrix::<u32>::from_rows(&[vec![0]]).unwrap();
        let outcome = solve_refined(&m);
        assert_eq!(outcome.cost(), 0);
        assert_eq!(outcome.result().tour().unwrap().route(), &[ci(0)]);
    }

    #[test]
    fn test_two_cities() {
        let both = CostMatrix::<u32>::from_rows(&[vec![0, 3], vec![8, 0]]).unwrap();
        assert_eq!(solve_refined(&both).cost(), 11);

        let one_way = CostMatrix::<u32>::from_rows(&[vec![0, 3], vec![0, 0]]).unwrap();
        let outcome = solve_refined(&one_way);
        assert_eq!(outcome.cost(), INFINITY);
        assert_eq!(
            outcome.termination_reason(),
            TerminationReason::InfeasibilityProven
        );

        let other_way = CostMatrix::<u32>::from_rows(&[vec![0, 0], vec![8, 0]]).unwrap();
        assert_eq!(solve_refined(&other_way).cost(), INFINITY);
    }

    #[test]
    fn test_dead_ends_are_counted() {
        // Only 0 -> 1 -> 2 can be built, and 2 has no way home.
        let m = CostMatrix::<u32>::from_rows(&[vec![0, 1, 0], vec![0, 0, 1], vec![0, 1, 0]])
            .unwrap();
        let outcome = BnbSolver::new().solve(&m, &MinimumEdgeBound, NoOperationMonitor);
        assert!(outcome.result().is_infeasible());
        assert_eq!(outcome.statistics().dead_ends, 1);
        assert_eq!(outcome.statistics().solutions_found, 0);
    }

    #[test]
    fn test_matches_brute_force_on_random_instances() {
        let mut rng = StdRng::seed_from_u64(0xB0B);
        for n in 1..=8 {
            for &density in &[1.0, 0.7, 0.4] {
                for symmetric in [true, false] {
                    let m = random_matrix(&mut rng, n, 100, density, symmetric);
                    let expected = brute_force(&m);

                    assert_eq!(solve_refined(&m).cost(), expected, "{:?}", m);
                    let coarse = BnbSolver::new().solve(&m, &MinimumEdgeBound, NoOperationMonitor);
                    assert_eq!(coarse.cost(), expected, "{:?}", m);
                }
            }
        }
    }

    #[test]
    fn test_incumbent_trace_never_increases() {
        let mut rng = StdRng::seed_from_u64(99);
        let m = random_matrix(&mut rng, 9, 100, 1.0, false);
        let bound = TwoSmallestEdgesBound::new(&m);
        let mut trace = IncumbentTraceMonitor::new();

        let outcome = BnbSolver::new().solve(&m, &bound, &mut trace);

        assert!(trace.is_non_increasing(), "{:?}", trace.observed());
        assert_eq!(trace.observed().first(), Some(&INFINITY));
        assert_eq!(trace.observed().last(), Some(&outcome.cost()));
    }

    #[test]
    fn test_statistics_are_coherent() {
        let m = symmetric4();
        let outcome = solve_refined(&m);
        let stats = outcome.statistics();

        assert!(stats.nodes_explored >= 4);
        assert!(stats.solutions_found >= 1);
        assert_eq!(stats.max_depth, 3);
        assert_eq!(stats.tasks_spawned, 0);
        assert_eq!(stats.root_lower_bound, 62);
        assert!(stats.root_lower_bound <= outcome.cost());
    }

    #[test]
    fn test_warm_start_with_better_incumbent() {
        let m = symmetric4();
        let shared = SharedIncumbent::new();
        let seeded = Tour::new(50, vec![ci(0), ci(3), ci(2), ci(1)]);
        assert!(shared.try_install(&seeded));

        let outcome = BnbSolver::new().solve_with_incumbent(
            &m,
            &TwoSmallestEdgesBound::new(&m),
            NoOperationMonitor,
            &shared,
        );

        // Nothing beats the seed, so the root is pruned right away.
        assert_eq!(outcome.cost(), 50);
        assert_eq!(outcome.statistics().solutions_found, 0);
        assert_eq!(outcome.statistics().nodes_explored, 1);
    }

    #[test]
    fn test_warm_start_with_worse_incumbent_is_overwritten() {
        let m = symmetric4();
        let shared = SharedIncumbent::new();
        assert!(shared.try_install(&Tour::new(500, vec![ci(0), ci(1), ci(2), ci(3)])));

        let outcome = BnbSolver::new().solve_with_incumbent(
            &m,
            &MinimumEdgeBound,
            NoOperationMonitor,
            &shared,
        );
        assert_eq!(outcome.cost(), 80);
        assert_eq!(shared.upper_bound(), 80);
    }
}
