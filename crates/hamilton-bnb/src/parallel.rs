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

//! # Parallel Coordinator
//!
//! Runs the branch-and-bound search as a depth-bounded fork-join over the
//! current rayon pool. Nodes shallower than `parallel_level` evaluate
//! themselves like any other node and then hand each child to the pool as an
//! independent task with its own copy of the path. Everything at or below
//! `parallel_level` is explored inline by a sequential session.
//!
//! `parallel_level = ceil(log2(workers))`, so the fan-out near the root is
//! roughly enough to keep every worker busy without flooding the pool with
//! tiny tasks. Each forking node waits in a `rayon::scope` until all its
//! children have finished, then merges their statistics into its own.
//!
//! All tasks share one `SharedIncumbent`. The coordinator only decides where
//! work runs; the candidates offered to the incumbent, and therefore the final
//! cost, are the same as for a sequential run.

use crate::{
    bnb::{NodeAction, SearchSession},
    bound::estimator::LowerBoundEstimator,
    incumbent::SharedIncumbentAdapter,
    monitor::no_op::NoOperationMonitor,
    result::BnbSolverOutcome,
    state::PathState,
    stats::BnbSolverStatistics,
};
use hamilton_model::{
    matrix::CostMatrix,
    num::EdgeWeight,
};
use hamilton_search::incumbent::SharedIncumbent;
use log::{debug, info};
use std::time::Instant;

/// Returns `ceil(log2(workers))`, and `0` for a single worker.
#[inline]
pub fn parallel_level_for(workers: usize) -> usize {
    if workers <= 1 {
        0
    } else {
        (usize::BITS - (workers - 1).leading_zeros()) as usize
    }
}

/// A fork-join scheduling policy over the sequential engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelCoordinator {
    parallel_level: usize,
}

impl ParallelCoordinator {
    /// Creates a coordinator that forks every node shallower than `parallel_level`.
    #[inline]
    pub fn new(parallel_level: usize) -> Self {
        Self { parallel_level }
    }

    /// Creates a coordinator sized for `workers` threads.
    #[inline]
    pub fn for_workers(workers: usize) -> Self {
        Self::new(parallel_level_for(workers))
    }

    #[inline]
    pub fn parallel_level(&self) -> usize {
        self.parallel_level
    }

    /// Solves `matrix` on the current rayon pool.
    pub fn solve<W, E>(&self, matrix: &CostMatrix<W>, estimator: &E) -> BnbSolverOutcome
    where
        W: EdgeWeight,
        E: LowerBoundEstimator<W> + Sync + ?Sized,
    {
        let incumbent = SharedIncumbent::new();
        self.solve_with_incumbent(matrix, estimator, &incumbent)
    }

    /// Solves `matrix` on the current rayon pool, reading and lowering
    /// `incumbent`. Returns once every spawned task has joined.
    pub fn solve_with_incumbent<W, E>(
        &self,
        matrix: &CostMatrix<W>,
        estimator: &E,
        incumbent: &SharedIncumbent,
    ) -> BnbSolverOutcome
    where
        W: EdgeWeight,
        E: LowerBoundEstimator<W> + Sync + ?Sized,
    {
        info!(
            "parallel search on {} cities with {}, parallel level {} on {} threads",
            matrix.num_cities(),
            estimator.name(),
            self.parallel_level,
            rayon::current_num_threads()
        );

        let start = Instant::now();
        let root = PathState::for_matrix(matrix);
        let mut stats = BnbSolverStatistics::default();
        stats.set_root_lower_bound(estimator.lower_bound(matrix, &root));

        let tree = self.fork(matrix, estimator, incumbent, root, 0);
        stats.merge(&tree);
        stats.set_total_time(start.elapsed());

        let outcome = BnbSolverOutcome::from_incumbent(incumbent.snapshot(), stats);
        info!(
            "parallel search finished: {} after {} tasks",
            outcome.result(),
            outcome.statistics().tasks_spawned
        );
        outcome
    }

    /// Explores the subtree below `state`, which sits `depth` edges below the root.
    fn fork<W, E>(
        &self,
        matrix: &CostMatrix<W>,
        estimator: &E,
        incumbent: &SharedIncumbent,
        state: PathState,
        depth: usize,
    ) -> BnbSolverStatistics
    where
        W: EdgeWeight,
        E: LowerBoundEstimator<W> + Sync + ?Sized,
    {
        let mut monitor = NoOperationMonitor;
        let mut session = SearchSession::new(
            matrix,
            estimator,
            &mut monitor,
            SharedIncumbentAdapter::new(incumbent),
            state,
        );

        if depth >= self.parallel_level {
            return session.explore();
        }

        let action = session.evaluate();
        let (state, mut stats) = session.into_parts();
        if action == NodeAction::Terminal {
            return stats;
        }

        let children: Vec<PathState> = matrix
            .outgoing(state.current())
            .filter(|&(next, _)| state.can_visit(next))
            .map(|(next, w)| state.child(next, w.to_cost()))
            .collect();
        let mut results = vec![BnbSolverStatistics::default(); children.len()];

        debug!(
            "forking {} subtrees at depth {} below {}",
            children.len(),
            depth,
            state.current()
        );

        rayon::scope(|scope| {
            for (child, slot) in children.into_iter().zip(results.iter_mut()) {
                stats.on_task_spawned();
                scope.spawn(move |_| {
                    *slot = self.fork(matrix, estimator, incumbent, child, depth + 1);
                });
            }
        });

        for r in &results {
            stats.merge(r);
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bnb::BnbSolver,
        bound::{min_edge::MinimumEdgeBound, two_smallest::TwoSmallestEdgesBound},
        monitor::no_op::NoOperationMonitor,
        testing::{brute_force, held_karp, random_matrix},
    };
    use hamilton_model::{index::CityIndex, instances::canonical_fifteen, num::INFINITY, tour::Tour};
    use rand::{SeedableRng, rngs::StdRng};
    use std::sync::atomic::{AtomicBool, Ordering};

    fn pool(threads: usize) -> rayon::ThreadPool {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
    }

    #[test]
    fn test_parallel_level_is_ceil_log2() {
        let expected = [(0, 0), (1, 0), (2, 1), (3, 2), (4, 2), (5, 3), (8, 3), (9, 4), (16, 4), (17, 5)];
        for (workers, level) in expected {
            assert_eq!(parallel_level_for(workers), level, "workers = {}", workers);
        }
        assert_eq!(ParallelCoordinator::for_workers(6).parallel_level(), 3);
    }

    #[test]
    fn test_matches_sequential_on_random_instances() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        let pool = pool(4);
        for n in 1..=8 {
            for &density in &[1.0, 0.5] {
                let m = random_matrix(&mut rng, n, 60, density, n % 3 == 0);
                let bound = TwoSmallestEdgesBound::new(&m);
                let sequential = BnbSolver::new().solve(&m, &bound, NoOperationMonitor);

                for level in 0..=3 {
                    let coordinator = ParallelCoordinator::new(level);
                    let parallel = pool.install(|| coordinator.solve(&m, &bound));
                    assert_eq!(parallel.cost(), sequential.cost(), "level {}: {:?}", level, m);
                }
            }
        }
    }

    #[test]
    fn test_matches_brute_force_with_coarse_bound() {
        let mut rng = StdRng::seed_from_u64(42);
        let pool = pool(3);
        let coordinator = ParallelCoordinator::for_workers(3);
        for n in 2..=8 {
            let m = random_matrix(&mut rng, n, 40, 0.6, false);
            let outcome = pool.install(|| coordinator.solve(&m, &MinimumEdgeBound));
            assert_eq!(outcome.cost(), brute_force(&m), "{:?}", m);
        }
    }

    #[test]
    fn test_returned_tour_is_valid_and_optimal() {
        let mut rng = StdRng::seed_from_u64(1234);
        let m = random_matrix(&mut rng, 10, 100, 0.8, true);
        let outcome = pool(4).install(|| {
            ParallelCoordinator::for_workers(4).solve(&m, &TwoSmallestEdgesBound::new(&m))
        });

        let expected = held_karp(&m);
        assert_eq!(outcome.cost(), expected);
        if let Some(tour) = outcome.result().tour() {
            assert_eq!(m.tour_cost(tour.route()), Some(expected));
        } else {
            assert_eq!(expected, INFINITY);
        }
    }

    #[test]
    fn test_trivial_instances() {
        let pool = pool(2);
        let coordinator = ParallelCoordinator::for_workers(8);

        let single = CostMatrix::<u32>::from_rows(&[vec![0]]).unwrap();
        let outcome = pool.install(|| coordinator.solve(&single, &MinimumEdgeBound));
        assert_eq!(outcome.cost(), 0);

        let pair = CostMatrix::<u32>::from_rows(&[vec![0, 5], vec![6, 0]]).unwrap();
        let outcome = pool.install(|| coordinator.solve(&pair, &MinimumEdgeBound));
        assert_eq!(outcome.cost(), 11);

        let broken = CostMatrix::<u32>::from_rows(&[vec![0, 5], vec![0, 0]]).unwrap();
        let outcome = pool.install(|| coordinator.solve(&broken, &MinimumEdgeBound));
        assert_eq!(outcome.cost(), INFINITY);
        assert!(outcome.result().is_infeasible());
    }

    #[test]
    fn test_statistics_count_spawned_tasks() {
        let m = CostMatrix::<u32>::from_rows(&[
            vec![0, 10, 15, 20],
            vec![10, 0, 35, 25],
            vec![15, 35, 0, 30],
            vec![20, 25, 30, 0],
        ])
        .unwrap();
        let bound = MinimumEdgeBound;

        let inline = pool(2).install(|| ParallelCoordinator::new(0).solve(&m, &bound));
        assert_eq!(inline.statistics().tasks_spawned, 0);

        // The root forks its three children, each child its two grandchildren.
        let forked = pool(2).install(|| ParallelCoordinator::new(2).solve(&m, &bound));
        assert_eq!(forked.cost(), 80);
        assert_eq!(forked.statistics().tasks_spawned, 3 + 3 * 2);
        assert_eq!(forked.statistics().max_depth, 3);
        assert!(forked.statistics().solutions_found >= 1);
    }

    #[test]
    fn test_shared_incumbent_reads_never_increase() {
        let mut rng = StdRng::seed_from_u64(77);
        let m = random_matrix(&mut rng, 10, 1000, 1.0, false);
        let bound = TwoSmallestEdgesBound::new(&m);
        let incumbent = SharedIncumbent::new();
        let done = AtomicBool::new(false);

        let outcome = std::thread::scope(|s| {
            let reader = s.spawn(|| {
                let mut last = INFINITY;
                let mut reads = 0u64;
                loop {
                    // Sample before checking `done` so a fast search still gets read.
                    let finished = done.load(Ordering::Acquire);
                    let now = incumbent.upper_bound();
                    assert!(now <= last, "incumbent went from {} up to {}", last, now);
                    last = now;
                    reads += 1;
                    if finished {
                        break;
                    }
                }
                reads
            });

            let outcome = pool(4).install(|| {
                ParallelCoordinator::for_workers(4).solve_with_incumbent(&m, &bound, &incumbent)
            });
            done.store(true, Ordering::Release);
            assert!(reader.join().unwrap() > 0);
            outcome
        });

        assert_eq!(outcome.cost(), held_karp(&m));
        assert_eq!(incumbent.upper_bound(), outcome.cost());
    }

    #[test]
    fn test_warm_start_short_circuits_root() {
        let m = canonical_fifteen();
        let incumbent = SharedIncumbent::new();
        let route: Vec<CityIndex> = (0..15).map(CityIndex::new).collect();
        assert!(incumbent.try_install(&Tour::new(1, route)));

        let outcome = pool(2).install(|| {
            ParallelCoordinator::for_workers(2)
                .solve_with_incumbent(&m, &TwoSmallestEdgesBound::new(&m), &incumbent)
        });
        assert_eq!(outcome.cost(), 1);
        assert_eq!(outcome.statistics().nodes_explored, 1);
        assert_eq!(outcome.statistics().tasks_spawned, 0);
    }
}
