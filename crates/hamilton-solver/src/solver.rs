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

//! # Solver Orchestration
//!
//! `Solver` is the entry point a caller uses when it only has a matrix and a
//! few settings. One `solve` call:
//!
//! 1. rejects instances larger than `max_cities` before any search state exists,
//! 2. builds a dedicated rayon pool with `threads` workers (parallel mode only),
//! 3. picks the lower bound and runs either the sequential engine or the
//!    fork-join coordinator,
//! 4. wraps the engine's outcome together with run-level statistics.
//!
//! ## Usage
//!
//! ```rust
//! use hamilton_model::instances::canonical_fifteen;
//! use hamilton_solver::solver::{SearchMode, SolverBuilder};
//!
//! let solver = SolverBuilder::new()
//!     .with_mode(SearchMode::Parallel)
//!     .with_threads(4)
//!     .build();
//!
//! let outcome = solver.solve(&canonical_fifteen()).unwrap();
//! assert!(outcome.is_optimal());
//! ```

use hamilton_bnb::{
    bnb::BnbSolver,
    bound::{
        estimator::LowerBoundEstimator, min_edge::MinimumEdgeBound,
        two_smallest::TwoSmallestEdgesBound,
    },
    monitor::log::LogMonitor,
    parallel::{ParallelCoordinator, parallel_level_for},
    result::BnbSolverOutcome,
    stats::BnbSolverStatistics,
};
use hamilton_model::{
    matrix::{CostMatrix, ModelError},
    num::{Cost, EdgeWeight},
    visited::DEFAULT_MAX_CITIES,
};
use hamilton_search::{
    result::{SolverResult, TerminationReason},
    stats::{SolverStatistics, SolverStatisticsBuilder},
};
use log::info;
use std::{num::NonZeroUsize, str::FromStr};

/// Errors that stop a run before the search starts.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("instance has {num_cities} cities but at most {max_cities} are supported")]
    CapacityExceeded {
        num_cities: usize,
        max_cities: usize,
    },
    #[error("failed to build the worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// A setting that could not be parsed from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`, expected one of: {expected}")]
pub struct ParseSettingError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

/// How the search tree is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// One thread, in-place backtracking, with the logging monitor attached.
    Sequential,
    /// Depth-bounded fork-join on a dedicated worker pool.
    #[default]
    Parallel,
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchMode::Sequential => write!(f, "sequential"),
            SearchMode::Parallel => write!(f, "parallel"),
        }
    }
}

impl FromStr for SearchMode {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" | "seq" => Ok(SearchMode::Sequential),
            "parallel" | "par" => Ok(SearchMode::Parallel),
            _ => Err(ParseSettingError {
                kind: "search mode",
                value: s.to_string(),
                expected: "sequential, parallel",
            }),
        }
    }
}

/// Which lower bound prunes the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundKind {
    /// Half the two cheapest edges at every unvisited city.
    #[default]
    TwoSmallestEdges,
    /// The globally cheapest edge once per missing edge.
    MinimumEdge,
}

impl std::fmt::Display for BoundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundKind::TwoSmallestEdges => write!(f, "two-smallest"),
            BoundKind::MinimumEdge => write!(f, "min-edge"),
        }
    }
}

impl FromStr for BoundKind {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "two-smallest" | "two-smallest-edges" | "refined" => Ok(BoundKind::TwoSmallestEdges),
            "min-edge" | "minimum-edge" | "coarse" => Ok(BoundKind::MinimumEdge),
            _ => Err(ParseSettingError {
                kind: "lower bound",
                value: s.to_string(),
                expected: "two-smallest, min-edge",
            }),
        }
    }
}

/// The final result of a `Solver::solve` call.
#[derive(Debug, Clone)]
pub struct SolverOutcome {
    result: SolverResult,
    reason: TerminationReason,
    statistics: SolverStatistics,
    search: BnbSolverStatistics,
}

impl SolverOutcome {
    fn new(outcome: BnbSolverOutcome, statistics: SolverStatistics) -> Self {
        let (result, reason, search) = outcome.into_parts();
        Self {
            result,
            reason,
            statistics,
            search,
        }
    }

    #[inline]
    pub fn result(&self) -> &SolverResult {
        &self.result
    }

    #[inline]
    pub fn reason(&self) -> TerminationReason {
        self.reason
    }

    /// Run-level statistics: threads, parallel level, improvements and time.
    #[inline]
    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }

    /// Node-level statistics of the branch-and-bound tree.
    #[inline]
    pub fn search_statistics(&self) -> &BnbSolverStatistics {
        &self.search
    }

    /// The optimal cost, or `INFINITY` if no Hamiltonian cycle exists.
    #[inline]
    pub fn cost(&self) -> Cost {
        self.result.cost()
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        self.result.is_optimal()
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        self.result.is_infeasible()
    }
}

impl std::fmt::Display for SolverOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result: {} ({})", self.result, self.reason)?;
        write!(f, "{}", self.statistics)?;
        write!(f, "{}", self.search)
    }
}

/// A configured solver. Create one with `SolverBuilder`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solver {
    mode: SearchMode,
    threads: usize,
    parallel_level: usize,
    bound: BoundKind,
    max_cities: usize,
}

impl Solver {
    #[inline]
    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// The number of worker threads a parallel run uses.
    #[inline]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// `ceil(log2(threads))` in parallel mode, `0` otherwise.
    #[inline]
    pub fn parallel_level(&self) -> usize {
        self.parallel_level
    }

    #[inline]
    pub fn bound(&self) -> BoundKind {
        self.bound
    }

    #[inline]
    pub fn max_cities(&self) -> usize {
        self.max_cities
    }

    /// Finds a minimum cost Hamiltonian cycle of `matrix`.
    ///
    /// # Errors
    ///
    /// - `SolverError::CapacityExceeded` if `matrix` has more than
    ///   `max_cities()` cities. Nothing is allocated for the search in that case.
    /// - `SolverError::ThreadPool` if the worker pool cannot be built.
    pub fn solve<W>(&self, matrix: &CostMatrix<W>) -> Result<SolverOutcome, SolverError>
    where
        W: EdgeWeight,
    {
        let num_cities = matrix.num_cities();
        if num_cities > self.max_cities {
            return Err(SolverError::CapacityExceeded {
                num_cities,
                max_cities: self.max_cities,
            });
        }

        info!(
            "solving {} cities: mode {}, bound {}, {} threads",
            num_cities, self.mode, self.bound, self.threads
        );

        let outcome = match self.bound {
            BoundKind::TwoSmallestEdges => {
                let estimator = TwoSmallestEdgesBound::new(matrix);
                self.search(matrix, &estimator)?
            }
            BoundKind::MinimumEdge => self.search(matrix, &MinimumEdgeBound)?,
        };

        let statistics = SolverStatisticsBuilder::new()
            .tours_found(outcome.statistics().solutions_found)
            .used_threads(match self.mode {
                SearchMode::Sequential => 1,
                SearchMode::Parallel => self.threads,
            })
            .parallel_level(self.parallel_level)
            // The engine's own clock, so pool construction is not counted.
            .solve_duration(outcome.statistics().time_total)
            .build();

        Ok(SolverOutcome::new(outcome, statistics))
    }

    /// Builds a matrix from `rows` and solves it.
    ///
    /// # Errors
    ///
    /// `SolverError::Model` if the rows do not form a valid matrix, otherwise
    /// the errors of `solve`.
    pub fn solve_rows<W, R>(&self, rows: &[R]) -> Result<SolverOutcome, SolverError>
    where
        W: EdgeWeight,
        R: AsRef<[W]>,
    {
        let matrix = CostMatrix::from_rows(rows)?;
        self.solve(&matrix)
    }

    fn search<W, E>(
        &self,
        matrix: &CostMatrix<W>,
        estimator: &E,
    ) -> Result<BnbSolverOutcome, SolverError>
    where
        W: EdgeWeight,
        E: LowerBoundEstimator<W> + Sync,
    {
        match self.mode {
            SearchMode::Sequential => {
                Ok(BnbSolver::new().solve(matrix, estimator, LogMonitor::default()))
            }
            SearchMode::Parallel => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(self.threads)
                    .thread_name(|i| format!("hamilton-worker-{}", i))
                    .build()?;
                let coordinator = ParallelCoordinator::new(self.parallel_level);
                Ok(pool.install(|| coordinator.solve(matrix, estimator)))
            }
        }
    }
}

/// Builder for `Solver`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverBuilder {
    mode: SearchMode,
    threads: Option<usize>,
    bound: BoundKind,
    max_cities: usize,
}

impl Default for SolverBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl SolverBuilder {
    #[inline]
    pub fn new() -> Self {
        Self {
            mode: SearchMode::default(),
            threads: None,
            bound: BoundKind::default(),
            max_cities: DEFAULT_MAX_CITIES,
        }
    }

    #[inline]
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the worker count. `0` is treated as `1`.
    #[inline]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads.max(1));
        self
    }

    #[inline]
    pub fn with_bound(mut self, bound: BoundKind) -> Self {
        self.bound = bound;
        self
    }

    #[inline]
    pub fn with_max_cities(mut self, max_cities: usize) -> Self {
        self.max_cities = max_cities;
        self
    }

    pub fn build(self) -> Solver {
        let threads = self.threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        });
        let parallel_level = match self.mode {
            SearchMode::Sequential => 0,
            SearchMode::Parallel => parallel_level_for(threads),
        };
        Solver {
            mode: self.mode,
            threads,
            parallel_level,
            bound: self.bound,
            max_cities: self.max_cities,
        }
    }
}
