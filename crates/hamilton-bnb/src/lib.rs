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

//! Hamilton-BnB: exact branch-and-bound for the minimum cost Hamiltonian cycle
//!
//! Depth-first search over partial routes that start at city 0. Every node is
//! evaluated against an admissible lower bound and the current incumbent, and
//! subtrees that cannot beat the incumbent are cut before they are expanded.
//!
//! Core flow
//! - Provide a `hamilton_model::matrix::CostMatrix<W>`.
//! - Choose a `bound::estimator::LowerBoundEstimator` (`TwoSmallestEdgesBound`
//!   or the coarser `MinimumEdgeBound`).
//! - Run `bnb::BnbSolver` on one thread, or `parallel::ParallelCoordinator`
//!   on the current rayon pool.
//!
//! Assumptions and guarantees
//! - Lower bounds must be admissible (never above the true completion cost);
//!   `bound::validation` checks this exhaustively on small instances.
//! - The incumbent only ever decreases, and only complete cycles are installed.
//! - Sequential and parallel runs return the same optimal cost.
//!
//! Module map
//! - `bnb`: the sequential engine and its search session.
//! - `bound`: lower-bound estimators and the admissibility validator.
//! - `incumbent`: the seam between the engine and the best known tour.
//! - `monitor`: tree-search monitors (log, composite, incumbent trace).
//! - `parallel`: depth-bounded fork-join coordinator.
//! - `result`: solver outcomes with termination reasons.
//! - `state`: the current path, visited set and accumulated cost.
//! - `stats`: lightweight counters and timing.

pub mod bnb;
pub mod bound;
pub mod incumbent;
pub mod monitor;
pub mod parallel;
pub mod result;
pub mod state;
pub mod stats;
#[cfg(test)]
mod testing;
