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

//! Incumbent management for branch-and-bound
//!
//! Declares `IncumbentStore`, the seam through which a search session reads
//! the best known tour cost and publishes improvements. The session keeps its
//! own best cost and asks the store to tighten it at every node.
//!
//! Implementations
//! - `NoSharedIncumbent`: local only. `initial_upper_bound = INFINITY`,
//!   `tighten(x) = x`, and every reported tour is accepted.
//! - `SharedIncumbentAdapter<'a>`: wraps `hamilton_search::incumbent::SharedIncumbent`;
//!   `tighten(x)` returns `min(shared, x)` and reported tours go through the
//!   shared compare-and-lower.

use hamilton_model::{
    num::{Cost, INFINITY},
    tour::Tour,
};
use hamilton_search::incumbent::SharedIncumbent;

/// Read/lower access to the best tour cost seen by a search.
pub trait IncumbentStore {
    /// Returns the upper bound a fresh session starts from.
    fn initial_upper_bound(&self) -> Cost;
    /// Combines the session-local best cost with whatever the store knows.
    fn tighten(&self, current_local_best: Cost) -> Cost;
    /// Reports a tour that beats the session-local best.
    /// Returns `true` if the store accepted it as its new incumbent.
    fn on_tour_found(&self, tour: &Tour) -> bool;
}

/// An `IncumbentStore` for a single, isolated session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoSharedIncumbent;

impl NoSharedIncumbent {
    #[inline(always)]
    pub fn new() -> Self {
        Self
    }
}

impl IncumbentStore for NoSharedIncumbent {
    #[inline(always)]
    fn initial_upper_bound(&self) -> Cost {
        INFINITY
    }

    #[inline(always)]
    fn tighten(&self, current_local_best: Cost) -> Cost {
        current_local_best
    }

    #[inline(always)]
    fn on_tour_found(&self, _tour: &Tour) -> bool {
        true
    }
}

/// An `IncumbentStore` backed by a `SharedIncumbent` that other sessions
/// (usually other worker threads) read and lower concurrently.
#[repr(transparent)]
#[derive(Debug, Clone, Copy)]
pub struct SharedIncumbentAdapter<'a> {
    inner: &'a SharedIncumbent,
}

impl<'a> SharedIncumbentAdapter<'a> {
    #[inline(always)]
    pub fn new(inner: &'a SharedIncumbent) -> Self {
        Self { inner }
    }
}

impl IncumbentStore for SharedIncumbentAdapter<'_> {
    #[inline(always)]
    fn initial_upper_bound(&self) -> Cost {
        self.inner.upper_bound()
    }

    #[inline(always)]
    fn tighten(&self, current_local_best: Cost) -> Cost {
        self.inner.upper_bound().min(current_local_best)
    }

    #[inline(always)]
    fn on_tour_found(&self, tour: &Tour) -> bool {
        self.inner.try_install(tour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hamilton_model::index::CityIndex;

    fn make_tour(cost: Cost) -> Tour {
        Tour::new(cost, vec![CityIndex::new(0), CityIndex::new(1)])
    }

    #[test]
    fn test_no_shared_incumbent_is_passthrough() {
        let store = NoSharedIncumbent::new();
        assert_eq!(store.initial_upper_bound(), INFINITY);
        for v in [0, 1, 42, INFINITY - 1] {
            assert_eq!(store.tighten(v), v);
        }
        assert!(store.on_tour_found(&make_tour(3)));
    }

    #[test]
    fn test_adapter_reads_shared_bound() {
        let shared = SharedIncumbent::new();
        let adapter = SharedIncumbentAdapter::new(&shared);
        assert_eq!(adapter.initial_upper_bound(), INFINITY);

        assert!(shared.try_install(&make_tour(120)));
        assert_eq!(adapter.initial_upper_bound(), 120);
    }

    #[test]
    fn test_adapter_tighten_returns_min() {
        let shared = SharedIncumbent::new();
        let adapter = SharedIncumbentAdapter::new(&shared);
        assert!(shared.try_install(&make_tour(200)));

        assert_eq!(adapter.tighten(350), 200);
        assert_eq!(adapter.tighten(150), 150);
    }

    #[test]
    fn test_adapter_reports_race_losses() {
        let shared = SharedIncumbent::new();
        let a = SharedIncumbentAdapter::new(&shared);
        let b = SharedIncumbentAdapter::new(&shared);

        assert!(a.on_tour_found(&make_tour(95)));
        // `b` still believes 100 is an improvement; the store knows better.
        assert!(!b.on_tour_found(&make_tour(100)));
        assert_eq!(shared.upper_bound(), 95);
        assert_eq!(shared.snapshot().map(|t| t.cost()), Some(95));
    }
}
