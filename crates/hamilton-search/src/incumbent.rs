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

//! # Shared Incumbent (Best Tour Holder)
//!
//! A concurrent container for the cheapest tour discovered so far. It exposes
//! the incumbent cost through an atomic for lock-free reads on the hot path
//! and keeps the tour itself behind a `Mutex`, which is the source of truth.
//!
//! ## Update rule
//!
//! `try_install` accepts a candidate only if it is strictly cheaper than the
//! current incumbent. The fast path rejects against the atomic without
//! locking; the slow path re-checks under the lock because another thread may
//! have installed a better tour in the meantime. The atomic is only written
//! while the lock is held, so the sequence of stored values is strictly
//! decreasing and every thread observes a non-increasing upper bound.
//!
//! ## Usage
//!
//! ```rust
//! use hamilton_search::incumbent::SharedIncumbent;
//! use hamilton_model::{index::CityIndex, tour::Tour, num::INFINITY};
//!
//! let inc = SharedIncumbent::new();
//! assert_eq!(inc.upper_bound(), INFINITY);
//!
//! let tour = Tour::new(12, vec![CityIndex::new(0), CityIndex::new(1)]);
//! assert!(inc.try_install(&tour));
//! assert_eq!(inc.upper_bound(), 12);
//! ```

use hamilton_model::{
    num::{Cost, INFINITY},
    tour::Tour,
};
use std::sync::{
    Mutex, MutexGuard, PoisonError,
    atomic::{AtomicU64, Ordering},
};

/// A concurrent holder for the best tour found during search.
///
/// Memory ordering: the upper bound is published with `Release` and read with
/// `Acquire`, so a thread that sees a bound also sees the installation that
/// produced it. Correctness of the stored tour itself is guaranteed by the
/// mutex.
#[derive(Debug)]
pub struct SharedIncumbent {
    /// Cost of the incumbent tour, `INFINITY` while none is installed.
    upper_bound: AtomicU64,

    /// The incumbent tour.
    tour: Mutex<Option<Tour>>,
}

impl Default for SharedIncumbent {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SharedIncumbent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Incumbent(upper_bound: {})", self.upper_bound())
    }
}

impl SharedIncumbent {
    /// Creates a new shared incumbent with no tour installed.
    #[inline]
    pub fn new() -> Self {
        Self {
            upper_bound: AtomicU64::new(INFINITY),
            tour: Mutex::new(None),
        }
    }

    /// Returns the current upper bound, `INFINITY` if no tour is installed.
    #[inline]
    pub fn upper_bound(&self) -> Cost {
        self.upper_bound.load(Ordering::Acquire)
    }

    /// Returns `true` once a tour has been installed.
    #[inline]
    pub fn has_tour(&self) -> bool {
        self.upper_bound() != INFINITY
    }

    /// Returns a snapshot of the current incumbent tour, if any.
    #[inline]
    pub fn snapshot(&self) -> Option<Tour> {
        self.lock().clone()
    }

    /// Consumes the holder and returns the incumbent tour, if any.
    #[inline]
    pub fn into_tour(self) -> Option<Tour> {
        self.tour
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Attempts to install `candidate` as the new incumbent.
    /// Returns `true` if the candidate was strictly cheaper and got installed.
    pub fn try_install(&self, candidate: &Tour) -> bool {
        let cost = candidate.cost();
        if cost >= self.upper_bound() {
            return false;
        }

        let mut guard = self.lock();
        // Re-check against the authoritative tour; the hint may be stale.
        if let Some(current) = guard.as_ref()
            && cost >= current.cost()
        {
            return false;
        }

        *guard = Some(candidate.clone());
        self.upper_bound.store(cost, Ordering::Release);
        true
    }

    /// A panicking worker cannot leave the slot half-written, so a poisoned
    /// lock still holds a consistent value.
    #[inline]
    fn lock(&self) -> MutexGuard<'_, Option<Tour>> {
        self.tour.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
