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

//! # Visited Sets
//!
//! `VisitedSet` is the fixed-capacity bit vector recording which cities the
//! current partial tour has already entered. It wraps a `FixedBitSet` sized
//! to the number of cities and caches the number of set bits, so
//! completeness checks are O(1) instead of a popcount per search node.
//!
//! Invariants (debug-checked):
//! - `len()` equals the number of set bits.
//! - A set created with `with_origin` contains city `0`, and the search never
//!   removes it.
//!
//! The set is `Clone` and cheap to copy for small instances. The parallel
//! search relies on this: every spawned branch receives its own copy via
//! `with_city`, so concurrent branches never see each other's mutations.

use crate::index::CityIndex;
use fixedbitset::FixedBitSet;

/// The default upper bound on the number of cities a search accepts.
pub const DEFAULT_MAX_CITIES: usize = 1000;

/// A fixed-capacity set of visited cities.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct VisitedSet {
    bits: FixedBitSet,
    count: usize,
}

impl VisitedSet {
    /// Creates an empty set over `num_cities` cities.
    #[inline]
    pub fn new(num_cities: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(num_cities),
            count: 0,
        }
    }

    /// Creates the root set `{0}` over `num_cities` cities.
    ///
    /// # Panics
    ///
    /// Panics if `num_cities == 0`.
    #[inline]
    pub fn with_origin(num_cities: usize) -> Self {
        assert!(
            num_cities > 0,
            "called `VisitedSet::with_origin` with zero cities"
        );
        let mut set = Self::new(num_cities);
        set.insert(CityIndex::ORIGIN);
        set
    }

    /// Returns the number of cities this set ranges over.
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.bits.len()
    }

    /// Returns the number of visited cities.
    #[inline]
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.count, self.bits.count_ones(..));
        self.count
    }

    /// Returns `true` if no city is visited.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns `true` if every city is visited.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.count == self.bits.len()
    }

    /// Returns `true` if `city` is visited.
    #[inline]
    pub fn contains(&self, city: CityIndex) -> bool {
        self.bits.contains(city.get())
    }

    /// Marks `city` as visited. Returns `true` if it was not visited before.
    ///
    /// # Panics
    ///
    /// Panics if `city` is out of range.
    #[inline]
    pub fn insert(&mut self, city: CityIndex) -> bool {
        let was_set = self.bits.put(city.get());
        if !was_set {
            self.count += 1;
        }
        !was_set
    }

    /// Unmarks `city`. Returns `true` if it was visited.
    #[inline]
    pub fn remove(&mut self, city: CityIndex) -> bool {
        let was_set = self.bits.contains(city.get());
        if was_set {
            self.bits.set(city.get(), false);
            self.count -= 1;
        }
        was_set
    }

    /// Returns a copy of this set with `city` added.
    #[inline]
    pub fn with_city(&self, city: CityIndex) -> Self {
        let mut next = self.clone();
        next.insert(city);
        next
    }

    /// Iterates the visited cities in ascending order.
    #[inline]
    pub fn visited(&self) -> impl Iterator<Item = CityIndex> + '_ {
        self.bits.ones().map(CityIndex::new)
    }

    /// Iterates the unvisited cities in ascending order.
    #[inline]
    pub fn unvisited(&self) -> impl Iterator<Item = CityIndex> + '_ {
        self.bits.zeroes().map(CityIndex::new)
    }
}

impl std::fmt::Debug for VisitedSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries(self.bits.ones())
            .finish()
    }
}

impl std::fmt::Display for VisitedSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VisitedSet({}/{})", self.count, self.bits.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ci(i: usize) -> CityIndex {
        CityIndex::new(i)
    }

    #[test]
    fn test_with_origin_contains_only_city_zero() {
        let set = VisitedSet::with_origin(5);
        assert_eq!(set.len(), 1);
        assert!(set.contains(ci(0)));
        assert!(!set.is_complete());
        assert_eq!(set.visited().collect::<Vec<_>>(), vec![ci(0)]);
        assert_eq!(
            set.unvisited().collect::<Vec<_>>(),
            vec![ci(1), ci(2), ci(3), ci(4)]
        );
    }

    #[test]
    fn test_insert_and_remove_keep_count_in_sync() {
        let mut set = VisitedSet::with_origin(4);
        assert!(set.insert(ci(2)));
        assert!(!set.insert(ci(2)));
        assert_eq!(set.len(), 2);

        assert!(set.remove(ci(2)));
        assert!(!set.remove(ci(2)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_complete_after_all_inserted() {
        let mut set = VisitedSet::with_origin(3);
        set.insert(ci(1));
        set.insert(ci(2));
        assert!(set.is_complete());
        assert_eq!(set.unvisited().count(), 0);

        assert!(VisitedSet::with_origin(1).is_complete());
    }

    #[test]
    fn test_with_city_leaves_source_untouched() {
        let root = VisitedSet::with_origin(4);
        let child = root.with_city(ci(3));

        assert_eq!(root.len(), 1);
        assert!(!root.contains(ci(3)));
        assert_eq!(child.len(), 2);
        assert!(child.contains(ci(3)));
    }

    #[test]
    fn test_debug_and_display() {
        let set = VisitedSet::with_origin(3).with_city(ci(2));
        assert_eq!(format!("{:?}", set), "{0, 2}");
        assert_eq!(format!("{}", set), "VisitedSet(2/3)");
    }

    #[test]
    #[should_panic(expected = "zero cities")]
    fn test_with_origin_rejects_empty() {
        let _ = VisitedSet::with_origin(0);
    }
}
