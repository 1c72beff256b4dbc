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

//! # City Indices
//!
//! A `usize` newtype identifying a city of the cost model. City `0` is the
//! fixed origin of every tour. The wrapper is `#[repr(transparent)]` and
//! compiles down to the raw index, but keeps cities from being mixed up with
//! counters, depths or bit positions in the search code.
//!
//! ```rust
//! use hamilton_model::index::CityIndex;
//!
//! let c = CityIndex::new(3);
//! assert_eq!(c.get(), 3);
//! assert!(CityIndex::ORIGIN.is_origin());
//! assert_eq!(format!("{}", c), "City(3)");
//! ```

/// A strongly typed index of a city in `[0, n)`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CityIndex {
    index: usize,
}

impl CityIndex {
    /// The tour origin. Every tour starts and ends here.
    pub const ORIGIN: CityIndex = CityIndex::new(0);

    /// Creates a new `CityIndex`.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self { index }
    }

    /// Returns the underlying `usize` index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }

    /// Returns `true` if this is the tour origin (city `0`).
    #[inline(always)]
    pub const fn is_origin(&self) -> bool {
        self.index == 0
    }
}

impl std::fmt::Debug for CityIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "City({})", self.index)
    }
}

impl std::fmt::Display for CityIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "City({})", self.index)
    }
}

impl From<usize> for CityIndex {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl From<CityIndex> for usize {
    fn from(city: CityIndex) -> Self {
        city.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_get() {
        let city = CityIndex::new(10);
        assert_eq!(city.get(), 10);
        assert!(!city.is_origin());
        assert!(CityIndex::new(0).is_origin());
        assert_eq!(CityIndex::default(), CityIndex::ORIGIN);
    }

    #[test]
    fn test_conversions() {
        let city: CityIndex = 42.into();
        assert_eq!(city.get(), 42);

        let raw: usize = city.into();
        assert_eq!(raw, 42);
    }

    #[test]
    fn test_debug_and_display() {
        let city = CityIndex::new(7);
        assert_eq!(format!("{}", city), "City(7)");
        assert_eq!(format!("{:?}", city), "City(7)");
    }

    #[test]
    fn test_ordering_follows_raw_index() {
        let mut cities = vec![CityIndex::new(4), CityIndex::new(1), CityIndex::new(3)];
        cities.sort();
        assert_eq!(
            cities,
            vec![CityIndex::new(1), CityIndex::new(3), CityIndex::new(4)]
        );
    }
}
