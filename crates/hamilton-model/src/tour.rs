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

//! # Tours
//!
//! A `Tour` is a complete Hamiltonian cycle: the visiting order starting at
//! city `0` (the return edge to `0` is implicit) together with its total
//! cost including that closing edge.

use crate::{index::CityIndex, num::Cost};

/// A closed tour and its total cost.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tour {
    /// Total cost of the cycle, closing edge included.
    cost: Cost,

    /// Visiting order. `route[0]` is the origin; the edge back to it is implicit.
    route: Vec<CityIndex>,
}

impl Tour {
    /// Constructs a new `Tour`.
    ///
    /// # Panics
    ///
    /// Panics if `route` is empty or does not start at the origin.
    pub fn new(cost: Cost, route: Vec<CityIndex>) -> Self {
        assert!(
            route.first().is_some_and(CityIndex::is_origin),
            "called `Tour::new` with a route that does not start at the origin: {:?}",
            route
        );
        Self { cost, route }
    }

    /// Returns the total cost of the tour.
    #[inline]
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// Returns the visiting order, starting at the origin.
    #[inline]
    pub fn route(&self) -> &[CityIndex] {
        &self.route
    }

    /// Returns the number of cities on the tour.
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.route.len()
    }
}

impl std::fmt::Display for Tour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let order = self
            .route
            .iter()
            .chain(std::iter::once(&CityIndex::ORIGIN))
            .map(|c| c.get().to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        write!(f, "Tour(cost: {}, route: {})", self.cost, order)
    }
}
