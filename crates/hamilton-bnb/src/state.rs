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

//! # Search Path State
//!
//! `PathState` is the node of the search tree: the city the partial tour
//! currently ends at, the set of cities already on it, the cost accumulated so
//! far and the route prefix itself.
//!
//! The sequential engine mutates one `PathState` in place with `advance` and
//! restores it with `retreat` on backtrack. The parallel coordinator never
//! shares a state between tasks; it hands every spawned task its own copy made
//! by `child`.

use hamilton_model::{
    index::CityIndex,
    matrix::CostMatrix,
    num::{Cost, EdgeWeight},
    tour::Tour,
    visited::VisitedSet,
};
use smallvec::SmallVec;

/// Route prefixes of up to this many cities stay inline.
const INLINE_ROUTE: usize = 32;

/// A partial tour starting at the origin.
#[derive(Clone, PartialEq, Eq)]
pub struct PathState {
    current: CityIndex,
    visited: VisitedSet,
    cost_so_far: Cost,
    route: SmallVec<[CityIndex; INLINE_ROUTE]>,
}

impl PathState {
    /// Creates the root state `current = 0, visited = {0}, cost = 0`.
    ///
    /// # Panics
    ///
    /// Panics if `num_cities == 0`.
    #[inline]
    pub fn root(num_cities: usize) -> Self {
        let mut route = SmallVec::with_capacity(num_cities.min(INLINE_ROUTE));
        route.push(CityIndex::ORIGIN);
        Self {
            current: CityIndex::ORIGIN,
            visited: VisitedSet::with_origin(num_cities),
            cost_so_far: 0,
            route,
        }
    }

    /// Creates the root state for the given matrix.
    #[inline]
    pub fn for_matrix<W>(matrix: &CostMatrix<W>) -> Self
    where
        W: EdgeWeight,
    {
        Self::root(matrix.num_cities())
    }

    /// The city the partial tour currently ends at.
    #[inline]
    pub fn current(&self) -> CityIndex {
        self.current
    }

    #[inline]
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// The summed weight of all edges on the route prefix.
    #[inline]
    pub fn cost_so_far(&self) -> Cost {
        self.cost_so_far
    }

    /// Number of edges on the route prefix; the root has depth `0`.
    #[inline]
    pub fn depth(&self) -> usize {
        self.route.len() - 1
    }

    #[inline]
    pub fn route(&self) -> &[CityIndex] {
        &self.route
    }

    /// Returns `true` if every city is on the route.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.visited.is_complete()
    }

    /// Returns `true` if `city` can be appended, i.e. it is not yet visited.
    #[inline]
    pub fn can_visit(&self, city: CityIndex) -> bool {
        !self.visited.contains(city)
    }

    /// Extends the route in place by the edge `current -> next` of cost `edge_cost`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `next` is already visited.
    #[inline]
    pub fn advance(&mut self, next: CityIndex, edge_cost: Cost) {
        let inserted = self.visited.insert(next);
        debug_assert!(
            inserted,
            "called `PathState::advance` with already visited city {}",
            next
        );
        self.route.push(next);
        self.current = next;
        self.cost_so_far += edge_cost;
    }

    /// Undoes the last `advance`, which must have been called with `edge_cost`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if called on the root state.
    #[inline]
    pub fn retreat(&mut self, edge_cost: Cost) {
        debug_assert!(
            self.route.len() > 1,
            "called `PathState::retreat` on the root state"
        );
        if let Some(last) = self.route.pop() {
            self.visited.remove(last);
        }
        self.current = self.route[self.route.len() - 1];
        self.cost_so_far -= edge_cost;
    }

    /// Returns an independent copy extended by `current -> next`.
    #[inline]
    pub fn child(&self, next: CityIndex, edge_cost: Cost) -> Self {
        let mut child = self.clone();
        child.advance(next, edge_cost);
        child
    }

    /// Converts the complete route into a tour of cost `total`.
    #[inline]
    pub fn to_tour(&self, total: Cost) -> Tour {
        debug_assert!(
            self.is_complete(),
            "called `PathState::to_tour` on an incomplete route"
        );
        Tour::new(total, self.route.to_vec())
    }
}

impl std::fmt::Debug for PathState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathState")
            .field("current", &self.current)
            .field("cost_so_far", &self.cost_so_far)
            .field("route", &self.route.as_slice())
            .finish()
    }
}

impl std::fmt::Display for PathState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PathState(current: {}, depth: {}, cost_so_far: {}, visited: {})",
            self.current,
            self.depth(),
            self.cost_so_far,
            self.visited
        )
    }
}
