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

//! # Cost Model
//!
//! `CostMatrix<W>` is the immutable n×n matrix of directed edge weights the
//! search runs on. It is built once through `CostMatrixBuilder<W>` (mutable,
//! validated on `build`) and then only read, which is what lets the parallel
//! search share it between worker threads without any synchronization.
//!
//! ## Conventions
//!
//! - Row-major storage: `weight(from, to)` lives at `from * n + to`.
//! - The diagonal is unused and always stored as zero.
//! - A zero weight between two distinct cities means "no edge". A genuine
//!   zero-cost edge cannot be expressed; this boundary is kept on purpose and
//!   is documented rather than reinterpreted.
//! - The matrix need not be symmetric. Symmetry is detected at build time
//!   because the lower-bound estimator can use a tighter relaxation on
//!   symmetric inputs.
//!
//! ## Validation
//!
//! `build` rejects an empty model and any weight range for which `n` times
//! the largest weight would not stay strictly below `INFINITY`.

use crate::{
    index::CityIndex,
    num::{Cost, EdgeWeight, INFINITY},
};
use fixedbitset::FixedBitSet;
use num_traits::Zero;

/// Errors raised while constructing a `CostMatrix`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The model has no cities.
    #[error("the cost model must contain at least one city")]
    Empty,
    /// A row of the input does not have `n` entries.
    #[error("row {row} has {found} entries, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// `num_cities * max_weight` would reach the infinity sentinel.
    #[error(
        "edge weights up to {max_weight} over {num_cities} cities leave no headroom below the infinity sentinel"
    )]
    WeightHeadroom { num_cities: usize, max_weight: u64 },
}

/// The immutable directed cost model of a TSP instance.
#[derive(Clone, PartialEq, Eq)]
pub struct CostMatrix<W> {
    num_cities: usize,
    weights: Vec<W>,
    symmetric: bool,
    min_edge: Option<W>,
}

impl<W> CostMatrix<W>
where
    W: EdgeWeight,
{
    /// Builds a matrix from a slice of rows.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::RaggedRow` if a row is not exactly `rows.len()`
    /// long, plus everything `CostMatrixBuilder::build` can return.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hamilton_model::matrix::CostMatrix;
    /// # use hamilton_model::index::CityIndex;
    /// let m = CostMatrix::<u32>::from_rows(&[vec![0, 3], vec![4, 0]]).unwrap();
    /// assert_eq!(m.num_cities(), 2);
    /// assert_eq!(m.edge(CityIndex::new(1), CityIndex::new(0)), Some(4));
    /// ```
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, ModelError>
    where
        R: AsRef<[W]>,
    {
        let n = rows.len();
        let mut builder = CostMatrixBuilder::new(n);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(ModelError::RaggedRow {
                    row: i,
                    expected: n,
                    found: row.len(),
                });
            }
            for (j, &w) in row.iter().enumerate() {
                builder.set_weight(CityIndex::new(i), CityIndex::new(j), w);
            }
        }
        builder.build()
    }

    /// Returns the number of cities `n`.
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.num_cities
    }

    /// Returns the raw stored weight, `0` meaning "no edge" (or the diagonal).
    ///
    /// # Panics
    ///
    /// Panics if either index is not in `0..num_cities()`.
    #[inline]
    pub fn weight(&self, from: CityIndex, to: CityIndex) -> W {
        debug_assert!(
            from.get() < self.num_cities && to.get() < self.num_cities,
            "called `CostMatrix::weight` with city index out of bounds: the len is {} but the indices are {} and {}",
            self.num_cities,
            from.get(),
            to.get()
        );
        self.weights[from.get() * self.num_cities + to.get()]
    }

    /// Returns the weight of the directed edge `from -> to`, or `None` if
    /// there is no such edge.
    #[inline]
    pub fn edge(&self, from: CityIndex, to: CityIndex) -> Option<W> {
        let w = self.weight(from, to);
        if from == to || w.is_zero() {
            None
        } else {
            Some(w)
        }
    }

    /// Returns `true` if the directed edge `from -> to` exists.
    #[inline]
    pub fn has_edge(&self, from: CityIndex, to: CityIndex) -> bool {
        self.edge(from, to).is_some()
    }

    /// Returns the cost of closing a tour that ends at `current`.
    ///
    /// For `n == 1` the tour is empty and closes for free. Otherwise this is
    /// the edge `current -> 0`, or `None` if it is missing.
    #[inline]
    pub fn closing_cost(&self, current: CityIndex) -> Option<Cost> {
        if self.num_cities == 1 {
            return Some(0);
        }
        self.edge(current, CityIndex::ORIGIN).map(EdgeWeight::to_cost)
    }

    /// Returns the row of outgoing weights of `from`.
    #[inline]
    pub fn row(&self, from: CityIndex) -> &[W] {
        let start = from.get() * self.num_cities;
        &self.weights[start..start + self.num_cities]
    }

    /// Iterates the existing outgoing edges of `from` in ascending target order.
    #[inline]
    pub fn outgoing(&self, from: CityIndex) -> impl Iterator<Item = (CityIndex, W)> + '_ {
        self.row(from)
            .iter()
            .enumerate()
            .filter(move |&(to, w)| to != from.get() && !w.is_zero())
            .map(|(to, &w)| (CityIndex::new(to), w))
    }

    /// Iterates the existing incoming edges of `to` in ascending source order.
    #[inline]
    pub fn incoming(&self, to: CityIndex) -> impl Iterator<Item = (CityIndex, W)> + '_ {
        (0..self.num_cities)
            .map(CityIndex::new)
            .filter_map(move |from| self.edge(from, to).map(|w| (from, w)))
    }

    /// Returns `true` if `weight(i, j) == weight(j, i)` for all cities.
    #[inline]
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// Returns the smallest existing edge weight, or `None` if the graph has
    /// no edges at all.
    #[inline]
    pub fn min_edge(&self) -> Option<W> {
        self.min_edge
    }

    /// Computes the cost of the closed tour that visits `route` in order and
    /// returns to `route[0]`.
    ///
    /// Returns `None` unless `route` starts at the origin, visits every city
    /// exactly once and only uses existing edges.
    pub fn tour_cost(&self, route: &[CityIndex]) -> Option<Cost> {
        if route.len() != self.num_cities || route.first() != Some(&CityIndex::ORIGIN) {
            return None;
        }

        let mut seen = FixedBitSet::with_capacity(self.num_cities);
        for city in route {
            if city.get() >= self.num_cities || seen.put(city.get()) {
                return None;
            }
        }

        let mut total: Cost = 0;
        for pair in route.windows(2) {
            total += self.edge(pair[0], pair[1])?.to_cost();
        }
        let last = *route.last()?;
        Some(total + self.closing_cost(last)?)
    }
}

impl<W> std::fmt::Debug for CostMatrix<W>
where
    W: EdgeWeight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CostMatrix")
            .field("num_cities", &self.num_cities)
            .field("symmetric", &self.symmetric)
            .field("min_edge", &self.min_edge)
            .finish()
    }
}

impl<W> std::fmt::Display for CostMatrix<W>
where
    W: EdgeWeight,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "CostMatrix(num_cities: {}, symmetric: {})",
            self.num_cities, self.symmetric
        )?;
        for row in self.weights.chunks_exact(self.num_cities.max(1)) {
            let line = row
                .iter()
                .map(|w| format!("{:>4}", w))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "  {}", line)?;
        }
        Ok(())
    }
}

/// A mutable builder for `CostMatrix`.
///
/// The builder starts out fully disconnected: every weight is zero, so no
/// edge exists until it is set explicitly.
#[derive(Clone, Debug)]
pub struct CostMatrixBuilder<W> {
    num_cities: usize,
    weights: Vec<W>,
}

impl<W> CostMatrixBuilder<W>
where
    W: EdgeWeight,
{
    /// Creates a builder for `num_cities` cities with no edges.
    ///
    /// # Panics
    ///
    /// Panics if `num_cities * num_cities` overflows `usize`.
    pub fn new(num_cities: usize) -> Self {
        let len = num_cities.checked_mul(num_cities).unwrap_or_else(|| {
            panic!(
                "called `CostMatrixBuilder::new` with {} cities, the matrix size overflows usize",
                num_cities
            )
        });
        Self {
            num_cities,
            weights: vec![W::zero(); len],
        }
    }

    /// Returns the number of cities.
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.num_cities
    }

    /// Sets the weight of the directed edge `from -> to`. Setting `0` removes
    /// the edge. Weights on the diagonal are ignored.
    ///
    /// # Panics
    ///
    /// Panics if either index is not in `0..num_cities()`.
    #[inline]
    pub fn set_weight(&mut self, from: CityIndex, to: CityIndex, weight: W) -> &mut Self {
        assert!(
            from.get() < self.num_cities && to.get() < self.num_cities,
            "called `CostMatrixBuilder::set_weight` with city index out of bounds: the len is {} but the indices are {} and {}",
            self.num_cities,
            from.get(),
            to.get()
        );
        if from != to {
            self.weights[from.get() * self.num_cities + to.get()] = weight;
        }
        self
    }

    /// Sets both directions `a -> b` and `b -> a` to `weight`.
    #[inline]
    pub fn set_symmetric_weight(&mut self, a: CityIndex, b: CityIndex, weight: W) -> &mut Self {
        self.set_weight(a, b, weight);
        self.set_weight(b, a, weight)
    }

    /// Validates and freezes the matrix.
    ///
    /// # Errors
    ///
    /// - `ModelError::Empty` if there are no cities.
    /// - `ModelError::WeightHeadroom` if `num_cities * max_weight` does not
    ///   stay strictly below `INFINITY`.
    pub fn build(self) -> Result<CostMatrix<W>, ModelError> {
        let n = self.num_cities;
        if n == 0 {
            return Err(ModelError::Empty);
        }

        let max_weight = self
            .weights
            .iter()
            .copied()
            .max()
            .unwrap_or_else(W::zero)
            .to_cost();
        if (n as u128) * (max_weight as u128) >= INFINITY as u128 {
            return Err(ModelError::WeightHeadroom {
                num_cities: n,
                max_weight,
            });
        }

        let symmetric = (0..n).all(|i| {
            (i + 1..n).all(|j| self.weights[i * n + j] == self.weights[j * n + i])
        });
        let min_edge = self.weights.iter().copied().filter(|w| !w.is_zero()).min();

        Ok(CostMatrix {
            num_cities: n,
            weights: self.weights,
            symmetric,
            min_edge,
        })
    }
}
