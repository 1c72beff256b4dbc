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

//! # Hamilton Model
//!
//! **The problem model for the exact Hamiltonian cycle solver.**
//!
//! This crate holds everything the search needs to know about an instance and
//! nothing about how it is searched:
//!
//! * **`index`**: `CityIndex`, a typed wrapper so city ids are not confused with counts.
//! * **`num`**: the `EdgeWeight` bound on input weights and the widened `Cost` type.
//! * **`matrix`**: the immutable `CostMatrix` and its `CostMatrixBuilder`.
//! * **`visited`**: `VisitedSet`, a fixed-capacity bitset of cities on the current path.
//! * **`tour`**: `Tour`, a closed route together with its cost.
//! * **`loading`**: a text loader for `n` followed by `n * n` weights.
//! * **`instances`**: built-in reference instances.
//!
//! A zero weight off the diagonal means "no edge". All accumulated costs are
//! `u64` and `INFINITY` (`u64::MAX`) is reserved as the "no cycle" sentinel;
//! the builder rejects matrices where a full tour could reach it.

pub mod index;
pub mod instances;
pub mod loading;
pub mod matrix;
pub mod num;
pub mod tour;
pub mod visited;
