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

//! Lower bounds for branch-and-bound
//!
//! The engine prunes a node as soon as its lower bound reaches the incumbent,
//! so every estimator here must be admissible: it never exceeds the cheapest
//! completion of the partial tour. Both estimators are also monotone in the
//! cost already paid, since they only ever add to it.
//!
//! Submodules:
//! - `estimator`: the `LowerBoundEstimator` trait.
//! - `two_smallest`: the default bound, two cheapest incident edges per
//!   unvisited city, halved.
//! - `min_edge`: the coarse bound, one global cheapest edge per remaining hop.
//! - `validation`: an exhaustive admissibility check for small instances.

pub mod estimator;
pub mod min_edge;
pub mod two_smallest;
pub mod validation;
