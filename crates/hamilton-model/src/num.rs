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

//! # Edge Weight and Cost Numerics
//!
//! `EdgeWeight` collects the bounds an integer type must satisfy to be stored
//! in a `CostMatrix`. Weights are unsigned; a weight of zero between two
//! distinct cities is the "no edge" sentinel, not a free edge.
//!
//! Tour costs are always accumulated as `Cost` (`u64`), independent of the
//! weight type. `INFINITY` (`u64::MAX`) is the "no tour yet" sentinel. Matrix
//! construction rejects weight ranges that would let a finite tour sum reach
//! it, so plain addition over a path never collides with the sentinel and
//! bound arithmetic only needs to saturate when it starts from `INFINITY`.

use num_traits::{PrimInt, Unsigned};

/// The accumulated cost of a (partial) tour.
pub type Cost = u64;

/// The "no tour found" sentinel, strictly above every feasible tour cost.
pub const INFINITY: Cost = Cost::MAX;

/// A trait alias for integer types usable as edge weights.
/// These are the unsigned integer types `u8`, `u16`, `u32` and `u64`.
///
/// # Note
///
/// With `u64` weights the headroom check in `CostMatrixBuilder::build`
/// becomes the only guard against overflow, so large weights are rejected
/// there rather than silently wrapping during the search.
pub trait EdgeWeight:
    PrimInt
    + Unsigned
    + Into<u64>
    + std::str::FromStr
    + std::fmt::Debug
    + std::fmt::Display
    + Send
    + Sync
    + 'static
{
    /// Widens the weight into a tour cost.
    #[inline(always)]
    fn to_cost(self) -> Cost {
        self.into()
    }
}

impl<W> EdgeWeight for W where
    W: PrimInt
        + Unsigned
        + Into<u64>
        + std::str::FromStr
        + std::fmt::Debug
        + std::fmt::Display
        + Send
        + Sync
        + 'static
{
}
