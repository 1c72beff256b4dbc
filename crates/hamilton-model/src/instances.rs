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

//! Built-in reference instances.

use crate::matrix::CostMatrix;

const CANONICAL_FIFTEEN: [[u32; 15]; 15] = [
    [0, 34, 47, 85, 61, 22, 63, 38, 93, 76, 15, 48, 60, 67, 44],
    [34, 0, 59, 64, 39, 46, 80, 77, 50, 42, 26, 73, 85, 58, 30],
    [47, 59, 0, 70, 90, 65, 35, 43, 61, 72, 53, 88, 79, 60, 69],
    [85, 64, 70, 0, 95, 37, 76, 25, 84, 56, 33, 66, 72, 94, 41],
    [61, 39, 90, 95, 0, 50, 74, 69, 57, 33, 22, 80, 47, 59, 73],
    [22, 46, 65, 37, 50, 0, 55, 40, 79, 63, 34, 58, 41, 67, 29],
    [63, 80, 35, 76, 74, 55, 0, 61, 48, 70, 28, 90, 60, 82, 77],
    [38, 77, 43, 25, 69, 40, 61, 0, 87, 58, 35, 76, 88, 79, 52],
    [93, 50, 61, 84, 57, 79, 48, 87, 0, 46, 41, 54, 38, 49, 75],
    [76, 42, 72, 56, 33, 63, 70, 58, 46, 0, 21, 83, 92, 71, 36],
    [15, 26, 53, 33, 22, 34, 28, 35, 41, 21, 0, 57, 40, 50, 19],
    [48, 73, 88, 66, 80, 58, 90, 76, 54, 83, 57, 0, 62, 40, 64],
    [60, 85, 79, 72, 47, 41, 60, 88, 38, 92, 40, 62, 0, 27, 71],
    [67, 58, 60, 94, 59, 67, 82, 79, 49, 71, 50, 40, 27, 0, 68],
    [44, 30, 69, 41, 73, 29, 77, 52, 75, 36, 19, 64, 71, 68, 0],
];

/// The symmetric 15-city instance used for benchmarking and regression tests.
///
/// Every off-diagonal entry is a positive edge, so the instance is complete.
pub fn canonical_fifteen() -> CostMatrix<u32> {
    match CostMatrix::from_rows(&CANONICAL_FIFTEEN) {
        Ok(m) => m,
        Err(e) => unreachable!("the built-in instance is well formed: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::CityIndex;

    #[test]
    fn test_canonical_fifteen_shape() {
        let m = canonical_fifteen();
        assert_eq!(m.num_cities(), 15);
        assert!(m.is_symmetric());
        assert_eq!(m.min_edge(), Some(15));
        for i in 0..15 {
            assert_eq!(m.outgoing(CityIndex::new(i)).count(), 14);
        }
    }
}
