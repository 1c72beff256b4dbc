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

//! Test-only instance generators and reference solvers.

use hamilton_model::{
    index::CityIndex,
    matrix::{CostMatrix, CostMatrixBuilder},
    num::{Cost, EdgeWeight, INFINITY},
};
use itertools::Itertools;
use rand::{Rng, rngs::StdRng};

/// Draws an `n`-city instance with weights in `1..=max_weight`. Each edge (each
/// pair of edges if `symmetric`) exists with probability `density`.
pub(crate) fn random_matrix(
    rng: &mut StdRng,
    n: usize,
    max_weight: u32,
    density: f64,
    symmetric: bool,
) -> CostMatrix<u32> {
    let mut b = CostMatrixBuilder::new(n);
    for i in 0..n {
        for j in 0..n {
            if i == j || (symmetric && j < i) || !rng.gen_bool(density) {
                continue;
            }
            let w = rng.gen_range(1..=max_weight);
            let (from, to) = (CityIndex::new(i), CityIndex::new(j));
            if symmetric {
                b.set_symmetric_weight(from, to, w);
            } else {
                b.set_weight(from, to, w);
            }
        }
    }
    b.build().unwrap()
}

/// Minimum over every ordering of cities `1..n`.
pub(crate) fn brute_force<W>(matrix: &CostMatrix<W>) -> Cost
where
    W: EdgeWeight,
{
    let n = matrix.num_cities();
    (1..n)
        .map(CityIndex::new)
        .permutations(n - 1)
        .filter_map(|perm| {
            let route: Vec<CityIndex> = std::iter::once(CityIndex::ORIGIN).chain(perm).collect();
            matrix.tour_cost(&route)
        })
        .min()
        .unwrap_or(INFINITY)
}

/// Held-Karp dynamic program over (visited subset, last city).
pub(crate) fn held_karp<W>(matrix: &CostMatrix<W>) -> Cost
where
    W: EdgeWeight,
{
    let n = matrix.num_cities();
    if n == 1 {
        return 0;
    }

    let full = (1usize << n) - 1;
    let mut dp = vec![INFINITY; (1usize << n) * n];
    dp[n] = 0; // mask {0}, ending at 0

    for mask in 1..=full {
        if mask & 1 == 0 {
            continue;
        }
        for last in 0..n {
            let here = dp[mask * n + last];
            if here == INFINITY {
                continue;
            }
            for (next, w) in matrix.outgoing(CityIndex::new(last)) {
                let bit = 1 << next.get();
                if mask & bit != 0 {
                    continue;
                }
                let slot = &mut dp[(mask | bit) * n + next.get()];
                *slot = (*slot).min(here + w.to_cost());
            }
        }
    }

    (1..n)
        .filter_map(|last| {
            let here = dp[full * n + last];
            let close = matrix.closing_cost(CityIndex::new(last))?;
            (here != INFINITY).then(|| here + close)
        })
        .min()
        .unwrap_or(INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_oracles_agree() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 1..=7 {
            for &density in &[1.0, 0.6, 0.3] {
                let m = random_matrix(&mut rng, n, 50, density, n % 2 == 0);
                assert_eq!(brute_force(&m), held_karp(&m), "n = {}, {:?}", n, m);
            }
        }
    }
}
