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

use crate::stats::BnbSolverStatistics;
use hamilton_model::{num::Cost, tour::Tour};
use hamilton_search::result::{SolverResult, TerminationReason};

/// Result of a branch-and-bound run after the tree is exhausted.
#[derive(Debug, Clone)]
pub struct BnbSolverOutcome {
    result: SolverResult,
    termination_reason: TerminationReason,
    statistics: BnbSolverStatistics,
}

impl BnbSolverOutcome {
    #[inline]
    pub fn optimal(tour: Tour, statistics: BnbSolverStatistics) -> Self {
        Self {
            result: SolverResult::Optimal(tour),
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    #[inline]
    pub fn infeasible(statistics: BnbSolverStatistics) -> Self {
        Self {
            result: SolverResult::Infeasible,
            termination_reason: TerminationReason::InfeasibilityProven,
            statistics,
        }
    }

    /// Builds the outcome from the final incumbent of an exhausted search.
    #[inline]
    pub fn from_incumbent(tour: Option<Tour>, statistics: BnbSolverStatistics) -> Self {
        match tour {
            Some(t) => Self::optimal(t, statistics),
            None => Self::infeasible(statistics),
        }
    }

    /// Returns the solver result.
    #[inline]
    pub fn result(&self) -> &SolverResult {
        &self.result
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> TerminationReason {
        self.termination_reason
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics {
        &self.statistics
    }

    /// Returns the minimum tour cost, or `INFINITY` if no cycle exists.
    #[inline]
    pub fn cost(&self) -> Cost {
        self.result.cost()
    }

    #[inline]
    pub fn into_parts(self) -> (SolverResult, TerminationReason, BnbSolverStatistics) {
        (self.result, self.termination_reason, self.statistics)
    }
}

impl std::fmt::Display for BnbSolverOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result: {} ({})", self.result, self.termination_reason)?;
        write!(f, "{}", self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hamilton_model::{index::CityIndex, num::INFINITY};

    #[test]
    fn test_from_incumbent_without_tour_is_infeasible() {
        let o = BnbSolverOutcome::from_incumbent(None, BnbSolverStatistics::default());
        assert!(o.result().is_infeasible());
        assert_eq!(
            o.termination_reason(),
            TerminationReason::InfeasibilityProven
        );
        assert_eq!(o.cost(), INFINITY);
    }

    #[test]
    fn test_from_incumbent_with_tour_is_optimal() {
        let tour = Tour::new(17, vec![CityIndex::new(0), CityIndex::new(1)]);
        let o = BnbSolverOutcome::from_incumbent(Some(tour), BnbSolverStatistics::default());
        assert!(o.result().is_optimal());
        assert_eq!(o.termination_reason(), TerminationReason::OptimalityProven);
        assert_eq!(o.cost(), 17);
        assert!(o.to_string().starts_with("Result: Optimal(cost=17) (Optimality Proven)"));
    }
}
