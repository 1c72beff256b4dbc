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

use hamilton_model::{
    num::{Cost, INFINITY},
    tour::Tour,
};

/// The answer of a completed search.
///
/// Every search in this workspace runs to completion, so a result is always
/// proven: either the returned tour is optimal or no Hamiltonian cycle exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult {
    /// We have proven that the instance has no Hamiltonian cycle.
    Infeasible,
    /// We have found a tour and proven its optimality.
    Optimal(Tour),
}

impl SolverResult {
    /// Builds the result from the final incumbent.
    #[inline]
    pub fn from_incumbent(tour: Option<Tour>) -> Self {
        match tour {
            Some(t) => SolverResult::Optimal(t),
            None => SolverResult::Infeasible,
        }
    }

    /// Returns the optimal cost, or `INFINITY` if no cycle exists.
    #[inline]
    pub fn cost(&self) -> Cost {
        match self {
            SolverResult::Infeasible => INFINITY,
            SolverResult::Optimal(tour) => tour.cost(),
        }
    }

    /// Returns the optimal tour, if any.
    #[inline]
    pub fn tour(&self) -> Option<&Tour> {
        match self {
            SolverResult::Infeasible => None,
            SolverResult::Optimal(tour) => Some(tour),
        }
    }

    /// Returns the reason matching this result.
    #[inline]
    pub fn termination_reason(&self) -> TerminationReason {
        match self {
            SolverResult::Infeasible => TerminationReason::InfeasibilityProven,
            SolverResult::Optimal(_) => TerminationReason::OptimalityProven,
        }
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolverResult::Optimal(_))
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self, SolverResult::Infeasible)
    }
}

impl std::fmt::Display for SolverResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Infeasible => write!(f, "Infeasible"),
            SolverResult::Optimal(tour) => write!(f, "Optimal(cost={})", tour.cost()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The search exhausted the tree with an incumbent.
    OptimalityProven,
    /// The search exhausted the tree without ever closing a cycle.
    InfeasibilityProven,
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hamilton_model::index::CityIndex;

    #[test]
    fn test_infeasible_reports_sentinel() {
        let r = SolverResult::from_incumbent(None);
        assert!(r.is_infeasible());
        assert_eq!(r.cost(), INFINITY);
        assert!(r.tour().is_none());
        assert_eq!(
            r.termination_reason(),
            TerminationReason::InfeasibilityProven
        );
        assert_eq!(r.to_string(), "Infeasible");
    }

    #[test]
    fn test_optimal_carries_tour() {
        let tour = Tour::new(42, vec![CityIndex::new(0), CityIndex::new(1)]);
        let r = SolverResult::from_incumbent(Some(tour.clone()));
        assert!(r.is_optimal());
        assert_eq!(r.cost(), 42);
        assert_eq!(r.tour(), Some(&tour));
        assert_eq!(r.termination_reason(), TerminationReason::OptimalityProven);
        assert_eq!(r.to_string(), "Optimal(cost=42)");
    }
}
