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

use std::time::Duration;

/// Run-level statistics of a solver invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverStatistics {
    /// Number of strictly improving tours installed during the run.
    pub tours_found: u64,
    /// Number of worker threads the run was configured with.
    pub used_threads: usize,
    /// Depth down to which subtrees were forked into parallel tasks.
    pub parallel_level: usize,
    /// Wall-clock time of the search itself, excluding loading.
    pub solve_duration: Duration,
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solver Statistics:")?;
        writeln!(f, "  Tours Found: {}", self.tours_found)?;
        writeln!(f, "  Used Threads: {}", self.used_threads)?;
        writeln!(f, "  Parallel Level: {}", self.parallel_level)?;
        writeln!(
            f,
            "  Solve Duration (secs): {:.3}",
            self.solve_duration.as_secs_f64()
        )
    }
}

/// Builder for `SolverStatistics`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverStatisticsBuilder {
    tours_found: u64,
    used_threads: usize,
    parallel_level: usize,
    solve_duration: Duration,
}

impl Default for SolverStatisticsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverStatisticsBuilder {
    #[inline]
    pub fn new() -> Self {
        Self {
            tours_found: 0,
            used_threads: 1,
            parallel_level: 0,
            solve_duration: Duration::ZERO,
        }
    }

    #[inline]
    pub fn tours_found(mut self, tours_found: u64) -> Self {
        self.tours_found = tours_found;
        self
    }

    #[inline]
    pub fn used_threads(mut self, used_threads: usize) -> Self {
        self.used_threads = used_threads;
        self
    }

    #[inline]
    pub fn parallel_level(mut self, parallel_level: usize) -> Self {
        self.parallel_level = parallel_level;
        self
    }

    #[inline]
    pub fn solve_duration(mut self, solve_duration: Duration) -> Self {
        self.solve_duration = solve_duration;
        self
    }

    #[inline]
    pub fn build(self) -> SolverStatistics {
        SolverStatistics {
            tours_found: self.tours_found,
            used_threads: self.used_threads,
            parallel_level: self.parallel_level,
            solve_duration: self.solve_duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let stats = SolverStatisticsBuilder::new().build();
        assert_eq!(stats.tours_found, 0);
        assert_eq!(stats.used_threads, 1);
        assert_eq!(stats.parallel_level, 0);
        assert_eq!(stats.solve_duration, Duration::ZERO);
    }

    #[test]
    fn test_display_formats_all_fields() {
        let stats = SolverStatisticsBuilder::new()
            .tours_found(5)
            .used_threads(8)
            .parallel_level(3)
            .solve_duration(Duration::from_millis(1234))
            .build();

        let rendered = stats.to_string();
        assert!(rendered.contains("Solver Statistics:"));
        assert!(rendered.contains("Tours Found: 5"));
        assert!(rendered.contains("Used Threads: 8"));
        assert!(rendered.contains("Parallel Level: 3"));
        assert!(rendered.contains("Solve Duration (secs): 1.234"));
    }
}
