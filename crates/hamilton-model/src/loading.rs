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

//! Instance loader for directed TSP cost matrices.
//!
//! Turns a whitespace-delimited text stream into a validated `CostMatrix`.
//! The format is deliberately plain:
//!
//! ```raw
//! n                      // number of cities
//! w_0_0   ... w_0_(n-1)  // outgoing weights of city 0
//! ...
//! w_(n-1)_0 ... w_(n-1)_(n-1)
//! ```
//!
//! Row and line boundaries carry no meaning; only the token order does.
//! Anything after `#` on a line is a comment. Zero off the diagonal means
//! "no edge" and diagonal entries are ignored.
//!
//! The loader can treat every weight at or above a threshold as a missing
//! edge, for formats that spell "no edge" as a large integer, and can reject
//! instances where some city has no outgoing or no incoming edge at all.
//! Such an instance cannot contain a Hamiltonian cycle, so by default it is
//! loaded anyway and the search reports the infinity sentinel.

use crate::{
    index::CityIndex,
    matrix::{CostMatrix, CostMatrixBuilder, ModelError},
    num::EdgeWeight,
    visited::DEFAULT_MAX_CITIES,
};
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

/// The error type for the loading process.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// An I/O error occurred while reading the input stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The input ended before `n * n` weights were read.
    #[error("unexpected end of input while parsing instance")]
    UnexpectedEof,
    /// A token could not be parsed into the expected numeric type.
    #[error("could not parse token '{token}' as type {type_name}")]
    Parse {
        token: String,
        type_name: &'static str,
    },
    /// The city count is zero.
    #[error("the number of cities must be a positive integer")]
    InvalidDimensions,
    /// The declared city count is above the loader's limit.
    #[error("instance declares {num_cities} cities but at most {max_cities} are supported")]
    TooManyCities {
        num_cities: usize,
        max_cities: usize,
    },
    /// A city has no outgoing or no incoming edge.
    #[error("{city} has no {direction} edges")]
    Isolated {
        city: CityIndex,
        direction: &'static str,
    },
    /// The matrix failed validation.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// A configurable loader for TSP instances.
///
/// # Configuration
/// * `no_edge_at_least`: any weight `>=` this value is stored as "no edge".
/// * `fail_on_isolated`: if true, a city without outgoing or incoming edges
///   is reported as `LoadError::Isolated` instead of being loaded.
/// * `max_cities`: the largest declared city count accepted, checked before
///   anything is allocated. Defaults to `DEFAULT_MAX_CITIES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixLoader<W> {
    no_edge_at_least: Option<W>,
    fail_on_isolated: bool,
    max_cities: usize,
}

impl<W> Default for MatrixLoader<W> {
    fn default() -> Self {
        Self {
            no_edge_at_least: None,
            fail_on_isolated: false,
            max_cities: DEFAULT_MAX_CITIES,
        }
    }
}

impl<W> MatrixLoader<W>
where
    W: EdgeWeight,
{
    /// Creates a new `MatrixLoader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Treats every weight greater than or equal to `w` as a missing edge.
    #[inline]
    pub fn no_edge_at_least(mut self, w: W) -> Self {
        self.no_edge_at_least = Some(w);
        self
    }

    /// Configures whether cities without outgoing or incoming edges are an error.
    #[inline]
    pub fn fail_on_isolated(mut self, yes: bool) -> Self {
        self.fail_on_isolated = yes;
        self
    }

    /// Sets the largest city count the loader accepts.
    #[inline]
    pub fn max_cities(mut self, max_cities: usize) -> Self {
        self.max_cities = max_cities;
        self
    }

    /// Loads an instance from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<CostMatrix<W>, LoadError> {
        let mut sc = Scanner::new(rdr);

        let n: usize = sc.next()?;
        if n == 0 {
            return Err(LoadError::InvalidDimensions);
        }
        if n > self.max_cities {
            return Err(LoadError::TooManyCities {
                num_cities: n,
                max_cities: self.max_cities,
            });
        }

        // The buffer grows with the tokens actually present, so a truncated
        // file fails with `UnexpectedEof` before the matrix is sized.
        let expected = n.checked_mul(n).ok_or(LoadError::TooManyCities {
            num_cities: n,
            max_cities: self.max_cities,
        })?;
        let mut weights: Vec<W> = Vec::new();
        while weights.len() < expected {
            weights.push(sc.next()?);
        }

        let mut builder = CostMatrixBuilder::new(n);
        for (k, w) in weights.into_iter().enumerate() {
            let forbidden = self.no_edge_at_least.is_some_and(|limit| w >= limit);
            if !forbidden {
                builder.set_weight(CityIndex::new(k / n), CityIndex::new(k % n), w);
            }
        }

        let matrix = builder.build()?;

        if self.fail_on_isolated && n > 1 {
            for city in (0..n).map(CityIndex::new) {
                if matrix.outgoing(city).next().is_none() {
                    return Err(LoadError::Isolated {
                        city,
                        direction: "outgoing",
                    });
                }
                if matrix.incoming(city).next().is_none() {
                    return Err(LoadError::Isolated {
                        city,
                        direction: "incoming",
                    });
                }
            }
        }

        Ok(matrix)
    }

    /// Loads an instance from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<CostMatrix<W>, LoadError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads an instance from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<CostMatrix<W>, LoadError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads an instance from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<CostMatrix<W>, LoadError> {
        self.from_reader(s.as_bytes())
    }
}

/// Reads whitespace-delimited tokens, skipping `#` comments.
struct Scanner<R> {
    rdr: R,
    line: String,
    pos: usize,
}

impl<R: BufRead> Scanner<R> {
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            line: String::new(),
            pos: 0,
        }
    }

    /// Refills the line buffer with comments stripped. `Ok(false)` on EOF.
    fn fill_line(&mut self) -> Result<bool, LoadError> {
        self.line.clear();
        self.pos = 0;
        if self.rdr.read_line(&mut self.line)? == 0 {
            return Ok(false);
        }
        if let Some(hash) = self.line.find('#') {
            self.line.truncate(hash);
        }
        Ok(true)
    }

    /// Reads the next token and parses it into `T`.
    fn next<T>(&mut self) -> Result<T, LoadError>
    where
        T: FromStr,
    {
        loop {
            let rest = &self.line[self.pos..];
            let trimmed = rest.trim_start();
            if trimmed.is_empty() {
                if !self.fill_line()? {
                    return Err(LoadError::UnexpectedEof);
                }
                continue;
            }

            let start = self.pos + (rest.len() - trimmed.len());
            let len = trimmed
                .find(char::is_whitespace)
                .unwrap_or(trimmed.len());
            let token = &self.line[start..start + len];
            self.pos = start + len;

            return token.parse::<T>().map_err(|_| LoadError::Parse {
                token: token.to_owned(),
                type_name: std::any::type_name::<T>(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_INSTANCE: &str = r#"
        3           # three cities
        0 4 9       # from city 0
        4 0 999     # from city 1
        9 2 0       # from city 2
    "#;

    fn ci(i: usize) -> CityIndex {
        CityIndex::new(i)
    }

    #[test]
    fn test_loads_row_major_weights() {
        let m: CostMatrix<u32> = MatrixLoader::new()
            .from_str(SMALL_INSTANCE)
            .expect("failed to load");

        assert_eq!(m.num_cities(), 3);
        assert_eq!(m.edge(ci(0), ci(2)), Some(9));
        assert_eq!(m.edge(ci(1), ci(2)), Some(999));
        assert_eq!(m.edge(ci(2), ci(1)), Some(2));
    }

    #[test]
    fn test_no_edge_threshold() {
        let m: CostMatrix<u32> = MatrixLoader::new()
            .no_edge_at_least(900)
            .from_str(SMALL_INSTANCE)
            .expect("failed to load");

        assert_eq!(m.edge(ci(1), ci(2)), None);
        assert_eq!(m.edge(ci(0), ci(1)), Some(4));
    }

    #[test]
    fn test_tokens_may_span_lines_arbitrarily() {
        let data = "2\n0\n5 7 0";
        let m: CostMatrix<u16> = MatrixLoader::new().from_str(data).unwrap();
        assert_eq!(m.edge(ci(0), ci(1)), Some(5));
        assert_eq!(m.edge(ci(1), ci(0)), Some(7));
    }

    #[test]
    fn test_unexpected_eof() {
        let res: Result<CostMatrix<u32>, _> = MatrixLoader::new().from_str("2 0 1 1");
        assert!(matches!(res, Err(LoadError::UnexpectedEof)));
    }

    #[test]
    fn test_huge_declared_dimension_is_rejected_before_allocation() {
        let res: Result<CostMatrix<u32>, _> = MatrixLoader::new().from_str("1000000000\n");
        match res {
            Err(LoadError::TooManyCities {
                num_cities,
                max_cities,
            }) => {
                assert_eq!(num_cities, 1_000_000_000);
                assert_eq!(max_cities, DEFAULT_MAX_CITIES);
            }
            other => panic!("expected too many cities, got {:?}", other),
        }

        let res: Result<CostMatrix<u32>, _> = MatrixLoader::new().from_str("4294967296\n0 1\n");
        assert!(matches!(res, Err(LoadError::TooManyCities { .. })));
    }

    #[test]
    fn test_truncated_input_within_limit_is_eof() {
        let res: Result<CostMatrix<u32>, _> =
            MatrixLoader::new().max_cities(usize::MAX).from_str("1000000000\n0 1\n");
        assert!(matches!(res, Err(LoadError::UnexpectedEof)));

        let res: Result<CostMatrix<u32>, _> =
            MatrixLoader::new().max_cities(usize::MAX).from_str("4294967296\n0 1\n");
        assert!(matches!(res, Err(LoadError::TooManyCities { .. })));
    }

    #[test]
    fn test_custom_city_limit() {
        let data = "3  0 1 1  1 0 1  1 1 0";
        let res: Result<CostMatrix<u32>, _> = MatrixLoader::new().max_cities(2).from_str(data);
        assert!(matches!(
            res,
            Err(LoadError::TooManyCities {
                num_cities: 3,
                max_cities: 2
            })
        ));

        let m: CostMatrix<u32> = MatrixLoader::new().max_cities(3).from_str(data).unwrap();
        assert_eq!(m.num_cities(), 3);
    }

    #[test]
    fn test_zero_cities_rejected() {
        let res: Result<CostMatrix<u32>, _> = MatrixLoader::new().from_str("0");
        assert!(matches!(res, Err(LoadError::InvalidDimensions)));
    }

    #[test]
    fn test_parse_error_structure() {
        let res: Result<CostMatrix<u32>, _> = MatrixLoader::new().from_str("2 0 garbage");
        match res {
            Err(LoadError::Parse { token, type_name }) => {
                assert_eq!(token, "garbage");
                assert!(type_name.contains("u32"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_weight_is_a_parse_error() {
        let res: Result<CostMatrix<u32>, _> = MatrixLoader::new().from_str("2 0 -1 1 0");
        assert!(matches!(res, Err(LoadError::Parse { .. })));
    }

    #[test]
    fn test_fail_on_isolated() {
        let data = "3  0 1 1  0 0 0  1 1 0";
        let loose: Result<CostMatrix<u32>, _> = MatrixLoader::new().from_str(data);
        assert!(loose.is_ok());

        let strict: Result<CostMatrix<u32>, _> =
            MatrixLoader::new().fail_on_isolated(true).from_str(data);
        match strict {
            Err(LoadError::Isolated { city, direction }) => {
                assert_eq!(city, ci(1));
                assert_eq!(direction, "outgoing");
            }
            other => panic!("expected isolated error, got {:?}", other),
        }
    }

    #[test]
    fn test_single_city_is_never_isolated() {
        let m: CostMatrix<u32> = MatrixLoader::new()
            .fail_on_isolated(true)
            .from_str("1 0")
            .unwrap();
        assert_eq!(m.num_cities(), 1);
    }
}
