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

use anyhow::Context;
use hamilton_model::{
    instances::canonical_fifteen, loading::MatrixLoader, matrix::CostMatrix,
    visited::DEFAULT_MAX_CITIES,
};
use hamilton_solver::solver::{BoundKind, SearchMode, SolverBuilder};
use log::{LevelFilter, info};
use std::path::PathBuf;
use structopt::StructOpt;

/// Exact minimum cost Hamiltonian cycle by branch-and-bound.
#[derive(Debug, StructOpt)]
#[structopt(name = "hamilton")]
struct Opts {
    /// Instance file: `n` followed by `n * n` weights, `0` meaning no edge.
    /// Solves the built-in fifteen city instance when omitted.
    #[structopt(short, long, parse(from_os_str))]
    input: Option<PathBuf>,

    /// `sequential` or `parallel`.
    #[structopt(short, long, default_value = "parallel")]
    mode: SearchMode,

    /// Worker threads. Defaults to the available hardware parallelism.
    #[structopt(short, long)]
    threads: Option<usize>,

    /// `two-smallest` or `min-edge`.
    #[structopt(short, long, default_value = "two-smallest")]
    bound: BoundKind,

    /// Largest instance the solver accepts.
    #[structopt(long)]
    max_cities: Option<usize>,

    /// Print the optimal tour and search statistics.
    #[structopt(short, long)]
    stats: bool,

    /// Verbose mode (-v, -vv, -vvv)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,
}

fn init_logger(verbose: usize) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_matrix(input: &Option<PathBuf>, max_cities: usize) -> anyhow::Result<CostMatrix<u32>> {
    match input {
        Some(path) => MatrixLoader::<u32>::new()
            .max_cities(max_cities)
            .from_path(path)
            .with_context(|| format!("failed to load instance from {}", path.display())),
        None => {
            info!("no input given, using the built-in fifteen city instance");
            Ok(canonical_fifteen())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::from_args();
    init_logger(opts.verbose);

    let max_cities = opts.max_cities.unwrap_or(DEFAULT_MAX_CITIES);
    let matrix = load_matrix(&opts.input, max_cities)?;

    let mut builder = SolverBuilder::new()
        .with_mode(opts.mode)
        .with_bound(opts.bound)
        .with_max_cities(max_cities);
    if let Some(threads) = opts.threads {
        builder = builder.with_threads(threads);
    }
    let solver = builder.build();

    let outcome = solver
        .solve(&matrix)
        .context("solver rejected the instance")?;

    println!("Minimum cost Hamiltonian cycle: {}", outcome.cost());
    println!(
        "Time taken: {:.3} ms",
        outcome.statistics().solve_duration.as_secs_f64() * 1000.0
    );

    if opts.stats {
        if let Some(tour) = outcome.result().tour() {
            println!("Tour: {}", tour);
        }
        print!("{}", outcome.statistics());
        print!("{}", outcome.search_statistics());
    }

    Ok(())
}
