//! Compute catalogue integrals from the command line.
//!
//! **Usage:**
//! ```bash
//! integrals -i <n|all> [--prec p] [--goal g] [--tol eps] [--twice] [...]
//! ```
//!
//! Set `RUST_LOG=debug` for per-entry timing from the catalogue itself.

use std::f64::consts::LOG10_2;
use std::ops::Range;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use quadra_ball::effective_prec;
use quadra_calc::{IntegrationOptions, Verbosity};
use quadra_catalog::{entries, lookup, tolerance_for, Settings};
use tracing::info;

/// Compute integrals using rigorous adaptive quadrature
#[derive(Parser, Debug)]
#[command(name = "integrals")]
#[command(about = "Compute integrals using rigorous adaptive quadrature")]
struct Args {
    /// Integral to compute: an index, or "all"
    #[arg(short = 'i', value_name = "N|all")]
    integral: Option<String>,

    /// Working precision in bits
    #[arg(long, default_value_t = 64)]
    prec: u32,

    /// Approximate relative accuracy goal in bits (default: precision minus guard bits)
    #[arg(long)]
    goal: Option<u32>,

    /// Approximate absolute error goal (default: 2^-goal)
    #[arg(long)]
    tol: Option<f64>,

    /// Run twice, to see the overhead of computing nodes
    #[arg(long)]
    twice: bool,

    /// Use a heap for the subinterval queue
    #[arg(long)]
    heap: bool,

    /// Show information
    #[arg(long)]
    verbose: bool,

    /// Show more information
    #[arg(long)]
    verbose2: bool,

    /// Use quadrature degree up to N
    #[arg(long, value_name = "N")]
    deg: Option<usize>,

    /// Limit the number of function evaluations to N
    #[arg(long, value_name = "N")]
    eval: Option<u64>,

    /// Limit the subinterval depth to N
    #[arg(long, value_name = "N")]
    depth: Option<u32>,
}

impl Args {
    fn verbosity(&self) -> Verbosity {
        if self.verbose2 {
            Verbosity::Detail
        } else if self.verbose {
            Verbosity::Summary
        } else {
            Verbosity::Silent
        }
    }

    fn options(&self) -> IntegrationOptions {
        IntegrationOptions {
            deg_limit: self.deg,
            eval_limit: self.eval,
            depth_limit: self.depth,
            use_heap: self.heap,
            verbosity: self.verbosity(),
        }
    }

    fn settings(&self) -> Settings {
        let mut settings = Settings::new(self.prec).with_options(self.options());
        if let Some(goal) = self.goal {
            settings = settings.with_goal(goal);
        }
        let tol = self.tol.unwrap_or_else(|| tolerance_for(settings.goal));
        settings.with_tol(tol)
    }
}

/// Parses `-i`: a valid index or `all`.
fn selection(arg: Option<&str>) -> Option<Range<usize>> {
    let count = entries().len();
    match arg? {
        "all" => Some(0..count),
        n => {
            let index: usize = n.parse().ok()?;
            (index < count).then(|| index..index + 1)
        }
    }
}

/// Significant decimal digits worth printing at precision `prec`.
fn digits(prec: u32) -> usize {
    let d = (f64::from(effective_prec(prec)) * LOG10_2).ceil() as usize;
    d.clamp(1, 17)
}

fn print_usage() -> anyhow::Result<()> {
    Args::command().print_help()?;
    println!();
    println!("Implemented integrals:");
    for entry in entries() {
        println!("I{} = {}", entry.index, entry.description);
    }
    println!();
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let Some(range) = selection(args.integral.as_deref()) else {
        print_usage()?;
        return Ok(ExitCode::FAILURE);
    };

    let settings = args.settings();
    let runs = if args.twice { 2 } else { 1 };
    let shown = digits(settings.prec);

    for index in range {
        let entry = lookup(index)?;
        println!("I{} = {} ...", index, entry.description);

        let mut last = None;
        for run in 0..runs {
            let started = Instant::now();
            let result = entry
                .compute(&settings)
                .with_context(|| format!("failed to compute I{index}"))?;
            info!(
                index,
                run,
                evaluations = result.stats.evaluations,
                status = %result.status,
                elapsed_ms = started.elapsed().as_secs_f64() * 1e3,
                "timing"
            );
            last = Some(result);
        }

        if let Some(result) = last {
            println!("I{} = {:.*}\n", index, shown - 1, result.value);
        }
    }

    Ok(ExitCode::SUCCESS)
}
