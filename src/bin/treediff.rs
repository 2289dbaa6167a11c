//! Replays a `k <int>` / `q <int> <int>` command stream from stdin against
//! the red-black tree, the `BTreeSet`-backed oracle, or both side by side.

use std::io::{self, Read};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use log::info;
use structopt::StructOpt;

use rouge_tree::harness::{self, Command, DistanceSet};
use rouge_tree::{OracleSet, RbTreeSet};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "treediff",
    about = "Replay a k/q command stream against the red-black tree and its oracle."
)]
struct Opt {
    /// Replay only the red-black tree and print its query results.
    #[structopt(long, conflicts_with = "oracle")]
    tree: bool,

    /// Replay only the oracle and print its query results.
    #[structopt(long)]
    oracle: bool,

    /// Increase verbosity (-v for timings, -vv for debug).
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();
    stderrlog::new()
        .verbosity(opt.verbose + 1)
        .init()
        .context("failed to initialize logging")?;

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read command stream from stdin")?;
    let commands = harness::parse_commands(&input);

    if opt.tree {
        print_results(&replay::<RbTreeSet<i64>>("rb_tree", &commands));
        return Ok(());
    }
    if opt.oracle {
        print_results(&replay::<OracleSet<i64>>("oracle", &commands));
        return Ok(());
    }

    // Differential mode: one timed replay per implementation, then a
    // position-wise comparison of the collected results.
    let actual = replay::<RbTreeSet<i64>>("rb_tree", &commands);
    let expected = replay::<OracleSet<i64>>("oracle", &commands);

    let comparison = harness::compare_runs(&commands, &expected, &actual);
    for outcome in &comparison.outcomes {
        let verdict = if outcome.matches() { "ok" } else { "MISMATCH" };
        println!(
            "query ({}, {}]: rb_tree = {}, oracle = {} .. {}",
            outcome.left, outcome.right, outcome.actual, outcome.expected, verdict
        );
    }

    if !comparison.all_match() {
        bail!(
            "{} of {} queries diverged from the oracle",
            comparison.mismatch_count(),
            comparison.outcomes.len()
        );
    }
    println!("all {} queries match", comparison.outcomes.len());
    Ok(())
}

/// Replays the command stream against a fresh `S`, logging the wall-clock
/// duration, and returns the query results.
fn replay<S: DistanceSet>(name: &str, commands: &[Command]) -> Vec<usize> {
    let start = Instant::now();
    let mut set = S::default();
    let results = harness::run_commands(&mut set, commands);
    info!(
        "{name}: replayed {} commands ({} queries) in {:?}",
        commands.len(),
        results.len(),
        start.elapsed()
    );
    results
}

fn print_results(results: &[usize]) {
    let line: Vec<String> = results.iter().map(ToString::to_string).collect();
    println!("{}", line.join(" "));
}
