//! Token-stream command protocol for differential testing.
//!
//! A command stream is whitespace-separated: `k <int>` inserts a key and
//! `q <int> <int>` issues a [`distance`](crate::RbTreeSet::distance) query.
//! Query results are collected in issuance order, so they reflect the tree
//! state at the moment each query was issued.
//!
//! Parsing is lenient at the boundary: a command with missing or non-numeric
//! arguments is skipped whole (never fed partially to the set) and reported
//! through the `log` facade.
//!
//! # Examples
//!
//! ```
//! use rouge_tree::RbTreeSet;
//! use rouge_tree::harness::{parse_commands, run_commands};
//!
//! let commands = parse_commands("k 10 k 20 q 8 31 q 6 9");
//! let mut set = RbTreeSet::new();
//! assert_eq!(run_commands(&mut set, &commands), [2, 0]);
//! ```

use alloc::vec::Vec;

use log::warn;

use crate::oracle::OracleSet;
use crate::rb_tree_set::RbTreeSet;

/// A single harness command.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    /// `k <key>`: insert a key.
    Insert(i64),
    /// `q <left> <right>`: count the keys `k` with `left < k <= right`.
    Distance(i64, i64),
}

/// The contract both the core and the oracle implement, letting the harness
/// replay one command stream against either.
pub trait DistanceSet: Default {
    /// Inserts a key; duplicates are a no-op.
    fn insert(&mut self, key: i64);
    /// Counts the keys `k` with `left < k <= right`.
    fn distance(&self, left: i64, right: i64) -> usize;
}

impl DistanceSet for RbTreeSet<i64> {
    fn insert(&mut self, key: i64) {
        RbTreeSet::insert(self, key);
    }

    fn distance(&self, left: i64, right: i64) -> usize {
        RbTreeSet::distance(self, &left, &right)
    }
}

impl DistanceSet for OracleSet<i64> {
    fn insert(&mut self, key: i64) {
        OracleSet::insert(self, key);
    }

    fn distance(&self, left: i64, right: i64) -> usize {
        OracleSet::distance(self, &left, &right)
    }
}

/// Parses a whitespace-separated command stream.
///
/// Malformed commands are skipped whole with a warning; the surrounding
/// commands still execute.
#[must_use]
pub fn parse_commands(input: &str) -> Vec<Command> {
    let mut commands = Vec::new();
    let mut tokens = input.split_whitespace();

    while let Some(token) = tokens.next() {
        match token {
            "k" => match parse_int(tokens.next()) {
                Some(key) => commands.push(Command::Insert(key)),
                None => warn!("skipping `k` command with a missing or malformed key"),
            },
            "q" => match (parse_int(tokens.next()), parse_int(tokens.next())) {
                (Some(left), Some(right)) => commands.push(Command::Distance(left, right)),
                _ => warn!("skipping `q` command with missing or malformed bounds"),
            },
            other => warn!("ignoring unknown command token {other:?}"),
        }
    }

    commands
}

fn parse_int(token: Option<&str>) -> Option<i64> {
    token?.parse().ok()
}

/// Replays `commands` against `set`, collecting the query results in
/// issuance order.
pub fn run_commands<S: DistanceSet>(set: &mut S, commands: &[Command]) -> Vec<usize> {
    let mut results = Vec::new();
    for &command in commands {
        match command {
            Command::Insert(key) => set.insert(key),
            Command::Distance(left, right) => results.push(set.distance(left, right)),
        }
    }
    results
}

/// The outcome of one query, replayed against both implementations.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct QueryOutcome {
    /// Exclusive lower bound of the query.
    pub left: i64,
    /// Inclusive upper bound of the query.
    pub right: i64,
    /// The oracle's result.
    pub expected: usize,
    /// The red-black tree's result.
    pub actual: usize,
}

impl QueryOutcome {
    /// Returns true if both implementations agreed.
    #[must_use]
    pub const fn matches(&self) -> bool {
        self.expected == self.actual
    }
}

/// Position-wise comparison of a replay against the oracle.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Comparison {
    /// One outcome per query position present in both result lists, in
    /// issuance order.
    pub outcomes: Vec<QueryOutcome>,
    /// Total number of results the oracle produced.
    pub expected_total: usize,
    /// Total number of results the red-black tree produced.
    pub actual_total: usize,
}

impl Comparison {
    /// Returns true if the result counts agree and every query agreed.
    #[must_use]
    pub fn all_match(&self) -> bool {
        self.expected_total == self.actual_total && self.outcomes.iter().all(QueryOutcome::matches)
    }

    /// Returns the number of diverging queries.
    #[must_use]
    pub fn mismatch_count(&self) -> usize {
        self.outcomes.iter().filter(|outcome| !outcome.matches()).count()
    }
}

/// Pairs two result lists for the same command stream position-wise.
/// Mismatches are recorded, not fatal; so is a difference in result counts.
#[must_use]
pub fn compare_runs(commands: &[Command], expected: &[usize], actual: &[usize]) -> Comparison {
    if expected.len() != actual.len() {
        warn!(
            "result count mismatch: oracle produced {}, tree produced {}",
            expected.len(),
            actual.len()
        );
    }

    let queries = commands.iter().filter_map(|command| match *command {
        Command::Distance(left, right) => Some((left, right)),
        Command::Insert(_) => None,
    });

    let outcomes = queries
        .zip(expected.iter().zip(actual))
        .map(|((left, right), (&expected, &actual))| QueryOutcome {
            left,
            right,
            expected,
            actual,
        })
        .collect();

    Comparison {
        outcomes,
        expected_total: expected.len(),
        actual_total: actual.len(),
    }
}

/// Replays `commands` against both the red-black tree and the oracle and
/// compares the query results position-wise.
#[must_use]
pub fn compare_with_oracle(commands: &[Command]) -> Comparison {
    let mut tree = RbTreeSet::new();
    let mut oracle = OracleSet::new();
    let actual = run_commands(&mut tree, commands);
    let expected = run_commands(&mut oracle, commands);
    compare_runs(commands, &expected, &actual)
}
