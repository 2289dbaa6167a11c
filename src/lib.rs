//! Red-black ordered set with range-distance queries.
//!
//! This crate provides [`RbTreeSet`], an ordered set of unique keys backed by
//! a red-black tree, with one operation beyond the usual set surface:
//! [`distance`](RbTreeSet::distance), which counts the keys `k` satisfying
//! `left < k <= right` by walking the in-order successor chain between the
//! upper bounds of the two query endpoints.
//!
//! Two companions support differential testing:
//!
//! - [`OracleSet`] - the identical contract backed by `BTreeSet`, used only
//!   to cross-validate results;
//! - [`harness`] - a whitespace-separated `k <int>` / `q <int> <int>` command
//!   protocol that replays one input stream against both implementations and
//!   compares the query results position-wise.
//!
//! # Example
//!
//! ```
//! use rouge_tree::RbTreeSet;
//!
//! let mut set = RbTreeSet::new();
//! for key in [10, 20, 5, 15] {
//!     set.insert(key);
//! }
//!
//! // Keys k with 6 < k <= 25: {10, 15, 20}.
//! assert_eq!(set.distance(&6, &25), 3);
//! ```
//!
//! # Implementation
//!
//! Nodes live in an append-only arena and link to each other through
//! niche-optimized handles; child links own, the parent back-reference is
//! lookup-only. `distance` is a deliberate linear walk between the two
//! bounds, O(log n + keys in range) - the tree carries no subtree-size
//! augmentation.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]

extern crate alloc;

mod raw;

pub mod harness;
pub mod oracle;
pub mod rb_tree_set;

pub use oracle::OracleSet;
pub use rb_tree_set::RbTreeSet;
