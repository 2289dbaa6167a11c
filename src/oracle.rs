//! Reference implementation used to cross-validate [`RbTreeSet`].
//!
//! [`OracleSet`] offers the same `insert`/`distance` contract backed by
//! `alloc`'s `BTreeSet`. It exists for differential testing and benchmarking
//! only; nothing in the core depends on it.
//!
//! [`RbTreeSet`]: crate::RbTreeSet

use alloc::collections::BTreeSet;
use core::borrow::Borrow;
use core::fmt;
use core::ops::Bound::{Excluded, Included};

/// An ordered set backed by `BTreeSet`, exposing the same contract as
/// [`RbTreeSet`](crate::RbTreeSet).
///
/// # Examples
///
/// ```
/// use rouge_tree::OracleSet;
///
/// let mut oracle = OracleSet::new();
/// for key in [10, 20, 5, 15] {
///     oracle.insert(key);
/// }
/// assert_eq!(oracle.distance(&6, &25), 3);
/// ```
#[derive(Clone, Default, Eq, PartialEq)]
pub struct OracleSet<T> {
    inner: BTreeSet<T>,
}

impl<T> OracleSet<T> {
    /// Creates a new, empty oracle.
    #[must_use]
    pub const fn new() -> Self {
        Self { inner: BTreeSet::new() }
    }

    /// Returns the number of keys in the oracle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the oracle contains no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns an iterator over the keys in ascending order.
    pub fn iter(&self) -> alloc::collections::btree_set::Iter<'_, T> {
        self.inner.iter()
    }
}

impl<T: Ord> OracleSet<T> {
    /// Adds a key, returning whether it was newly inserted.
    pub fn insert(&mut self, key: T) -> bool {
        self.inner.insert(key)
    }

    /// Returns true if the oracle contains `key`.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.inner.contains(key)
    }

    /// Counts the keys `k` with `left < k <= right`; 0 for inverted bounds.
    #[must_use]
    pub fn distance<Q>(&self, left: &Q, right: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if left > right {
            return 0;
        }
        self.inner.range((Excluded(left), Included(right))).count()
    }
}

impl<T: fmt::Debug> fmt::Debug for OracleSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.inner.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for OracleSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { inner: BTreeSet::from_iter(iter) }
    }
}
