use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;

use crate::raw::{Handle, RawRbTree};

/// An ordered set of unique keys based on a red-black tree.
///
/// Alongside the usual set operations, `RbTreeSet` offers
/// [`distance`](RbTreeSet::distance), which counts the keys falling in a
/// half-open interval by walking the in-order successor chain between the two
/// interval bounds. Insertion is O(log n); `distance(a, b)` is
/// O(log n + number of keys in the interval).
///
/// It is a logic error for a key to be modified in such a way that its
/// ordering relative to any other key, as determined by the [`Ord`] trait,
/// changes while it is in the set.
///
/// # Examples
///
/// ```
/// use rouge_tree::RbTreeSet;
///
/// let mut set = RbTreeSet::new();
/// set.insert(10);
/// set.insert(20);
/// set.insert(5);
/// set.insert(15);
///
/// assert!(set.contains(&15));
/// assert_eq!(set.len(), 4);
///
/// // Keys k with 6 < k <= 25: {10, 15, 20}.
/// assert_eq!(set.distance(&6, &25), 3);
/// ```
#[derive(Clone)]
pub struct RbTreeSet<T> {
    raw: RawRbTree<T>,
}

impl<T> RbTreeSet<T> {
    /// Creates a new, empty set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rouge_tree::RbTreeSet;
    ///
    /// let set: RbTreeSet<i64> = RbTreeSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self { raw: RawRbTree::new() }
    }

    /// Creates a new, empty set with room for `capacity` keys.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { raw: RawRbTree::with_capacity(capacity) }
    }

    /// Returns the number of keys in the set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns true if the set contains no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes all keys from the set.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns a cursor over the keys in ascending order.
    ///
    /// The cursor is forward-only and fused: once exhausted it stays
    /// exhausted.
    ///
    /// # Examples
    ///
    /// ```
    /// use rouge_tree::RbTreeSet;
    ///
    /// let set = RbTreeSet::from_iter([3, 1, 2]);
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            raw: &self.raw,
            current: self.raw.first(),
        }
    }

    /// Returns the minimum key, if any.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.first().map(|handle| self.raw.key(handle))
    }
}

impl<T: Ord> RbTreeSet<T> {
    /// Adds a key to the set, returning whether it was newly inserted.
    ///
    /// Inserting a key that is already present leaves the set untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use rouge_tree::RbTreeSet;
    ///
    /// let mut set = RbTreeSet::new();
    /// assert!(set.insert(2));
    /// assert!(!set.insert(2));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> bool {
        self.raw.insert(key)
    }

    /// Returns true if the set contains `key`.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(key).is_some()
    }

    /// Returns a reference to the key in the set equal to `key`, if any.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(key).map(|handle| self.raw.key(handle))
    }

    /// Returns a cursor positioned at `key`, or an exhausted cursor if the
    /// key is absent. Advancing the cursor continues in ascending order from
    /// the match.
    ///
    /// # Examples
    ///
    /// ```
    /// use rouge_tree::RbTreeSet;
    ///
    /// let set = RbTreeSet::from_iter([10, 20, 5, 15]);
    ///
    /// let mut cursor = set.find(&15);
    /// assert_eq!(cursor.next(), Some(&15));
    /// assert_eq!(cursor.next(), Some(&20));
    ///
    /// assert_eq!(set.find(&11).next(), None);
    /// ```
    #[must_use]
    pub fn find<Q>(&self, key: &Q) -> Iter<'_, T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Iter {
            raw: &self.raw,
            current: self.raw.find(key),
        }
    }

    /// Counts the keys `k` with `left < k <= right`.
    ///
    /// Equivalently: the number of in-order steps between the first key
    /// strictly greater than `left` and the first key strictly greater than
    /// `right`. Returns 0 when `left > right` or no key exceeds `left`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rouge_tree::RbTreeSet;
    ///
    /// let set = RbTreeSet::from_iter(1..=5);
    /// assert_eq!(set.distance(&0, &6), 5);
    /// assert_eq!(set.distance(&1, &4), 3);
    /// assert_eq!(set.distance(&2, &2), 0);
    /// assert_eq!(set.distance(&5, &2), 0);
    /// ```
    #[must_use]
    pub fn distance<Q>(&self, left: &Q, right: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.distance(left, right)
    }
}

impl<T> Default for RbTreeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for RbTreeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for RbTreeSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RbTreeSet<T> {}

impl<T: Ord> FromIterator<T> for RbTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for RbTreeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, T> IntoIterator for &'a RbTreeSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// A cursor over the keys of an [`RbTreeSet`] in ascending order.
///
/// Created by [`RbTreeSet::iter`] and [`RbTreeSet::find`]. The cursor is
/// either positioned at a node or past the end; advancing a past-the-end
/// cursor is a no-op.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    raw: &'a RawRbTree<T>,
    current: Option<Handle>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let handle = self.current?;
        self.current = self.raw.successor(handle);
        Some(self.raw.key(handle))
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw,
            current: self.current,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
