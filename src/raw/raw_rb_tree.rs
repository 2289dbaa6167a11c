use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node, Side};

/// The red-black tree backing `RbTreeSet`.
///
/// Nodes live in an append-only [`Arena`]; all links are [`Handle`]s.
/// Ownership flows strictly downward (root slot, then `left`/`right` child
/// slots); the `parent` link is lookup-only. The usual invariants hold after
/// every mutating operation:
///
/// 1. in-order key sequence is strictly increasing,
/// 2. absent children count as Black,
/// 3. a Red node has no Red child,
/// 4. every root-to-null path crosses the same number of Black nodes,
/// 5. the root is Black.
#[derive(Clone)]
pub(crate) struct RawRbTree<K> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of keys in the tree.
    len: usize,
}

impl<K> RawRbTree<K> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates a new tree with room for `capacity` keys.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    /// Returns the number of keys in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no keys.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes all keys from the tree.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Returns the key stored at `handle`.
    #[inline]
    pub(crate) fn key(&self, handle: Handle) -> &K {
        self.nodes.get(handle).key()
    }

    /// Returns the handle of the minimum key, if any.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.min_in(root))
    }

    /// Returns the in-order successor of `handle`, or `None` at the maximum.
    ///
    /// With a right subtree the successor is that subtree's minimum;
    /// otherwise we climb parent links until leaving a left child slot.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.nodes.get(handle).right() {
            return Some(self.min_in(right));
        }

        let mut child = handle;
        let mut parent = self.nodes.get(handle).parent();
        while let Some(p) = parent {
            if self.nodes.get(p).left() == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.nodes.get(p).parent();
        }
        None
    }

    /// Leftmost node of the subtree rooted at `handle`.
    fn min_in(&self, handle: Handle) -> Handle {
        let mut current = handle;
        while let Some(left) = self.nodes.get(current).left() {
            current = left;
        }
        current
    }

    /// Which side of its parent `handle` occupies. `handle` must not be root.
    fn side_of(&self, handle: Handle) -> Side {
        let parent = self.nodes.get(handle).parent().expect("`side_of()` - node has no parent!");
        if self.nodes.get(parent).left() == Some(handle) {
            Side::Left
        } else {
            Side::Right
        }
    }
}

impl<K: Ord> RawRbTree<K> {
    /// Inserts `key`, returning whether it was newly added.
    ///
    /// A duplicate key leaves the tree untouched. Otherwise the key is
    /// attached Red at the null slot the descent terminates in, and the
    /// fixup loop restores the color invariants.
    pub(crate) fn insert(&mut self, key: K) -> bool {
        let Some(root) = self.root else {
            let handle = self.nodes.alloc(Node::new(key));
            self.root = Some(handle);
            self.len = 1;
            self.rebalance(handle);
            return true;
        };

        let mut current = root;
        let (parent, side) = loop {
            let node = self.nodes.get(current);
            let side = match key.cmp(node.key()) {
                Less => Side::Left,
                Greater => Side::Right,
                Equal => return false,
            };
            match node.child(side) {
                Some(child) => current = child,
                None => break (current, side),
            }
        };

        let handle = self.nodes.alloc(Node::new(key));
        self.nodes.get_mut(handle).set_parent(Some(parent));
        self.nodes.get_mut(parent).set_child(side, Some(handle));
        self.len += 1;
        self.rebalance(handle);
        true
    }

    /// Classic insertion fixup, starting at the freshly attached Red node.
    fn rebalance(&mut self, mut node: Handle) {
        loop {
            let Some(parent) = self.nodes.get(node).parent() else {
                break;
            };
            if self.nodes.get(parent).color() != Color::Red {
                break;
            }

            // A Red parent is never the root, so the grandparent exists.
            let grandparent = self
                .nodes
                .get(parent)
                .parent()
                .expect("`rebalance()` - red parent has no grandparent!");
            let side = self.side_of(parent);
            let uncle = self.nodes.get(grandparent).child(side.opposite());

            match uncle {
                Some(uncle) if self.nodes.get(uncle).color() == Color::Red => {
                    // Red uncle: recolor and push the violation upward.
                    self.nodes.get_mut(parent).set_color(Color::Black);
                    self.nodes.get_mut(uncle).set_color(Color::Black);
                    self.nodes.get_mut(grandparent).set_color(Color::Red);
                    node = grandparent;
                }
                _ => {
                    // Black or absent uncle: straighten an inner child, then
                    // rotate the grandparent. This terminates the loop.
                    let top = if self.side_of(node) == side.opposite() {
                        self.rotate(parent, side);
                        node
                    } else {
                        parent
                    };
                    self.nodes.get_mut(top).set_color(Color::Black);
                    self.nodes.get_mut(grandparent).set_color(Color::Red);
                    self.rotate(grandparent, side.opposite());
                    break;
                }
            }
        }

        // Establishes the invariant on the first insertion and repairs the
        // case where the loop recolored the root Red.
        if let Some(root) = self.root {
            self.nodes.get_mut(root).set_color(Color::Black);
        }
    }

    /// Rotates the subtree at `pivot` toward `dir`, promoting the child on
    /// the opposite side into the pivot's owning slot.
    ///
    /// The promoted child's `dir`-side subtree crosses over to become the
    /// pivot's opposite-side subtree; all touched parent links are
    /// re-synchronized before returning. Without the required child this is
    /// a no-op (the fixup preconditions never produce that case).
    fn rotate(&mut self, pivot: Handle, dir: Side) {
        let src = dir.opposite();
        let Some(promoted) = self.nodes.get(pivot).child(src) else {
            return;
        };

        // Move the promoted node's dir-side subtree across to the pivot.
        let transfer = self.nodes.get(promoted).child(dir);
        self.nodes.get_mut(pivot).set_child(src, transfer);
        if let Some(transfer) = transfer {
            self.nodes.get_mut(transfer).set_parent(Some(pivot));
        }

        // Promote into the pivot's old slot (root or a child of its parent).
        let parent = self.nodes.get(pivot).parent();
        self.nodes.get_mut(promoted).set_parent(parent);
        match parent {
            None => self.root = Some(promoted),
            Some(parent) => {
                let slot = self.side_of(pivot);
                self.nodes.get_mut(parent).set_child(slot, Some(promoted));
            }
        }

        // The pivot descends to the promoted node's dir side.
        self.nodes.get_mut(promoted).set_child(dir, Some(pivot));
        self.nodes.get_mut(pivot).set_parent(Some(promoted));
    }

    /// Returns the node holding `key`, if present.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match key.cmp(node.key().borrow()) {
                Less => node.left(),
                Greater => node.right(),
                Equal => return Some(handle),
            };
        }
        None
    }

    /// Returns the node with the smallest key strictly greater than `key`,
    /// or `None` if every key is `<= key`.
    pub(crate) fn upper_bound<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut bound = None;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if node.key().borrow() > key {
                bound = Some(handle);
                current = node.left();
            } else {
                current = node.right();
            }
        }
        bound
    }

    /// Counts the keys `k` with `left < k <= right` by walking the in-order
    /// successor chain from `upper_bound(left)` to `upper_bound(right)`.
    ///
    /// Inverted bounds yield 0. The walk also stops at the end of the tree,
    /// so the operation is total even if `Q`'s ordering misbehaves.
    pub(crate) fn distance<Q>(&self, left: &Q, right: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if left > right {
            return 0;
        }

        let end = self.upper_bound(right);
        let mut current = self.upper_bound(left);
        let mut steps = 0;
        while current != end {
            let Some(handle) = current else {
                break;
            };
            steps += 1;
            current = self.successor(handle);
        }
        steps
    }
}
