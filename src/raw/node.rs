use super::handle::Handle;

/// Red-black node color.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Which child slot of a parent a node occupies.
///
/// Rotation and fixup are mirror images of each other; parameterizing on the
/// side collapses the two cases into one body.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A tree vertex.
///
/// The `left`/`right` links are the owning edges (the arena slot is reachable
/// from exactly one of them, or from the tree root). `parent` is a non-owning
/// back-reference used for successor walks and rotation bookkeeping; every
/// structural change re-synchronizes it before returning.
#[derive(Clone)]
pub(crate) struct Node<K> {
    key: K,
    color: Color,
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl<K> Node<K> {
    /// Creates a detached node. New nodes enter the tree Red.
    pub(crate) const fn new(key: K) -> Self {
        Self {
            key,
            color: Color::Red,
            parent: None,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub(crate) const fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    #[inline]
    pub(crate) const fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    /// Returns the child occupying the given slot.
    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Replaces the child in the given slot.
    #[inline]
    pub(crate) const fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}
