use alloc::vec::Vec;

use super::handle::Handle;

/// Append-only node storage.
///
/// The tree never deletes individual nodes, so there is no free list: a slot,
/// once allocated, stays live until [`clear`](Arena::clear) or drop. Cloning
/// the arena duplicates the whole slot table; handles are plain indices, so a
/// clone's links refer exclusively to the clone's own slots.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<T>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self { slots: Vec::with_capacity(capacity) }
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        // Strict less-than keeps the largest index representable as a Handle.
        assert!(
            self.slots.len() < Handle::MAX,
            "`Arena::alloc()` - arena is at maximum capacity ({})",
            Handle::MAX
        );
        self.slots.push(element);
        Handle::from_index(self.slots.len() - 1)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        &self.slots[handle.to_index()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        &mut self.slots[handle.to_index()]
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}
