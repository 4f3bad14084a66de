//! Backing storage the resolver can permute.
//!
//! [`Reorderable`] is the seam between the resolver and whatever the host
//! keeps its rows in. A commit is a single `move_item(from, to)` where `to`
//! is the item's final index; hosts whose native move takes a pre-move
//! insertion offset can translate with [`insertion_offset`].

use std::collections::VecDeque;

use indexmap::IndexMap;
use loom_core::{ItemId, ReorderError};

/// Ordered storage that supports moving one element.
pub trait Reorderable {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move the element at `from` so that it ends up at index `to`.
    ///
    /// Elements in between shift by exactly one slot toward `from`. Both
    /// indices must be in range.
    fn move_item(&mut self, from: usize, to: usize);
}

impl<T> Reorderable for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn move_item(&mut self, from: usize, to: usize) {
        if from < to {
            self[from..=to].rotate_left(1);
        } else if to < from {
            self[to..=from].rotate_right(1);
        }
    }
}

impl<T> Reorderable for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn move_item(&mut self, from: usize, to: usize) {
        self.as_mut_slice().move_item(from, to);
    }
}

impl<T> Reorderable for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn move_item(&mut self, from: usize, to: usize) {
        self.make_contiguous().move_item(from, to);
    }
}

/// Insertion offset, relative to the array before the move, that puts the
/// element from `from` at final index `to`.
///
/// Removal shifts everything after `from` up by one, so moving downward has
/// to target the slot just past the destination.
pub fn insertion_offset(from: usize, to: usize) -> usize {
    if to > from {
        to + 1
    } else {
        to
    }
}

/// Inverse of [`insertion_offset`]: final index for a pre-move insertion offset.
pub fn final_index(from: usize, offset: usize) -> usize {
    if offset > from {
        offset - 1
    } else {
        offset
    }
}

/// Ordered items keyed by a stable [`ItemId`].
///
/// Moves permute positions; the stored values are never recreated.
#[derive(Debug, Clone)]
pub struct Sequence<T> {
    items: IndexMap<ItemId, T>,
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self { items: IndexMap::new() }
    }
}

impl<T> Sequence<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { items: IndexMap::with_capacity(capacity) }
    }

    /// Build from `(id, item)` pairs, rejecting repeated ids.
    pub fn from_items<I>(items: I) -> Result<Self, ReorderError>
    where
        I: IntoIterator<Item = (ItemId, T)>,
    {
        let mut sequence = Self::new();
        for (id, item) in items {
            sequence.push(id, item)?;
        }
        Ok(sequence)
    }

    /// Append an item at the end.
    pub fn push(&mut self, id: ItemId, item: T) -> Result<(), ReorderError> {
        if self.items.contains_key(&id) {
            return Err(ReorderError::DuplicateItem(id));
        }
        self.items.insert(id, item);
        Ok(())
    }

    /// Remove an item, keeping the order of the rest.
    pub fn remove(&mut self, id: ItemId) -> Option<T> {
        self.items.shift_remove(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&T> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut T> {
        self.items.get_mut(&id)
    }

    /// Item at a position.
    pub fn get_index(&self, index: usize) -> Option<(ItemId, &T)> {
        self.items.get_index(index).map(|(id, item)| (*id, item))
    }

    /// Current position of an item.
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.get_index_of(&id)
    }

    /// Ids in order.
    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &T)> + '_ {
        self.items.iter().map(|(id, item)| (*id, item))
    }
}

impl<T> Reorderable for Sequence<T> {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn move_item(&mut self, from: usize, to: usize) {
        self.items.move_index(from, to);
    }
}
