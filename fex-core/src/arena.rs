//! Ordered arena
//!
//! Slot storage with a free list and a doubly linked insertion order threaded
//! through the occupied slots. Append and removal by key are O(1), iteration
//! follows insertion order, and a removed slot's generation is bumped so old
//! keys never resolve again.

use std::collections::TryReserveError;
use std::sync::atomic::{AtomicU32, Ordering};

use tracing::trace;

use crate::error::fatal;
use crate::reserve;
use crate::targets;

static NEXT_ARENA_ID: AtomicU32 = AtomicU32::new(1);

/// Key into an [`OrderedArena`].
///
/// Carries the id of the arena that issued it, so a key presented to a
/// different arena never resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Key {
    arena: u32,
    index: usize,
    generation: u32,
}

#[derive(Clone, Debug)]
enum Slot<T> {
    Occupied {
        generation: u32,
        value: T,
        prev: Option<usize>,
        next: Option<usize>,
    },
    Vacant {
        generation: u32,
        next_free: Option<usize>,
    },
}

#[derive(Clone, Debug)]
pub struct OrderedArena<T> {
    id: u32,
    slots: Vec<Slot<T>>,
    head: Option<usize>,
    tail: Option<usize>,
    free: Option<usize>,
    len: usize,
}

impl<T> OrderedArena<T> {
    pub fn new() -> Self {
        Self {
            id: NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
            head: None,
            tail: None,
            free: None,
            len: 0,
        }
    }

    /// Create an arena with room for `capacity` values before it reallocates.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut arena = Self::new();
        reserve::reserve_exact(&mut arena.slots, capacity)?;
        Ok(arena)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append at the tail. `make` receives the key the value will live under.
    ///
    /// Storage is reserved before anything is linked, so on error the arena is
    /// exactly as it was.
    pub fn try_push_back_with<F>(&mut self, make: F) -> Result<Key, TryReserveError>
    where
        F: FnOnce(Key) -> T,
    {
        let (index, generation) = match self.free {
            Some(index) => match self.slots[index] {
                Slot::Vacant { generation, .. } => (index, generation),
                Slot::Occupied { .. } => fatal(format_args!("free list points at occupied slot {}", index)),
            },
            None => {
                reserve::reserve(&mut self.slots, 1)?;
                (self.slots.len(), 0)
            }
        };

        let key = Key {
            arena: self.id,
            index,
            generation,
        };
        let slot = Slot::Occupied {
            generation,
            value: make(key),
            prev: self.tail,
            next: None,
        };

        if index == self.slots.len() {
            self.slots.push(slot);
        } else {
            let old = std::mem::replace(&mut self.slots[index], slot);
            if let Slot::Vacant { next_free, .. } = old {
                self.free = next_free;
            }
        }

        match self.tail {
            Some(tail) => *self.next_mut(tail) = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;

        trace!(target: targets::ARENA, arena = self.id, index, generation, len = self.len, "push_back");
        Ok(key)
    }

    /// Unlink and return the value under `key`, or `None` if the key is stale
    /// or belongs to another arena.
    pub fn remove(&mut self, key: Key) -> Option<T> {
        if !self.contains(key) {
            return None;
        }

        let vacant = Slot::Vacant {
            generation: key.generation.wrapping_add(1),
            next_free: self.free,
        };
        let (value, prev, next) = match std::mem::replace(&mut self.slots[key.index], vacant) {
            Slot::Occupied {
                value, prev, next, ..
            } => (value, prev, next),
            Slot::Vacant { .. } => unreachable!("checked by contains"),
        };

        match prev {
            Some(prev) => *self.next_mut(prev) = next,
            None => self.head = next,
        }
        match next {
            Some(next) => *self.prev_mut(next) = prev,
            None => self.tail = prev,
        }
        self.free = Some(key.index);
        self.len -= 1;

        trace!(target: targets::ARENA, arena = self.id, index = key.index, len = self.len, "remove");
        Some(value)
    }

    /// Remove the most recently appended value.
    pub fn pop_back(&mut self) -> Option<T> {
        let key = self.last_key()?;
        self.remove(key)
    }

    pub fn contains(&self, key: Key) -> bool {
        key.arena == self.id
            && matches!(
                self.slots.get(key.index),
                Some(Slot::Occupied { generation, .. }) if *generation == key.generation
            )
    }

    pub fn get(&self, key: Key) -> Option<&T> {
        if key.arena != self.id {
            return None;
        }
        match self.slots.get(key.index)? {
            Slot::Occupied {
                generation, value, ..
            } if *generation == key.generation => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: Key) -> Option<&mut T> {
        if key.arena != self.id {
            return None;
        }
        match self.slots.get_mut(key.index)? {
            Slot::Occupied {
                generation, value, ..
            } if *generation == key.generation => Some(value),
            _ => None,
        }
    }

    pub fn last_key(&self) -> Option<Key> {
        self.tail.map(|index| self.key_at(index))
    }

    /// Copy the arena, building each value with `clone`.
    ///
    /// The copy keeps this arena's id, slot layout and generations, so every
    /// key that resolves here resolves to the copied value there.
    pub fn clone_with<F>(&self, mut clone: F) -> Self
    where
        F: FnMut(&T) -> T,
    {
        let slots = self
            .slots
            .iter()
            .map(|slot| match slot {
                Slot::Occupied {
                    generation,
                    value,
                    prev,
                    next,
                } => Slot::Occupied {
                    generation: *generation,
                    value: clone(value),
                    prev: *prev,
                    next: *next,
                },
                Slot::Vacant {
                    generation,
                    next_free,
                } => Slot::Vacant {
                    generation: *generation,
                    next_free: *next_free,
                },
            })
            .collect();

        Self {
            id: self.id,
            slots,
            head: self.head,
            tail: self.tail,
            free: self.free,
            len: self.len,
        }
    }

    /// Iterate `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            arena: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn key_at(&self, index: usize) -> Key {
        match self.slots[index] {
            Slot::Occupied { generation, .. } => Key {
                arena: self.id,
                index,
                generation,
            },
            Slot::Vacant { .. } => fatal(format_args!("linked slot {} is vacant", index)),
        }
    }

    fn next_mut(&mut self, index: usize) -> &mut Option<usize> {
        match &mut self.slots[index] {
            Slot::Occupied { next, .. } => next,
            Slot::Vacant { .. } => fatal(format_args!("linked slot {} is vacant", index)),
        }
    }

    fn prev_mut(&mut self, index: usize) -> &mut Option<usize> {
        match &mut self.slots[index] {
            Slot::Occupied { prev, .. } => prev,
            Slot::Vacant { .. } => fatal(format_args!("linked slot {} is vacant", index)),
        }
    }
}

impl<T> Default for OrderedArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Insertion-order iterator over an [`OrderedArena`]
pub struct Iter<'a, T> {
    arena: &'a OrderedArena<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Key, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        match &self.arena.slots[index] {
            Slot::Occupied {
                generation,
                value,
                next,
                ..
            } => {
                self.cursor = *next;
                self.remaining -= 1;
                let key = Key {
                    arena: self.arena.id,
                    index,
                    generation: *generation,
                };
                Some((key, value))
            }
            Slot::Vacant { .. } => fatal(format_args!("linked slot {} is vacant", index)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
