//! Generation-tracked slab allocator behind unit and line handles.
//!
//! Freed slots go onto a free list and are reused by later inserts with
//! a bumped generation, so a handle to a removed value can never resolve
//! to whatever took its slot.

use std::marker::PhantomData;
use strata_core::{GridError, Handle};

/// Handle index for the slot appended after `len` existing slots.
fn next_index(len: usize) -> Result<u32, GridError> {
    u32::try_from(len).map_err(|_| GridError::ExtentTooLarge {
        name: "slots",
        value: len,
        max: u32::MAX,
    })
}

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Slab of `T` addressed by handles of type `K`.
#[derive(Clone, Debug)]
pub(crate) struct Slab<K, T> {
    slots: Vec<Slot<T>>,
    /// Indices of vacant slots available for reuse.
    free_list: Vec<u32>,
    live: usize,
    _key: PhantomData<K>,
}

impl<K: Handle, T> Slab<K, T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            live: 0,
            _key: PhantomData,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// Store `value`, reusing a vacant slot when one is available.
    ///
    /// Fails once every `u32` handle index is taken.
    pub(crate) fn insert(&mut self, value: T) -> Result<K, GridError> {
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.value = Some(value);
            self.live += 1;
            return Ok(K::new(index, slot.generation));
        }
        let index = next_index(self.slots.len())?;
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        self.live += 1;
        Ok(K::new(index, 0))
    }

    /// Take the value out of its slot. Stale handles return `None`.
    pub(crate) fn remove(&mut self, key: K) -> Option<T> {
        let slot = self.slots.get_mut(key.index() as usize)?;
        if slot.generation != key.generation() {
            return None;
        }
        let value = slot.value.take()?;
        self.free_list.push(key.index());
        self.live -= 1;
        Some(value)
    }

    pub(crate) fn get(&self, key: K) -> Option<&T> {
        let slot = self.slots.get(key.index() as usize)?;
        if slot.generation != key.generation() {
            return None;
        }
        slot.value.as_ref()
    }

    pub(crate) fn get_mut(&mut self, key: K) -> Option<&mut T> {
        let slot = self.slots.get_mut(key.index() as usize)?;
        if slot.generation != key.generation() {
            return None;
        }
        slot.value.as_mut()
    }

    /// Number of live values.
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    /// Iterate over live `(handle, value)` pairs in slot order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (K, &T)> + '_ {
        // `insert` never grows past u32::MAX slots, so every index fits.
        (0..=u32::MAX).zip(&self.slots).filter_map(|(i, slot)| {
            slot.value
                .as_ref()
                .map(|v| (K::new(i, slot.generation), v))
        })
    }
}

impl<K: Handle, T> Default for Slab<K, T> {
    fn default() -> Self {
        Self::new()
    }
}
