use crate::errors::FilterError;
use crate::id::StandardId;

/// FilterEntry
///
/// A filter slot currently assigned to an identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FilterEntry {
    pub slot: usize,
    pub id: StandardId,
    pub enabled: bool,
}

/// FilterSlotPool
///
/// Fixed set of interchangeable acceptance filter slots for one bus.
///
/// Slots live in a boxed slice that is never resized; `slots[i]` is `Some(id)`
/// while slot `i` is assigned. Free slot indices are kept on a LIFO stack, so
/// every index is either on the stack or assigned, never both. An identifier
/// occupies at most one slot.
#[derive(Debug, Clone)]
pub struct FilterSlotPool {
    slots: Box<[Option<StandardId>]>,
    free: Vec<usize>,
}

impl FilterSlotPool {
    /// Create a pool with `capacity` free slots.
    pub fn new(capacity: usize) -> FilterSlotPool {
        // reversed so that a fresh pool hands out slot 0 first
        let free = (0..capacity).rev().collect();

        FilterSlotPool {
            slots: vec![None; capacity].into_boxed_slice(),
            free,
        }
    }

    /// Assign `id` to a slot and return its index.
    ///
    /// If `id` already holds a slot, that slot is returned and nothing
    /// changes. Fails with `ExhaustedPool` when no slot is free, again
    /// without changing anything.
    pub fn try_allocate(&mut self, id: StandardId) -> Result<usize, FilterError> {
        if let Some(slot) = self.slot_of(id) {
            return Ok(slot);
        }

        let slot = self.free.pop().ok_or(FilterError::ExhaustedPool(id))?;
        self.slots[slot] = Some(id);
        Ok(slot)
    }

    /// Return the slot holding `id` to the free list.
    ///
    /// Returns `false` if `id` was not assigned.
    pub fn release(&mut self, id: StandardId) -> bool {
        match self.slot_of(id) {
            Some(slot) => {
                self.slots[slot] = None;
                self.free.push(slot);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn slot_of(&self, id: StandardId) -> Option<usize> {
        self.slots.iter().position(|s| *s == Some(id))
    }

    #[inline]
    pub fn contains(&self, id: StandardId) -> bool {
        self.slot_of(id).is_some()
    }

    /// Number of assigned slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.free.len() == self.slots.len()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    #[inline]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Assigned entries in ascending slot order.
    pub fn snapshot(&self) -> impl Iterator<Item = FilterEntry> + '_ {
        self.slots.iter().enumerate().filter_map(|(slot, id)| {
            id.map(|id| FilterEntry {
                slot,
                id,
                enabled: true,
            })
        })
    }
}
