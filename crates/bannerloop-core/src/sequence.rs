//! Padded item sequence backing the circular carousel
//!
//! The real items are surrounded by two duplicated items on each side:
//!
//! ```text
//! slot:    0       1       2 .. N+1        N+2     N+3
//! item:    r[N-2]  r[N-1]  r[0] .. r[N-1]  r[0]    r[1]
//! ```
//!
//! A viewport resting on a sentinel slot can be moved to the matching real
//! slot without animation, which makes the strip look endless.

use crate::{Error, Result};

/// Number of sentinel slots on each side of the real items
pub const SENTINELS_PER_SIDE: usize = 2;

/// Smallest number of real items that can form a loop
pub const MIN_REAL_ITEMS: usize = 2;

/// Real items plus the four boundary duplicates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedSequence<T> {
    slots: Vec<T>,
    real_len: usize,
}

impl<T: Clone> PaddedSequence<T> {
    /// Build the padded layout from the real items
    ///
    /// Fails with [`Error::InsufficientItems`] when fewer than two items are
    /// given.
    pub fn build(real: &[T]) -> Result<Self> {
        let n = real.len();
        if n < MIN_REAL_ITEMS {
            return Err(Error::InsufficientItems { count: n });
        }

        let mut slots = Vec::with_capacity(n + 2 * SENTINELS_PER_SIDE);
        slots.extend_from_slice(&real[n - 2..]);
        slots.extend_from_slice(real);
        slots.extend_from_slice(&real[..2]);

        Ok(Self { slots, real_len: n })
    }
}

impl<T> PaddedSequence<T> {
    /// Number of real items (N)
    #[inline]
    pub fn real_len(&self) -> usize {
        self.real_len
    }

    /// Number of padded slots (N + 4)
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[T] {
        &self.slots
    }

    pub fn get(&self, slot: usize) -> Option<&T> {
        self.slots.get(slot)
    }

    /// Slot that shows real item `real_index`
    #[inline]
    pub fn slot_of(&self, real_index: usize) -> usize {
        real_index + SENTINELS_PER_SIDE
    }

    /// Real item shown in `slot`, sentinels included
    pub fn real_index_of(&self, slot: usize) -> Result<usize> {
        let n = self.real_len;
        match slot {
            s if s >= self.slots.len() => Err(Error::SlotOutOfRange {
                slot,
                len: self.slots.len(),
            }),
            0 => Ok(n - 2),
            1 => Ok(n - 1),
            s if s < n + SENTINELS_PER_SIDE => Ok(s - SENTINELS_PER_SIDE),
            s => Ok(s - n - SENTINELS_PER_SIDE),
        }
    }

    /// Whether `slot` holds a duplicate rather than a real item
    pub fn is_sentinel(&self, slot: usize) -> bool {
        slot < SENTINELS_PER_SIDE || slot >= self.real_len + SENTINELS_PER_SIDE
    }
}
