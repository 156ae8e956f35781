//! Encoding of ranking state into a single descending sort key.
//!
//! Key layout, highest first:
//!
//! ```text
//! promoted (fixed on top):   0xFFFFFFFFFFFF000F - slot
//! pinned:                    0xFFFFFFFF000000FF - pinned_index
//! soft pinned:               0xE000000000000000 ..
//! unmuted, unread:           0xD000000000000000 ..
//! unmuted, read, young:      0xC000000000000000 ..
//! muted:                     0xB000000000000000 ..
//! unmuted, read, old:        0xA000000000000000 ..
//! bottom:                    0x0000000000000000 ..
//! ```
//!
//! Category keys are `tier << 60 | date << 28 | disambiguator`, where the
//! disambiguator is a 28-bit draw from a counter owned by the encoder. Once
//! the counter is exhausted the owner of the live keys must
//! [`renumber`](SortKeyEncoder::renumber) them before drawing again.

use crate::model::{Category, TimeId};

const FIXED_ON_TOP_BASE: u64 = 0xFFFF_FFFF_FFFF_000F;
const PINNED_BASE: u64 = 0xFFFF_FFFF_0000_00FF;
const TIER_SHIFT: u32 = 60;
const DATE_SHIFT: u32 = 28;
const DISAMBIGUATOR_MASK: u64 = (1 << DATE_SHIFT) - 1;

/// First fixed-on-top slot handed to promoted dialogs.
pub const PROMOTED_SLOT: u32 = 1;

/// Last fixed-on-top slot. Slots above it would collide with pinned keys.
pub const MAX_FIXED_ON_TOP_SLOT: u32 = 0xF;

/// Whether `key` was produced by [`category_key`] for a known date.
pub fn is_category_key(key: u64) -> bool {
    key != 0 && key >> TIER_SHIFT != 0xF
}

/// Inputs of a sort key. Equal placements must yield equal keys when cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Forced to the very top at a fixed slot.
    FixedOnTop(u32),
    /// Manually pinned at a slot index.
    Pinned(u32),
    /// Ranked by category and last message time.
    Ranked {
        /// Priority tier.
        category: Category,
        /// Last message time.
        date: TimeId,
    },
}

/// Key for a fixed-on-top slot.
pub fn fixed_on_top_key(slot: u32) -> u64 {
    FIXED_ON_TOP_BASE - u64::from(slot.min(MAX_FIXED_ON_TOP_SLOT))
}

/// Key for a pinned slot. Lower indices rank higher.
pub fn pinned_key(pinned_index: u32) -> u64 {
    PINNED_BASE - u64::from(pinned_index)
}

/// Key for a category-ranked entry. Zero when the date is unknown.
pub fn category_key(category: Category, date: TimeId, disambiguator: u64) -> u64 {
    if date.is_unknown() {
        return 0;
    }
    (category.tier() << TIER_SHIFT)
        + (u64::from(date.get()) << DATE_SHIFT)
        | (disambiguator & DISAMBIGUATOR_MASK)
}

/// Turns a [`Placement`] into a key, drawing tie-breakers from its own counter.
///
/// One encoder is shared by every entry of a chat list so that two entries
/// with the same category and date never share a key.
#[derive(Debug, Clone, Default)]
pub struct SortKeyEncoder {
    counter: u64,
}

impl SortKeyEncoder {
    /// Encoder with a fresh counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoder whose next draw follows `counter`.
    pub fn with_counter(counter: u64) -> Self {
        Self {
            counter: counter.min(DISAMBIGUATOR_MASK),
        }
    }

    /// Whether the next draw would wrap past the 28-bit range.
    pub fn is_exhausted(&self) -> bool {
        self.counter >= DISAMBIGUATOR_MASK
    }

    /// Encode a placement. Category placements consume one disambiguator.
    pub fn encode(&mut self, placement: Placement) -> u64 {
        match placement {
            Placement::FixedOnTop(slot) => fixed_on_top_key(slot),
            Placement::Pinned(index) => pinned_key(index),
            Placement::Ranked { category, date } => {
                if date.is_unknown() {
                    return 0;
                }
                let disambiguator = self.next_disambiguator();
                category_key(category, date, disambiguator)
            }
        }
    }

    /// Draw the next tie-breaker.
    ///
    /// Draws increase until [`is_exhausted`](Self::is_exhausted); the draw
    /// after that restarts at 1.
    pub fn next_disambiguator(&mut self) -> u64 {
        if self.is_exhausted() {
            self.counter = 0;
        }
        self.counter += 1;
        self.counter
    }

    /// Restart the counter and re-draw the tie-breakers of live category keys.
    ///
    /// `keys` must be sorted ascending. Tier and date bits are kept, so the
    /// relative order of the keys is preserved and every later draw ranks
    /// above all of them on equal dates. Zero keys are left alone.
    pub fn renumber(&mut self, keys: &mut [u64]) {
        self.counter = 0;
        for key in keys.iter_mut().filter(|key| **key != 0) {
            *key = (*key & !DISAMBIGUATOR_MASK) | self.next_disambiguator();
        }
    }
}
