//! Densely positioned list of rows kept in descending sort key order.
//!
//! # Complexity
//!
//! - `add_to_end`: O(1)
//! - `adjust_by_pos`: O(d), d = distance moved
//! - `del`: O(n - pos), positions after the removed row shift by one
//! - `position` / `row`: O(1)

use crate::model::EntryId;
use std::collections::HashMap;

/// Positional handle of an entry within one ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
    entry: EntryId,
    key: u64,
    pos: usize,
}

impl Row {
    /// Entry this row shows.
    pub fn entry(&self) -> EntryId {
        self.entry
    }

    /// Sort key the row was last positioned with.
    pub fn sort_key(&self) -> u64 {
        self.key
    }

    /// Current 0-based position.
    pub fn pos(&self) -> usize {
        self.pos
    }
}

/// Row position before and after a reposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionChange {
    /// Position before.
    pub from: usize,
    /// Position after.
    pub to: usize,
}

impl PositionChange {
    /// Change from `from` to `to`.
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Whether the row actually moved.
    pub fn moved(&self) -> bool {
        self.from != self.to
    }
}

/// Rows ordered by descending key. Equal keys keep their relative order.
#[derive(Debug, Clone, Default)]
pub struct List {
    rows: Vec<Row>,
    positions: HashMap<EntryId, usize>,
}

impl List {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the list has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether `entry` has a row here.
    pub fn contains(&self, entry: EntryId) -> bool {
        self.positions.contains_key(&entry)
    }

    /// Position of `entry`, if present.
    pub fn position(&self, entry: EntryId) -> Option<usize> {
        self.positions.get(&entry).copied()
    }

    /// Row of `entry`, if present.
    pub fn row(&self, entry: EntryId) -> Option<&Row> {
        self.position(entry).map(|pos| &self.rows[pos])
    }

    /// Row at `pos`.
    pub fn get(&self, pos: usize) -> Option<&Row> {
        self.rows.get(pos)
    }

    /// Rows from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Entries from top to bottom.
    pub fn entries(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.rows.iter().map(Row::entry)
    }

    /// Append a row without ordering it. Returns the existing row if present.
    pub fn add_to_end(&mut self, entry: EntryId, key: u64) -> &Row {
        if let Some(pos) = self.position(entry) {
            return &self.rows[pos];
        }
        let pos = self.rows.len();
        self.rows.push(Row { entry, key, pos });
        self.positions.insert(entry, pos);
        &self.rows[pos]
    }

    /// Give `entry` a new key and bubble its row to the matching slot.
    ///
    /// Returns `None` if the entry has no row here.
    pub fn adjust_by_pos(&mut self, entry: EntryId, key: u64) -> Option<PositionChange> {
        let from = self.position(entry)?;
        self.rows[from].key = key;

        let mut pos = from;
        while pos > 0 && self.rows[pos - 1].key < key {
            self.swap(pos - 1, pos);
            pos -= 1;
        }
        if pos == from {
            while pos + 1 < self.rows.len() && self.rows[pos + 1].key > key {
                self.swap(pos, pos + 1);
                pos += 1;
            }
        }
        Some(PositionChange::new(from, pos))
    }

    /// Remove the row of `entry`. Returns whether it was present.
    ///
    /// O(n - pos): the positions of all following rows are renumbered.
    pub fn del(&mut self, entry: EntryId) -> bool {
        let Some(pos) = self.positions.remove(&entry) else {
            return false;
        };
        self.rows.remove(pos);
        for row in &mut self.rows[pos..] {
            row.pos -= 1;
            self.positions.insert(row.entry, row.pos);
        }
        true
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.rows.swap(a, b);
        for pos in [a, b] {
            let row = &mut self.rows[pos];
            row.pos = pos;
            self.positions.insert(row.entry, pos);
        }
    }
}
