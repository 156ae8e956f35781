//! One list mode: the main order plus per-letter buckets for incremental search.

use crate::dialogs::letters::{name_letters, Letter, RowsByLetter};
use crate::dialogs::list::{List, PositionChange};
use crate::dialogs::mode::ListMode;
use crate::model::EntryId;
use std::collections::BTreeMap;

/// Main order of one [`ListMode`] and one sub-list per first letter.
///
/// Every bucket holds the same rows as the main list restricted to entries
/// with a word starting with that letter, in the same descending-key order.
#[derive(Debug, Clone)]
pub struct IndexedList {
    mode: ListMode,
    main: List,
    letters: BTreeMap<Letter, List>,
}

impl IndexedList {
    /// Empty list for `mode`.
    pub fn new(mode: ListMode) -> Self {
        Self {
            mode,
            main: List::new(),
            letters: BTreeMap::new(),
        }
    }

    /// Mode this list maintains.
    pub fn mode(&self) -> ListMode {
        self.mode
    }

    /// Unfiltered order.
    pub fn main(&self) -> &List {
        &self.main
    }

    /// Bucket for `letter`, if any entry is registered under it.
    pub fn bucket(&self, letter: Letter) -> Option<&List> {
        if letter.is_main() {
            return Some(&self.main);
        }
        self.letters.get(&letter)
    }

    /// Letters that currently have a non-empty bucket.
    pub fn letters(&self) -> impl Iterator<Item = Letter> + '_ {
        self.letters.keys().copied()
    }

    /// Number of rows in the main order.
    pub fn len(&self) -> usize {
        self.main.len()
    }

    /// Whether the main order is empty.
    pub fn is_empty(&self) -> bool {
        self.main.is_empty()
    }

    /// Whether `entry` has a main row.
    pub fn contains(&self, entry: EntryId) -> bool {
        self.main.contains(entry)
    }

    /// Append `entry` to the main order and to every bucket of `name`.
    ///
    /// The rows are not ordered yet; follow with [`adjust_by_date`](Self::adjust_by_date).
    pub fn add_to_end(&mut self, entry: EntryId, key: u64, name: &str) -> RowsByLetter {
        let mut links = RowsByLetter::new();
        self.main.add_to_end(entry, key);
        links.insert(Letter::MAIN);
        for letter in name_letters(name) {
            self.letters.entry(letter).or_default().add_to_end(entry, key);
            links.insert(letter);
        }
        links
    }

    /// Remove `entry` from the main order and every bucket in `links`.
    ///
    /// Buckets left empty are dropped. Costs O(n - pos) per list touched:
    /// positions stay dense, so every row below the removed one shifts up.
    pub fn del(&mut self, entry: EntryId, links: &RowsByLetter) {
        self.main.del(entry);
        for letter in links.iter().filter(|letter| !letter.is_main()) {
            self.del_from_bucket(entry, *letter);
        }
    }

    /// Reposition the main row only.
    pub fn adjust_by_pos(&mut self, entry: EntryId, key: u64) -> Option<PositionChange> {
        self.main.adjust_by_pos(entry, key)
    }

    /// Reposition the main row and every bucket row in `links`.
    ///
    /// Returns the main-order change, `None` if the entry has no main row.
    pub fn adjust_by_date(
        &mut self,
        entry: EntryId,
        key: u64,
        links: &RowsByLetter,
    ) -> Option<PositionChange> {
        let change = self.main.adjust_by_pos(entry, key)?;
        for letter in links.iter().filter(|letter| !letter.is_main()) {
            if let Some(bucket) = self.letters.get_mut(letter) {
                bucket.adjust_by_pos(entry, key);
            }
        }
        Some(change)
    }

    /// Move `entry` between buckets after a rename.
    ///
    /// Returns the new links. The main row is untouched.
    pub fn peer_name_changed(
        &mut self,
        entry: EntryId,
        key: u64,
        old_links: &RowsByLetter,
        new_name: &str,
    ) -> RowsByLetter {
        let mut links = RowsByLetter::from([Letter::MAIN]);
        links.extend(name_letters(new_name));

        for letter in old_links.difference(&links) {
            self.del_from_bucket(entry, *letter);
        }
        for letter in links.difference(old_links) {
            if letter.is_main() {
                continue;
            }
            let bucket = self.letters.entry(*letter).or_default();
            bucket.add_to_end(entry, key);
            bucket.adjust_by_pos(entry, key);
        }
        links
    }

    fn del_from_bucket(&mut self, entry: EntryId, letter: Letter) {
        if let Some(bucket) = self.letters.get_mut(&letter) {
            bucket.del(entry);
            if bucket.is_empty() {
                self.letters.remove(&letter);
            }
        }
    }
}
