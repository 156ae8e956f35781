//! Store of every chat list entry and the ordered lists they appear in.
//!
//! Entries live in a slab arena; rows refer to them by [`EntryId`], so there
//! are no ownership cycles between entries and the lists showing them.
//!
//! Every mutation runs in two phases: the sort key is computed from the entry
//! state (classification + encoding, no list access), then the result is
//! applied to the lists of every mode. Events are queued on a channel and
//! handled by the UI only after the mutation returned.

use crate::dialogs::entry::Entry;
use crate::dialogs::events::{emit, ChatListEvent};
use crate::dialogs::indexed_list::IndexedList;
use crate::dialogs::letters::{name_words, Letter};
use crate::dialogs::list::{List, PositionChange, Row};
use crate::dialogs::mode::ListMode;
use crate::model::{DialogKey, EntryId, FolderId, LiveState, TimeId};
use crate::ranking::sort_key::is_category_key;
use crate::ranking::{
    Clock, Placement, PriorityClassifier, SoftPinRegistry, SortKeyEncoder, MAX_FIXED_ON_TOP_SLOT,
    PROMOTED_SLOT,
};
use slab::Slab;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// The lists of one container (root or a folder), one per mode.
#[derive(Debug, Clone)]
struct ModeLists {
    all: IndexedList,
    important: IndexedList,
}

impl ModeLists {
    fn new() -> Self {
        Self {
            all: IndexedList::new(ListMode::All),
            important: IndexedList::new(ListMode::Important),
        }
    }

    fn get(&self, mode: ListMode) -> &IndexedList {
        match mode {
            ListMode::All => &self.all,
            ListMode::Important => &self.important,
        }
    }

    fn get_mut(&mut self, mode: ListMode) -> &mut IndexedList {
        match mode {
            ListMode::All => &mut self.all,
            ListMode::Important => &mut self.important,
        }
    }
}

fn slot(entries: &Slab<Entry>, id: EntryId) -> &Entry {
    match entries.get(id.get()) {
        Some(entry) => entry,
        None => panic!("unknown chat list entry {:?}", id),
    }
}

fn slot_mut(entries: &mut Slab<Entry>, id: EntryId) -> &mut Entry {
    match entries.get_mut(id.get()) {
        Some(entry) => entry,
        None => panic!("unknown chat list entry {:?}", id),
    }
}

/// All chat list entries, their ranking services, and their ordered lists.
///
/// Entry ids are only valid until [`forget`](Self::forget); passing an id
/// that was never issued or was forgotten is a contract violation and panics.
pub struct ChatLists {
    entries: Slab<Entry>,
    by_key: HashMap<DialogKey, EntryId>,
    lists: BTreeMap<Option<FolderId>, ModeLists>,
    classifier: PriorityClassifier,
    encoder: SortKeyEncoder,
    clock: Box<dyn Clock>,
    events: Sender<ChatListEvent>,
}

impl fmt::Debug for ChatLists {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatLists")
            .field("entries", &self.entries.len())
            .field("containers", &self.lists.len())
            .field("classifier", &self.classifier)
            .finish_non_exhaustive()
    }
}

impl ChatLists {
    /// Empty store with its injected services.
    pub fn new(
        classifier: PriorityClassifier,
        clock: Box<dyn Clock>,
        events: Sender<ChatListEvent>,
    ) -> Self {
        Self {
            entries: Slab::new(),
            by_key: HashMap::new(),
            lists: BTreeMap::new(),
            classifier,
            encoder: SortKeyEncoder::new(),
            clock,
            events,
        }
    }

    /// Replace the tie-break counter.
    pub fn with_encoder(mut self, encoder: SortKeyEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    // ===== Queries =====

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry by id.
    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.entries.get(id.get())
    }

    /// Id of the entry for `key`.
    pub fn find(&self, key: DialogKey) -> Option<EntryId> {
        self.by_key.get(&key).copied()
    }

    /// Classifier in use.
    pub fn classifier(&self) -> &PriorityClassifier {
        &self.classifier
    }

    /// List of `mode` inside `folder` (`None` = root), once anything was listed there.
    pub fn list(&self, folder: Option<FolderId>, mode: ListMode) -> Option<&IndexedList> {
        self.lists.get(&folder).map(|lists| lists.get(mode))
    }

    /// Entries of a list from top to bottom.
    pub fn ordered(&self, folder: Option<FolderId>, mode: ListMode) -> Vec<EntryId> {
        self.list(folder, mode)
            .map(|list| list.main().entries().collect())
            .unwrap_or_default()
    }

    /// Whether the entry has a row in `mode`.
    pub fn is_in_list(&self, id: EntryId, mode: ListMode) -> bool {
        self.entry(id).is_some_and(|entry| entry.in_chat_list(mode))
    }

    /// Position of the entry's main row in `mode`.
    ///
    /// # Panics
    ///
    /// Panics if the entry is not in that list. Check [`is_in_list`](Self::is_in_list) first.
    pub fn position(&self, id: EntryId, mode: ListMode) -> usize {
        let entry = slot(&self.entries, id);
        assert!(
            entry.in_chat_list(mode),
            "entry {} is not in the {} chat list",
            entry.key,
            mode
        );
        match self
            .list(entry.folder, mode)
            .and_then(|list| list.main().position(id))
        {
            Some(pos) => pos,
            None => panic!("entry {} linked but missing from the {} list", entry.key, mode),
        }
    }

    /// Pinned entries of a container in pin order.
    pub fn pinned_order(&self, folder: Option<FolderId>) -> Vec<EntryId> {
        self.pin_slots(folder).into_iter().map(|(_, id)| id).collect()
    }

    fn pin_slots(&self, folder: Option<FolderId>) -> Vec<(u32, EntryId)> {
        let mut pinned: Vec<(u32, EntryId)> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.folder == folder)
            .filter_map(|(idx, entry)| entry.pinned_index.map(|index| (index, EntryId::new(idx))))
            .collect();
        pinned.sort_unstable();
        pinned
    }

    /// Incremental search: entries whose name has a word starting with every
    /// query word, in list order.
    ///
    /// Scans only the smallest letter bucket among the query words. An empty
    /// query returns the whole list.
    pub fn filtered(&self, folder: Option<FolderId>, mode: ListMode, query: &str) -> Vec<EntryId> {
        let Some(list) = self.list(folder, mode) else {
            return Vec::new();
        };
        let words = name_words(query);
        if words.is_empty() {
            return list.main().entries().collect();
        }

        let mut smallest: Option<&List> = None;
        for letter in words
            .iter()
            .filter_map(|word| word.chars().next().and_then(Letter::new))
        {
            let Some(bucket) = list.bucket(letter) else {
                return Vec::new();
            };
            if smallest.map_or(true, |current| bucket.len() < current.len()) {
                smallest = Some(bucket);
            }
        }
        let Some(bucket) = smallest else {
            return Vec::new();
        };

        bucket
            .entries()
            .filter(|id| {
                let names = name_words(&slot(&self.entries, *id).name);
                words
                    .iter()
                    .all(|word| names.iter().any(|name| name.starts_with(word.as_str())))
            })
            .collect()
    }

    // ===== Lifecycle =====

    /// Create the entry for a dialog, or return the existing one.
    ///
    /// A new entry is in no list until it gets a last message time. Folder
    /// entries always live in the root list.
    pub fn register(
        &mut self,
        key: DialogKey,
        name: impl Into<String>,
        folder: Option<FolderId>,
    ) -> EntryId {
        if let Some(id) = self.find(key) {
            return id;
        }
        let folder = match key {
            DialogKey::Folder(_) => None,
            DialogKey::Peer(_) => folder,
        };
        let id = EntryId::new(self.entries.insert(Entry::new(key, name.into(), folder)));
        self.by_key.insert(key, id);
        debug!(%key, slot = id.get(), "chat list entry registered");
        id
    }

    /// Drop an entry: remove all its rows and free its slot.
    pub fn forget(&mut self, id: EntryId) -> Option<Entry> {
        if !self.entries.contains(id.get()) {
            return None;
        }
        for mode in ListMode::ALL {
            self.remove_row(id, mode);
        }
        let mut entry = self.entries.remove(id.get());
        entry.sort_key = 0;
        self.by_key.remove(&entry.key);
        debug!(key = %entry.key, "chat list entry forgotten");
        Some(entry)
    }

    // ===== Entry mutations =====

    /// Recompute the category from the current state. Returns whether it changed.
    pub fn update_priority(&mut self, id: EntryId) -> bool {
        let now = self.clock.now();
        let entry = slot_mut(&mut self.entries, id);
        let category =
            self.classifier
                .classify(entry.key.peer(), &entry.state, entry.last_message_time, now);
        let changed = entry.category != category;
        if changed {
            trace!(key = %entry.key, from = %entry.category, to = %category, "category changed");
        }
        entry.category = category;
        changed
    }

    /// Current sort key after recomputing category and key and syncing list
    /// membership. Zero when the entry is in no list.
    pub fn sort_key(&mut self, id: EntryId) -> u64 {
        self.refresh(id)
    }

    /// Apply new live state from the conversation source.
    ///
    /// Returns whether the unread view or the category changed.
    pub fn update_state(&mut self, id: EntryId, state: LiveState) -> bool {
        let entry = slot_mut(&mut self.entries, id);
        let key = entry.key;
        let was = entry.state.unread_view();
        entry.state = state;

        let category_changed = self.update_priority(id);
        self.refresh(id);

        let now = state.unread_view();
        let unread_changed = was != now;
        if unread_changed {
            emit(
                &self.events,
                ChatListEvent::UnreadStateChanged { key, was, now },
            );
        }
        unread_changed || category_changed
    }

    /// Pin at `index`, or unpin with `None`.
    ///
    /// Pin slots are unique per container: if `index` is held by another
    /// entry, that entry and any holders of the following consecutive slots
    /// move down by one.
    pub fn set_pinned_index(&mut self, id: EntryId, index: Option<u32>) {
        let entry = slot(&self.entries, id);
        if entry.pinned_index == index {
            return;
        }
        let key = entry.key;
        let folder = entry.folder;
        let was_pinned = entry.is_pinned();

        let shifted = match index {
            Some(index) => match self.shift_pins(folder, index, id) {
                Some(shifted) => shifted,
                None => {
                    warn!(%key, index, "no pin slot left below the requested one");
                    return;
                }
            },
            None => Vec::new(),
        };
        slot_mut(&mut self.entries, id).pinned_index = index;

        for holder in shifted {
            self.refresh(holder);
        }
        self.refresh(id);
        if was_pinned != index.is_some() {
            emit(
                &self.events,
                ChatListEvent::PinnedChanged {
                    key,
                    pinned: index.is_some(),
                },
            );
        }
    }

    /// Force to the top, or release. Releasing may drop the entry from the lists.
    ///
    /// Each promoted entry of a container gets its own fixed-on-top slot.
    /// Promotion is ignored when every slot of the container is taken.
    pub fn set_promoted(&mut self, id: EntryId, promoted: bool) {
        let entry = slot(&self.entries, id);
        if entry.is_promoted() == promoted {
            return;
        }
        let fixed = if promoted {
            let Some(fixed) = self.free_fixed_on_top_slot(entry.folder, id, None) else {
                warn!(key = %entry.key, "every fixed-on-top slot is taken, promotion ignored");
                return;
            };
            Some(fixed)
        } else {
            None
        };
        slot_mut(&mut self.entries, id).fixed_on_top = fixed;
        self.refresh(id);
    }

    /// Record the time of the newest message.
    ///
    /// While the entry is in no list, a time that is not strictly newer than
    /// the current one is dropped so stale data cannot resurrect it. Returns
    /// whether the time was applied.
    pub fn touch_last_message_time(&mut self, id: EntryId, time: TimeId) -> bool {
        let entry = slot_mut(&mut self.entries, id);
        if !entry.in_any_chat_list() && time <= entry.last_message_time {
            trace!(key = %entry.key, time = time.get(), "stale touch dropped");
            return false;
        }
        entry.last_message_time = time;
        entry.encoded = None;
        let folder = entry.folder;

        self.refresh(id);
        if let Some(folder) = folder {
            self.raise_folder_time(folder, time);
        }
        true
    }

    /// Change the display name and re-register letter buckets.
    pub fn set_name(&mut self, id: EntryId, name: impl Into<String>) {
        let name = name.into();
        let entry = slot_mut(&mut self.entries, id);
        if entry.name == name {
            return;
        }
        entry.name = name;

        for mode in ListMode::ALL {
            let Some(old) = entry.links.get(&mode).cloned() else {
                continue;
            };
            let Some(lists) = self.lists.get_mut(&entry.folder) else {
                continue;
            };
            let list = lists.get_mut(mode);
            let key = list.main().row(id).map_or(0, Row::sort_key);
            let links = list.peer_name_changed(id, key, &old, &entry.name);
            let position = list.main().position(id).unwrap_or_default();
            entry.links.insert(mode, links);
            emit(
                &self.events,
                ChatListEvent::Repaint {
                    key: entry.key,
                    folder: entry.folder,
                    mode,
                    position,
                },
            );
        }
    }

    /// Move a conversation into a folder (`None` = root).
    ///
    /// Folder entries cannot be nested and are left alone.
    pub fn move_to_folder(&mut self, id: EntryId, folder: Option<FolderId>) {
        let entry = slot(&self.entries, id);
        if entry.key.folder().is_some() || entry.folder == folder {
            return;
        }
        for mode in ListMode::ALL {
            self.remove_row(id, mode);
        }
        let entry = slot_mut(&mut self.entries, id);
        entry.folder = folder;
        entry.sort_key = 0;
        let key = entry.key;
        let time = entry.last_message_time;
        let pinned = entry.pinned_index;
        let fixed = entry.fixed_on_top;

        // Slots held in the old container may be taken in the new one.
        let mut shifted = Vec::new();
        if let Some(index) = pinned {
            match self.shift_pins(folder, index, id) {
                Some(holders) => shifted = holders,
                None => {
                    warn!(%key, index, "pin slot unavailable in new folder, unpinned");
                    slot_mut(&mut self.entries, id).pinned_index = None;
                    emit(&self.events, ChatListEvent::PinnedChanged { key, pinned: false });
                }
            }
        }
        if fixed.is_some() {
            let fixed = self.free_fixed_on_top_slot(folder, id, fixed);
            if fixed.is_none() {
                warn!(%key, "no fixed-on-top slot in new folder, promotion dropped");
            }
            slot_mut(&mut self.entries, id).fixed_on_top = fixed;
        }

        for holder in shifted {
            self.refresh(holder);
        }
        self.refresh(id);
        if let Some(folder) = folder {
            self.raise_folder_time(folder, time);
        }
    }

    /// Assign pin slots `1..=n` in the given order and unpin every other
    /// pinned entry of the container.
    pub fn reorder_pinned(&mut self, folder: Option<FolderId>, order: &[EntryId]) {
        let keep: HashSet<EntryId> = order.iter().copied().collect();
        let stale: Vec<EntryId> = self
            .pinned_order(folder)
            .into_iter()
            .filter(|id| !keep.contains(id))
            .collect();
        for id in stale {
            self.set_pinned_index(id, None);
        }
        for (index, id) in (1u32..).zip(order) {
            self.set_pinned_index(*id, Some(index));
        }
    }

    /// Swap the soft-pin registry and re-rank everything.
    pub fn replace_soft_pins(&mut self, registry: Arc<SoftPinRegistry>) {
        self.classifier.set_registry(registry);
        self.rerank_all();
    }

    /// Recompute every entry, e.g. after read chats aged past the threshold.
    pub fn rerank_all(&mut self) {
        let ids: Vec<EntryId> = self.entries.iter().map(|(idx, _)| EntryId::new(idx)).collect();
        for id in ids {
            self.refresh(id);
        }
    }

    /// Move pinned holders of `index` and of the consecutive slots after it
    /// down by one, leaving `index` free for `except`.
    ///
    /// Only the pin fields change; the returned holders still need a refresh.
    /// Returns `None`, changing nothing, if a holder would run past `u32::MAX`.
    fn shift_pins(
        &mut self,
        folder: Option<FolderId>,
        index: u32,
        except: EntryId,
    ) -> Option<Vec<EntryId>> {
        let mut shifted = Vec::new();
        let mut next = index;
        for (held, holder) in self.pin_slots(folder) {
            if holder == except || held < next {
                continue;
            }
            if held > next {
                break;
            }
            next = next.checked_add(1)?;
            shifted.push((holder, next));
        }
        for (holder, below) in &shifted {
            slot_mut(&mut self.entries, *holder).pinned_index = Some(*below);
        }
        if !shifted.is_empty() {
            debug!(?folder, index, moved = shifted.len(), "pins shifted down");
        }
        Some(shifted.into_iter().map(|(holder, _)| holder).collect())
    }

    /// First fixed-on-top slot of `folder` not held by another entry,
    /// keeping `current` when it is still free.
    fn free_fixed_on_top_slot(
        &self,
        folder: Option<FolderId>,
        id: EntryId,
        current: Option<u32>,
    ) -> Option<u32> {
        let taken: HashSet<u32> = self
            .entries
            .iter()
            .filter(|(idx, entry)| *idx != id.get() && entry.folder == folder)
            .filter_map(|(_, entry)| entry.fixed_on_top)
            .collect();
        current
            .filter(|fixed| !taken.contains(fixed))
            .or_else(|| (PROMOTED_SLOT..=MAX_FIXED_ON_TOP_SLOT).find(|fixed| !taken.contains(fixed)))
    }

    // ===== Explicit membership =====

    /// Give the entry a row in `mode`. Returns whether a row was created.
    ///
    /// An entry whose key computes to zero cannot be listed.
    pub fn add_to_list(&mut self, id: EntryId, mode: ListMode) -> bool {
        if slot(&self.entries, id).in_chat_list(mode) {
            return false;
        }
        let key = self.compute_key(id);
        if key == 0 {
            debug!(key = %slot(&self.entries, id).key, "unranked entry not listed");
            return false;
        }
        self.insert_row(id, mode, key);
        slot_mut(&mut self.entries, id).sort_key = key;
        true
    }

    /// Remove the entry's row from `mode`. Returns whether a row was removed.
    pub fn remove_from_list(&mut self, id: EntryId, mode: ListMode) -> bool {
        let removed = self.remove_row(id, mode);
        let entry = slot_mut(&mut self.entries, id);
        if !entry.in_any_chat_list() {
            entry.sort_key = 0;
        }
        removed
    }

    /// Move the entry's rows in `mode` to the slot implied by its current key.
    ///
    /// # Panics
    ///
    /// Panics if the entry is not in that list.
    pub fn adjust_position(&mut self, id: EntryId, mode: ListMode) -> PositionChange {
        let from = self.position(id, mode);
        let key = self.compute_key(id);
        if key != 0 {
            self.reposition(id, mode, key);
            slot_mut(&mut self.entries, id).sort_key = key;
        }
        PositionChange::new(from, self.position(id, mode))
    }

    // ===== Compute / apply =====

    /// Compute phase: category then key, without touching any list.
    ///
    /// The previous key is reused while the placement is unchanged, so
    /// repeated computations neither draw tie-breakers nor move rows.
    fn compute_key(&mut self, id: EntryId) -> u64 {
        self.update_priority(id);
        let placement = slot(&self.entries, id).placement();
        if let Some((cached, key)) = slot(&self.entries, id).encoded {
            if cached == placement {
                return key;
            }
        }
        if matches!(placement, Placement::Ranked { .. }) && self.encoder.is_exhausted() {
            self.renumber_tie_breakers();
        }
        let key = self.encoder.encode(placement);
        slot_mut(&mut self.entries, id).encoded = Some((placement, key));
        key
    }

    /// Re-draw the tie-breakers of every listed category key, lowest first,
    /// from a restarted counter.
    ///
    /// Relative order is preserved, so rows get their new keys in place.
    /// Cached keys of unlisted entries are dropped and drawn afresh on reuse.
    fn renumber_tie_breakers(&mut self) {
        let mut live: Vec<(u64, EntryId)> = Vec::new();
        for (idx, entry) in self.entries.iter_mut() {
            if is_category_key(entry.sort_key) {
                live.push((entry.sort_key, EntryId::new(idx)));
            } else if matches!(entry.encoded, Some((Placement::Ranked { .. }, _))) {
                entry.encoded = None;
            }
        }
        live.sort_unstable();
        let mut keys: Vec<u64> = live.iter().map(|(key, _)| *key).collect();
        self.encoder.renumber(&mut keys);

        for ((old, id), key) in live.iter().copied().zip(keys) {
            let entry = slot_mut(&mut self.entries, id);
            entry.sort_key = key;
            entry.encoded = match entry.encoded {
                Some((placement, cached)) if cached == old => Some((placement, key)),
                _ => None,
            };
            if let Some(lists) = self.lists.get_mut(&entry.folder) {
                for (mode, links) in &entry.links {
                    lists.get_mut(*mode).adjust_by_date(id, key, links);
                }
            }
        }
        debug!(entries = live.len(), "tie-breakers renumbered");
    }

    /// Apply phase: sync membership and position in every mode.
    fn refresh(&mut self, id: EntryId) -> u64 {
        let key = self.compute_key(id);
        for mode in ListMode::ALL {
            let entry = slot(&self.entries, id);
            let present = entry.in_chat_list(mode);
            let wanted = key != 0 && entry.should_be_in_chat_list(mode);
            match (present, wanted) {
                (false, true) => self.insert_row(id, mode, key),
                (true, false) => {
                    self.remove_row(id, mode);
                }
                (true, true) => {
                    self.reposition(id, mode, key);
                }
                (false, false) => {}
            }
        }

        let entry = slot_mut(&mut self.entries, id);
        entry.sort_key = if entry.in_any_chat_list() { key } else { 0 };
        entry.sort_key
    }

    fn insert_row(&mut self, id: EntryId, mode: ListMode, key: u64) {
        let entry = slot_mut(&mut self.entries, id);
        let list = self
            .lists
            .entry(entry.folder)
            .or_insert_with(ModeLists::new)
            .get_mut(mode);
        let links = list.add_to_end(id, key, &entry.name);
        let position = list
            .adjust_by_date(id, key, &links)
            .map_or(0, |change| change.to);
        entry.links.insert(mode, links);

        debug!(key = %entry.key, %mode, position, "entry added to chat list");
        emit(
            &self.events,
            ChatListEvent::Added {
                key: entry.key,
                folder: entry.folder,
                mode,
                position,
            },
        );
    }

    fn remove_row(&mut self, id: EntryId, mode: ListMode) -> bool {
        let entry = slot_mut(&mut self.entries, id);
        let Some(links) = entry.links.remove(&mode) else {
            return false;
        };
        if let Some(lists) = self.lists.get_mut(&entry.folder) {
            lists.get_mut(mode).del(id, &links);
        }

        debug!(key = %entry.key, %mode, "entry removed from chat list");
        emit(
            &self.events,
            ChatListEvent::Removed {
                key: entry.key,
                folder: entry.folder,
                mode,
            },
        );
        true
    }

    fn reposition(&mut self, id: EntryId, mode: ListMode, key: u64) -> Option<PositionChange> {
        let entry = slot(&self.entries, id);
        let list = self.lists.get_mut(&entry.folder)?.get_mut(mode);
        if list.main().row(id)?.sort_key() == key {
            return None;
        }
        let change = list.adjust_by_date(id, key, entry.links.get(&mode)?)?;

        let event = if change.moved() {
            ChatListEvent::Moved {
                key: entry.key,
                folder: entry.folder,
                mode,
                change,
            }
        } else {
            ChatListEvent::Repaint {
                key: entry.key,
                folder: entry.folder,
                mode,
                position: change.to,
            }
        };
        emit(&self.events, event);
        Some(change)
    }

    /// Keep a folder's time at least as new as its newest child.
    fn raise_folder_time(&mut self, folder: FolderId, time: TimeId) {
        let Some(id) = self.find(DialogKey::Folder(folder)) else {
            return;
        };
        if time > slot(&self.entries, id).last_message_time {
            self.touch_last_message_time(id, time);
        }
    }
}

#[cfg(test)]
#[path = "chat_lists_tests.rs"]
mod tests;
