//! One conversation or folder as seen by the chat lists.

use crate::dialogs::letters::{Letter, RowsByLetter};
use crate::dialogs::mode::ListMode;
use crate::model::{Category, DialogKey, FolderId, LiveState, TimeId};
use crate::ranking::sort_key::Placement;
use std::collections::BTreeMap;

/// Ranking state of a dialog plus its row registrations in every list mode.
///
/// Entries are owned by [`ChatLists`](crate::dialogs::ChatLists) and mutated
/// through it; this type only exposes read access.
#[derive(Debug, Clone)]
pub struct Entry {
    pub(crate) key: DialogKey,
    pub(crate) name: String,
    pub(crate) folder: Option<FolderId>,
    pub(crate) state: LiveState,
    pub(crate) last_message_time: TimeId,
    pub(crate) pinned_index: Option<u32>,
    /// Fixed-on-top slot while promoted, unique within the container.
    pub(crate) fixed_on_top: Option<u32>,
    pub(crate) category: Category,
    pub(crate) sort_key: u64,
    /// Placement and key of the last encoding, reused while the placement holds.
    pub(crate) encoded: Option<(Placement, u64)>,
    pub(crate) links: BTreeMap<ListMode, RowsByLetter>,
}

impl Entry {
    pub(crate) fn new(key: DialogKey, name: String, folder: Option<FolderId>) -> Self {
        Self {
            key,
            name,
            folder,
            state: LiveState::default(),
            last_message_time: TimeId::UNKNOWN,
            pinned_index: None,
            fixed_on_top: None,
            category: Category::Bottom,
            sort_key: 0,
            encoded: None,
            links: BTreeMap::new(),
        }
    }

    /// Identity of the underlying dialog.
    pub fn key(&self) -> DialogKey {
        self.key
    }

    /// Display name used for letter buckets and search.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Enclosing folder, `None` for the root list.
    pub fn folder(&self) -> Option<FolderId> {
        self.folder
    }

    /// Last known live state.
    pub fn state(&self) -> &LiveState {
        &self.state
    }

    /// Time of the last message, [`TimeId::UNKNOWN`] if none.
    pub fn last_message_time(&self) -> TimeId {
        self.last_message_time
    }

    /// Pin slot, if pinned.
    pub fn pinned_index(&self) -> Option<u32> {
        self.pinned_index
    }

    /// Whether the entry is pinned.
    pub fn is_pinned(&self) -> bool {
        self.pinned_index.is_some()
    }

    /// Whether the entry is forced to the top.
    pub fn is_promoted(&self) -> bool {
        self.fixed_on_top.is_some()
    }

    /// Fixed-on-top slot, if any.
    pub fn fixed_on_top_index(&self) -> Option<u32> {
        self.fixed_on_top
    }

    /// Category from the last priority update.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Key from the last recompute. Zero while the entry is in no list.
    pub fn cached_sort_key(&self) -> u64 {
        self.sort_key
    }

    /// Whether the entry has a main row in `mode`.
    pub fn in_chat_list(&self, mode: ListMode) -> bool {
        self.links
            .get(&mode)
            .is_some_and(|links| links.contains(&Letter::MAIN))
    }

    /// Whether the entry has a main row in any mode.
    pub fn in_any_chat_list(&self) -> bool {
        ListMode::ALL.into_iter().any(|mode| self.in_chat_list(mode))
    }

    /// Letters the entry is registered under in `mode`. Empty when absent.
    pub fn links(&self, mode: ListMode) -> RowsByLetter {
        self.links.get(&mode).cloned().unwrap_or_default()
    }

    /// Whether the entry belongs in `mode`, assuming a nonzero key.
    ///
    /// Pinned and promoted entries stay listed even when otherwise ineligible.
    pub fn should_be_in_chat_list(&self, mode: ListMode) -> bool {
        let listed = self.state.eligible || self.is_pinned() || self.is_promoted();
        match mode {
            ListMode::All => listed,
            ListMode::Important => {
                listed
                    && (self.is_pinned()
                        || self.is_promoted()
                        || self.category == Category::SoftPinned
                        || !self.state.muted
                        || self.state.unread_mention)
            }
        }
    }

    pub(crate) fn placement(&self) -> Placement {
        if let Some(slot) = self.fixed_on_top_index() {
            Placement::FixedOnTop(slot)
        } else if let Some(index) = self.pinned_index {
            Placement::Pinned(index)
        } else {
            Placement::Ranked {
                category: self.category,
                date: self.last_message_time,
            }
        }
    }
}
