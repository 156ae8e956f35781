//! Live state → priority category.

use crate::model::{Category, LiveState, PeerId, TimeId};
use crate::ranking::soft_pins::SoftPinRegistry;
use std::sync::Arc;

/// Age after which a read chat counts as old: one week.
pub const OLD_MESSAGE_SECS: u32 = 604_800;

/// Maps an entry's live state to a [`Category`].
///
/// Holds the soft-pin registry and the age threshold; classification itself
/// is a pure function of its arguments and the registry contents.
#[derive(Debug, Clone)]
pub struct PriorityClassifier {
    registry: Arc<SoftPinRegistry>,
    old_message_secs: u32,
}

impl PriorityClassifier {
    /// Classifier with an explicit age threshold in seconds.
    pub fn new(registry: Arc<SoftPinRegistry>, old_message_secs: u32) -> Self {
        Self {
            registry,
            old_message_secs,
        }
    }

    /// Classifier with the default one-week threshold.
    pub fn with_registry(registry: Arc<SoftPinRegistry>) -> Self {
        Self::new(registry, OLD_MESSAGE_SECS)
    }

    /// The soft-pin registry consulted first.
    pub fn registry(&self) -> &Arc<SoftPinRegistry> {
        &self.registry
    }

    /// Swap the soft-pin registry.
    pub fn set_registry(&mut self, registry: Arc<SoftPinRegistry>) {
        self.registry = registry;
    }

    /// Age threshold separating young and old read chats.
    pub fn old_message_secs(&self) -> u32 {
        self.old_message_secs
    }

    /// Compute the category of a dialog.
    ///
    /// Triggers the one-time registry load on first use. An unknown unread
    /// count is neither "has unread" nor "fully read", so an unmuted chat with
    /// an unknown count and no mention or mark lands in [`Category::Bottom`].
    pub fn classify(
        &self,
        peer: Option<PeerId>,
        state: &LiveState,
        last_message_time: TimeId,
        now: i64,
    ) -> Category {
        if !state.last_message_known {
            return Category::Bottom;
        }

        let soft_pins = self.registry.load();
        let age = now - i64::from(last_message_time.get());
        let read = state.unread_count == Some(0);
        let has_unread = state.unread_count.is_some_and(|count| count > 0);
        let old = i64::from(self.old_message_secs);

        if peer.is_some_and(|peer| soft_pins.contains(&peer)) {
            Category::SoftPinned
        } else if state.unread_mention || (has_unread && !state.muted) || state.unread_mark {
            Category::UnmutedUnread
        } else if !state.muted && read && age <= old {
            Category::UnmutedReadYoung
        } else if !state.muted && read {
            Category::UnmutedReadOld
        } else if state.muted {
            Category::Muted
        } else {
            Category::Bottom
        }
    }
}
