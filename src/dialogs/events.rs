//! Notifications for the presentation layer.
//!
//! Events are queued on an [`mpsc`](std::sync::mpsc) channel while a mutation
//! runs and observed by the UI only afterwards, so a repaint can never re-enter
//! a sort key computation.

use crate::dialogs::list::PositionChange;
use crate::dialogs::mode::ListMode;
use crate::model::{DialogKey, FolderId, UnreadState};
use std::sync::mpsc::Sender;
use tracing::trace;

/// Something the UI has to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatListEvent {
    /// Entry gained a row in a list.
    Added {
        /// Dialog shown.
        key: DialogKey,
        /// Container of the list, `None` for the root list.
        folder: Option<FolderId>,
        /// Mode of the list.
        mode: ListMode,
        /// Position of the new row.
        position: usize,
    },
    /// Entry lost its row in a list.
    Removed {
        /// Dialog hidden.
        key: DialogKey,
        /// Container of the list.
        folder: Option<FolderId>,
        /// Mode of the list.
        mode: ListMode,
    },
    /// Row moved to another position.
    Moved {
        /// Dialog moved.
        key: DialogKey,
        /// Container of the list.
        folder: Option<FolderId>,
        /// Mode of the list.
        mode: ListMode,
        /// Old and new position.
        change: PositionChange,
    },
    /// Row content changed in place.
    Repaint {
        /// Dialog to repaint.
        key: DialogKey,
        /// Container of the list.
        folder: Option<FolderId>,
        /// Mode of the list.
        mode: ListMode,
        /// Current position.
        position: usize,
    },
    /// Entry became pinned or stopped being pinned.
    PinnedChanged {
        /// Dialog affected.
        key: DialogKey,
        /// New pin state.
        pinned: bool,
    },
    /// Unread count, mute, mention or mark changed.
    UnreadStateChanged {
        /// Dialog affected.
        key: DialogKey,
        /// State before the change.
        was: UnreadState,
        /// State after the change.
        now: UnreadState,
    },
}

impl ChatListEvent {
    /// Dialog the event is about.
    pub fn key(&self) -> DialogKey {
        match self {
            Self::Added { key, .. }
            | Self::Removed { key, .. }
            | Self::Moved { key, .. }
            | Self::Repaint { key, .. }
            | Self::PinnedChanged { key, .. }
            | Self::UnreadStateChanged { key, .. } => *key,
        }
    }

    /// Whether this is an existence transition (`Added` or `Removed`).
    pub fn is_existence_change(&self) -> bool {
        matches!(self, Self::Added { .. } | Self::Removed { .. })
    }
}

pub(crate) fn emit(events: &Sender<ChatListEvent>, event: ChatListEvent) {
    trace!(?event, "chat list event");
    if events.send(event).is_err() {
        trace!("chat list event receiver dropped");
    }
}
