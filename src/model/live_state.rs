//! Live conversation state as read from the storage layer.

/// Snapshot of the conversation attributes that drive ranking.
///
/// The chat list reads this state, it never owns the conversation itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveState {
    /// Unread message count. `None` while the count is not loaded.
    pub unread_count: Option<u32>,
    /// Notifications muted.
    pub muted: bool,
    /// At least one unread mention.
    pub unread_mention: bool,
    /// Manually marked as unread.
    pub unread_mark: bool,
    /// Whether the last message is loaded. Unknown state ranks at the bottom.
    pub last_message_known: bool,
    /// Whether the dialog should currently be shown in chat lists at all.
    pub eligible: bool,
}

impl LiveState {
    /// Convert a raw unread count where `-1` (or any negative value) means unknown.
    pub fn unread_from_raw(raw: i64) -> Option<u32> {
        u32::try_from(raw).ok()
    }

    /// Unread count as the raw wire value, `-1` when unknown.
    pub fn raw_unread_count(&self) -> i64 {
        self.unread_count.map_or(-1, i64::from)
    }

    /// The subset of state whose change requires an unread notification.
    pub fn unread_view(&self) -> UnreadState {
        UnreadState {
            unread_count: self.unread_count,
            muted: self.muted,
            unread_mention: self.unread_mention,
            unread_mark: self.unread_mark,
        }
    }
}

impl Default for LiveState {
    fn default() -> Self {
        Self {
            unread_count: Some(0),
            muted: false,
            unread_mention: false,
            unread_mark: false,
            last_message_known: true,
            eligible: true,
        }
    }
}

/// Unread-related part of [`LiveState`], reported to the UI when it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnreadState {
    /// Unread message count, `None` when unknown.
    pub unread_count: Option<u32>,
    /// Notifications muted.
    pub muted: bool,
    /// At least one unread mention.
    pub unread_mention: bool,
    /// Manually marked as unread.
    pub unread_mark: bool,
}
