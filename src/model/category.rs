//! Priority categories of non-pinned chat list entries.

use std::fmt;

/// Coarse priority bucket driving the order of entries that are neither
/// promoted nor pinned.
///
/// The discriminant is the tier nibble stored in the top four bits of a
/// category sort key, so the derived `Ord` matches display precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Category {
    /// Last message unknown or state not loaded yet.
    #[default]
    Bottom = 0x0,
    /// Unmuted, fully read, last message older than the age threshold.
    UnmutedReadOld = 0xA,
    /// Muted with no unread mention or unread mark.
    Muted = 0xB,
    /// Unmuted, fully read, last message within the age threshold.
    UnmutedReadYoung = 0xC,
    /// Unread messages in an unmuted chat, an unread mention, or an unread mark.
    UnmutedUnread = 0xD,
    /// Peer listed in the soft-pin registry.
    SoftPinned = 0xE,
}

impl Category {
    /// Every category from highest to lowest precedence.
    pub const PRECEDENCE: [Category; 6] = [
        Category::SoftPinned,
        Category::UnmutedUnread,
        Category::UnmutedReadYoung,
        Category::Muted,
        Category::UnmutedReadOld,
        Category::Bottom,
    ];

    /// Tier nibble encoded into the sort key.
    pub fn tier(self) -> u64 {
        self as u64
    }

    /// Short lowercase label used in logs and CLI output.
    pub fn label(self) -> &'static str {
        match self {
            Self::SoftPinned => "soft-pinned",
            Self::UnmutedUnread => "unread",
            Self::UnmutedReadYoung => "read-young",
            Self::Muted => "muted",
            Self::UnmutedReadOld => "read-old",
            Self::Bottom => "bottom",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}
