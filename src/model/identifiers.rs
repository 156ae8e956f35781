//! Core identifier newtypes.
//!
//! Dialog identities are opaque handles to conversations and folders owned by
//! the storage layer. The chat list never dereferences them, it only ranks.

use std::fmt;

/// Identifier of a peer (user, group or channel) behind a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeerId(u64);

impl PeerId {
    /// Create a peer id from its raw value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw u64 value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a chat folder (e.g. the archive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FolderId(u32);

impl FolderId {
    /// Create a folder id from its raw value.
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "folder#{}", self.0)
    }
}

/// Identity of something that can appear in a chat list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DialogKey {
    /// A conversation with a peer.
    Peer(PeerId),
    /// A folder grouping other dialogs.
    Folder(FolderId),
}

impl DialogKey {
    /// The peer behind this dialog, if it is a conversation.
    pub fn peer(&self) -> Option<PeerId> {
        match self {
            Self::Peer(peer) => Some(*peer),
            Self::Folder(_) => None,
        }
    }

    /// The folder this key names, if it is a folder.
    pub fn folder(&self) -> Option<FolderId> {
        match self {
            Self::Peer(_) => None,
            Self::Folder(folder) => Some(*folder),
        }
    }
}

impl fmt::Display for DialogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Peer(peer) => write!(f, "peer#{}", peer),
            Self::Folder(folder) => write!(f, "{}", folder),
        }
    }
}

/// Slot of an entry inside the [`ChatLists`](crate::dialogs::ChatLists) arena.
///
/// Only valid for the store that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(usize);

impl EntryId {
    pub(crate) fn new(slot: usize) -> Self {
        Self(slot)
    }

    /// Get the raw arena slot.
    pub fn get(&self) -> usize {
        self.0
    }
}

/// Unix time in seconds. Zero means "no known last message".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeId(u32);

impl TimeId {
    /// Sentinel for an entry whose last message is unknown.
    pub const UNKNOWN: Self = Self(0);

    /// Create a time id from unix seconds.
    pub fn new(unix_secs: u32) -> Self {
        Self(unix_secs)
    }

    /// Get the raw unix seconds.
    pub fn get(&self) -> u32 {
        self.0
    }

    /// Check if this is the UNKNOWN sentinel.
    pub fn is_unknown(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for TimeId {
    fn from(unix_secs: u32) -> Self {
        Self(unix_secs)
    }
}
