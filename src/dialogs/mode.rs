//! Named chat list views.

use std::fmt;
use std::str::FromStr;

/// An ordered view over a subset of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ListMode {
    /// Every eligible entry.
    #[default]
    All,
    /// Entries that deserve attention: unmuted, pinned, promoted,
    /// soft-pinned, or with an unread mention.
    Important,
}

impl ListMode {
    /// Every mode, in maintenance order.
    pub const ALL: [ListMode; 2] = [ListMode::All, ListMode::Important];

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Important => "important",
        }
    }
}

impl fmt::Display for ListMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown list mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown list mode '{0}' (expected 'all' or 'important')")]
pub struct UnknownListMode(pub String);

impl FromStr for ListMode {
    type Err = UnknownListMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "important" => Ok(Self::Important),
            _ => Err(UnknownListMode(s.to_string())),
        }
    }
}
