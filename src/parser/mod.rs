//! JSONL parser for dialog snapshots.
//!
//! One line describes one dialog as the conversation source last saw it:
//!
//! ```json
//! {"peer":7,"name":"Alice","unread":2,"muted":false,"date":1700000000,"pinned":1}
//! {"folder":1,"name":"Archive"}
//! {"peer":9,"in_folder":1,"name":"Old group","unread":-1,"date":1690000000}
//! ```
//!
//! Parsing is pure; [`DialogSnapshot::apply_to`] feeds a parsed snapshot into
//! [`ChatLists`].

use crate::dialogs::ChatLists;
use crate::model::{DialogKey, EntryId, FolderId, LiveState, ParseError, PeerId, TimeId};
use serde::Deserialize;
use tracing::warn;

const FIELD_PEER: &str = "peer";

fn default_unread() -> i64 {
    -1
}

fn default_true() -> bool {
    true
}

/// Raw JSON structure for deserializing snapshots.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSnapshot {
    #[serde(default)]
    peer: Option<u64>,
    #[serde(default)]
    folder: Option<u32>,
    #[serde(default)]
    in_folder: Option<u32>,
    #[serde(default)]
    name: String,
    #[serde(default = "default_unread")]
    unread: i64,
    #[serde(default)]
    muted: bool,
    #[serde(default)]
    mention: bool,
    #[serde(default)]
    unread_mark: bool,
    #[serde(default)]
    date: u32,
    #[serde(default)]
    last_message_known: Option<bool>,
    #[serde(default)]
    pinned: Option<u32>,
    #[serde(default)]
    promoted: bool,
    #[serde(default = "default_true")]
    eligible: bool,
}

/// Validated state of one dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogSnapshot {
    /// Dialog identity.
    pub key: DialogKey,
    /// Display name.
    pub name: String,
    /// Enclosing folder of a conversation.
    pub folder: Option<FolderId>,
    /// Live state for classification.
    pub state: LiveState,
    /// Time of the last message, unknown when absent.
    pub date: TimeId,
    /// Pin slot.
    pub pinned: Option<u32>,
    /// Forced to the top.
    pub promoted: bool,
}

/// Outcome of parsing a whole snapshot file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSnapshots {
    /// Snapshots in file order.
    pub snapshots: Vec<DialogSnapshot>,
    /// Lines that could not be parsed.
    pub errors: Vec<ParseError>,
}

/// Parse a single JSONL line into a snapshot.
///
/// `unread` of `-1` (or any negative value, or absence) means the count is
/// unknown. `last_message_known` defaults to whether `date` is set.
///
/// # Errors
///
/// Returns `ParseError` if the JSON is malformed or the dialog identity is
/// missing or ambiguous.
pub fn parse_snapshot_line(raw: &str, line_number: usize) -> Result<DialogSnapshot, ParseError> {
    let snapshot: RawSnapshot =
        serde_json::from_str(raw).map_err(|e| ParseError::InvalidJson {
            line: line_number,
            message: e.to_string(),
        })?;

    let key = match (snapshot.peer, snapshot.folder) {
        (Some(peer), None) => DialogKey::Peer(PeerId::new(peer)),
        (None, Some(folder)) => DialogKey::Folder(FolderId::new(folder)),
        (Some(_), Some(_)) => return Err(ParseError::AmbiguousKey { line: line_number }),
        (None, None) => {
            return Err(ParseError::MissingField {
                line: line_number,
                field: FIELD_PEER,
            })
        }
    };

    let date = TimeId::new(snapshot.date);
    let state = LiveState {
        unread_count: LiveState::unread_from_raw(snapshot.unread),
        muted: snapshot.muted,
        unread_mention: snapshot.mention,
        unread_mark: snapshot.unread_mark,
        last_message_known: snapshot
            .last_message_known
            .unwrap_or(!date.is_unknown()),
        eligible: snapshot.eligible,
    };

    Ok(DialogSnapshot {
        key,
        name: snapshot.name,
        folder: snapshot.in_folder.map(FolderId::new),
        state,
        date,
        pinned: snapshot.pinned,
        promoted: snapshot.promoted,
    })
}

/// Parse every non-blank line of `input`.
///
/// Malformed lines are logged and collected; they never abort the parse.
pub fn parse_snapshots(input: &str) -> ParsedSnapshots {
    let mut parsed = ParsedSnapshots::default();
    for (index, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_snapshot_line(line, index + 1) {
            Ok(snapshot) => parsed.snapshots.push(snapshot),
            Err(error) => {
                warn!(%error, "skipping malformed snapshot");
                parsed.errors.push(error);
            }
        }
    }
    parsed
}

impl DialogSnapshot {
    /// Register or update the dialog in `lists` and return its entry.
    ///
    /// Structural changes (folder, pin, promotion) are applied before the
    /// message time so the final touch ranks the entry in its final place.
    pub fn apply_to(&self, lists: &mut ChatLists) -> EntryId {
        let id = lists.register(self.key, self.name.as_str(), self.folder);
        lists.set_name(id, self.name.as_str());
        lists.move_to_folder(id, self.folder);
        lists.update_state(id, self.state);
        lists.set_pinned_index(id, self.pinned);
        lists.set_promoted(id, self.promoted);
        if !self.date.is_unknown() {
            lists.touch_last_message_time(id, self.date);
        }
        id
    }
}
