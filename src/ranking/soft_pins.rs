//! Externally configured soft pins.
//!
//! A soft pin raises a conversation into the top category tier without making
//! it a real (slot-ordered) pin. The set is read once from a plain text file,
//! one decimal peer id per line:
//!
//! ```text
//! 100
//! 200 anything after the number is ignored
//! ```
//!
//! Blank lines are skipped. A line that does not start with a number ends the
//! scan; nothing after it is read.

use crate::model::PeerId;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Lazily loaded, immutable set of soft-pinned peers.
///
/// The set is published through a [`OnceLock`]: readers observe either
/// "not loaded yet" or the complete set, never a partially built one.
#[derive(Debug, Default)]
pub struct SoftPinRegistry {
    path: Option<PathBuf>,
    peers: OnceLock<HashSet<PeerId>>,
}

impl SoftPinRegistry {
    /// Registry backed by a file, read on the first [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            peers: OnceLock::new(),
        }
    }

    /// Registry without a backing file. Loads as an empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry that is already published with the given peers.
    pub fn from_peers(peers: impl IntoIterator<Item = PeerId>) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(peers.into_iter().collect());
        Self { path: None, peers: cell }
    }

    /// Load the set if that has not happened yet and return it.
    ///
    /// Idempotent. A missing or unreadable file yields an empty set.
    pub fn load(&self) -> &HashSet<PeerId> {
        self.peers.get_or_init(|| self.read())
    }

    /// Membership query against the published set.
    ///
    /// Returns `false` until the set has been loaded.
    pub fn contains(&self, peer: PeerId) -> bool {
        self.peers.get().is_some_and(|peers| peers.contains(&peer))
    }

    /// Whether the set has been published.
    pub fn is_loaded(&self) -> bool {
        self.peers.get().is_some()
    }

    /// Number of published peers, 0 before loading.
    pub fn len(&self) -> usize {
        self.peers.get().map_or(0, HashSet::len)
    }

    /// Whether no peers are published.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn read(&self) -> HashSet<PeerId> {
        let Some(path) = &self.path else {
            return HashSet::new();
        };

        info!(path = %path.display(), "Loading soft pinned peers");
        match std::fs::read(path) {
            Ok(bytes) => {
                let peers = parse_peers(&String::from_utf8_lossy(&bytes));
                info!(count = peers.len(), "Loaded soft pinned peers");
                peers
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No soft pin file, using empty set");
                HashSet::new()
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Unreadable soft pin file, using empty set");
                HashSet::new()
            }
        }
    }
}

/// Parse soft pin file contents.
pub fn parse_peers(text: &str) -> HashSet<PeerId> {
    let mut peers = HashSet::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let Some(peer) = leading_peer_id(line) else {
            debug!(line, "Soft pin scan stopped at unparsable line");
            break;
        };
        debug!(peer = %peer, "Peer added to soft pinned peers");
        peers.insert(peer);
    }
    peers
}

/// The decimal number a line starts with, ignoring leading whitespace.
///
/// Digits directly followed by other text still count (`"12abc"` is 12).
fn leading_peer_id(line: &str) -> Option<PeerId> {
    let token = line.trim_start();
    let token = token.strip_prefix('+').unwrap_or(token);
    let end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    token[..end].parse::<u64>().ok().map(PeerId::new)
}
