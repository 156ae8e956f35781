//! Ranking services: soft pins, classification, sort keys.
//!
//! These are owned services injected into [`ChatLists`](crate::dialogs::ChatLists)
//! rather than process-wide globals.

pub mod classifier;
pub mod clock;
pub mod soft_pins;
pub mod sort_key;

// Re-export for convenience
pub use classifier::{PriorityClassifier, OLD_MESSAGE_SECS};
pub use clock::{Clock, ManualClock, SystemClock};
pub use soft_pins::{parse_peers, SoftPinRegistry};
pub use sort_key::{Placement, SortKeyEncoder, MAX_FIXED_ON_TOP_SLOT, PROMOTED_SLOT};
