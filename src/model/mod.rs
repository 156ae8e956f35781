//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod category;
pub mod error;
pub mod identifiers;
pub mod live_state;

// Re-export for convenience
pub use category::Category;
pub use error::{AppError, InputError, ParseError};
pub use identifiers::{DialogKey, EntryId, FolderId, PeerId, TimeId};
pub use live_state::{LiveState, UnreadState};
