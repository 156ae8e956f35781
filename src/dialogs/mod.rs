//! Ordered chat lists: entries, rows, letter buckets, and the store tying them together.

pub mod chat_lists;
pub mod entry;
pub mod events;
pub mod indexed_list;
pub mod letters;
pub mod list;
pub mod mode;

pub use chat_lists::ChatLists;
pub use entry::Entry;
pub use events::ChatListEvent;
pub use indexed_list::IndexedList;
pub use letters::{Letter, RowsByLetter};
pub use list::{List, PositionChange, Row};
pub use mode::{ListMode, UnknownListMode};
