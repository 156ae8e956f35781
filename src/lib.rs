//! Chat list prioritization (chatlist)
//!
//! Ranks dialogs into ordered chat lists. Each dialog gets a 64-bit sort key
//! built from its pin state and a priority category derived from unread
//! count, mute state, message age and a user-maintained soft-pin file.
//! Lists are kept sorted by descending key, with per-letter sub-lists for
//! incremental name search.

pub mod config;
pub mod dialogs;
pub mod logging;
pub mod model;
pub mod parser;
pub mod ranking;
