//! Audio output for EchoVerse: inline playback and audiobook export.

pub mod export;
pub mod player;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use export::{data_uri, write_audiobook, AUDIOBOOK_FILE_NAME};
pub use player::{AudioPlayer, PlaybackError};
