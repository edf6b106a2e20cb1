//! Audiobook export: MP3 file writing and base64 data-URI embedding.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::tts::AUDIO_MIME;

/// Fixed output filename for exported audiobooks.
pub const AUDIOBOOK_FILE_NAME: &str = "audiobook.mp3";

/// Write the raw MP3 bytes to `dir/audiobook.mp3`, creating `dir` as needed.
///
/// Returns the full path of the written file.
pub fn write_audiobook(dir: &Path, bytes: &[u8]) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(AUDIOBOOK_FILE_NAME);
    fs::write(&path, bytes)?;
    Ok(path)
}

/// Encode the audio bytes as a `data:audio/mp3;base64,…` URI.
///
/// Pasted into an HTML `<audio>` source this plays the audiobook inline in a
/// browser, byte-for-byte identical to the exported file.
pub fn data_uri(bytes: &[u8]) -> String {
    format!("data:{};base64,{}", AUDIO_MIME, STANDARD.encode(bytes))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
