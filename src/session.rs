//! Session-scoped UI state.
//!
//! [`Session`] is the single owner of everything the user has entered:
//! current text, the name of the last loaded file, and the selected tone and
//! voice.  It lives for the duration of one app run and is never persisted.
//!
//! Mutation happens at exactly three points: a file drop ([`Session::load_file`]),
//! a direct text edit (the UI writes through `&mut session.text`), and the
//! clear action ([`Session::clear`]).

use thiserror::Error;

use crate::rewrite::Tone;
use crate::tts::Voice;

/// Upper bound on accepted text files — 20 MB.
pub const MAX_FILE_BYTES: usize = 20 * 1024 * 1024;

// ---------------------------------------------------------------------------
// SessionError
// ---------------------------------------------------------------------------

/// Errors that can occur while loading a text file into the session.
///
/// On any of these the session keeps its previous text and filename.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// The dropped file exceeds [`MAX_FILE_BYTES`].
    #[error("File is too large ({0} bytes) — the limit is 20 MB")]
    TooLarge(usize),

    /// The file contents are not valid UTF-8 text.
    #[error("Could not read the file. Please ensure it's a valid text file.")]
    InvalidEncoding,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Ephemeral per-run state bag owned by the UI.
#[derive(Debug, Clone)]
pub struct Session {
    /// The current input text (typed or loaded from a file).
    pub text: String,
    /// Name of the last successfully loaded file, if any.
    pub file_name: Option<String>,
    /// Selected narration tone.
    pub tone: Tone,
    /// Selected synthesis voice.
    pub voice: Voice,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            text: String::new(),
            file_name: None,
            tone: Tone::Neutral,
            voice: Voice::Lisa,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the session text with the decoded contents of a dropped file.
    ///
    /// Enforces the 20 MB cap and UTF-8 decoding.  On failure the previous
    /// text and filename are left untouched and the classified error is
    /// returned for the UI to display as a warning.
    pub fn load_file(&mut self, name: &str, bytes: Vec<u8>) -> Result<(), SessionError> {
        if bytes.len() > MAX_FILE_BYTES {
            return Err(SessionError::TooLarge(bytes.len()));
        }

        let text = String::from_utf8(bytes).map_err(|_| SessionError::InvalidEncoding)?;

        self.text = text;
        self.file_name = Some(name.to_string());
        Ok(())
    }

    /// Reset text and filename to empty.  Tone and voice selections persist.
    pub fn clear(&mut self) {
        self.text.clear();
        self.file_name = None;
    }

    /// Number of characters currently entered, for display next to the input.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// `true` when the text contains anything beyond whitespace.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
