//! Text-to-speech module for EchoVerse.
//!
//! This module provides:
//! * [`SpeechSynthesizer`] — async trait implemented by all synthesis backends.
//! * [`WatsonTts`] — Watson Text-to-Speech REST client.
//! * [`Voice`] — the fixed voice enumeration with backend identifier mapping.
//! * [`TtsError`] — classified error variants for synthesis operations.

pub mod client;
pub mod voice;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{SpeechSynthesizer, TtsError, WatsonTts, AUDIO_MIME};
pub use voice::Voice;
