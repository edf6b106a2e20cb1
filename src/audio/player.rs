//! Inline MP3 playback via rodio.
//!
//! [`AudioPlayer`] owns the OS output stream and at most one active sink.
//! It is created lazily on the first Play click so that launching without an
//! audio device never blocks the rest of the app, and it must be kept on the
//! UI thread (the rodio output stream is not `Send`).

use std::io::Cursor;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use thiserror::Error;

// ---------------------------------------------------------------------------
// PlaybackError
// ---------------------------------------------------------------------------

/// Errors that can occur when playing synthesized audio.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No audio output device could be opened.
    #[error("no audio output device available: {0}")]
    Device(String),

    /// The MP3 bytes could not be decoded.
    #[error("could not decode audio: {0}")]
    Decode(String),

    /// The sink could not be attached to the output stream.
    #[error("playback failed: {0}")]
    Play(String),
}

// ---------------------------------------------------------------------------
// AudioPlayer
// ---------------------------------------------------------------------------

/// Plays MP3 byte buffers on the default output device.
pub struct AudioPlayer {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
}

impl AudioPlayer {
    /// Open the default output device.
    pub fn new() -> Result<Self, PlaybackError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| PlaybackError::Device(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
        })
    }

    /// Decode `bytes` as MP3 and start playback, stopping any previous clip.
    pub fn play(&mut self, bytes: Vec<u8>) -> Result<(), PlaybackError> {
        self.stop();

        let source =
            Decoder::new(Cursor::new(bytes)).map_err(|e| PlaybackError::Decode(e.to_string()))?;
        let sink = Sink::try_new(&self.handle).map_err(|e| PlaybackError::Play(e.to_string()))?;

        sink.append(source);
        self.sink = Some(sink);
        Ok(())
    }

    /// Stop the current clip, if any.
    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    /// `true` while a clip is audibly playing.
    pub fn is_playing(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| !s.empty())
    }
}
