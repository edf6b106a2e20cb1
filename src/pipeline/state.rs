//! Pipeline state machine and shared application state.
//!
//! [`PipelineState`] drives the orchestrator's state machine.  The UI reads
//! it via [`SharedState`] to render the appropriate view.
//!
//! [`AppState`] is the single source of truth for everything the UI needs:
//! current pipeline phase, the texts of the last transform, the synthesized
//! audio, any degradation notices, and a config snapshot.
//!
//! [`SharedState`] is a type alias for `Arc<Mutex<AppState>>` — cheap to clone
//! and safe to share across threads.

use std::sync::{Arc, Mutex};

use crate::config::AppConfig;
use crate::rewrite::Tone;

// ---------------------------------------------------------------------------
// PipelineState
// ---------------------------------------------------------------------------

/// States of the transform pipeline.
///
/// The state machine transitions are:
///
/// ```text
/// Idle ──Transform clicked──▶ Rewriting
///                             ──rewrite done (ok or pass-through)──▶ Synthesizing
///                                ──synthesis done (ok or failed)──▶ Ready
/// Ready ──next Transform──▶ Rewriting
/// ```
///
/// There is no error state: every transform terminates in `Ready`, carrying
/// degraded output (pass-through text, missing audio) as data instead.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
    /// Waiting for the user to request a transform.
    Idle,

    /// The rewrite endpoint is being called.
    Rewriting,

    /// Rewriting is complete; the speech service is being called.
    Synthesizing,

    /// Results (possibly degraded) are ready for display.
    Ready,
}

impl PipelineState {
    /// Returns `true` while a transform is in flight.
    ///
    /// The UI uses this to disable the Transform button while busy.
    ///
    /// ```
    /// use echoverse::pipeline::PipelineState;
    ///
    /// assert!(!PipelineState::Idle.is_busy());
    /// assert!(PipelineState::Rewriting.is_busy());
    /// assert!(PipelineState::Synthesizing.is_busy());
    /// assert!(!PipelineState::Ready.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(self, PipelineState::Rewriting | PipelineState::Synthesizing)
    }

    /// A short human-readable label suitable for the status line.
    pub fn label(&self) -> &'static str {
        match self {
            PipelineState::Idle => "Idle",
            PipelineState::Rewriting => "Rewriting",
            PipelineState::Synthesizing => "Synthesizing",
            PipelineState::Ready => "Done",
        }
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        PipelineState::Idle
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Shared application state — the single source of truth for the UI.
///
/// Held behind [`SharedState`] (`Arc<Mutex<AppState>>`).  The pipeline
/// orchestrator writes, the egui app reads every frame.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current logical phase of the transform pipeline.
    pub pipeline: PipelineState,

    /// The text submitted for the current / last transform.
    pub original_text: Option<String>,

    /// The tone the current / last transform was requested in.
    pub tone: Tone,

    /// Result of the rewrite step.  Equals `original_text` when rewriting
    /// degraded to pass-through.
    pub adapted_text: Option<String>,

    /// Why rewriting degraded to pass-through, if it did.
    pub rewrite_notice: Option<String>,

    /// Synthesized MP3 bytes, when synthesis succeeded.
    pub audio: Option<Vec<u8>>,

    /// Why no audio was produced, if synthesis failed or was unconfigured.
    pub synthesis_error: Option<String>,

    /// Configuration snapshot taken at startup.
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            pipeline: PipelineState::Idle,
            original_text: None,
            tone: Tone::default(),
            adapted_text: None,
            rewrite_notice: None,
            audio: None,
            synthesis_error: None,
            config,
        }
    }

    /// Clear the outputs of a previous transform and enter `Rewriting`.
    pub fn begin_transform(&mut self, text: String, tone: Tone) {
        self.pipeline = PipelineState::Rewriting;
        self.original_text = Some(text);
        self.tone = tone;
        self.adapted_text = None;
        self.rewrite_notice = None;
        self.audio = None;
        self.synthesis_error = None;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-shared handle to [`AppState`].
pub type SharedState = Arc<Mutex<AppState>>;

/// Create a fresh [`SharedState`] from a config snapshot.
pub fn new_shared_state(config: AppConfig) -> SharedState {
    Arc::new(Mutex::new(AppState::new(config)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
