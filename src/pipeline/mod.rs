//! Pipeline orchestrator module for EchoVerse.
//!
//! This module wires the rewrite → synthesis pipeline and exposes the shared
//! state that the UI reads every frame.
//!
//! # Architecture
//!
//! ```text
//! TransformRequest (mpsc)
//!        │
//!        ▼
//! PipelineOrchestrator::run()  ← async tokio task
//!        │
//!        ├─ ToneRewriter::rewrite        → Rewriting
//!        │     (Err → pass-through + notice)
//!        └─ SpeechSynthesizer::synthesize → Synthesizing
//!              (Err → failure message, no audio)
//!                                         → Ready
//!
//! SharedState (Arc<Mutex<AppState>>) ←─── read by egui update() each frame
//! ```

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{PipelineOrchestrator, TransformRequest};
pub use state::{new_shared_state, AppState, PipelineState, SharedState};
