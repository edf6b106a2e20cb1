//! Pipeline orchestrator — drives the full rewrite → synthesize sequence.
//!
//! [`PipelineOrchestrator`] owns the [`SharedState`] and responds to
//! [`TransformRequest`]s received over a `tokio::sync::mpsc` channel.
//!
//! # Pipeline flow
//!
//! ```text
//! TransformRequest { text, tone, voice }
//!   └─▶ begin_transform (clear previous outputs)        [Rewriting]
//!         └─▶ rewriter.rewrite(text, tone)
//!               ├─ Ok(adapted)  → use adapted text
//!               └─ Err(reason)  → pass-through: use original text,
//!                                 record the classified reason
//!         └─▶ synthesizer.synthesize(adapted, voice)    [Synthesizing]
//!               ├─ Ok(bytes)    → store audio
//!               └─ Err(reason)  → store the failure message, no audio
//!         └─▶ done                                      [Ready]
//! ```
//!
//! The two outbound calls are strictly sequential: synthesis never starts
//! before the rewrite has completed (successfully or degraded).  One request
//! is processed at a time; there is no retry and no cancellation once a call
//! is in flight.  No failure is fatal — every transform terminates in
//! `Ready` with whatever output survived.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::rewrite::{Tone, ToneRewriter};
use crate::tts::{SpeechSynthesizer, Voice};

use super::state::{PipelineState, SharedState};

// ---------------------------------------------------------------------------
// TransformRequest
// ---------------------------------------------------------------------------

/// One user-triggered transform: text plus the selected tone and voice.
///
/// The UI validates before sending — empty or whitespace-only text never
/// reaches the orchestrator.
#[derive(Debug, Clone)]
pub struct TransformRequest {
    pub text: String,
    pub tone: Tone,
    pub voice: Voice,
}

// ---------------------------------------------------------------------------
// PipelineOrchestrator
// ---------------------------------------------------------------------------

/// Drives the complete text → adapted text → audio pipeline.
///
/// Create with [`PipelineOrchestrator::new`], then call [`run`](Self::run)
/// inside a tokio task.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use echoverse::config::AppConfig;
/// use echoverse::pipeline::{new_shared_state, PipelineOrchestrator};
/// use echoverse::rewrite::GraniteRewriter;
/// use echoverse::tts::WatsonTts;
///
/// # async fn example() {
/// let config = AppConfig::default();
/// let shared_state = new_shared_state(config.clone());
///
/// let orchestrator = PipelineOrchestrator::new(
///     shared_state,
///     Arc::new(GraniteRewriter::from_config(&config.rewrite)),
///     Arc::new(WatsonTts::from_config(&config.tts)),
/// );
///
/// use echoverse::pipeline::TransformRequest;
/// let (request_tx, request_rx) = tokio::sync::mpsc::channel::<TransformRequest>(16);
/// tokio::spawn(async move { orchestrator.run(request_rx).await });
/// # drop(request_tx);
/// # }
/// ```
pub struct PipelineOrchestrator {
    state: SharedState,
    rewriter: Arc<dyn ToneRewriter>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl PipelineOrchestrator {
    /// Create a new orchestrator.
    ///
    /// # Arguments
    ///
    /// * `state`       — shared application state (also read by the UI).
    /// * `rewriter`    — tone rewriter (e.g. `GraniteRewriter`).
    /// * `synthesizer` — speech synthesizer (e.g. `WatsonTts`).
    pub fn new(
        state: SharedState,
        rewriter: Arc<dyn ToneRewriter>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            state,
            rewriter,
            synthesizer,
        }
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Run the orchestrator until `request_rx` is closed.
    ///
    /// This is an `async fn` and should be spawned as a tokio task from
    /// `main()`.  It never returns while the channel is open.
    pub async fn run(self, mut request_rx: mpsc::Receiver<TransformRequest>) {
        while let Some(request) = request_rx.recv().await {
            self.handle_transform(request).await;
        }

        log::info!("pipeline: request channel closed, orchestrator shutting down");
    }

    // -----------------------------------------------------------------------
    // Transform handling
    // -----------------------------------------------------------------------

    /// One atomic pass: rewrite, then synthesize, then finalise.
    async fn handle_transform(&self, request: TransformRequest) {
        log::debug!(
            "pipeline: transform (tone={}, voice={}, len={})",
            request.tone,
            request.voice,
            request.text.len()
        );

        {
            let mut st = self.state.lock().unwrap();
            st.begin_transform(request.text.clone(), request.tone);
        }

        // ── 1. Tone rewrite ──────────────────────────────────────────────
        let adapted = match self.rewriter.rewrite(&request.text, request.tone).await {
            Ok(adapted) => {
                log::debug!("pipeline: rewrite ok ({} chars)", adapted.len());
                adapted
            }
            Err(e) => {
                // Deliberate pass-through: keep the original text and tell
                // the user why the adapted text equals it.
                log::warn!("pipeline: rewrite degraded to pass-through: {e}");
                let mut st = self.state.lock().unwrap();
                st.rewrite_notice = Some(e.to_string());
                request.text.clone()
            }
        };

        {
            let mut st = self.state.lock().unwrap();
            st.adapted_text = Some(adapted.clone());
            st.pipeline = PipelineState::Synthesizing;
        }

        // ── 2. Speech synthesis ──────────────────────────────────────────
        match self
            .synthesizer
            .synthesize(&adapted, request.voice.backend_id())
            .await
        {
            Ok(audio) => {
                log::debug!("pipeline: synthesis ok ({} bytes)", audio.len());
                let mut st = self.state.lock().unwrap();
                st.audio = Some(audio);
            }
            Err(e) => {
                log::warn!("pipeline: synthesis failed: {e}");
                let mut st = self.state.lock().unwrap();
                st.synthesis_error = Some(e.to_string());
            }
        }

        // ── 3. Finalise ──────────────────────────────────────────────────
        let mut st = self.state.lock().unwrap();
        st.pipeline = PipelineState::Ready;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
