//! Application entry point — EchoVerse.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Build the rewrite and TTS clients from config.
//! 5. Create the transform request channel and shared state.
//! 6. Spawn the pipeline orchestrator on the tokio runtime.
//! 7. Run [`eframe::run_native`] — blocks the main thread until the window
//!    is closed.

use std::sync::Arc;

use tokio::sync::mpsc;

use echoverse::{
    app::EchoVerseApp,
    config::AppConfig,
    pipeline::{new_shared_state, PipelineOrchestrator, TransformRequest},
    rewrite::{GraniteRewriter, ToneRewriter},
    tts::{SpeechSynthesizer, WatsonTts},
};

use eframe::egui;

// ---------------------------------------------------------------------------
// Native options builder
// ---------------------------------------------------------------------------

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let (w, h) = config.ui.window_size.unwrap_or((900.0, 720.0));

    let vp = egui::ViewportBuilder::default()
        .with_inner_size([w, h])
        .with_min_inner_size([640.0, 480.0])
        .with_title("EchoVerse");

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("EchoVerse starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    if AppConfig::is_first_run() {
        log::info!("First run — settings file will be created on save");
    }

    // 3. Tokio runtime (2 worker threads — rewrite + TTS each take one)
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    // 4. HTTP clients.  Credentials are resolved here (env vars win over the
    //    settings file); missing credentials degrade at request time rather
    //    than preventing launch.
    let rewriter = GraniteRewriter::from_config(&config.rewrite);
    if !rewriter.has_token() {
        log::warn!("No Hugging Face token configured; rewrites will pass text through unchanged");
    }
    let rewriter: Arc<dyn ToneRewriter> = Arc::new(rewriter);

    let synthesizer = WatsonTts::from_config(&config.tts);
    if !synthesizer.is_configured() {
        log::warn!("IBM TTS credentials not configured; synthesis will fail with a clear message");
    }
    let synthesizer: Arc<dyn SpeechSynthesizer> = Arc::new(synthesizer);

    // 5. Channel + shared state
    let (request_tx, request_rx) = mpsc::channel::<TransformRequest>(16);
    let state = new_shared_state(config.clone());

    // 6. Pipeline orchestrator
    let orchestrator =
        PipelineOrchestrator::new(Arc::clone(&state), rewriter, synthesizer);
    rt.spawn(orchestrator.run(request_rx));

    // 7. UI — blocks until the window closes
    let options = native_options(&config);
    eframe::run_native(
        "EchoVerse",
        options,
        Box::new(move |_cc| Ok(Box::new(EchoVerseApp::new(state, request_tx, &config)))),
    )
}
