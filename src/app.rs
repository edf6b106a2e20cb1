//! EchoVerse window — egui/eframe application.
//!
//! # Architecture
//!
//! [`EchoVerseApp`] is the top-level [`eframe::App`] that owns the
//! [`Session`] (input text, tone, voice) and two handles to the background
//! pipeline:
//!
//! * `request_tx` — sends [`TransformRequest`] to the pipeline orchestrator.
//! * `state`      — [`SharedState`] the orchestrator writes and the app reads
//!   every frame.
//!
//! # Layout
//!
//! | Section | Contents |
//! |---------|----------|
//! | Input   | drag-and-drop `.txt` target, multiline editor, char count, Clear |
//! | Choices | tone radio group, voice radio group |
//! | Action  | "Transform Text to Audio" (disabled while busy) |
//! | Results | original text, adapted text (labeled with the tone), audio controls or failure message |
//! | Settings| credential fields persisted to `settings.toml` |

use eframe::egui;
use tokio::sync::mpsc;

use crate::audio::{self, AudioPlayer};
use crate::config::{AppConfig, AppPaths};
use crate::pipeline::{SharedState, TransformRequest};
use crate::rewrite::Tone;
use crate::session::Session;
use crate::tts::Voice;

// ---------------------------------------------------------------------------
// EchoVerseApp
// ---------------------------------------------------------------------------

/// eframe application — the EchoVerse window.
pub struct EchoVerseApp {
    // ── Session (user input) ─────────────────────────────────────────────
    /// Current input text, filename, tone and voice selections.
    pub session: Session,

    // ── Pipeline handles ─────────────────────────────────────────────────
    /// Send transform requests to the background orchestrator.
    pub request_tx: mpsc::Sender<TransformRequest>,
    /// Shared state written by the orchestrator, read every frame.
    pub state: SharedState,

    // ── Playback ─────────────────────────────────────────────────────────
    /// Lazily created on the first Play click; `None` until then or when no
    /// output device is available.
    player: Option<AudioPlayer>,

    // ── Transient UI state ───────────────────────────────────────────────
    /// Warning shown above the input (bad file, empty submit).
    input_warning: Option<String>,
    /// Short confirmation line (exported path, copied URI).
    status_flash: Option<String>,
    /// Whether the settings panel is expanded.
    show_settings: bool,

    // ── Settings draft ───────────────────────────────────────────────────
    /// Editable copies of the credential fields; persisted on Save.
    settings_draft: SettingsDraft,
}

/// Editable credential fields for the settings panel.
#[derive(Debug, Clone, Default)]
struct SettingsDraft {
    hf_token: String,
    tts_api_key: String,
    tts_service_url: String,
}

impl SettingsDraft {
    fn from_config(config: &AppConfig) -> Self {
        Self {
            hf_token: config.rewrite.api_token.clone().unwrap_or_default(),
            tts_api_key: config.tts.api_key.clone().unwrap_or_default(),
            tts_service_url: config.tts.service_url.clone().unwrap_or_default(),
        }
    }

    /// Apply the draft onto a config, mapping empty fields to `None`.
    fn apply_to(&self, config: &mut AppConfig) {
        let non_empty = |s: &str| {
            let t = s.trim();
            (!t.is_empty()).then(|| t.to_string())
        };
        config.rewrite.api_token = non_empty(&self.hf_token);
        config.tts.api_key = non_empty(&self.tts_api_key);
        config.tts.service_url = non_empty(&self.tts_service_url);
    }
}

impl EchoVerseApp {
    /// Create a new [`EchoVerseApp`].
    ///
    /// * `state`      — shared state handle (also held by the orchestrator).
    /// * `request_tx` — sender end of the transform request channel.
    /// * `config`     — loaded application configuration.
    pub fn new(
        state: SharedState,
        request_tx: mpsc::Sender<TransformRequest>,
        config: &AppConfig,
    ) -> Self {
        Self {
            session: Session::new(),
            request_tx,
            state,
            player: None,
            input_warning: None,
            status_flash: None,
            show_settings: false,
            settings_draft: SettingsDraft::from_config(config),
        }
    }

    // ── Transform submission ─────────────────────────────────────────────

    /// Validate the session and send one [`TransformRequest`].
    ///
    /// Whitespace-only input short-circuits with a warning — no request is
    /// sent and therefore no network call is made by either client.
    pub fn submit_transform(&mut self) -> bool {
        if !self.session.has_text() {
            self.input_warning = Some("Please enter some text.".into());
            return false;
        }

        self.input_warning = None;
        self.status_flash = None;

        let request = TransformRequest {
            text: self.session.text.clone(),
            tone: self.session.tone,
            voice: self.session.voice,
        };

        if self.request_tx.try_send(request).is_err() {
            // Channel full means a transform is already queued; the button is
            // disabled while busy so this is effectively unreachable.
            log::warn!("app: transform request dropped, pipeline busy");
            return false;
        }
        true
    }

    // ── File drop handling ───────────────────────────────────────────────

    /// Load the first dropped file into the session (20 MB cap, UTF-8).
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };

        let name = file
            .path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.name.clone());

        let bytes = if let Some(bytes) = file.bytes {
            bytes.to_vec()
        } else if let Some(path) = file.path {
            match std::fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    self.input_warning = Some(format!("Could not read {}: {e}", path.display()));
                    return;
                }
            }
        } else {
            return;
        };

        match self.session.load_file(&name, bytes) {
            Ok(()) => {
                self.input_warning = None;
                log::info!("app: loaded file {name} ({} chars)", self.session.char_count());
            }
            Err(e) => {
                self.input_warning = Some(e.to_string());
            }
        }
    }

    // ── Section renderers ────────────────────────────────────────────────

    /// Input section: drop hint, text editor, char count, Clear.
    fn draw_input_section(&mut self, ui: &mut egui::Ui) {
        ui.heading("Input Your Text");
        ui.label(
            egui::RichText::new("Drag and drop a .txt file here (max 20 MB), or paste below")
                .italics()
                .weak(),
        );

        if let Some(name) = &self.session.file_name {
            ui.label(format!("Loaded: {name}"));
        }

        if let Some(warning) = &self.input_warning {
            ui.colored_label(egui::Color32::from_rgb(255, 136, 68), warning);
        }

        egui::ScrollArea::vertical()
            .id_salt("input_text")
            .max_height(180.0)
            .show(ui, |ui| {
                ui.add_sized(
                    [ui.available_width(), 170.0],
                    egui::TextEdit::multiline(&mut self.session.text)
                        .hint_text("Enter your text here..."),
                );
            });

        ui.horizontal(|ui| {
            ui.label(format!("Characters: {}", self.session.char_count()));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Clear").clicked() {
                    self.session.clear();
                    self.input_warning = None;
                }
            });
        });
    }

    /// Tone and voice radio groups, side by side.
    fn draw_choices(&mut self, ui: &mut egui::Ui) {
        ui.columns(2, |cols| {
            cols[0].heading("Choose Tone");
            for tone in Tone::ALL {
                cols[0].radio_value(&mut self.session.tone, tone, tone.description());
            }

            cols[1].heading("Select Voice");
            for voice in Voice::ALL {
                cols[1].radio_value(&mut self.session.voice, voice, voice.label());
            }
        });
    }

    /// The Transform button and the busy status line.
    fn draw_action(&mut self, ui: &mut egui::Ui, busy: bool, status: &str) {
        ui.horizontal(|ui| {
            let button = egui::Button::new("Transform Text to Audio");
            if ui.add_enabled(!busy, button).clicked() {
                self.submit_transform();
            }

            if busy {
                ui.spinner();
                ui.label(format!("{status}…"));
            }
        });
    }

    /// Original and adapted text, side by side.
    fn draw_texts(&self, ui: &mut egui::Ui, snapshot: &ResultsSnapshot) {
        let (Some(original), Some(adapted)) = (&snapshot.original, &snapshot.adapted) else {
            return;
        };

        ui.separator();

        if let Some(notice) = &snapshot.rewrite_notice {
            ui.colored_label(egui::Color32::from_rgb(255, 136, 68), notice);
        }

        ui.columns(2, |cols| {
            cols[0].heading("Original Text");
            egui::ScrollArea::vertical()
                .id_salt("original_text")
                .max_height(160.0)
                .show(&mut cols[0], |ui| {
                    ui.label(original);
                });

            cols[1].heading(format!("Adapted Text ({})", snapshot.tone.label()));
            egui::ScrollArea::vertical()
                .id_salt("adapted_text")
                .max_height(160.0)
                .show(&mut cols[1], |ui| {
                    ui.label(adapted);
                });
        });
    }

    /// Audio player / export controls, or the single failure message.
    fn draw_audio_section(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, snapshot: &ResultsSnapshot) {
        if snapshot.adapted.is_none() {
            return;
        }

        ui.separator();
        ui.heading("Your Audiobook");

        if !snapshot.has_audio {
            let message = snapshot
                .synthesis_error
                .clone()
                .unwrap_or_else(|| "Failed to generate audio.".into());
            ui.colored_label(egui::Color32::from_rgb(255, 136, 68), message);
            return;
        }

        ui.horizontal(|ui| {
            let playing = self.player.as_ref().is_some_and(AudioPlayer::is_playing);

            if playing {
                if ui.button("Stop").clicked() {
                    if let Some(player) = &mut self.player {
                        player.stop();
                    }
                }
            } else if ui.button("Play").clicked() {
                self.play_audio();
            }

            if ui.button("Save audiobook.mp3").clicked() {
                self.export_audio();
            }

            if ui.button("Copy data URI").clicked() {
                if let Some(bytes) = self.audio_bytes() {
                    ctx.copy_text(audio::data_uri(&bytes));
                    self.status_flash = Some("Data URI copied to clipboard".into());
                }
            }
        });

        if let Some(flash) = &self.status_flash {
            ui.label(egui::RichText::new(flash).weak());
        }
    }

    /// Settings panel: credentials persisted to `settings.toml`.
    fn draw_settings(&mut self, ui: &mut egui::Ui) {
        ui.separator();
        ui.heading("Settings");
        ui.label(
            egui::RichText::new(
                "Environment variables (HUGGINGFACE_API_TOKEN, IBM_TTS_API_KEY, IBM_TTS_URL) \
                 take precedence over these values.",
            )
            .weak(),
        );

        egui::Grid::new("settings_grid").num_columns(2).show(ui, |ui| {
            ui.label("Hugging Face API Token");
            ui.add(
                egui::TextEdit::singleline(&mut self.settings_draft.hf_token).password(true),
            );
            ui.end_row();

            ui.label("IBM TTS API Key");
            ui.add(
                egui::TextEdit::singleline(&mut self.settings_draft.tts_api_key).password(true),
            );
            ui.end_row();

            ui.label("IBM TTS URL");
            ui.text_edit_singleline(&mut self.settings_draft.tts_service_url);
            ui.end_row();
        });

        if ui.button("Save").clicked() {
            let mut config = {
                let st = self.state.lock().unwrap();
                st.config.clone()
            };
            self.settings_draft.apply_to(&mut config);

            match config.save() {
                Ok(()) => {
                    self.status_flash =
                        Some("Settings saved — restart to apply new credentials".into());
                }
                Err(e) => {
                    self.status_flash = Some(format!("Could not save settings: {e}"));
                }
            }
        }
    }

    // ── Audio helpers ────────────────────────────────────────────────────

    /// Clone the audio bytes out of shared state (only done on button click).
    fn audio_bytes(&self) -> Option<Vec<u8>> {
        self.state.lock().unwrap().audio.clone()
    }

    fn play_audio(&mut self) {
        let Some(bytes) = self.audio_bytes() else {
            return;
        };

        if self.player.is_none() {
            match AudioPlayer::new() {
                Ok(player) => self.player = Some(player),
                Err(e) => {
                    self.status_flash = Some(e.to_string());
                    return;
                }
            }
        }

        if let Some(player) = &mut self.player {
            if let Err(e) = player.play(bytes) {
                self.status_flash = Some(e.to_string());
            }
        }
    }

    fn export_audio(&mut self) {
        let Some(bytes) = self.audio_bytes() else {
            return;
        };

        let export_dir = {
            let st = self.state.lock().unwrap();
            st.config
                .ui
                .export_dir
                .clone()
                .unwrap_or_else(|| AppPaths::new().export_dir)
        };

        match audio::write_audiobook(&export_dir, &bytes) {
            Ok(path) => {
                self.status_flash = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                self.status_flash = Some(format!("Could not save audiobook: {e}"));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Per-frame results snapshot
// ---------------------------------------------------------------------------

/// Cheap copy of the display fields, taken under one short lock per frame.
/// The audio bytes themselves stay in shared state until a button needs them.
struct ResultsSnapshot {
    busy: bool,
    status: &'static str,
    tone: Tone,
    original: Option<String>,
    adapted: Option<String>,
    rewrite_notice: Option<String>,
    has_audio: bool,
    synthesis_error: Option<String>,
}

impl ResultsSnapshot {
    fn take(state: &SharedState) -> Self {
        let st = state.lock().unwrap();
        Self {
            busy: st.pipeline.is_busy(),
            status: st.pipeline.label(),
            tone: st.tone,
            original: st.original_text.clone(),
            adapted: st.adapted_text.clone(),
            rewrite_notice: st.rewrite_notice.clone(),
            has_audio: st.audio.is_some(),
            synthesis_error: st.synthesis_error.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for EchoVerseApp {
    /// Called every frame by eframe.  Handles file drops, reads the shared
    /// state once, then renders all sections.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        let snapshot = ResultsSnapshot::take(&self.state);

        // Keep polling the orchestrator while a transform is in flight.
        if snapshot.busy {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("EchoVerse");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Settings").clicked() {
                            self.show_settings = !self.show_settings;
                        }
                    });
                });
                ui.label("Transform your text into expressive audiobooks with AI-powered tone adaptation");
                ui.separator();

                self.draw_input_section(ui);
                ui.separator();
                self.draw_choices(ui);
                ui.separator();
                self.draw_action(ui, snapshot.busy, snapshot.status);

                self.draw_texts(ui, &snapshot);
                self.draw_audio_section(ui, ctx, &snapshot);

                if self.show_settings {
                    self.draw_settings(ui);
                }
            });
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(player) = &mut self.player {
            player.stop();
        }
        log::info!("EchoVerse closing");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::new_shared_state;

    fn make_app() -> (EchoVerseApp, mpsc::Receiver<TransformRequest>) {
        let config = AppConfig::default();
        let state = new_shared_state(config.clone());
        let (tx, rx) = mpsc::channel(4);
        (EchoVerseApp::new(state, tx, &config), rx)
    }

    #[test]
    fn empty_text_submit_sends_nothing_and_warns() {
        let (mut app, mut rx) = make_app();
        app.session.text = "   \n\t".into();

        assert!(!app.submit_transform());
        assert!(app.input_warning.is_some());
        assert!(rx.try_recv().is_err(), "no request may be sent");
    }

    #[test]
    fn non_empty_text_submit_sends_one_request() {
        let (mut app, mut rx) = make_app();
        app.session.text = "Hello world".into();
        app.session.tone = Tone::Suspenseful;
        app.session.voice = Voice::Michael;

        assert!(app.submit_transform());
        assert!(app.input_warning.is_none());

        let request = rx.try_recv().expect("one request");
        assert_eq!(request.text, "Hello world");
        assert_eq!(request.tone, Tone::Suspenseful);
        assert_eq!(request.voice, Voice::Michael);
        assert!(rx.try_recv().is_err(), "exactly one request");
    }

    #[test]
    fn settings_draft_maps_empty_fields_to_none() {
        let mut config = AppConfig::default();
        config.rewrite.api_token = Some("old".into());

        let draft = SettingsDraft {
            hf_token: "  ".into(),
            tts_api_key: "key".into(),
            tts_service_url: "https://example.com".into(),
        };
        draft.apply_to(&mut config);

        assert!(config.rewrite.api_token.is_none());
        assert_eq!(config.tts.api_key.as_deref(), Some("key"));
        assert_eq!(
            config.tts.service_url.as_deref(),
            Some("https://example.com")
        );
    }

    #[test]
    fn settings_draft_round_trips_from_config() {
        let mut config = AppConfig::default();
        config.rewrite.api_token = Some("hf".into());
        config.tts.api_key = Some("key".into());
        config.tts.service_url = Some("https://example.com".into());

        let draft = SettingsDraft::from_config(&config);
        assert_eq!(draft.hf_token, "hf");
        assert_eq!(draft.tts_api_key, "key");
        assert_eq!(draft.tts_service_url, "https://example.com");
    }
}
