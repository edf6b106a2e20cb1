//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.
//!
//! # Credential resolution
//!
//! Credentials can come from two places, in priority order:
//!
//! 1. Environment variables (`HUGGINGFACE_API_TOKEN`, `IBM_TTS_API_KEY`,
//!    `IBM_TTS_URL`) — always win when set and non-empty.
//! 2. Values stored in `settings.toml`, editable via the in-app settings
//!    panel.
//!
//! The `effective_*` accessors apply this precedence; empty strings count as
//! unset in both sources.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

/// Environment variable holding the Hugging Face Inference API token.
pub const ENV_HF_TOKEN: &str = "HUGGINGFACE_API_TOKEN";
/// Environment variable holding the Watson TTS API key.
pub const ENV_TTS_API_KEY: &str = "IBM_TTS_API_KEY";
/// Environment variable holding the Watson TTS service base URL.
pub const ENV_TTS_URL: &str = "IBM_TTS_URL";

/// Pick the environment value when present and non-empty, otherwise the
/// stored value, treating empty strings as unset.
fn overlay(env_value: Option<String>, stored: Option<&String>) -> Option<String> {
    env_value
        .filter(|s| !s.is_empty())
        .or_else(|| stored.cloned().filter(|s| !s.is_empty()))
}

// ---------------------------------------------------------------------------
// RewriteConfig
// ---------------------------------------------------------------------------

/// Settings for the tone-rewrite step (Granite via the HF Inference API).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteConfig {
    /// Full URL of the hosted inference endpoint.
    pub endpoint: String,
    /// Bearer token for the Inference API — `None` means rewriting is skipped
    /// and the original text passes through unchanged.
    pub api_token: Option<String>,
    /// Upper bound on newly generated tokens per request.
    pub max_new_tokens: u32,
    /// Sampling temperature (0.0 – 1.0).
    pub temperature: f32,
    /// Nucleus sampling threshold.
    pub top_p: f32,
    /// Repetition penalty applied during generation.
    pub repetition_penalty: f32,
    /// Maximum seconds to wait for a rewrite response before timing out.
    pub timeout_secs: u64,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            endpoint:
                "https://api-inference.huggingface.co/models/ibm-granite/granite-8b-instruct"
                    .into(),
            api_token: None,
            max_new_tokens: 500,
            temperature: 0.7,
            top_p: 0.9,
            repetition_penalty: 1.05,
            timeout_secs: 60,
        }
    }
}

impl RewriteConfig {
    /// The token to authenticate with, env var first, stored value second.
    pub fn effective_token(&self) -> Option<String> {
        overlay(std::env::var(ENV_HF_TOKEN).ok(), self.api_token.as_ref())
    }
}

// ---------------------------------------------------------------------------
// TtsConfig
// ---------------------------------------------------------------------------

/// Settings for the Watson Text-to-Speech step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    /// Watson service API key — `None` means synthesis is unavailable.
    pub api_key: Option<String>,
    /// Watson service base URL (instance-specific) — `None` means synthesis
    /// is unavailable.
    pub service_url: Option<String>,
    /// Maximum seconds to wait for a synthesis response before timing out.
    pub timeout_secs: u64,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            service_url: None,
            timeout_secs: 30,
        }
    }
}

impl TtsConfig {
    /// The API key to authenticate with, env var first, stored value second.
    pub fn effective_api_key(&self) -> Option<String> {
        overlay(std::env::var(ENV_TTS_API_KEY).ok(), self.api_key.as_ref())
    }

    /// The service base URL, env var first, stored value second.
    pub fn effective_service_url(&self) -> Option<String> {
        overlay(std::env::var(ENV_TTS_URL).ok(), self.service_url.as_ref())
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Window and export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Last saved window size `(w, h)` in logical pixels.  `None` means use
    /// the built-in default size on first launch.
    pub window_size: Option<(f32, f32)>,
    /// Directory that exported `audiobook.mp3` files are written to.  `None`
    /// means the platform download directory.
    pub export_dir: Option<PathBuf>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_size: None,
            export_dir: None,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use echoverse::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Tone-rewrite settings.
    pub rewrite: RewriteConfig,
    /// Speech-synthesis settings.
    pub tts: TtsConfig,
    /// Window / export settings.
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns `true` when no `settings.toml` file exists yet.
    pub fn is_first_run() -> bool {
        !AppPaths::new().settings_file.exists()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Verify that a default `AppConfig` can be serialised to TOML and
    /// deserialised back without any data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        // RewriteConfig
        assert_eq!(original.rewrite.endpoint, loaded.rewrite.endpoint);
        assert_eq!(original.rewrite.api_token, loaded.rewrite.api_token);
        assert_eq!(original.rewrite.max_new_tokens, loaded.rewrite.max_new_tokens);
        assert_eq!(original.rewrite.temperature, loaded.rewrite.temperature);
        assert_eq!(original.rewrite.top_p, loaded.rewrite.top_p);
        assert_eq!(
            original.rewrite.repetition_penalty,
            loaded.rewrite.repetition_penalty
        );
        assert_eq!(original.rewrite.timeout_secs, loaded.rewrite.timeout_secs);

        // TtsConfig
        assert_eq!(original.tts.api_key, loaded.tts.api_key);
        assert_eq!(original.tts.service_url, loaded.tts.service_url);
        assert_eq!(original.tts.timeout_secs, loaded.tts.timeout_secs);

        // UiConfig
        assert_eq!(original.ui.window_size, loaded.ui.window_size);
        assert_eq!(original.ui.export_dir, loaded.ui.export_dir);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.rewrite.endpoint, default.rewrite.endpoint);
        assert_eq!(config.tts.timeout_secs, default.tts.timeout_secs);
        assert_eq!(config.ui.window_size, default.ui.window_size);
    }

    /// Verify default values match the design.
    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert!(cfg
            .rewrite
            .endpoint
            .contains("ibm-granite/granite-8b-instruct"));
        assert!(cfg.rewrite.api_token.is_none());
        assert_eq!(cfg.rewrite.max_new_tokens, 500);
        assert_eq!(cfg.rewrite.temperature, 0.7);
        assert_eq!(cfg.rewrite.top_p, 0.9);
        assert_eq!(cfg.rewrite.repetition_penalty, 1.05);
        assert_eq!(cfg.rewrite.timeout_secs, 60);

        assert!(cfg.tts.api_key.is_none());
        assert!(cfg.tts.service_url.is_none());
        assert_eq!(cfg.tts.timeout_secs, 30);
    }

    /// Verify that modified non-default values survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.rewrite.api_token = Some("hf_test".into());
        cfg.rewrite.endpoint = "http://localhost:8080/granite".into();
        cfg.rewrite.timeout_secs = 90;
        cfg.tts.api_key = Some("watson-key".into());
        cfg.tts.service_url = Some("https://api.eu-gb.text-to-speech.watson.cloud.ibm.com".into());
        cfg.ui.window_size = Some((800.0, 600.0));
        cfg.ui.export_dir = Some(PathBuf::from("/tmp/audiobooks"));

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.rewrite.api_token, Some("hf_test".into()));
        assert_eq!(loaded.rewrite.endpoint, "http://localhost:8080/granite");
        assert_eq!(loaded.rewrite.timeout_secs, 90);
        assert_eq!(loaded.tts.api_key, Some("watson-key".into()));
        assert_eq!(
            loaded.tts.service_url.as_deref(),
            Some("https://api.eu-gb.text-to-speech.watson.cloud.ibm.com")
        );
        assert_eq!(loaded.ui.window_size, Some((800.0, 600.0)));
        assert_eq!(loaded.ui.export_dir, Some(PathBuf::from("/tmp/audiobooks")));
    }

    // ---- overlay (env precedence) ---

    #[test]
    fn overlay_prefers_env_value() {
        let stored = Some("stored".to_string());
        assert_eq!(
            overlay(Some("from-env".into()), stored.as_ref()),
            Some("from-env".into())
        );
    }

    #[test]
    fn overlay_falls_back_to_stored() {
        let stored = Some("stored".to_string());
        assert_eq!(overlay(None, stored.as_ref()), Some("stored".into()));
    }

    #[test]
    fn overlay_treats_empty_env_as_unset() {
        let stored = Some("stored".to_string());
        assert_eq!(
            overlay(Some(String::new()), stored.as_ref()),
            Some("stored".into())
        );
    }

    #[test]
    fn overlay_treats_empty_stored_as_unset() {
        let stored = Some(String::new());
        assert_eq!(overlay(None, stored.as_ref()), None);
    }

    #[test]
    fn overlay_none_when_both_missing() {
        assert_eq!(overlay(None, None), None);
    }
}
