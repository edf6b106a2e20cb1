//! Configuration module for EchoVerse.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the rewrite and
//! text-to-speech clients, `AppPaths` for cross-platform data directories,
//! and TOML persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    AppConfig, RewriteConfig, TtsConfig, UiConfig, ENV_HF_TOKEN, ENV_TTS_API_KEY, ENV_TTS_URL,
};
