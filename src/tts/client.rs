//! Core `SpeechSynthesizer` trait and `WatsonTts` implementation.
//!
//! `WatsonTts` calls the Watson Text-to-Speech REST API:
//! POST `{service_url}/v1/synthesize?voice={id}` with basic auth
//! (`apikey` user), JSON body `{"text": …}`, header `Accept: audio/mp3`.
//! The response body is the raw MP3 byte stream.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::TtsConfig;

/// MIME type requested from (and produced by) the synthesis service.
pub const AUDIO_MIME: &str = "audio/mp3";

// ---------------------------------------------------------------------------
// TtsError
// ---------------------------------------------------------------------------

/// Errors that can occur during speech synthesis.
///
/// All variants end the same way for the user: no audio for this transform,
/// with the display text shown in place of the player.
#[derive(Debug, Error)]
pub enum TtsError {
    /// API key or service URL is not configured — no network call attempted.
    #[error(
        "IBM_TTS_API_KEY or IBM_TTS_URL not set. Please configure environment \
         variables or enter them in the settings panel."
    )]
    MissingCredentials,

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("synthesis request timed out")]
    Timeout,

    /// The service answered with a non-success status code.
    #[error("synthesis service returned HTTP {status}: {body}")]
    Service { status: u16, body: String },

    /// The audio body could not be read.
    #[error("failed to read audio response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for TtsError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TtsError::Timeout
        } else if e.is_connect() {
            TtsError::Request(format!("cannot connect to TTS service: {e}"))
        } else {
            TtsError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechSynthesizer trait
// ---------------------------------------------------------------------------

/// Async trait for text-to-speech synthesis.
///
/// # Arguments
/// * `text`     – The (already rewritten) text to speak.
/// * `voice_id` – Backend voice identifier (e.g. `en-US_LisaV3Voice`).
///
/// Returns the MP3-encoded audio bytes on success.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, TtsError>;
}

// ---------------------------------------------------------------------------
// WatsonTts
// ---------------------------------------------------------------------------

/// Synthesis request body (JSON).
#[derive(Debug, Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
}

/// Resolved credential pair.  Absent when either half is missing.
#[derive(Debug, Clone)]
struct Credentials {
    api_key: String,
    service_url: String,
}

/// Watson Text-to-Speech REST client.
///
/// # Credentials
/// API key and service URL are resolved once at construction time
/// ([`TtsConfig::effective_api_key`] / [`TtsConfig::effective_service_url`]:
/// env vars win over stored values).  When either is missing,
/// [`synthesize`](SpeechSynthesizer::synthesize) returns
/// [`TtsError::MissingCredentials`] without attempting a network call.
pub struct WatsonTts {
    client: reqwest::Client,
    credentials: Option<Credentials>,
}

impl WatsonTts {
    /// Build a `WatsonTts` from application config.
    pub fn from_config(config: &TtsConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let credentials = match (config.effective_api_key(), config.effective_service_url()) {
            (Some(api_key), Some(service_url)) => Some(Credentials {
                api_key,
                service_url,
            }),
            _ => None,
        };

        Self {
            client,
            credentials,
        }
    }

    /// `true` when both credentials were resolved at construction.
    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    fn synthesize_url(service_url: &str) -> String {
        format!("{}/v1/synthesize", service_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SpeechSynthesizer for WatsonTts {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, TtsError> {
        let creds = self
            .credentials
            .as_ref()
            .ok_or(TtsError::MissingCredentials)?;

        log::debug!(
            "tts: synthesize request (voice={voice_id}, text_len={})",
            text.len()
        );

        let response = self
            .client
            .post(Self::synthesize_url(&creds.service_url))
            .query(&[("voice", voice_id)])
            .basic_auth("apikey", Some(&creds.api_key))
            .header(reqwest::header::ACCEPT, AUDIO_MIME)
            .json(&SynthesizeRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TtsError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| TtsError::InvalidResponse(e.to_string()))?
            .to_vec();

        log::debug!("tts: received {} bytes of audio", audio.len());
        Ok(audio)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config(api_key: Option<&str>, service_url: Option<&str>) -> TtsConfig {
        TtsConfig {
            api_key: api_key.map(|s| s.to_string()),
            service_url: service_url.map(|s| s.to_string()),
            ..TtsConfig::default()
        }
    }

    #[tokio::test]
    async fn successful_synthesis_returns_raw_bytes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/synthesize")
            .match_query(mockito::Matcher::UrlEncoded(
                "voice".into(),
                "en-US_LisaV3Voice".into(),
            ))
            .match_header("accept", "audio/mp3")
            .with_status(200)
            .with_body(b"ID3...mp3bytes".as_slice())
            .create_async()
            .await;

        let tts = WatsonTts::from_config(&make_config(Some("key"), Some(&server.url())));
        let audio = tts
            .synthesize("Hello, world!", "en-US_LisaV3Voice")
            .await
            .unwrap();

        assert_eq!(audio, b"ID3...mp3bytes");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn request_body_carries_the_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/synthesize")
            .match_query(mockito::Matcher::Any)
            .match_body(mockito::Matcher::Json(
                serde_json::json!({"text": "Say this"}),
            ))
            .with_status(200)
            .with_body(b"mp3".as_slice())
            .create_async()
            .await;

        let tts = WatsonTts::from_config(&make_config(Some("key"), Some(&server.url())));
        tts.synthesize("Say this", "en-US_MichaelV3Voice")
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_api_key_skips_the_network_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/synthesize")
            .match_query(mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let tts = WatsonTts::from_config(&make_config(None, Some(&server.url())));
        let err = tts
            .synthesize("text", "en-US_LisaV3Voice")
            .await
            .unwrap_err();

        assert!(matches!(err, TtsError::MissingCredentials));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_service_url_is_also_missing_credentials() {
        let tts = WatsonTts::from_config(&make_config(Some("key"), None));
        let err = tts
            .synthesize("text", "en-US_LisaV3Voice")
            .await
            .unwrap_err();

        assert!(matches!(err, TtsError::MissingCredentials));
        assert!(!tts.is_configured());
    }

    #[tokio::test]
    async fn service_error_status_is_classified() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/synthesize")
            .match_query(mockito::Matcher::Any)
            .with_status(401)
            .with_body("invalid api key")
            .create_async()
            .await;

        let tts = WatsonTts::from_config(&make_config(Some("bad"), Some(&server.url())));
        let err = tts
            .synthesize("text", "en-US_LisaV3Voice")
            .await
            .unwrap_err();

        match err {
            TtsError::Service { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid api key");
            }
            other => panic!("expected Service error, got {other:?}"),
        }
    }

    #[test]
    fn synthesize_url_handles_trailing_slash() {
        assert_eq!(
            WatsonTts::synthesize_url("https://api.example.com/"),
            "https://api.example.com/v1/synthesize"
        );
        assert_eq!(
            WatsonTts::synthesize_url("https://api.example.com"),
            "https://api.example.com/v1/synthesize"
        );
    }

    /// Verify that `WatsonTts` is object-safe (usable as `dyn SpeechSynthesizer`).
    #[test]
    fn synthesizer_is_object_safe() {
        let tts: Box<dyn SpeechSynthesizer> =
            Box::new(WatsonTts::from_config(&make_config(None, None)));
        drop(tts);
    }
}
