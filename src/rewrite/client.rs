//! Core `ToneRewriter` trait and `GraniteRewriter` implementation.
//!
//! `GraniteRewriter` calls a hosted text-generation inference endpoint
//! (IBM Granite on the Hugging Face Inference API by default). All connection
//! details and generation parameters come from [`RewriteConfig`]; nothing is
//! hardcoded.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::RewriteConfig;
use crate::rewrite::prompt::PromptBuilder;
use crate::rewrite::Tone;

// ---------------------------------------------------------------------------
// RewriteError
// ---------------------------------------------------------------------------

/// Errors that can occur during a tone rewrite.
///
/// Every failure here degrades to pass-through at the pipeline level: the
/// original text is used and the error's display text is shown to the user.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// No API token is configured — the network call is skipped entirely.
    #[error("HUGGINGFACE_API_TOKEN is not set. Returning original text.")]
    MissingToken,

    /// HTTP transport or connection error.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("rewrite request timed out")]
    Timeout,

    /// The endpoint answered with a non-success status code.
    #[error("rewrite endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The HTTP response could not be parsed as JSON.
    #[error("failed to parse rewrite response: {0}")]
    Parse(String),

    /// The response was valid JSON but carried no `generated_text` field in
    /// either accepted shape.
    #[error("rewrite response carried no generated text")]
    MalformedResponse,
}

impl From<reqwest::Error> for RewriteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RewriteError::Timeout
        } else {
            RewriteError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// ToneRewriter trait
// ---------------------------------------------------------------------------

/// Async trait for tone-adjusted text rewriting.
///
/// Implementors must be `Send + Sync` so they can be shared across threads
/// (e.g. wrapped in `Arc<dyn ToneRewriter>`).
#[async_trait]
pub trait ToneRewriter: Send + Sync {
    async fn rewrite(&self, text: &str, tone: Tone) -> Result<String, RewriteError>;
}

// ---------------------------------------------------------------------------
// Response extraction
// ---------------------------------------------------------------------------

/// Pull the generated text out of an inference response.
///
/// The hosted endpoint has been observed to answer in two shapes — a list of
/// objects and a single object — each carrying a `generated_text` string.
/// Both are accepted and neither is treated as authoritative. Surrounding
/// whitespace is trimmed.
pub(crate) fn extract_generated_text(value: &serde_json::Value) -> Option<String> {
    let field = match value {
        serde_json::Value::Array(items) => items.first()?.get("generated_text")?,
        serde_json::Value::Object(_) => value.get("generated_text")?,
        _ => return None,
    };
    field.as_str().map(|s| s.trim().to_string())
}

// ---------------------------------------------------------------------------
// GraniteRewriter
// ---------------------------------------------------------------------------

/// Calls a hosted text-generation inference endpoint with the Granite chat
/// template.
///
/// # Credentials
/// The bearer token is resolved once at construction time
/// ([`RewriteConfig::effective_token`]: env var wins over the stored value).
/// When no token is available, [`rewrite`](ToneRewriter::rewrite) returns
/// [`RewriteError::MissingToken`] without attempting a network call.
pub struct GraniteRewriter {
    client: reqwest::Client,
    config: RewriteConfig,
    token: Option<String>,
    prompt_builder: PromptBuilder,
}

impl GraniteRewriter {
    /// Build a `GraniteRewriter` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`.  A default (no-timeout) client is used as a
    /// last-resort fallback if the builder fails (should never happen in
    /// practice).
    pub fn from_config(config: &RewriteConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let token = config.effective_token();

        Self {
            client,
            config: config.clone(),
            token,
            prompt_builder: PromptBuilder::new(),
        }
    }

    /// `true` when a bearer token was resolved at construction.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

#[async_trait]
impl ToneRewriter for GraniteRewriter {
    async fn rewrite(&self, text: &str, tone: Tone) -> Result<String, RewriteError> {
        let token = self.token.as_deref().ok_or(RewriteError::MissingToken)?;

        let prompt = self.prompt_builder.build(text, tone);

        let body = serde_json::json!({
            "inputs": prompt,
            "parameters": {
                "max_new_tokens":     self.config.max_new_tokens,
                "temperature":        self.config.temperature,
                "top_p":              self.config.top_p,
                "repetition_penalty": self.config.repetition_penalty,
                "return_full_text":   false
            }
        });

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RewriteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| RewriteError::Parse(e.to_string()))?;

        extract_generated_text(&json).ok_or(RewriteError::MalformedResponse)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RewriteConfig;

    fn make_config(endpoint: &str, api_token: Option<&str>) -> RewriteConfig {
        RewriteConfig {
            endpoint: endpoint.into(),
            api_token: api_token.map(|s| s.to_string()),
            ..RewriteConfig::default()
        }
    }

    // -----------------------------------------------------------------------
    // extract_generated_text
    // -----------------------------------------------------------------------

    #[test]
    fn extract_handles_list_shape_and_trims() {
        let json = serde_json::json!([{"generated_text": "  Hello, world!  "}]);
        assert_eq!(
            extract_generated_text(&json).as_deref(),
            Some("Hello, world!")
        );
    }

    #[test]
    fn extract_handles_object_shape_and_trims() {
        let json = serde_json::json!({"generated_text": "\nAdapted.\n"});
        assert_eq!(extract_generated_text(&json).as_deref(), Some("Adapted."));
    }

    #[test]
    fn extract_rejects_list_without_field() {
        let json = serde_json::json!([{"other": "x"}]);
        assert!(extract_generated_text(&json).is_none());
    }

    #[test]
    fn extract_rejects_empty_list() {
        let json = serde_json::json!([]);
        assert!(extract_generated_text(&json).is_none());
    }

    #[test]
    fn extract_rejects_object_without_field() {
        let json = serde_json::json!({"error": "loading"});
        assert!(extract_generated_text(&json).is_none());
    }

    #[test]
    fn extract_rejects_non_string_field() {
        let json = serde_json::json!({"generated_text": 42});
        assert!(extract_generated_text(&json).is_none());
    }

    #[test]
    fn extract_rejects_scalar_value() {
        let json = serde_json::json!("just a string");
        assert!(extract_generated_text(&json).is_none());
    }

    // -----------------------------------------------------------------------
    // GraniteRewriter over a mock server
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn list_shaped_response_is_extracted() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header("authorization", "Bearer hf_test")
            .with_status(200)
            .with_body(r#"[{"generated_text": " Hello, world! "}]"#)
            .create_async()
            .await;

        let rewriter = GraniteRewriter::from_config(&make_config(&server.url(), Some("hf_test")));
        let result = rewriter.rewrite("Hello world", Tone::Neutral).await.unwrap();

        assert_eq!(result, "Hello, world!");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn object_shaped_response_is_extracted() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{"generated_text": "Rewritten."}"#)
            .create_async()
            .await;

        let rewriter = GraniteRewriter::from_config(&make_config(&server.url(), Some("hf_test")));
        let result = rewriter.rewrite("text", Tone::Inspiring).await.unwrap();

        assert_eq!(result, "Rewritten.");
    }

    #[tokio::test]
    async fn request_carries_prompt_and_generation_parameters() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_request(|req| {
                let body: serde_json::Value =
                    serde_json::from_slice(req.body().unwrap()).expect("json body");
                let inputs = body["inputs"].as_str().unwrap_or_default();
                inputs.contains("Tone: Suspenseful")
                    && inputs.contains("The storm approached")
                    && body["parameters"]["max_new_tokens"] == 500
                    && body["parameters"]["temperature"] == 0.7
                    && body["parameters"]["top_p"] == 0.9
                    && body["parameters"]["repetition_penalty"] == 1.05
                    && body["parameters"]["return_full_text"] == false
            })
            .with_status(200)
            .with_body(r#"[{"generated_text": "ok"}]"#)
            .create_async()
            .await;

        let rewriter = GraniteRewriter::from_config(&make_config(&server.url(), Some("hf_test")));
        rewriter
            .rewrite("The storm approached", Tone::Suspenseful)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_token_skips_the_network_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .expect(0)
            .with_status(200)
            .with_body(r#"[{"generated_text": "never"}]"#)
            .create_async()
            .await;

        let rewriter = GraniteRewriter::from_config(&make_config(&server.url(), None));
        let err = rewriter.rewrite("text", Tone::Neutral).await.unwrap_err();

        assert!(matches!(err, RewriteError::MissingToken));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn response_without_expected_field_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{"estimated_time": 20.0}"#)
            .create_async()
            .await;

        let rewriter = GraniteRewriter::from_config(&make_config(&server.url(), Some("hf_test")));
        let err = rewriter.rewrite("text", Tone::Neutral).await.unwrap_err();

        assert!(matches!(err, RewriteError::MalformedResponse));
    }

    #[tokio::test]
    async fn non_success_status_is_classified() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(503)
            .with_body("model loading")
            .create_async()
            .await;

        let rewriter = GraniteRewriter::from_config(&make_config(&server.url(), Some("hf_test")));
        let err = rewriter.rewrite("text", Tone::Neutral).await.unwrap_err();

        match err {
            RewriteError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "model loading");
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_a_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body("<html>gateway error</html>")
            .create_async()
            .await;

        let rewriter = GraniteRewriter::from_config(&make_config(&server.url(), Some("hf_test")));
        let err = rewriter.rewrite("text", Tone::Neutral).await.unwrap_err();

        assert!(matches!(err, RewriteError::Parse(_)));
    }

    /// Verify that `GraniteRewriter` is object-safe (usable as `dyn ToneRewriter`).
    #[test]
    fn rewriter_is_object_safe() {
        let config = make_config("http://localhost:9", None);
        let rewriter: Box<dyn ToneRewriter> = Box::new(GraniteRewriter::from_config(&config));
        drop(rewriter);
    }
}
