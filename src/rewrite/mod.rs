//! Tone-rewrite module for EchoVerse.
//!
//! This module provides:
//! * [`ToneRewriter`] — async trait implemented by all rewriter backends.
//! * [`GraniteRewriter`] — hosted-inference rewriter (HF Inference API).
//! * [`PromptBuilder`] — builds the Granite chat-template prompt.
//! * [`Tone`] — the fixed tone enumeration.
//! * [`RewriteError`] — classified error variants for rewrite operations.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use echoverse::config::AppConfig;
//! use echoverse::rewrite::{GraniteRewriter, Tone, ToneRewriter};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let rewriter = GraniteRewriter::from_config(&config.rewrite);
//!
//!     // The pipeline treats any Err as "use the original text".
//!     match rewriter.rewrite("Hello world", Tone::Inspiring).await {
//!         Ok(adapted) => println!("{adapted}"),
//!         Err(e) => println!("pass-through: {e}"),
//!     }
//! }
//! ```

pub mod client;
pub mod prompt;
pub mod tone;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{GraniteRewriter, RewriteError, ToneRewriter};
pub use prompt::PromptBuilder;
pub use tone::Tone;
