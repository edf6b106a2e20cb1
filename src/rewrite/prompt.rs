//! Prompt builder for tone-adjusted rewriting.
//!
//! [`PromptBuilder::build`] produces a single flat prompt string in the
//! Granite instruct chat template (`<|system|>` / `<|user|>` /
//! `<|assistant|>`), which is what the hosted Inference API expects in the
//! `inputs` field.

use crate::rewrite::Tone;

// ---------------------------------------------------------------------------
// System instruction
// ---------------------------------------------------------------------------

/// Fixed editor instruction: change the tone, never the facts.
const SYSTEM_INSTRUCTION: &str = "\
You are an expert editor. Rewrite user text in the requested tone while preserving factual meaning, \
keeping names/dates intact, improving clarity and flow, and enhancing expressiveness. \
Do not add new facts. Keep the output roughly the same length as the input.";

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds rewrite prompts in the Granite chat-template format.
///
/// # Example
/// ```rust
/// use echoverse::rewrite::{PromptBuilder, Tone};
///
/// let prompt = PromptBuilder::new().build("Hello world", Tone::Neutral);
/// assert!(prompt.contains("Tone: Neutral"));
/// assert!(prompt.contains("Hello world"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the flat prompt string sent as the `inputs` field.
    ///
    /// Structure (in order):
    /// 1. `<|system|>` — the fixed editor instruction.
    /// 2. `<|user|>` — the tone label and the text to rewrite.
    /// 3. `<|assistant|>` — generation cue; the model continues from here.
    pub fn build(&self, text: &str, tone: Tone) -> String {
        let user = format!("Tone: {}\n\nText:\n{}", tone.label(), text);

        format!(
            "<|system|>\n{}\n<|user|>\n{}\n<|assistant|>\n",
            SYSTEM_INSTRUCTION, user
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
