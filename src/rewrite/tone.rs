//! Narration tone selection.

use serde::{Deserialize, Serialize};

/// Fixed set of tones the rewrite step can target.
///
/// The short label is embedded into the rewrite prompt; the descriptive
/// label is what the radio group shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    /// Professional and clear narration.
    Neutral,
    /// Dramatic and engaging delivery.
    Suspenseful,
    /// Motivational and uplifting tone.
    Inspiring,
}

impl Tone {
    /// All selectable tones, in UI display order.
    pub const ALL: [Tone; 3] = [Tone::Neutral, Tone::Suspenseful, Tone::Inspiring];

    /// Short label used in the prompt and result heading.
    pub fn label(&self) -> &'static str {
        match self {
            Tone::Neutral => "Neutral",
            Tone::Suspenseful => "Suspenseful",
            Tone::Inspiring => "Inspiring",
        }
    }

    /// Long descriptive label shown in the tone radio group.
    pub fn description(&self) -> &'static str {
        match self {
            Tone::Neutral => "Neutral - Professional and clear narration",
            Tone::Suspenseful => "Suspenseful - Dramatic and engaging delivery",
            Tone::Inspiring => "Inspiring - Motivational and uplifting tone",
        }
    }
}

impl Default for Tone {
    fn default() -> Self {
        Tone::Neutral
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
