//! Synthesis voice selection.

use serde::{Deserialize, Serialize};

/// Fixed set of Watson voices offered in the UI.
///
/// Each descriptive label maps to a fixed backend voice identifier string;
/// the identifier is what the synthesis request carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Voice {
    /// Warm female voice.
    Lisa,
    /// Authoritative male voice.
    Michael,
    /// Friendly female voice.
    Allison,
}

impl Voice {
    /// All selectable voices, in UI display order.
    pub const ALL: [Voice; 3] = [Voice::Lisa, Voice::Michael, Voice::Allison];

    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            Voice::Lisa => "Lisa",
            Voice::Michael => "Michael",
            Voice::Allison => "Allison",
        }
    }

    /// Long descriptive label shown in the voice radio group.
    pub fn label(&self) -> &'static str {
        match self {
            Voice::Lisa => "Lisa - Warm female voice",
            Voice::Michael => "Michael - Authoritative male voice",
            Voice::Allison => "Allison - Friendly female voice",
        }
    }

    /// Backend voice identifier sent to the synthesis service.
    pub fn backend_id(&self) -> &'static str {
        match self {
            Voice::Lisa => "en-US_LisaV3Voice",
            Voice::Michael => "en-US_MichaelV3Voice",
            Voice::Allison => "en-US_AllisonV3Voice",
        }
    }

    /// Resolve a descriptive UI label (or its name prefix) back to a voice.
    pub fn from_label(label: &str) -> Option<Voice> {
        let name = label.split(" - ").next()?.trim();
        Voice::ALL.into_iter().find(|v| v.name() == name)
    }
}

impl Default for Voice {
    fn default() -> Self {
        Voice::Lisa
    }
}

impl std::fmt::Display for Voice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
