#![forbid(unsafe_code)]

//! Default Config Provider.
//!
//! Baseline catalog and copy used when the host omits them. Every call
//! returns a fresh value; nothing here is shared mutable state.

use serde::{Deserialize, Serialize};

use crate::catalog::{EmojiCatalog, EmojiEntry};

/// Maximum stored length of written feedback, in characters.
pub const FEEDBACK_MAX_CHARS: usize = 500;

/// Rendered when any dispatch of a submission fails.
pub const ERROR_MESSAGE: &str = "Our servers are having some issues. Please vote again later.";

pub const DEFAULT_INTRO_TEXT: &str = "How do you feel about this page?";
pub const DEFAULT_FEEDBACK_PROMPT: &str = "Tell us more about your experience";
pub const DEFAULT_THANK_YOU_TEXT: &str = "Your feedback has been recorded.";

const DEFAULT_EMOJIS: [(&str, &str); 5] = [
    ("😁", "beaming face with smiling eyes"),
    ("😀", "grinning face"),
    ("😐", "neutral face"),
    ("😕", "confused face"),
    ("😞", "disappointed face"),
];

/// Static copy shown by one instance. Immutable after `init`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayText {
    pub intro_text: String,
    pub feedback_prompt: String,
    pub thank_you_text: String,
}

impl Default for DisplayText {
    fn default() -> Self {
        Self {
            intro_text: DEFAULT_INTRO_TEXT.to_owned(),
            feedback_prompt: DEFAULT_FEEDBACK_PROMPT.to_owned(),
            thank_you_text: DEFAULT_THANK_YOU_TEXT.to_owned(),
        }
    }
}

/// The five stock reactions, happiest first.
#[must_use]
pub fn default_emojis() -> Vec<EmojiEntry> {
    DEFAULT_EMOJIS
        .iter()
        .map(|(icon, label)| EmojiEntry::new(*icon, *label))
        .collect()
}

/// [`default_emojis`] as a validated catalog.
#[must_use]
pub fn default_catalog() -> EmojiCatalog {
    // Stock labels are distinct and non-empty.
    EmojiCatalog::new(default_emojis()).unwrap_or_default()
}
