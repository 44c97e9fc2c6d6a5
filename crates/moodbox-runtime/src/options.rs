#![forbid(unsafe_code)]

//! Host options for `init`.
//!
//! Everything here is optional; unset fields fall back to
//! [`moodbox_core::defaults`]. Each instance resolves its own copy, so two
//! widgets built from the same options never share storage.
//!
//! # Loading
//!
//! ```toml
//! introText = "Was this page useful?"
//! feedbackThankYou = "Thanks!"
//!
//! [[emojis]]
//! icon = "👍"
//! label = "thumbs up"
//!
//! [context]
//! object = "docs/install"
//! question = "Was this page useful?"
//! ```
//!
//! ```rust,ignore
//! let options = WidgetOptions::from_toml_file("moodbox.toml")?;
//! let options = WidgetOptions::from_json_str(json)?;
//! ```

use std::path::Path;

use moodbox_core::defaults::{DEFAULT_FEEDBACK_PROMPT, DEFAULT_INTRO_TEXT, DEFAULT_THANK_YOU_TEXT};
use moodbox_core::{
    ConfigurationError, DisplayText, EmojiCatalog, EmojiEntry, SubmissionContext, default_emojis,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog and copy overrides supplied by the embedding page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetOptions {
    /// Reaction set. `None` selects the five default faces.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emojis: Option<Vec<EmojiEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_text_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_thank_you: Option<String>,
    /// `object`/`question` envelope for payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<SubmissionContext>,
}

/// Options after defaults and catalog validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    pub catalog: EmojiCatalog,
    pub display_text: DisplayText,
    pub context: SubmissionContext,
}

impl WidgetOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn emojis(mut self, emojis: Vec<EmojiEntry>) -> Self {
        self.emojis = Some(emojis);
        self
    }

    #[must_use]
    pub fn intro_text(mut self, text: impl Into<String>) -> Self {
        self.intro_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn feedback_text_prompt(mut self, text: impl Into<String>) -> Self {
        self.feedback_text_prompt = Some(text.into());
        self
    }

    #[must_use]
    pub fn feedback_thank_you(mut self, text: impl Into<String>) -> Self {
        self.feedback_thank_you = Some(text.into());
        self
    }

    #[must_use]
    pub fn context(mut self, context: SubmissionContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, OptionsError> {
        serde_json::from_str(s).map_err(OptionsError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(OptionsError::Io)?;
        Self::from_json_str(&content)
    }

    /// Load from a TOML string.
    #[cfg(feature = "toml-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, OptionsError> {
        toml::from_str(s).map_err(OptionsError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "toml-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(OptionsError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Fill defaults and validate the catalog for instance `entry_id`.
    pub fn resolve(self, entry_id: &str) -> Result<ResolvedOptions, ConfigurationError> {
        let catalog = EmojiCatalog::new(self.emojis.unwrap_or_else(default_emojis))?;
        let display_text = DisplayText {
            intro_text: self.intro_text.unwrap_or_else(|| DEFAULT_INTRO_TEXT.to_owned()),
            feedback_prompt: self
                .feedback_text_prompt
                .unwrap_or_else(|| DEFAULT_FEEDBACK_PROMPT.to_owned()),
            thank_you_text: self
                .feedback_thank_you
                .unwrap_or_else(|| DEFAULT_THANK_YOU_TEXT.to_owned()),
        };
        let context = self
            .context
            .unwrap_or_else(|| SubmissionContext::fallback(entry_id, &display_text.feedback_prompt));
        Ok(ResolvedOptions {
            catalog,
            display_text,
            context,
        })
    }
}

/// Failure loading [`WidgetOptions`].
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[source] serde_json::Error),
    #[cfg(feature = "toml-config")]
    #[error("TOML parse error: {0}")]
    Toml(#[source] toml::de::Error),
}

impl From<OptionsError> for ConfigurationError {
    fn from(err: OptionsError) -> Self {
        Self::InvalidOptions(err.to_string())
    }
}
