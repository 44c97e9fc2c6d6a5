#![forbid(unsafe_code)]

//! Emoji catalog and element-id derivation.
//!
//! A catalog is the ordered list of reactions one instance offers. Labels are
//! the toggle key and also derive DOM ids, so [`EmojiCatalog::new`] refuses
//! anything that would make two buttons indistinguishable.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Id suffixes of the widget's own elements under a container.
pub mod suffix {
    pub const WRAPPER: &str = "wrapper";
    pub const FEEDBACK_FORM: &str = "feedback-form";
    pub const TEXTAREA: &str = "feedback-textarea";
    pub const COUNTER: &str = "maxlength-enforcer";
    pub const SUBMIT_BUTTON: &str = "feedback-button";
    pub const THANK_YOU: &str = "thank-you-message";
    pub const ERROR_MESSAGE: &str = "error-message";

    /// Every suffix above; an emoji label must not sanitize to any of them.
    pub const RESERVED: [&str; 7] = [
        WRAPPER,
        FEEDBACK_FORM,
        TEXTAREA,
        COUNTER,
        SUBMIT_BUTTON,
        THANK_YOU,
        ERROR_MESSAGE,
    ];
}

/// One reaction button: what is shown and what is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmojiEntry {
    /// Glyph rendered inside the button.
    pub icon: String,
    /// Human-readable label, sent verbatim in the selection payload.
    pub label: String,
}

impl EmojiEntry {
    #[must_use]
    pub fn new(icon: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            label: label.into(),
        }
    }
}

/// Validated, ordered emoji catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EmojiCatalog {
    entries: Vec<EmojiEntry>,
}

impl EmojiCatalog {
    /// Validate `entries` and wrap them.
    ///
    /// Fails on empty labels and repeated labels. Also fails when a sanitized
    /// id collides with another label (`"thumbs up"` and `"thumbs-up"`) or
    /// with one of the widget's own elements ([`suffix::RESERVED`]).
    pub fn new(entries: Vec<EmojiEntry>) -> Result<Self, ConfigurationError> {
        let mut labels = HashSet::with_capacity(entries.len());
        let mut ids = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if entry.label.is_empty() {
                return Err(ConfigurationError::EmptyLabel);
            }
            if !labels.insert(entry.label.as_str()) {
                return Err(ConfigurationError::DuplicateLabel {
                    label: entry.label.clone(),
                });
            }
            let id = sanitize_label(&entry.label);
            if suffix::RESERVED.contains(&id.as_str()) {
                return Err(ConfigurationError::ReservedElementId {
                    label: entry.label.clone(),
                    id,
                });
            }
            if !ids.insert(id.clone()) {
                return Err(ConfigurationError::ConflictingElementId { id });
            }
        }
        Ok(Self { entries })
    }

    /// Look up an entry by its label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&EmojiEntry> {
        self.entries.iter().find(|entry| entry.label == label)
    }

    /// Find the entry whose derived element id is `element_id` under `entry_id`.
    #[must_use]
    pub fn find_by_element_id(&self, entry_id: &str, element_id: &str) -> Option<&EmojiEntry> {
        let suffix = element_id.strip_prefix(entry_id)?.strip_prefix('-')?;
        self.entries
            .iter()
            .find(|entry| sanitize_label(&entry.label) == suffix)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmojiEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[EmojiEntry] {
        &self.entries
    }
}

/// Replace every run of whitespace with a single hyphen.
#[must_use]
pub fn sanitize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut in_space = false;
    for ch in label.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('-');
                in_space = true;
            }
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}

/// Element id of the button for `label` inside container `entry_id`.
#[must_use]
pub fn emoji_element_id(entry_id: &str, label: &str) -> String {
    format!("{entry_id}-{}", sanitize_label(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faces() -> Vec<EmojiEntry> {
        vec![
            EmojiEntry::new("😁", "beaming face with smiling eyes"),
            EmojiEntry::new("😀", "grinning face"),
        ]
    }

    #[test]
    fn sanitize_collapses_whitespace_runs() {
        assert_eq!(sanitize_label("grinning face"), "grinning-face");
        assert_eq!(sanitize_label("a  \t b"), "a-b");
        assert_eq!(sanitize_label("happy"), "happy");
        assert_eq!(sanitize_label(" edge "), "-edge-");
    }

    #[test]
    fn element_id_prefixes_entry() {
        assert_eq!(
            emoji_element_id("entry", "beaming face with smiling eyes"),
            "entry-beaming-face-with-smiling-eyes"
        );
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let err = EmojiCatalog::new(vec![
            EmojiEntry::new("😀", "happy"),
            EmojiEntry::new("😁", "happy"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::DuplicateLabel {
                label: "happy".into()
            }
        );
    }

    #[test]
    fn colliding_ids_are_rejected() {
        let err = EmojiCatalog::new(vec![
            EmojiEntry::new("👍", "thumbs up"),
            EmojiEntry::new("👍", "thumbs-up"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::ConflictingElementId {
                id: "thumbs-up".into()
            }
        );
    }

    #[test]
    fn labels_shadowing_widget_elements_are_rejected() {
        let err = EmojiCatalog::new(vec![
            EmojiEntry::new("😀", "happy"),
            EmojiEntry::new("🔘", "feedback button"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::ReservedElementId {
                label: "feedback button".into(),
                id: "feedback-button".into()
            }
        );

        for reserved in suffix::RESERVED {
            let label = reserved.replace('-', " ");
            assert!(
                EmojiCatalog::new(vec![EmojiEntry::new("❓", label.as_str())]).is_err(),
                "{label:?} accepted"
            );
        }
        assert!(EmojiCatalog::new(vec![EmojiEntry::new("💬", "feedback")]).is_ok());
    }

    #[test]
    fn empty_label_is_rejected() {
        let err = EmojiCatalog::new(vec![EmojiEntry::new("😀", "")]).unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyLabel);
    }

    #[test]
    fn lookup_by_element_id() {
        let catalog = EmojiCatalog::new(faces()).unwrap();
        let entry = catalog
            .find_by_element_id("entry", "entry-grinning-face")
            .unwrap();
        assert_eq!(entry.icon, "😀");
        assert!(catalog.find_by_element_id("other", "entry-grinning-face").is_none());
        assert!(catalog.find_by_element_id("entry", "entrygrinning-face").is_none());
        assert!(catalog.find_by_element_id("entry", "entry-feedback-button").is_none());
    }
}
