#![forbid(unsafe_code)]

//! Selection Engine: pure transitions over [`Responses`].
//!
//! The phase guard lives in the runtime. These functions assume the instance
//! is `Ready` and only enforce the toggle and length rules.

use crate::catalog::{EmojiCatalog, emoji_element_id};
use crate::defaults::FEEDBACK_MAX_CHARS;
use crate::state::{Responses, SelectedEmoji};

/// Result of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The label was appended to the selection.
    Selected,
    /// The label was already selected and has been removed.
    Deselected,
    /// The label is not in the catalog; nothing changed.
    UnknownLabel,
}

/// Result of replacing the written feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackUpdate {
    /// Stored length in characters.
    pub len: usize,
    /// Input exceeded the cap and was cut.
    pub truncated: bool,
}

impl Responses {
    /// Select `label` if unselected, deselect it otherwise.
    pub fn toggle(&mut self, entry_id: &str, catalog: &EmojiCatalog, label: &str) -> ToggleOutcome {
        if let Some(pos) = self.selected_emojis.iter().position(|s| s.label == label) {
            self.selected_emojis.remove(pos);
            return ToggleOutcome::Deselected;
        }
        let Some(entry) = catalog.get(label) else {
            return ToggleOutcome::UnknownLabel;
        };
        self.selected_emojis.push(SelectedEmoji {
            id: emoji_element_id(entry_id, &entry.label),
            icon: entry.icon.clone(),
            label: entry.label.clone(),
        });
        ToggleOutcome::Selected
    }

    /// Replace the written feedback, keeping at most [`FEEDBACK_MAX_CHARS`].
    pub fn set_written_feedback(&mut self, text: &str) -> FeedbackUpdate {
        let (kept, truncated) = truncate_chars(text, FEEDBACK_MAX_CHARS);
        self.written_feedback.clear();
        self.written_feedback.push_str(kept);
        FeedbackUpdate {
            len: kept.chars().count(),
            truncated,
        }
    }

    #[must_use]
    pub fn is_selected(&self, label: &str) -> bool {
        self.selected_emojis.iter().any(|s| s.label == label)
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        !self.selected_emojis.is_empty()
    }

    /// Written feedback length in characters.
    #[must_use]
    pub fn feedback_len(&self) -> usize {
        self.written_feedback.chars().count()
    }

    /// Submission is allowed iff `1 <= len <= FEEDBACK_MAX_CHARS`.
    #[must_use]
    pub fn submit_enabled(&self) -> bool {
        (1..=FEEDBACK_MAX_CHARS).contains(&self.feedback_len())
    }

    /// Selected labels in click order.
    #[must_use]
    pub fn selected_labels(&self) -> Vec<String> {
        self.selected_emojis.iter().map(|s| s.label.clone()).collect()
    }
}

fn truncate_chars(text: &str, max: usize) -> (&str, bool) {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => (&text[..byte_idx], true),
        None => (text, false),
    }
}
