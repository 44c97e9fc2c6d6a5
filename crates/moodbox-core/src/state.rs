#![forbid(unsafe_code)]

//! State Store types.
//!
//! [`InstanceState`] is the whole authoritative state of one embedded widget.
//! The runtime owns exactly one per instance and hands out clones as
//! snapshots; nothing here is reference counted or shared.

use serde::{Deserialize, Serialize};

use crate::catalog::EmojiCatalog;
use crate::defaults::DisplayText;

/// Collection endpoints for one instance.
///
/// Missing keys decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Receives the emoji-selection payload.
    pub emoji: String,
    /// Receives the written-feedback payload.
    pub feedback: String,
    /// Reserved vote-tally endpoint. Stored and reported, never posted to.
    pub votes: String,
}

impl Endpoints {
    #[must_use]
    pub fn new(
        emoji: impl Into<String>,
        feedback: impl Into<String>,
        votes: impl Into<String>,
    ) -> Self {
        Self {
            emoji: emoji.into(),
            feedback: feedback.into(),
            votes: votes.into(),
        }
    }
}

/// Forward-only lifecycle of one instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePhase {
    #[default]
    Uninitialized,
    Ready,
    Submitting,
    Succeeded,
    Failed,
}

impl LifecyclePhase {
    /// Whether `self -> next` is an edge of the lifecycle graph.
    #[must_use]
    pub const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Uninitialized, Self::Ready)
                | (Self::Ready, Self::Submitting)
                | (Self::Submitting, Self::Succeeded)
                | (Self::Submitting, Self::Failed)
        )
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Ready => "ready",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl core::fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selected reaction, in the order it was clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedEmoji {
    /// Element id of the button (`{entryId}-{sanitized label}`).
    pub id: String,
    pub icon: String,
    pub label: String,
}

/// Live user input of one instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Responses {
    pub(crate) selected_emojis: Vec<SelectedEmoji>,
    pub(crate) written_feedback: String,
}

impl Responses {
    /// Selections in click order.
    #[must_use]
    pub fn selected_emojis(&self) -> &[SelectedEmoji] {
        &self.selected_emojis
    }

    #[must_use]
    pub fn written_feedback(&self) -> &str {
        &self.written_feedback
    }
}

/// Snapshot of one instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceState {
    pub entry_id: String,
    pub endpoints: Endpoints,
    #[serde(rename = "emojiCatalog")]
    pub catalog: EmojiCatalog,
    pub display_text: DisplayText,
    pub responses: Responses,
    #[serde(rename = "lifecyclePhase")]
    pub phase: LifecyclePhase,
}

impl InstanceState {
    /// Seed a freshly validated instance in the `Uninitialized` phase.
    #[must_use]
    pub fn seeded(
        entry_id: impl Into<String>,
        endpoints: Endpoints,
        catalog: EmojiCatalog,
        display_text: DisplayText,
    ) -> Self {
        Self {
            entry_id: entry_id.into(),
            endpoints,
            catalog,
            display_text,
            responses: Responses::default(),
            phase: LifecyclePhase::Uninitialized,
        }
    }

    /// Move to `next` if the lifecycle graph allows it.
    ///
    /// Returns `false` and leaves the phase untouched otherwise.
    pub fn advance(&mut self, next: LifecyclePhase) -> bool {
        if self.phase.can_advance_to(next) {
            self.phase = next;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [LifecyclePhase; 5] = [
        LifecyclePhase::Uninitialized,
        LifecyclePhase::Ready,
        LifecyclePhase::Submitting,
        LifecyclePhase::Succeeded,
        LifecyclePhase::Failed,
    ];

    #[test]
    fn terminal_phases_have_no_exits() {
        for from in ALL.into_iter().filter(|p| p.is_terminal()) {
            for to in ALL {
                assert!(!from.can_advance_to(to), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn no_backward_or_self_edges() {
        for (i, from) in ALL.iter().enumerate() {
            for to in &ALL[..=i] {
                assert!(!from.can_advance_to(*to), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn advance_refuses_skipping_ready() {
        let mut state = InstanceState::default();
        assert!(!state.advance(LifecyclePhase::Submitting));
        assert_eq!(state.phase, LifecyclePhase::Uninitialized);
        assert!(state.advance(LifecyclePhase::Ready));
        assert!(state.advance(LifecyclePhase::Submitting));
        assert!(state.advance(LifecyclePhase::Failed));
        assert!(!state.advance(LifecyclePhase::Succeeded));
        assert_eq!(state.phase, LifecyclePhase::Failed);
    }

    #[test]
    fn endpoints_missing_keys_default_to_empty() {
        let endpoints: Endpoints =
            serde_json::from_str(r#"{"emoji":"http://localhost:8080/emoji"}"#).unwrap();
        assert_eq!(endpoints.emoji, "http://localhost:8080/emoji");
        assert_eq!(endpoints.feedback, "");
        assert_eq!(endpoints.votes, "");
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let value = serde_json::to_value(InstanceState::default()).unwrap();
        assert_eq!(value["entryId"], "");
        assert_eq!(value["lifecyclePhase"], "uninitialized");
        assert_eq!(value["responses"]["writtenFeedback"], "");
        assert!(value["responses"]["selectedEmojis"].as_array().unwrap().is_empty());
    }
}
