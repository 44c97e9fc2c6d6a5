#![forbid(unsafe_code)]

//! Submission payloads.
//!
//! One submission produces one emoji-selection payload and, when the user
//! wrote something, one feedback payload. The envelope fields `object` and
//! `question` are opaque JSON supplied by the host.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SubmissionError;
use crate::state::InstanceState;

/// Host-supplied context echoed into every payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionContext {
    #[serde(default)]
    pub object: Value,
    #[serde(default)]
    pub question: Value,
}

impl SubmissionContext {
    #[must_use]
    pub fn new(object: Value, question: Value) -> Self {
        Self { object, question }
    }

    /// Context used when the host supplies none: the container id as `object`
    /// and the feedback prompt as `question`.
    #[must_use]
    pub fn fallback(entry_id: &str, feedback_prompt: &str) -> Self {
        Self {
            object: Value::String(entry_id.to_owned()),
            question: Value::String(feedback_prompt.to_owned()),
        }
    }
}

/// Body posted to the emoji endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmojiPayload {
    /// Selected labels, in click order.
    pub selections: Vec<String>,
    pub event_time: DateTime<Utc>,
    pub object: Value,
    pub question: Value,
}

/// Body posted to the feedback endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackPayload {
    pub feedback: String,
    pub object: Value,
    pub question: Value,
}

/// Which endpoint a dispatch targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchKind {
    Emoji,
    Feedback,
}

impl DispatchKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Emoji => "emoji",
            Self::Feedback => "feedback",
        }
    }
}

/// One encoded `POST` waiting to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub kind: DispatchKind,
    /// Target URL.
    pub endpoint: String,
    /// JSON body.
    pub body: String,
}

/// Encode the payloads for the current responses of `state`.
pub fn build_dispatches(
    state: &InstanceState,
    context: &SubmissionContext,
    event_time: DateTime<Utc>,
) -> Result<Vec<Dispatch>, SubmissionError> {
    let emoji = EmojiPayload {
        selections: state.responses.selected_labels(),
        event_time,
        object: context.object.clone(),
        question: context.question.clone(),
    };
    let mut dispatches = vec![Dispatch {
        kind: DispatchKind::Emoji,
        endpoint: state.endpoints.emoji.clone(),
        body: serde_json::to_string(&emoji)?,
    }];

    let feedback = state.responses.written_feedback();
    if !feedback.is_empty() {
        let payload = FeedbackPayload {
            feedback: feedback.to_owned(),
            object: context.object.clone(),
            question: context.question.clone(),
        };
        dispatches.push(Dispatch {
            kind: DispatchKind::Feedback,
            endpoint: state.endpoints.feedback.clone(),
            body: serde_json::to_string(&payload)?,
        });
    }
    Ok(dispatches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{EmojiCatalog, EmojiEntry};
    use crate::defaults::DisplayText;
    use crate::state::Endpoints;
    use chrono::TimeZone;
    use serde_json::json;

    fn state() -> InstanceState {
        let catalog = EmojiCatalog::new(vec![
            EmojiEntry::new("😁", "beaming face with smiling eyes"),
            EmojiEntry::new("😞", "disappointed face"),
        ])
        .unwrap();
        InstanceState::seeded(
            "entry",
            Endpoints::new(
                "http://127.0.0.1:5000/emoji",
                "http://127.0.0.1:5000/feedback",
                "http://127.0.0.1:5000/votes",
            ),
            catalog,
            DisplayText::default(),
        )
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn emoji_payload_lists_labels_in_order() {
        let mut state = state();
        let catalog = state.catalog.clone();
        state.responses.toggle("entry", &catalog, "disappointed face");
        state.responses.toggle("entry", &catalog, "beaming face with smiling eyes");

        let ctx = SubmissionContext::new(json!({"id": "page-1"}), json!("how was it?"));
        let dispatches = build_dispatches(&state, &ctx, at()).unwrap();
        assert_eq!(dispatches.len(), 1);
        assert_eq!(dispatches[0].kind, DispatchKind::Emoji);
        assert_eq!(dispatches[0].endpoint, "http://127.0.0.1:5000/emoji");

        let body: Value = serde_json::from_str(&dispatches[0].body).unwrap();
        assert_eq!(
            body["selections"],
            json!(["disappointed face", "beaming face with smiling eyes"])
        );
        assert_eq!(body["eventTime"], "2024-03-01T12:00:00Z");
        assert_eq!(body["object"], json!({"id": "page-1"}));
        assert_eq!(body["question"], "how was it?");
    }

    #[test]
    fn feedback_payload_only_when_written() {
        let mut state = state();
        state.responses.set_written_feedback("hello");
        let ctx = SubmissionContext::fallback("entry", "prompt");
        let dispatches = build_dispatches(&state, &ctx, at()).unwrap();
        assert_eq!(dispatches.len(), 2);
        assert_eq!(dispatches[1].kind, DispatchKind::Feedback);
        assert_eq!(dispatches[1].endpoint, "http://127.0.0.1:5000/feedback");
        let body: Value = serde_json::from_str(&dispatches[1].body).unwrap();
        assert_eq!(body, json!({"feedback": "hello", "object": "entry", "question": "prompt"}));
    }
}
