#![forbid(unsafe_code)]

//! Submission Controller: concurrent dispatch of one submission.
//!
//! A [`SubmissionPlan`] is produced by
//! [`FeedbackWidget::begin_submission`](crate::FeedbackWidget::begin_submission)
//! once the instance has moved to `Submitting`. [`dispatch_all`] posts every
//! payload at once and waits for all of them; any failure fails the whole
//! submission. There is no retry.

use futures::future::join_all;
use moodbox_core::{Dispatch, SubmissionError};
use tracing::Instrument;

use crate::transport::Submitter;

/// Encoded payloads of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPlan {
    entry_id: String,
    dispatches: Result<Vec<Dispatch>, SubmissionError>,
}

impl SubmissionPlan {
    pub(crate) fn new(
        entry_id: impl Into<String>,
        dispatches: Result<Vec<Dispatch>, SubmissionError>,
    ) -> Self {
        Self {
            entry_id: entry_id.into(),
            dispatches,
        }
    }

    #[must_use]
    pub fn entry_id(&self) -> &str {
        &self.entry_id
    }

    /// Payloads to post. Empty if encoding failed.
    #[must_use]
    pub fn dispatches(&self) -> &[Dispatch] {
        self.dispatches.as_deref().unwrap_or(&[])
    }
}

/// Post every dispatch of `plan` concurrently and await all of them.
///
/// Returns the first failure in dispatch order, after every request has
/// resolved.
pub async fn dispatch_all<S: Submitter + ?Sized>(
    submitter: &S,
    plan: &SubmissionPlan,
) -> Result<(), SubmissionError> {
    let dispatches = match &plan.dispatches {
        Ok(dispatches) => dispatches,
        Err(err) => {
            tracing::warn!(
                target: "moodbox.submit",
                entry_id = %plan.entry_id,
                error = %err,
                "payload encoding failed; nothing dispatched"
            );
            return Err(err.clone());
        }
    };

    let span = tracing::info_span!(
        "moodbox.submit",
        entry_id = %plan.entry_id,
        dispatch_count = dispatches.len(),
    );
    let outcomes = join_all(dispatches.iter().map(|d| submitter.post(d)))
        .instrument(span.clone())
        .await;

    let _guard = span.enter();
    let mut first_error = None;
    for (dispatch, outcome) in dispatches.iter().zip(outcomes) {
        match outcome {
            Ok(()) => tracing::debug!(
                target: "moodbox.submit",
                kind = dispatch.kind.as_str(),
                endpoint = %dispatch.endpoint,
                "dispatch accepted"
            ),
            Err(err) => {
                tracing::warn!(
                    target: "moodbox.submit",
                    kind = dispatch.kind.as_str(),
                    endpoint = %dispatch.endpoint,
                    error = %err,
                    "dispatch failed"
                );
                first_error.get_or_insert(err);
            }
        }
    }
    first_error.map_or(Ok(()), Err)
}
