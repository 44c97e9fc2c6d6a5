#![forbid(unsafe_code)]

//! The per-instance controller.
//!
//! A [`FeedbackWidget`] owns one [`InstanceState`] and one [`DomHost`]. Every
//! public transition checks the lifecycle phase, mutates the state, then
//! re-renders by diffing against what the host was last told to show.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --init--> Ready --submit--> Submitting --ok--> Succeeded
//!                                                      \--err-> Failed
//! ```
//!
//! Selection and typing are accepted only in `Ready`. Terminal phases accept
//! nothing.

use moodbox_core::{
    ConfigurationError, Endpoints, FeedbackUpdate, InstanceState, LifecyclePhase,
    SubmissionContext, SubmissionError, ToggleOutcome, WidgetEvent, build_dispatches,
};
use moodbox_dom::{DomHost, Intent, Node, diff, mount, render, route};
use serde_json::Value;

use crate::clock::{SubmissionClock, SystemClock};
use crate::options::WidgetOptions;
use crate::submission::{SubmissionPlan, dispatch_all};
use crate::transport::Submitter;

/// What [`FeedbackWidget::handle_event`] did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Not addressed to this widget, or refused in the current phase.
    Ignored,
    /// State changed and the document was patched.
    Updated,
    /// The user clicked an enabled submit button. The caller should run
    /// [`FeedbackWidget::submit`] (or the split form).
    SubmitRequested,
}

/// One embedded feedback widget.
#[derive(Debug)]
pub struct FeedbackWidget<H: DomHost, C: SubmissionClock = SystemClock> {
    host: H,
    clock: C,
    state: InstanceState,
    context: SubmissionContext,
    /// Content the host currently shows inside the container.
    shown: Vec<Node>,
}

impl<H: DomHost> FeedbackWidget<H> {
    /// Fresh `Uninitialized` instance rendering into `host`.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self::with_clock(host, SystemClock)
    }
}

impl<H: DomHost, C: SubmissionClock> FeedbackWidget<H, C> {
    #[must_use]
    pub fn with_clock(host: H, clock: C) -> Self {
        Self {
            host,
            clock,
            state: InstanceState::default(),
            context: SubmissionContext::new(Value::Null, Value::Null),
            shown: Vec::new(),
        }
    }

    /// Validate the configuration, bind to container `entry_id`, and render.
    ///
    /// On error the instance stays `Uninitialized` and nothing is rendered.
    pub fn init(
        &mut self,
        entry_id: &str,
        endpoints: Option<Endpoints>,
        options: WidgetOptions,
    ) -> Result<(), ConfigurationError> {
        match self.try_init(entry_id, endpoints, options) {
            Ok(()) => {
                tracing::info!(
                    target: "moodbox.widget",
                    entry_id,
                    emojis = self.state.catalog.len(),
                    "widget initialized"
                );
                Ok(())
            }
            Err(err) => {
                tracing::warn!(target: "moodbox.widget", entry_id, error = %err, "init rejected");
                Err(err)
            }
        }
    }

    fn try_init(
        &mut self,
        entry_id: &str,
        endpoints: Option<Endpoints>,
        options: WidgetOptions,
    ) -> Result<(), ConfigurationError> {
        if self.state.phase != LifecyclePhase::Uninitialized {
            return Err(ConfigurationError::AlreadyInitialized {
                entry_id: self.state.entry_id.clone(),
            });
        }
        if entry_id.is_empty() {
            return Err(ConfigurationError::MissingEntryId);
        }
        let endpoints = endpoints.ok_or(ConfigurationError::MissingEndpoints)?;
        let resolved = options.resolve(entry_id)?;
        let not_found = || ConfigurationError::ElementNotFound {
            entry_id: entry_id.to_owned(),
        };
        if !self.host.contains(entry_id) {
            return Err(not_found());
        }

        let mut state = InstanceState::seeded(
            entry_id,
            endpoints,
            resolved.catalog,
            resolved.display_text,
        );
        state.advance(LifecyclePhase::Ready);
        let content = render(&state);
        if let Err(err) = self.host.apply_all(&mount(entry_id, &content)) {
            tracing::warn!(target: "moodbox.dom", entry_id, error = %err, "initial mount failed");
            return Err(not_found());
        }

        self.state = state;
        self.context = resolved.context;
        self.shown = content;
        Ok(())
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> InstanceState {
        self.state.clone()
    }

    #[must_use]
    pub fn state(&self) -> &InstanceState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> LifecyclePhase {
        self.state.phase
    }

    /// Container id. Empty before `init`.
    #[must_use]
    pub fn entry_id(&self) -> &str {
        &self.state.entry_id
    }

    /// Envelope echoed into payloads.
    #[must_use]
    pub fn context(&self) -> &SubmissionContext {
        &self.context
    }

    /// Whether a submit would currently be accepted.
    #[must_use]
    pub fn submit_enabled(&self) -> bool {
        self.state.phase == LifecyclePhase::Ready && self.state.responses.submit_enabled()
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Select or deselect `label`. `None` outside `Ready`.
    pub fn toggle_emoji(&mut self, label: &str) -> Option<ToggleOutcome> {
        if !self.accepts_input("toggle_emoji") {
            return None;
        }
        let state = &mut self.state;
        let outcome = state.responses.toggle(&state.entry_id, &state.catalog, label);
        match outcome {
            ToggleOutcome::UnknownLabel => {
                tracing::warn!(
                    target: "moodbox.selection",
                    entry_id = %self.state.entry_id,
                    label,
                    "label not in catalog"
                );
                return Some(outcome);
            }
            ToggleOutcome::Selected | ToggleOutcome::Deselected => tracing::debug!(
                target: "moodbox.selection",
                entry_id = %self.state.entry_id,
                label,
                ?outcome,
                selected = self.state.responses.selected_emojis().len(),
                "emoji toggled"
            ),
        }
        self.rerender();
        Some(outcome)
    }

    /// Replace the written feedback. `None` outside `Ready`.
    pub fn set_written_feedback(&mut self, text: &str) -> Option<FeedbackUpdate> {
        if !self.accepts_input("set_written_feedback") {
            return None;
        }
        let update = self.state.responses.set_written_feedback(text);
        tracing::debug!(
            target: "moodbox.selection",
            entry_id = %self.state.entry_id,
            len = update.len,
            truncated = update.truncated,
            "feedback updated"
        );
        self.rerender();
        Some(update)
    }

    /// Route a raw document event and apply the resulting transition.
    pub fn handle_event(&mut self, event: &WidgetEvent) -> EventOutcome {
        if self.state.phase != LifecyclePhase::Ready {
            return EventOutcome::Ignored;
        }
        match route(&self.state, event) {
            None => EventOutcome::Ignored,
            Some(Intent::ToggleEmoji(label)) => match self.toggle_emoji(&label) {
                Some(ToggleOutcome::Selected | ToggleOutcome::Deselected) => EventOutcome::Updated,
                _ => EventOutcome::Ignored,
            },
            Some(Intent::SetWrittenFeedback(text)) => {
                self.set_written_feedback(&text);
                EventOutcome::Updated
            }
            Some(Intent::Submit) if self.submit_enabled() => EventOutcome::SubmitRequested,
            Some(Intent::Submit) => EventOutcome::Ignored,
        }
    }

    /// Enter `Submitting` and encode the payloads.
    ///
    /// Returns `None` and changes nothing unless submit is enabled.
    pub fn begin_submission(&mut self) -> Option<SubmissionPlan> {
        if !self.submit_enabled() {
            tracing::debug!(
                target: "moodbox.widget",
                entry_id = %self.state.entry_id,
                phase = %self.state.phase,
                "submit refused"
            );
            return None;
        }
        self.state.advance(LifecyclePhase::Submitting);
        let dispatches = build_dispatches(&self.state, &self.context, self.clock.now_utc());
        tracing::debug!(
            target: "moodbox.widget",
            entry_id = %self.state.entry_id,
            "submitting"
        );
        self.rerender();
        Some(SubmissionPlan::new(self.state.entry_id.clone(), dispatches))
    }

    /// Settle an in-flight submission into its terminal phase.
    ///
    /// Outside `Submitting` this is a no-op that returns the current phase.
    pub fn finish_submission(&mut self, outcome: Result<(), SubmissionError>) -> LifecyclePhase {
        let next = if outcome.is_ok() {
            LifecyclePhase::Succeeded
        } else {
            LifecyclePhase::Failed
        };
        if !self.state.advance(next) {
            tracing::warn!(
                target: "moodbox.widget",
                entry_id = %self.state.entry_id,
                phase = %self.state.phase,
                "no submission in flight"
            );
            return self.state.phase;
        }
        match &outcome {
            Ok(()) => tracing::info!(
                target: "moodbox.widget",
                entry_id = %self.state.entry_id,
                "submission recorded"
            ),
            Err(err) => tracing::info!(
                target: "moodbox.widget",
                entry_id = %self.state.entry_id,
                error = %err,
                "submission failed"
            ),
        }
        self.rerender();
        self.state.phase
    }

    /// Full submission: begin, dispatch, finish.
    ///
    /// `None` if submit was not enabled.
    pub async fn submit<S: Submitter + ?Sized>(&mut self, submitter: &S) -> Option<LifecyclePhase> {
        let plan = self.begin_submission()?;
        let outcome = dispatch_all(submitter, &plan).await;
        Some(self.finish_submission(outcome))
    }

    fn accepts_input(&self, op: &'static str) -> bool {
        if self.state.phase == LifecyclePhase::Ready {
            return true;
        }
        tracing::debug!(
            target: "moodbox.widget",
            entry_id = %self.state.entry_id,
            phase = %self.state.phase,
            op,
            "input ignored"
        );
        false
    }

    fn rerender(&mut self) {
        let next = render(&self.state);
        let patches = diff(&self.state.entry_id, &self.shown, &next);
        if patches.is_empty() {
            return;
        }
        match self.host.apply_all(&patches) {
            Ok(()) => {
                tracing::trace!(
                    target: "moodbox.dom",
                    entry_id = %self.state.entry_id,
                    patches = patches.len(),
                    "patched"
                );
                self.shown = next;
            }
            Err(err) => {
                tracing::warn!(
                    target: "moodbox.dom",
                    entry_id = %self.state.entry_id,
                    error = %err,
                    "patch failed; remounting on next render"
                );
                self.shown.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodbox_core::EmojiEntry;
    use moodbox_dom::MemoryDocument;

    fn endpoints() -> Option<Endpoints> {
        Some(Endpoints::new("http://e/emoji", "http://e/feedback", "http://e/votes"))
    }

    fn ready() -> FeedbackWidget<MemoryDocument> {
        let mut widget = FeedbackWidget::new(MemoryDocument::with_containers(["entry"]));
        widget
            .init(
                "entry",
                endpoints(),
                WidgetOptions::new().emojis(vec![EmojiEntry::new("😀", "happy")]),
            )
            .unwrap();
        widget
    }

    #[test]
    fn init_validation_order() {
        let mut widget = FeedbackWidget::new(MemoryDocument::new());
        assert_eq!(
            widget.init("", None, WidgetOptions::new()),
            Err(ConfigurationError::MissingEntryId)
        );
        assert_eq!(
            widget.init("entry", None, WidgetOptions::new()),
            Err(ConfigurationError::MissingEndpoints)
        );
        let dup = WidgetOptions::new().emojis(vec![EmojiEntry::new("a", "x"), EmojiEntry::new("b", "x")]);
        assert_eq!(
            widget.init("entry", endpoints(), dup),
            Err(ConfigurationError::DuplicateLabel { label: "x".into() })
        );
        assert_eq!(
            widget.init("entry", endpoints(), WidgetOptions::new()),
            Err(ConfigurationError::ElementNotFound { entry_id: "entry".into() })
        );
        assert_eq!(widget.phase(), LifecyclePhase::Uninitialized);
        assert!(widget.host().applied().is_empty());
    }

    #[test]
    fn second_init_is_refused() {
        let mut widget = ready();
        assert_eq!(
            widget.init("entry", endpoints(), WidgetOptions::new()),
            Err(ConfigurationError::AlreadyInitialized { entry_id: "entry".into() })
        );
        assert_eq!(widget.state().catalog.len(), 1);
    }

    #[test]
    fn input_before_init_is_ignored() {
        let mut widget = FeedbackWidget::new(MemoryDocument::with_containers(["entry"]));
        assert_eq!(widget.toggle_emoji("happy"), None);
        assert_eq!(widget.set_written_feedback("hi"), None);
        assert!(widget.begin_submission().is_none());
        assert_eq!(widget.snapshot(), InstanceState::default());
    }

    #[test]
    fn unknown_label_does_not_patch() {
        let mut widget = ready();
        widget.host_mut().clear_applied();
        assert_eq!(widget.toggle_emoji("sad"), Some(ToggleOutcome::UnknownLabel));
        assert!(widget.host().applied().is_empty());
    }

    #[test]
    fn finish_without_begin_is_a_no_op() {
        let mut widget = ready();
        assert_eq!(widget.finish_submission(Ok(())), LifecyclePhase::Ready);
    }

    #[test]
    fn failed_patch_forces_remount() {
        let mut widget = ready();
        widget.host_mut().remove("entry");
        widget.toggle_emoji("happy");
        assert_eq!(widget.phase(), LifecyclePhase::Ready);
        assert!(widget.shown.is_empty());

        widget.host_mut().add_container("entry");
        widget.host_mut().clear_applied();
        widget.toggle_emoji("happy");
        assert!(matches!(
            widget.host().applied(),
            [moodbox_dom::DomPatch::ReplaceChildren { id, .. }] if id == "entry"
        ));
    }
}
