#![no_main]

use arbitrary::Arbitrary;
use futures::executor::block_on;
use libfuzzer_sys::fuzz_target;
use moodbox_core::{
    Dispatch, Endpoints, FEEDBACK_MAX_CHARS, LifecyclePhase, SubmissionError, WidgetEvent,
};
use moodbox_dom::{MemoryDocument, render};
use moodbox_runtime::{FeedbackWidget, Submitter, WidgetOptions};

const SUFFIXES: [&str; 8] = [
    "beaming-face-with-smiling-eyes",
    "grinning-face",
    "neutral-face",
    "confused-face",
    "disappointed-face",
    "feedback-textarea",
    "feedback-button",
    "wrapper",
];

#[derive(Debug, Arbitrary)]
enum FuzzOp {
    Click(u8),
    KeyUp(u8, String),
    Submit(bool),
}

struct Outcome(bool);

impl Submitter for Outcome {
    async fn post(&self, dispatch: &Dispatch) -> Result<(), SubmissionError> {
        if self.0 {
            Ok(())
        } else {
            Err(SubmissionError::Rejected {
                endpoint: dispatch.endpoint.clone(),
                status: 500,
            })
        }
    }
}

fn target(index: u8) -> String {
    format!("entry-{}", SUFFIXES[usize::from(index) % SUFFIXES.len()])
}

fuzz_target!(|ops: Vec<FuzzOp>| {
    let mut widget = FeedbackWidget::new(MemoryDocument::with_containers(["entry"]));
    widget
        .init("entry", Some(Endpoints::new("e", "f", "v")), WidgetOptions::new())
        .expect("default options are valid");

    let mut last = widget.phase();
    for op in ops.iter().take(256) {
        match op {
            FuzzOp::Click(i) => {
                widget.handle_event(&WidgetEvent::click(target(*i)));
            }
            FuzzOp::KeyUp(i, text) => {
                widget.handle_event(&WidgetEvent::key_up(target(*i), text.clone()));
            }
            FuzzOp::Submit(ok) => {
                let enabled = widget.submit_enabled();
                let result = block_on(widget.submit(&Outcome(*ok)));
                assert_eq!(result.is_some(), enabled);
            }
        }

        let state = widget.snapshot();
        assert!(state.responses.written_feedback().chars().count() <= FEEDBACK_MAX_CHARS);
        assert!(state.phase == last || last.can_advance_to(state.phase));
        assert_ne!(state.phase, LifecyclePhase::Submitting);
        last = state.phase;

        let shown = widget.host().element("entry").expect("container").children().to_vec();
        assert_eq!(shown, render(&state), "document diverged from state");
    }
});
