//! Property-based invariant tests for widget instances.
//!
//! 1. Two instances on one document never observe each other's responses
//! 2. The document always matches a fresh render of the snapshot
//! 3. Submit enablement tracks feedback length exactly
//! 4. The lifecycle only moves forward

use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::block_on;
use moodbox_core::{Dispatch, Endpoints, LifecyclePhase, SubmissionError, WidgetEvent};
use moodbox_dom::{Element, MemoryDocument, Node, render};
use moodbox_runtime::{FeedbackWidget, Submitter, WidgetOptions};
use proptest::prelude::*;

const TARGETS: [&str; 6] = [
    "grinning-face",
    "neutral-face",
    "disappointed-face",
    "feedback-button",
    "feedback-textarea",
    "wrapper",
];

struct Answer(bool);

impl Submitter for Answer {
    async fn post(&self, dispatch: &Dispatch) -> Result<(), SubmissionError> {
        if self.0 {
            Ok(())
        } else {
            Err(SubmissionError::Transport {
                endpoint: dispatch.endpoint.clone(),
                message: "offline".into(),
            })
        }
    }
}

#[derive(Debug, Clone)]
enum Op {
    Click { left: bool, target: usize },
    Type { left: bool, text: String },
    Submit { left: bool, ok: bool },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        5 => (any::<bool>(), 0..TARGETS.len()).prop_map(|(left, target)| Op::Click { left, target }),
        4 => (any::<bool>(), "[a-z ]{0,8}").prop_map(|(left, text)| Op::Type { left, text }),
        1 => (any::<bool>(), any::<bool>()).prop_map(|(left, ok)| Op::Submit { left, ok }),
    ]
}

type Widget = FeedbackWidget<Rc<RefCell<MemoryDocument>>>;

fn pair() -> (Rc<RefCell<MemoryDocument>>, Widget, Widget) {
    let doc = Rc::new(RefCell::new(MemoryDocument::with_containers(["left", "right"])));
    let mut left = FeedbackWidget::new(Rc::clone(&doc));
    let mut right = FeedbackWidget::new(Rc::clone(&doc));
    left.init("left", Some(Endpoints::new("l/e", "l/f", "l/v")), WidgetOptions::new())
        .expect("init left");
    right
        .init("right", Some(Endpoints::new("r/e", "r/f", "r/v")), WidgetOptions::new())
        .expect("init right");
    (doc, left, right)
}

fn run(widget: &mut Widget, op: &Op) {
    let id = widget.entry_id().to_owned();
    match op {
        Op::Click { target, .. } => {
            widget.handle_event(&WidgetEvent::click(format!("{id}-{}", TARGETS[*target])));
        }
        Op::Type { text, .. } => {
            widget.handle_event(&WidgetEvent::key_up(format!("{id}-feedback-textarea"), text.clone()));
        }
        Op::Submit { ok, .. } => {
            block_on(widget.submit(&Answer(*ok)));
        }
    }
}

fn is_left(op: &Op) -> bool {
    match op {
        Op::Click { left, .. } | Op::Type { left, .. } | Op::Submit { left, .. } => *left,
    }
}

fn container(doc: &MemoryDocument, id: &str) -> Vec<Node> {
    doc.element(id).map(Element::children).unwrap_or_default().to_vec()
}

proptest! {
    #[test]
    fn instances_never_share_responses(ops in prop::collection::vec(op(), 0..40)) {
        let (_doc, mut left, mut right) = pair();
        let mut right_only = Vec::new();
        for op in &ops {
            if is_left(op) {
                let before = right.snapshot();
                run(&mut left, op);
                prop_assert_eq!(right.snapshot(), before);
            } else {
                right_only.push(op.clone());
                run(&mut right, op);
            }
        }

        // Replaying only the right-hand ops on a lone instance gives the same state.
        let (_doc, _, mut alone) = pair();
        for op in &right_only {
            run(&mut alone, op);
        }
        prop_assert_eq!(alone.snapshot(), right.snapshot());
    }

    #[test]
    fn document_tracks_state(ops in prop::collection::vec(op(), 0..40)) {
        let (doc, mut left, mut right) = pair();
        for op in &ops {
            let widget = if is_left(op) { &mut left } else { &mut right };
            run(widget, op);
            let doc = doc.borrow();
            prop_assert_eq!(container(&doc, "left"), render(left.state()));
            prop_assert_eq!(container(&doc, "right"), render(right.state()));
        }
    }

    #[test]
    fn submit_enabled_iff_feedback_in_range(text in "\\PC{0,520}") {
        let (_doc, mut left, _) = pair();
        left.set_written_feedback(&text);
        let len = left.snapshot().responses.written_feedback().chars().count();
        prop_assert!(len <= 500);
        prop_assert_eq!(left.submit_enabled(), (1..=500).contains(&len));
    }

    #[test]
    fn phase_never_moves_backwards(ops in prop::collection::vec(op(), 0..40)) {
        let (_doc, mut left, _) = pair();
        let mut last = left.phase();
        for op in &ops {
            run(&mut left, op);
            let now = left.phase();
            prop_assert!(now == last || last.can_advance_to(now), "{last} -> {now}");
            last = now;
        }
    }
}
