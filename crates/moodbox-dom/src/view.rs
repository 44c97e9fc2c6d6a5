#![forbid(unsafe_code)]

//! View: container content as a pure function of an [`InstanceState`].
//!
//! Nothing here reads the document. Hosts get the whole content on first
//! mount and [`crate::diff`] patches afterwards.

use moodbox_core::{ERROR_MESSAGE, FEEDBACK_MAX_CHARS, InstanceState, LifecyclePhase, emoji_element_id};

use crate::ids::ElementIds;
use crate::node::{Element, Node};

/// Caption of the submit button.
pub const SUBMIT_LABEL: &str = "Submit";

/// Render the content of the container for `state`.
#[must_use]
pub fn render(state: &InstanceState) -> Vec<Node> {
    let ids = ElementIds::new(&state.entry_id);
    match state.phase {
        LifecyclePhase::Uninitialized => Vec::new(),
        LifecyclePhase::Ready | LifecyclePhase::Submitting => vec![render_form(state, &ids).into()],
        LifecyclePhase::Succeeded => vec![
            Element::new("p")
                .with_id(ids.thank_you())
                .with_class("thank-you-message")
                .with_text(state.display_text.thank_you_text.clone())
                .into(),
        ],
        LifecyclePhase::Failed => vec![
            Element::new("p")
                .with_id(ids.error_message())
                .with_class("error-message")
                .with_text(ERROR_MESSAGE)
                .into(),
        ],
    }
}

/// Counter content: `<span>{count}</span>/500`.
#[must_use]
pub fn counter_children(count: usize) -> Vec<Node> {
    vec![
        Element::new("span").with_text(count.to_string()).into(),
        Node::text(format!("/{FEEDBACK_MAX_CHARS}")),
    ]
}

fn render_form(state: &InstanceState, ids: &ElementIds<'_>) -> Element {
    let responses = &state.responses;
    let submitting = state.phase == LifecyclePhase::Submitting;
    let ready = responses.submit_enabled() && !submitting;

    let buttons = state.catalog.iter().map(|entry| {
        Node::from(
            Element::new("button")
                .with_id(emoji_element_id(ids.entry(), &entry.label))
                .with_class("button")
                .with_class_if("active", responses.is_selected(&entry.label))
                .with_attr("type", "button")
                .with_attr("title", entry.label.clone())
                .with_text(entry.icon.clone()),
        )
    });

    let form = Element::new("form")
        .with_id(ids.feedback_form())
        .with_class("feedback-form")
        .with_class_if("hidden", !responses.has_selection())
        .with_child(
            Element::new("textarea")
                .with_id(ids.textarea())
                .with_class("feedback-textarea")
                .with_attr("placeholder", state.display_text.feedback_prompt.clone())
                .with_attr("maxlength", FEEDBACK_MAX_CHARS.to_string())
                .with_text(responses.written_feedback()),
        )
        .with_child(
            Element::new("p")
                .with_id(ids.counter())
                .with_class("maxlength-enforcer")
                .with_children(counter_children(responses.feedback_len())),
        )
        .with_child(
            Element::new("button")
                .with_id(ids.submit_button())
                .with_class("button")
                .with_class("feedback-button")
                .with_class_if("ready", ready)
                .with_attr("type", "button")
                .with_attr_if("disabled", "", !ready)
                .with_text(SUBMIT_LABEL),
        );

    Element::new("div")
        .with_id(ids.wrapper())
        .with_class("feedback-wrapper")
        .with_child(
            Element::new("p")
                .with_class("intro-text")
                .with_text(state.display_text.intro_text.clone()),
        )
        .with_child(Element::new("div").with_class("emoji-buttons").with_children(buttons))
        .with_child(form)
}
