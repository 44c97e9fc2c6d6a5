#![forbid(unsafe_code)]

//! DOM Binder: map raw events to widget intents.
//!
//! Only three event shapes mean anything:
//!
//! | Event | Target | Intent |
//! |---|---|---|
//! | click | an emoji button | [`Intent::ToggleEmoji`] |
//! | key-up | the feedback text area | [`Intent::SetWrittenFeedback`] |
//! | click | the submit button | [`Intent::Submit`] |
//!
//! Everything else is ignored. Phase checks are left to the runtime.

use moodbox_core::{InstanceState, WidgetEvent};

use crate::ids::ElementIds;

/// A state transition requested by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ToggleEmoji(String),
    SetWrittenFeedback(String),
    Submit,
}

/// Route `event` for the instance described by `state`.
#[must_use]
pub fn route(state: &InstanceState, event: &WidgetEvent) -> Option<Intent> {
    let ids = ElementIds::new(&state.entry_id);
    match event {
        WidgetEvent::Click { target } if *target == ids.submit_button() => Some(Intent::Submit),
        WidgetEvent::Click { target } => state
            .catalog
            .find_by_element_id(&state.entry_id, target)
            .map(|entry| Intent::ToggleEmoji(entry.label.clone())),
        WidgetEvent::KeyUp { target, value } if *target == ids.textarea() => {
            Some(Intent::SetWrittenFeedback(value.clone()))
        }
        WidgetEvent::KeyUp { .. } => None,
    }
}
