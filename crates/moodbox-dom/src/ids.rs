#![forbid(unsafe_code)]

//! Element ids of the rendered widget, all prefixed with the container id.

use moodbox_core::catalog::suffix;

/// Id builder for one container.
#[derive(Debug, Clone, Copy)]
pub struct ElementIds<'a> {
    entry_id: &'a str,
}

impl<'a> ElementIds<'a> {
    #[must_use]
    pub const fn new(entry_id: &'a str) -> Self {
        Self { entry_id }
    }

    #[must_use]
    pub fn entry(&self) -> &'a str {
        self.entry_id
    }

    #[must_use]
    pub fn wrapper(&self) -> String {
        self.suffixed(suffix::WRAPPER)
    }

    #[must_use]
    pub fn feedback_form(&self) -> String {
        self.suffixed(suffix::FEEDBACK_FORM)
    }

    #[must_use]
    pub fn textarea(&self) -> String {
        self.suffixed(suffix::TEXTAREA)
    }

    #[must_use]
    pub fn counter(&self) -> String {
        self.suffixed(suffix::COUNTER)
    }

    #[must_use]
    pub fn submit_button(&self) -> String {
        self.suffixed(suffix::SUBMIT_BUTTON)
    }

    #[must_use]
    pub fn thank_you(&self) -> String {
        self.suffixed(suffix::THANK_YOU)
    }

    #[must_use]
    pub fn error_message(&self) -> String {
        self.suffixed(suffix::ERROR_MESSAGE)
    }

    fn suffixed(&self, tail: &str) -> String {
        format!("{}-{tail}", self.entry_id)
    }
}
