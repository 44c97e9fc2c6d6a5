#![forbid(unsafe_code)]

//! Raw DOM events as forwarded by a host.
//!
//! Hosts do not interpret events; they report which element was the target
//! and, for key-up, the current value of that element. Routing to state
//! transitions happens in the DOM binder.

/// Canonical input event for one widget instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// A click whose target (or nearest ancestor with an id) is `target`.
    Click { target: String },
    /// A key-up on `target`, carrying the element's value after the key.
    KeyUp { target: String, value: String },
}

impl WidgetEvent {
    #[must_use]
    pub fn click(target: impl Into<String>) -> Self {
        Self::Click {
            target: target.into(),
        }
    }

    #[must_use]
    pub fn key_up(target: impl Into<String>, value: impl Into<String>) -> Self {
        Self::KeyUp {
            target: target.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::Click { target } | Self::KeyUp { target, .. } => target,
        }
    }
}
