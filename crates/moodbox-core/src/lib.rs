#![forbid(unsafe_code)]

//! Core: state model, selection rules, and submission payloads.
//!
//! # Role in moodbox
//! `moodbox-core` holds everything about a feedback widget that can be decided
//! without touching a document or a network: the per-instance state, the
//! forward-only lifecycle, the toggle and length rules, and the payloads a
//! submission posts.
//!
//! # How it fits in the system
//! `moodbox-dom` renders [`InstanceState`] snapshots and routes
//! [`WidgetEvent`]s back into transitions. `moodbox-runtime` owns one state per
//! widget instance and drives submissions through an abstract transport.

pub mod catalog;
pub mod defaults;
pub mod error;
pub mod event;
pub mod payload;
pub mod selection;
pub mod state;

pub use catalog::{EmojiCatalog, EmojiEntry, emoji_element_id, sanitize_label};
pub use defaults::{
    DisplayText, ERROR_MESSAGE, FEEDBACK_MAX_CHARS, default_catalog, default_emojis,
};
pub use error::{ConfigurationError, SubmissionError};
pub use event::WidgetEvent;
pub use payload::{
    Dispatch, DispatchKind, EmojiPayload, FeedbackPayload, SubmissionContext, build_dispatches,
};
pub use selection::{FeedbackUpdate, ToggleOutcome};
pub use state::{Endpoints, InstanceState, LifecyclePhase, Responses, SelectedEmoji};
