#![forbid(unsafe_code)]

//! moodbox public facade crate.
//!
//! Re-exports the types an embedder needs from the internal crates and offers
//! a prelude. The browser binding lives in `moodbox-web`.

use thiserror::Error;

// --- Core re-exports -------------------------------------------------------

pub use moodbox_core::{
    ConfigurationError, DisplayText, EmojiCatalog, EmojiEntry, Endpoints, InstanceState,
    LifecyclePhase, Responses, SelectedEmoji, SubmissionContext, SubmissionError, WidgetEvent,
    default_catalog, default_emojis,
};

// --- DOM re-exports --------------------------------------------------------

pub use moodbox_dom::{DomError, DomHost, DomPatch, MemoryDocument};

// --- Runtime re-exports ----------------------------------------------------

pub use moodbox_runtime::{
    EventOutcome, FeedbackWidget, FixedClock, OptionsError, SubmissionClock, Submitter,
    SystemClock, WidgetOptions,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for moodbox embedders.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error(transparent)]
    Dom(#[from] DomError),
    #[error(transparent)]
    Options(#[from] OptionsError),
}

/// Standard result type for moodbox APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Endpoints, Error, EventOutcome, FeedbackWidget, LifecyclePhase, Result, Submitter,
        WidgetEvent, WidgetOptions,
    };

    pub use crate::{core, dom, runtime};
}

pub use moodbox_core as core;
pub use moodbox_dom as dom;
pub use moodbox_runtime as runtime;
