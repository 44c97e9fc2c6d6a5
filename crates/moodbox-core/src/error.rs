#![forbid(unsafe_code)]

//! Error taxonomy for the feedback widget.
//!
//! Two domains, two types:
//!
//! - [`ConfigurationError`] is raised synchronously by `init` and means the
//!   embedding page misused the widget. Construction is aborted and the
//!   instance stays `Uninitialized`.
//! - [`SubmissionError`] describes a failed dispatch. It never reaches the
//!   caller as an `Err`; the controller folds it into the terminal `Failed`
//!   phase and renders the fixed error message instead.

use thiserror::Error;

/// Programmer-facing misuse detected while initializing an instance.
///
/// The first three messages are part of the host contract and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// `entryId` was absent or empty.
    #[error("entryId must be specified")]
    MissingEntryId,
    /// `endpoints` was absent.
    #[error("endpoints must be specified")]
    MissingEndpoints,
    /// No element with the given id exists in the document.
    #[error("The specified element with id does not exist")]
    ElementNotFound { entry_id: String },
    /// Two catalog entries share a label.
    #[error("duplicate emoji label in catalog: {label:?}")]
    DuplicateLabel { label: String },
    /// A catalog entry has an empty label.
    #[error("emoji label must not be empty")]
    EmptyLabel,
    /// Two distinct labels sanitize to the same element id.
    #[error("emoji labels collide on element id {id:?}")]
    ConflictingElementId { id: String },
    /// A label sanitizes to the id of one of the widget's own elements.
    #[error("emoji label {label:?} clashes with widget element id {id:?}")]
    ReservedElementId { label: String, id: String },
    /// `init` was called on an instance that already left `Uninitialized`.
    #[error("widget {entry_id:?} is already initialized")]
    AlreadyInitialized { entry_id: String },
    /// Host options could not be decoded.
    #[error("invalid widget options: {0}")]
    InvalidOptions(String),
}

/// Why a single payload dispatch did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The payload could not be serialized.
    #[error("failed to encode payload: {0}")]
    Encode(String),
    /// The transport failed before a response arrived.
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },
    /// The endpoint answered with a non-success status.
    #[error("request to {endpoint} rejected with status {status}")]
    Rejected { endpoint: String, status: u16 },
}

impl From<serde_json::Error> for SubmissionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err.to_string())
    }
}
