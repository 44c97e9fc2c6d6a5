#![forbid(unsafe_code)]

//! Submission capability consumed by the controller.
//!
//! The controller encodes payloads and decides what to do with outcomes; a
//! [`Submitter`] only moves one body to one URL and says whether that worked.
//! Response bodies are not interpreted. Timeouts, if any, belong here: the
//! controller waits for as long as the returned future takes.

use std::future::Future;

use moodbox_core::{Dispatch, SubmissionError};

/// Network boundary: `POST` one JSON body.
///
/// Futures are polled on a single-threaded executor and need not be `Send`.
pub trait Submitter {
    fn post(&self, dispatch: &Dispatch) -> impl Future<Output = Result<(), SubmissionError>>;
}

impl<S: Submitter + ?Sized> Submitter for &S {
    fn post(&self, dispatch: &Dispatch) -> impl Future<Output = Result<(), SubmissionError>> {
        (**self).post(dispatch)
    }
}
