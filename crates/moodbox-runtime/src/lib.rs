#![forbid(unsafe_code)]

//! Runtime for the moodbox feedback widget.
//!
//! # Role in moodbox
//! `moodbox-runtime` is where an instance lives. [`FeedbackWidget`] owns the
//! state, guards the lifecycle, re-renders through a [`moodbox_dom::DomHost`]
//! after every transition, and runs submissions against an abstract
//! [`Submitter`].
//!
//! # Example
//!
//! ```rust
//! use futures::executor::block_on;
//! use moodbox_core::{Dispatch, Endpoints, LifecyclePhase, SubmissionError};
//! use moodbox_dom::MemoryDocument;
//! use moodbox_runtime::{FeedbackWidget, Submitter, WidgetOptions};
//!
//! struct Accept;
//! impl Submitter for Accept {
//!     async fn post(&self, _: &Dispatch) -> Result<(), SubmissionError> {
//!         Ok(())
//!     }
//! }
//!
//! let mut widget = FeedbackWidget::new(MemoryDocument::with_containers(["entry"]));
//! widget
//!     .init("entry", Some(Endpoints::new("/emoji", "/feedback", "/votes")), WidgetOptions::new())
//!     .unwrap();
//! widget.toggle_emoji("grinning face");
//! widget.set_written_feedback("great docs");
//! assert_eq!(block_on(widget.submit(&Accept)), Some(LifecyclePhase::Succeeded));
//! ```
//!
//! # How it fits in the system
//! `moodbox-web` wraps one [`FeedbackWidget`] per JS object, backed by a
//! `web-sys` document host and a `fetch` submitter.

pub mod clock;
pub mod options;
pub mod submission;
pub mod transport;
pub mod widget;

pub use clock::{FixedClock, SubmissionClock, SystemClock};
pub use options::{OptionsError, ResolvedOptions, WidgetOptions};
pub use submission::{SubmissionPlan, dispatch_all};
pub use transport::Submitter;
pub use widget::{EventOutcome, FeedbackWidget};
