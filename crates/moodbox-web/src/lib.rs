#![forbid(unsafe_code)]

//! Browser binding for the moodbox feedback widget.
//!
//! On `wasm32` this crate exports [`MoodboxWidget`] to JavaScript:
//!
//! ```js
//! const widget = new MoodboxWidget();
//! widget.init("feedback", { emoji: "/api/emoji", feedback: "/api/feedback", votes: "/api/votes" });
//! widget.getState();
//! ```
//!
//! Rendering goes through [`BrowserDocument`] (a `web-sys`
//! [`moodbox_dom::DomHost`]) and submissions through [`FetchSubmitter`].
//! Argument decoding lives in [`bridge`] and is tested natively.

pub mod bridge;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{BrowserDocument, FetchSubmitter, MoodboxWidget};
