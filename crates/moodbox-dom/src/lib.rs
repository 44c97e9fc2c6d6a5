#![forbid(unsafe_code)]

//! DOM boundary for the moodbox feedback widget.
//!
//! # Role in moodbox
//! The widget never mutates a document ad hoc. Every render is a pure
//! function of an [`moodbox_core::InstanceState`] snapshot ([`view::render`]);
//! consecutive renders are diffed into addressable [`DomPatch`]es
//! ([`diff::diff`]) which a [`DomHost`] applies. Incoming events travel the
//! other way through [`binder::route`].
//!
//! # How it fits in the system
//! `moodbox-runtime` owns the state and calls into this crate after every
//! transition. `moodbox-web` implements [`DomHost`] over `web-sys`;
//! [`MemoryDocument`] implements it in memory.

pub mod binder;
pub mod diff;
pub mod host;
pub mod ids;
pub mod node;
pub mod view;

pub use binder::{Intent, route};
pub use diff::{DomPatch, diff, mount};
pub use host::{DomError, DomHost, MemoryDocument};
pub use ids::ElementIds;
pub use node::{Element, Node};
pub use view::render;
