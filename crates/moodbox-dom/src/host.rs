#![forbid(unsafe_code)]

//! Host abstraction: the document a widget renders into.
//!
//! This is the output half of the DOM boundary. The widget never touches a
//! document directly; it asks the host whether its container exists and
//! hands it [`DomPatch`] batches. The browser host lives in `moodbox-web`;
//! [`MemoryDocument`] is the deterministic in-process host used by tests and
//! server-side embedding.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::diff::DomPatch;
use crate::node::{Element, Node, children_html};

/// Failure reported by a host while applying a patch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The patch targets an element that is not in the document.
    #[error("no element with id {id:?}")]
    ElementNotFound { id: String },
    /// Host-specific failure (e.g. a JS exception).
    #[error("dom host error: {0}")]
    Host(String),
}

/// Document abstraction consumed by the widget runtime.
pub trait DomHost {
    /// Whether an element with `id` is currently in the document.
    fn contains(&self, id: &str) -> bool;

    /// Apply one patch.
    fn apply(&mut self, patch: &DomPatch) -> Result<(), DomError>;

    /// Apply a batch in order, stopping at the first failure.
    fn apply_all(&mut self, patches: &[DomPatch]) -> Result<(), DomError> {
        for patch in patches {
            self.apply(patch)?;
        }
        Ok(())
    }
}

impl<H: DomHost + ?Sized> DomHost for &mut H {
    fn contains(&self, id: &str) -> bool {
        (**self).contains(id)
    }

    fn apply(&mut self, patch: &DomPatch) -> Result<(), DomError> {
        (**self).apply(patch)
    }
}

/// Shared document: several widgets on one page.
impl<H: DomHost> DomHost for Rc<RefCell<H>> {
    fn contains(&self, id: &str) -> bool {
        self.borrow().contains(id)
    }

    fn apply(&mut self, patch: &DomPatch) -> Result<(), DomError> {
        self.borrow_mut().apply(patch)
    }
}

/// In-memory document.
///
/// Holds a list of top-level elements (the page body) and applies patches to
/// them. Every applied patch is also recorded, so tests can assert on what a
/// host would have been asked to do.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    body: Vec<Element>,
    applied: Vec<DomPatch>,
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Document whose body holds one empty `<div>` per id.
    #[must_use]
    pub fn with_containers<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let mut doc = Self::new();
        for id in ids {
            doc.add_container(id);
        }
        doc
    }

    /// Append an empty `<div id=...>` to the body.
    pub fn add_container(&mut self, id: &str) {
        self.body.push(Element::new("div").with_id(id));
    }

    /// Remove a top-level element. Returns whether it existed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.body.len();
        self.body.retain(|el| el.id() != Some(id));
        self.body.len() != before
    }

    #[must_use]
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.body.iter().find_map(|el| el.find(id))
    }

    #[must_use]
    pub fn inner_html(&self, id: &str) -> Option<String> {
        self.element(id).map(Element::inner_html)
    }

    /// Serialized body.
    #[must_use]
    pub fn body_html(&self) -> String {
        let nodes: Vec<Node> = self.body.iter().cloned().map(Node::from).collect();
        children_html(&nodes)
    }

    /// Every patch applied so far, in order.
    #[must_use]
    pub fn applied(&self) -> &[DomPatch] {
        &self.applied
    }

    pub fn clear_applied(&mut self) {
        self.applied.clear();
    }

    fn element_mut(&mut self, id: &str) -> Result<&mut Element, DomError> {
        self.body
            .iter_mut()
            .find_map(|el| el.find_mut(id))
            .ok_or_else(|| DomError::ElementNotFound { id: id.to_owned() })
    }
}

impl DomHost for MemoryDocument {
    fn contains(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    fn apply(&mut self, patch: &DomPatch) -> Result<(), DomError> {
        let el = self.element_mut(patch.target())?;
        match patch {
            DomPatch::ReplaceChildren { children, .. } => el.replace_children(children.clone()),
            DomPatch::SetClass { class_name, .. } => el.set_class_name(class_name),
            DomPatch::SetAttribute { name, value, .. } => el.set_attr(name.clone(), value.clone()),
            DomPatch::RemoveAttribute { name, .. } => el.remove_attr(name),
            DomPatch::SetValue { value, .. } => el.replace_children(vec![Node::text(value.clone())]),
        }
        self.applied.push(patch.clone());
        Ok(())
    }
}
