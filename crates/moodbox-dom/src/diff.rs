#![forbid(unsafe_code)]

//! Tree diff: turn two renders of the same container into DOM patches.
//!
//! Patches address elements by id. A change that cannot be addressed (an
//! anonymous element changed, or the child structure differs) bubbles up to
//! the nearest ancestor with an id, which then has its children replaced.
//! If it bubbles past the top level, the whole container is replaced.
//!
//! Text-area content is patched as a value, never by recreating the element,
//! so a focused field survives re-renders while the user types.

use crate::node::{Element, Node};

/// One addressable DOM mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomPatch {
    /// Replace every child of `id`.
    ReplaceChildren { id: String, children: Vec<Node> },
    /// Replace the class list of `id`.
    SetClass { id: String, class_name: String },
    SetAttribute { id: String, name: String, value: String },
    RemoveAttribute { id: String, name: String },
    /// Set the value of a form control.
    SetValue { id: String, value: String },
}

impl DomPatch {
    /// Id of the element this patch mutates.
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::ReplaceChildren { id, .. }
            | Self::SetClass { id, .. }
            | Self::SetAttribute { id, .. }
            | Self::RemoveAttribute { id, .. }
            | Self::SetValue { id, .. } => id,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ReplaceChildren { .. } => "replace_children",
            Self::SetClass { .. } => "set_class",
            Self::SetAttribute { .. } => "set_attribute",
            Self::RemoveAttribute { .. } => "remove_attribute",
            Self::SetValue { .. } => "set_value",
        }
    }
}

/// Marker for a change that the current level cannot address.
struct Unaddressable;

/// Full mount of `content` into `container_id`.
#[must_use]
pub fn mount(container_id: &str, content: &[Node]) -> Vec<DomPatch> {
    vec![DomPatch::ReplaceChildren {
        id: container_id.to_owned(),
        children: content.to_vec(),
    }]
}

/// Patches that turn `old` into `new` inside `container_id`.
///
/// Identical trees produce no patches.
#[must_use]
pub fn diff(container_id: &str, old: &[Node], new: &[Node]) -> Vec<DomPatch> {
    let mut out = Vec::new();
    match diff_children(old, new, &mut out) {
        Ok(()) => out,
        Err(Unaddressable) => mount(container_id, new),
    }
}

fn diff_children(old: &[Node], new: &[Node], out: &mut Vec<DomPatch>) -> Result<(), Unaddressable> {
    if old.len() != new.len() {
        return Err(Unaddressable);
    }
    for (a, b) in old.iter().zip(new) {
        match (a, b) {
            (Node::Text(x), Node::Text(y)) => {
                if x != y {
                    return Err(Unaddressable);
                }
            }
            (Node::Element(x), Node::Element(y)) if x.tag() == y.tag() && x.id() == y.id() => {
                diff_element(x, y, out)?;
            }
            _ => return Err(Unaddressable),
        }
    }
    Ok(())
}

fn diff_element(old: &Element, new: &Element, out: &mut Vec<DomPatch>) -> Result<(), Unaddressable> {
    let Some(id) = new.id() else {
        if old.classes() != new.classes() || old.attrs() != new.attrs() {
            return Err(Unaddressable);
        }
        return diff_children(old.children(), new.children(), out);
    };

    if old.classes() != new.classes() {
        out.push(DomPatch::SetClass {
            id: id.to_owned(),
            class_name: new.class_name(),
        });
    }
    for (name, value) in new.attrs() {
        if old.attr(name) != Some(value.as_str()) {
            out.push(DomPatch::SetAttribute {
                id: id.to_owned(),
                name: name.clone(),
                value: value.clone(),
            });
        }
    }
    for (name, _) in old.attrs() {
        if new.attr(name).is_none() {
            out.push(DomPatch::RemoveAttribute {
                id: id.to_owned(),
                name: name.clone(),
            });
        }
    }

    let mut nested = Vec::new();
    match diff_children(old.children(), new.children(), &mut nested) {
        Ok(()) => out.extend(nested),
        Err(Unaddressable) if new.tag() == "textarea" => out.push(DomPatch::SetValue {
            id: id.to_owned(),
            value: new.text_content(),
        }),
        Err(Unaddressable) => out.push(DomPatch::ReplaceChildren {
            id: id.to_owned(),
            children: new.children().to_vec(),
        }),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn widget(active: bool, value: &str) -> Vec<Node> {
        vec![
            Element::new("div")
                .with_id("w")
                .with_child(
                    Element::new("div")
                        .with_class("emoji-buttons")
                        .with_child(Element::new("button").with_id("w-a").with_class("button").with_class_if("active", active)),
                )
                .with_child(Element::new("textarea").with_id("w-t").with_text(value))
                .with_child(
                    Element::new("p")
                        .with_id("w-c")
                        .with_child(Element::new("span").with_text(value.len().to_string()))
                        .with_text("/500"),
                )
                .into(),
        ]
    }

    #[test]
    fn identical_trees_produce_no_patches() {
        assert!(diff("entry", &widget(false, "x"), &widget(false, "x")).is_empty());
    }

    #[test]
    fn class_change_under_anonymous_parent_is_addressed_by_id() {
        let patches = diff("entry", &widget(false, ""), &widget(true, ""));
        assert_eq!(
            patches,
            vec![DomPatch::SetClass {
                id: "w-a".into(),
                class_name: "button active".into()
            }]
        );
    }

    #[test]
    fn text_changes_patch_value_and_counter_only() {
        let patches = diff("entry", &widget(false, "hell"), &widget(false, "hello"));
        assert_eq!(patches.len(), 2);
        assert_eq!(
            patches[0],
            DomPatch::SetValue {
                id: "w-t".into(),
                value: "hello".into()
            }
        );
        match &patches[1] {
            DomPatch::ReplaceChildren { id, children } => {
                assert_eq!(id, "w-c");
                assert_eq!(crate::node::children_html(children), "<span>5</span>/500");
            }
            other => panic!("unexpected patch {other:?}"),
        }
    }

    #[test]
    fn structural_change_replaces_container() {
        let done = vec![Node::from(Element::new("p").with_id("w-done").with_text("thanks"))];
        let patches = diff("entry", &widget(true, "hi"), &done);
        assert_eq!(patches, mount("entry", &done));
    }

    #[test]
    fn attribute_add_and_remove() {
        let a = vec![Node::from(Element::new("button").with_id("b").with_attr("disabled", ""))];
        let b = vec![Node::from(Element::new("button").with_id("b").with_attr("type", "button"))];
        let patches = diff("entry", &a, &b);
        assert_eq!(
            patches,
            vec![
                DomPatch::SetAttribute {
                    id: "b".into(),
                    name: "type".into(),
                    value: "button".into()
                },
                DomPatch::RemoveAttribute {
                    id: "b".into(),
                    name: "disabled".into()
                },
            ]
        );
    }
}
