//! Canonical component resolution
//!
//! An instance points at a main component; when that component is one
//! variant inside a component set, usage is attributed to the set so all
//! variants of one design count as a single logical component.

use crate::document::{Document, Node, NodeKind};

/// Resolve an instance to its canonical entity
///
/// `None` when the main-component reference is absent or dangling; the
/// caller must then skip the instance entirely.
pub fn resolve<'a>(doc: &'a Document, instance: &Node) -> Option<&'a Node> {
    let main_id = instance.main_component.as_deref()?;
    let main = doc.node(main_id)?;
    match doc.parent(&main.id) {
        Some(parent) if parent.kind == NodeKind::ComponentSet => Some(parent),
        _ => Some(main),
    }
}

/// Display name for a canonical entity
///
/// Resolution already collapses variants, so this is normally the entity's
/// own name; a raw variant handed in directly still reports its set's name.
pub fn display_name<'a>(doc: &'a Document, entity: &'a Node) -> &'a str {
    match doc.parent(&entity.id) {
        Some(parent) if parent.kind == NodeKind::ComponentSet => parent.name.as_str(),
        _ => entity.name.as_str(),
    }
}
