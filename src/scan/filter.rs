//! Exclusion predicate
//!
//! The user names sections or frames whose subtrees should be left out of
//! the census. A node is excluded when any ancestor is a section or frame
//! carrying one of those names; the node itself being one does not exclude
//! it, only containment does.

use crate::document::{Document, Node, NodeKind};

/// Whether `node` lies inside an ignored section or frame
///
/// Iterative walk over the parent table, bounded by tree height.
pub fn is_excluded(doc: &Document, node: &Node, ignored: &[String]) -> bool {
    let mut current = node.id.as_str();
    while let Some(parent) = doc.parent(current) {
        if matches!(parent.kind, NodeKind::Section | NodeKind::Frame)
            && ignored.iter().any(|name| *name == parent.name)
        {
            return true;
        }
        current = &parent.id;
    }
    false
}
