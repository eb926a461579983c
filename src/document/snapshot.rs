//! Serde model for the document snapshot format
//!
//! A snapshot is the nested JSON tree exported from the host:
//!
//! ```json
//! {
//!   "pages": [
//!     { "id": "0:1", "name": "Page 1", "type": "PAGE", "children": [
//!       { "id": "1:2", "name": "Button", "type": "INSTANCE",
//!         "mainComponent": "2:1", "children": [] }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Indexing flattens the tree into the [`Document`] arena and fills the
//! child-to-parent table in one pass.

use super::{Document, Node, NodeId, NodeKind, SnapshotError};
use rustc_hash::FxHashMap;
use serde::Deserialize;

/// A nested node as it appears in the snapshot
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotNode {
    pub id: NodeId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub children: Option<Vec<SnapshotNode>>,
    #[serde(default)]
    pub main_component: Option<NodeId>,
}

/// The top-level snapshot: a list of page trees
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentSnapshot {
    pub pages: Vec<SnapshotNode>,
}

impl DocumentSnapshot {
    /// Flatten into an indexed [`Document`]
    pub fn index(self) -> Result<Document, SnapshotError> {
        if self.pages.is_empty() {
            return Err(SnapshotError::Empty);
        }

        let mut nodes: FxHashMap<NodeId, Node> = FxHashMap::default();
        let mut parents: FxHashMap<NodeId, NodeId> = FxHashMap::default();
        let mut page_ids = Vec::with_capacity(self.pages.len());

        for page in self.pages {
            if page.kind != NodeKind::Page {
                return Err(SnapshotError::NonPageRoot {
                    id: page.id,
                    kind: page.kind,
                });
            }
            page_ids.push(page.id.clone());
            insert_subtree(page, None, &mut nodes, &mut parents)?;
        }

        tracing::debug!(nodes = nodes.len(), pages = page_ids.len(), "indexed document snapshot");
        Ok(Document::from_parts(nodes, parents, page_ids))
    }
}

fn insert_subtree(
    raw: SnapshotNode,
    parent: Option<&NodeId>,
    nodes: &mut FxHashMap<NodeId, Node>,
    parents: &mut FxHashMap<NodeId, NodeId>,
) -> Result<(), SnapshotError> {
    if nodes.contains_key(&raw.id) {
        return Err(SnapshotError::DuplicateId(raw.id));
    }
    if let Some(parent_id) = parent {
        parents.insert(raw.id.clone(), parent_id.clone());
    }

    let id = raw.id.clone();
    let (child_ids, child_trees) = match raw.children {
        Some(children) => {
            let ids = children.iter().map(|c| c.id.clone()).collect();
            (Some(ids), children)
        }
        None => (None, Vec::new()),
    };

    nodes.insert(
        id.clone(),
        Node {
            id: raw.id,
            name: raw.name,
            kind: raw.kind,
            children: child_ids,
            main_component: raw.main_component,
        },
    );

    for child in child_trees {
        insert_subtree(child, Some(&id), nodes, parents)?;
    }
    Ok(())
}
