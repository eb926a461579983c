//! Read-only view over a design document's node tree
//!
//! The host document is a forest of pages, each page the root of an acyclic
//! node tree. This module flattens a loaded snapshot into an id-indexed
//! arena with an explicit parent table, so upward walks (exclusion checks,
//! page lookup) never chase owning back-references.

mod snapshot;
mod workspace;

pub use snapshot::DocumentSnapshot;
pub use workspace::Workspace;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Host-assigned node identifier. Opaque; unique within a document.
pub type NodeId = String;

/// Node kinds the analysis consults
///
/// Anything the host knows but we don't care about collapses to `Other`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Page,
    Section,
    Frame,
    Instance,
    Component,
    ComponentSet,
    Group,
    #[serde(other)]
    Other,
}

/// A node in the document tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    /// Ordered child ids. `None` for leaves; `Some(vec![])` is an empty
    /// container, still traversable.
    pub children: Option<Vec<NodeId>>,
    /// For instances: the component this node instantiates. May dangle.
    pub main_component: Option<NodeId>,
}

impl Node {
    pub fn is_instance(&self) -> bool {
        self.kind == NodeKind::Instance
    }

    /// Whether the node exposes a traversable children interface
    pub fn is_container(&self) -> bool {
        self.children.is_some()
    }
}

/// Errors raised while indexing a document snapshot
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("document has no pages")]
    Empty,

    #[error("top-level node {id} is a {kind:?}, expected a page")]
    NonPageRoot { id: NodeId, kind: NodeKind },

    #[error("duplicate node id: {0}")]
    DuplicateId(NodeId),
}

/// Id-indexed arena over one document
///
/// Read-only after construction. Parent links live in a separate table
/// (child id -> parent id) built once at load time.
#[derive(Debug)]
pub struct Document {
    nodes: FxHashMap<NodeId, Node>,
    parents: FxHashMap<NodeId, NodeId>,
    pages: Vec<NodeId>,
}

impl Document {
    /// Load and index a JSON snapshot from disk
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read document snapshot {}", path.display()))?;
        Self::from_json(&raw)
    }

    /// Index a JSON snapshot string
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        use anyhow::Context;
        let snapshot: DocumentSnapshot =
            serde_json::from_str(json).context("invalid document snapshot JSON")?;
        Ok(snapshot.index()?)
    }

    pub(crate) fn from_parts(
        nodes: FxHashMap<NodeId, Node>,
        parents: FxHashMap<NodeId, NodeId>,
        pages: Vec<NodeId>,
    ) -> Self {
        Self {
            nodes,
            parents,
            pages,
        }
    }

    /// Look up a node by id
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Parent of a node, `None` at a page root or for unknown ids
    pub fn parent(&self, id: &str) -> Option<&Node> {
        self.parents.get(id).and_then(|pid| self.nodes.get(pid))
    }

    /// Resolve a node's children to nodes, skipping dangling ids
    pub fn child_nodes<'a>(&'a self, node: &'a Node) -> impl Iterator<Item = &'a Node> {
        node.children
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .filter_map(|id| {
                let child = self.nodes.get(id);
                if child.is_none() {
                    tracing::debug!(parent = %node.id, child = %id, "skipping dangling child id");
                }
                child
            })
    }

    /// Walk ancestors until a page is reached. `None` if the node is
    /// detached from any page.
    pub fn page_of(&self, id: &str) -> Option<&Node> {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            if parent.kind == NodeKind::Page {
                return Some(parent);
            }
            current = &parent.id;
        }
        None
    }

    /// Page roots in document order
    pub fn pages(&self) -> impl Iterator<Item = &Node> {
        self.pages.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn first_page(&self) -> Option<&Node> {
        self.pages.first().and_then(|id| self.nodes.get(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
