//! Host focus state: current page, selection, viewport
//!
//! The host owns selection and viewport for real; this mirror lets the
//! session controller navigate and pick scan roots against a snapshot.

use super::{Document, Node, NodeId};
use anyhow::{anyhow, Result};

pub struct Workspace {
    doc: Document,
    current_page: NodeId,
    selection: Vec<NodeId>,
    /// Last node brought into view, stands in for the host viewport call
    focused: Option<NodeId>,
}

impl Workspace {
    /// Open a workspace over a document, focused on its first page
    pub fn new(doc: Document) -> Result<Self> {
        let current_page = doc
            .first_page()
            .map(|p| p.id.clone())
            .ok_or_else(|| anyhow!("document has no pages"))?;
        Ok(Self {
            doc,
            current_page,
            selection: Vec::new(),
            focused: None,
        })
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn current_page(&self) -> &str {
        &self.current_page
    }

    pub fn selection(&self) -> &[NodeId] {
        &self.selection
    }

    /// Root for the next scan: the first selected node if any, else the
    /// current page.
    pub fn scan_root(&self) -> Option<&Node> {
        self.selection
            .first()
            .and_then(|id| self.doc.node(id))
            .or_else(|| self.doc.node(&self.current_page))
    }

    /// Replace the selection with a single node
    pub fn select(&mut self, node_id: &str) {
        self.selection = vec![node_id.to_string()];
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn set_current_page(&mut self, page_id: &str) {
        self.current_page = page_id.to_string();
    }

    /// Ask the host to bring a node into view
    pub fn scroll_into_view(&mut self, node_id: &str) {
        tracing::info!(node = %node_id, "scrolling node into view");
        self.focused = Some(node_id.to_string());
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }
}
