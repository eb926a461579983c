//! Session controller
//!
//! Holds the exclusion-list state, reacts to inbound messages and
//! selection changes, and drives the scan engine. Everything here is
//! synchronous; exactly one scan is ever in flight, so a later event
//! simply supersedes the result of an earlier one.

use super::messages::{Inbound, Outbound};
use crate::document::Workspace;
use crate::report::shape;
use crate::scan::scan;
use crate::settings::SettingsStore;
use anyhow::Result;
use tracing::{debug, error, warn};

pub struct Session {
    workspace: Workspace,
    settings: SettingsStore,
    ignored: Vec<String>,
}

impl Session {
    pub fn new(workspace: Workspace, settings: SettingsStore) -> Self {
        Self {
            workspace,
            settings,
            ignored: Vec::new(),
        }
    }

    /// Currently held exclusion list
    pub fn ignored(&self) -> &[String] {
        &self.ignored
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Dispatch one inbound message
    ///
    /// User-visible failures come back as [`Outbound::Error`]; the `Err`
    /// path is reserved for settings-store faults.
    pub fn handle(&mut self, msg: Inbound) -> Result<Vec<Outbound>> {
        debug!(?msg, "dispatching message");
        match msg {
            Inbound::Init { default } => self.on_init(default),
            Inbound::Scan {
                ignored_sections_or_frames,
            } => self.on_scan(ignored_sections_or_frames),
            Inbound::FocusInstance {
                page_id,
                instance_id,
            } => Ok(self.on_focus(&page_id, &instance_id)),
            Inbound::SelectionChange { node_id } => Ok(self.on_selection_change(node_id)),
        }
    }

    /// Load persisted settings (or the supplied default), announce them,
    /// then scan.
    fn on_init(&mut self, default: Option<Vec<String>>) -> Result<Vec<Outbound>> {
        self.ignored = self
            .settings
            .load_ignored()?
            .or(default)
            .unwrap_or_default();

        let mut out = vec![Outbound::SettingsRetrieved {
            ignored_sections_or_frames: self.ignored.clone(),
        }];
        out.extend(self.run_scan());
        Ok(out)
    }

    /// Replace the held list, persist it, rescan. The write commits
    /// before the scan starts, so the stored list always reflects the
    /// last completed scan.
    fn on_scan(&mut self, ignored: Vec<String>) -> Result<Vec<Outbound>> {
        self.ignored = ignored;
        self.settings.store_ignored(&self.ignored)?;
        Ok(self.run_scan())
    }

    /// Host selection changed: rescan with the held list. No persistence.
    fn on_selection_change(&mut self, node_id: Option<String>) -> Vec<Outbound> {
        match node_id {
            Some(id) if self.workspace.document().node(&id).is_some() => {
                self.workspace.select(&id);
            }
            Some(id) => {
                warn!(node = %id, "selection references an unknown node, treating as cleared");
                self.workspace.clear_selection();
            }
            None => self.workspace.clear_selection(),
        }
        self.run_scan()
    }

    /// Navigate host focus to an instance. Lookup failures are reported
    /// and leave all state unchanged.
    fn on_focus(&mut self, page_id: &str, instance_id: &str) -> Vec<Outbound> {
        let doc = self.workspace.document();
        let missing = if doc.node(page_id).is_none() {
            Some(("Page", page_id))
        } else if doc.node(instance_id).is_none() {
            Some(("Node", instance_id))
        } else {
            None
        };
        if let Some((kind, id)) = missing {
            let message = format!("Could not find {kind} with ID: {id}");
            error!("{message}");
            return vec![Outbound::Error { error: message }];
        }

        self.workspace.select(instance_id);
        self.workspace.set_current_page(page_id);
        self.workspace.scroll_into_view(instance_id);
        Vec::new()
    }

    /// Scan the current scope and shape the result
    ///
    /// A scan root without a children interface is a no-op: nothing is
    /// emitted and the controller stays ready for the next event.
    fn run_scan(&self) -> Vec<Outbound> {
        let doc = self.workspace.document();
        let Some(root) = self.workspace.scan_root() else {
            return Vec::new();
        };
        if !root.is_container() {
            debug!(root = %root.id, "scan root has no children interface, skipping");
            return Vec::new();
        }

        let aggregate = scan(doc, root, &self.ignored);
        let records = shape(doc, &aggregate, &self.ignored);
        vec![Outbound::ScanResult {
            components_with_dependencies: records,
        }]
    }
}
