//! Shaping and rendering of scan results
//!
//! Turns the internal aggregate into externally addressable records
//! (id, display name, owning page), applies the exclusion predicate once
//! more as defense-in-depth, orders the list, and renders it.

mod json;
mod text;

use crate::document::Document;
use crate::scan::{display_name, is_excluded, UsageAggregate};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Externally addressable reference to a component entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRef {
    pub id: String,
    pub name: String,
    /// Omitted when the entity is detached from any page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
}

/// One shaped usage record, as emitted on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    pub node: NodeRef,
    pub count: u32,
    pub depends_on: Vec<NodeRef>,
}

fn node_ref(doc: &Document, id: &str) -> Option<NodeRef> {
    let node = doc.node(id)?;
    Some(NodeRef {
        id: node.id.clone(),
        name: display_name(doc, node).to_string(),
        page_id: doc.page_of(id).map(|p| p.id.clone()),
    })
}

/// Shape an aggregate into ordered wire records
///
/// Records whose entity is gone from the document or excluded are dropped,
/// and dependency lists are filtered by the same predicate. Standalone
/// records (no surviving dependencies) sort before dependent ones; within
/// a group, discovery order is preserved.
pub fn shape(doc: &Document, aggregate: &UsageAggregate, ignored: &[String]) -> Vec<UsageRecord> {
    let mut records: Vec<UsageRecord> = aggregate
        .records()
        .iter()
        .filter_map(|usage| {
            let entity = doc.node(&usage.entity)?;
            if is_excluded(doc, entity, ignored) {
                return None;
            }
            let depends_on = usage
                .depends_on
                .iter()
                .filter_map(|dep| {
                    let node = doc.node(dep)?;
                    if is_excluded(doc, node, ignored) {
                        return None;
                    }
                    node_ref(doc, dep)
                })
                .collect();
            Some(UsageRecord {
                node: node_ref(doc, &usage.entity)?,
                count: usage.count,
                depends_on,
            })
        })
        .collect();

    // Stable: ties keep discovery order, no secondary key.
    records.sort_by_key(|r| !r.depends_on.is_empty());
    records
}

/// Supported output formats for one-shot scans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render shaped records in the requested format
pub fn report(records: &[UsageRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(records),
        OutputFormat::Json => json::render(records),
    }
}
