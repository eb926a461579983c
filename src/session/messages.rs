//! Wire messages between the UI boundary, the host, and the session
//!
//! Tagged JSON objects, one per line. `type` carries the kebab-case
//! variant tag; fields are camelCase.

use crate::report::UsageRecord;
use serde::{Deserialize, Serialize};

/// Messages arriving from the UI boundary or the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Inbound {
    /// Request current settings and an initial scan
    #[serde(rename_all = "camelCase")]
    Init {
        /// Fallback exclusion list when nothing is persisted yet
        #[serde(default)]
        default: Option<Vec<String>>,
    },
    /// Replace the exclusion list, persist it, rescan
    #[serde(rename_all = "camelCase")]
    Scan {
        ignored_sections_or_frames: Vec<String>,
    },
    /// Navigate host focus to an instance
    #[serde(rename_all = "camelCase")]
    FocusInstance { page_id: String, instance_id: String },
    /// Host event: the user's selection changed. Absent nodeId means
    /// nothing is selected (scan the current page).
    #[serde(rename_all = "camelCase")]
    SelectionChange {
        #[serde(default)]
        node_id: Option<String>,
    },
}

/// Messages emitted towards the UI boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Outbound {
    #[serde(rename_all = "camelCase")]
    SettingsRetrieved {
        ignored_sections_or_frames: Vec<String>,
    },
    #[serde(rename = "result", rename_all = "camelCase")]
    ScanResult {
        components_with_dependencies: Vec<UsageRecord>,
    },
    Error { error: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inbound_tags_are_kebab_case() {
        let msg: Inbound = serde_json::from_str(
            r#"{ "type": "focus-instance", "pageId": "0:1", "instanceId": "1:2" }"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            Inbound::FocusInstance {
                page_id: "0:1".to_string(),
                instance_id: "1:2".to_string(),
            }
        );
    }

    #[test]
    fn init_default_is_optional() {
        let msg: Inbound = serde_json::from_str(r#"{ "type": "init" }"#).unwrap();
        assert_eq!(msg, Inbound::Init { default: None });
    }

    #[test]
    fn scan_carries_the_exclusion_list() {
        let msg: Inbound = serde_json::from_str(
            r#"{ "type": "scan", "ignoredSectionsOrFrames": ["Drafts"] }"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            Inbound::Scan {
                ignored_sections_or_frames: vec!["Drafts".to_string()],
            }
        );
    }

    #[test]
    fn selection_change_node_is_optional() {
        let msg: Inbound = serde_json::from_str(r#"{ "type": "selection-change" }"#).unwrap();
        assert_eq!(msg, Inbound::SelectionChange { node_id: None });
    }

    #[test]
    fn result_message_uses_wire_field_names() {
        let out = Outbound::ScanResult {
            components_with_dependencies: vec![],
        };
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["type"], "result");
        assert!(json["componentsWithDependencies"].is_array());
    }

    #[test]
    fn settings_retrieved_round_trips() {
        let out = Outbound::SettingsRetrieved {
            ignored_sections_or_frames: vec!["F".to_string()],
        };
        let json = serde_json::to_string(&out).unwrap();
        let back: Outbound = serde_json::from_str(&json).unwrap();
        assert_eq!(out, back);
    }
}
