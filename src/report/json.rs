//! JSON reporter
//!
//! Emits the shaped record list as pretty-printed JSON, the same shape
//! the session's `result` message carries.

use super::UsageRecord;
use anyhow::Result;

/// Render records as JSON
pub fn render(records: &[UsageRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Render records as compact JSON (single line)
#[allow(dead_code)] // Public API helper
pub fn render_compact(records: &[UsageRecord]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}
