//! Text (terminal) reporter with colors and formatting

use super::UsageRecord;
use anyhow::Result;

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";

/// Render records as formatted terminal output
pub fn render(records: &[UsageRecord]) -> Result<String> {
    let mut out = String::new();

    out.push_str(&format!("\n{BOLD}Component Census{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));

    if records.is_empty() {
        out.push_str("No components used in the scanned scope.\n");
        return Ok(out);
    }

    let total_uses: u32 = records.iter().map(|r| r.count).sum();
    out.push_str(&format!(
        "Components: {BOLD}{}{RESET}  Instances: {BOLD}{}{RESET}\n\n",
        records.len(),
        total_uses
    ));

    for record in records {
        out.push_str(&format!(
            "  {CYAN}{}{RESET} {DIM}({}){RESET}  x{}\n",
            record.node.name, record.node.id, record.count
        ));
        if !record.depends_on.is_empty() {
            let deps: Vec<&str> = record.depends_on.iter().map(|d| d.name.as_str()).collect();
            out.push_str(&format!("    {DIM}depends on:{RESET} {}\n", deps.join(", ")));
        }
    }

    Ok(out)
}
