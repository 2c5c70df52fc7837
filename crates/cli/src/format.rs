//! Summary and error formatting.
//!
//! Two modes:
//! - **Human** (default): one line per fact
//! - **JSON** (`--json`): `serde_json::to_string_pretty`

use recat_executor::{Plan, RemapReport};

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// What a finished invocation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Summary {
    /// `--check`: plan parsed, nothing ran
    Checked { operations: usize },
    /// Plan ran to completion
    Finished {
        operations: usize,
        report: RemapReport,
        saved: bool,
    },
}

impl Summary {
    /// Summary of a validated plan
    pub fn checked(plan: &Plan) -> Self {
        Summary::Checked {
            operations: plan.len(),
        }
    }
}

/// Format a summary.
pub fn format_summary(summary: &Summary, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => format_json(summary),
        OutputMode::Human => format_human(summary),
    }
}

/// Format an error, including its context chain.
pub fn format_error(err: &anyhow::Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(&serde_json::json!({
            "error": format!("{:#}", err)
        }))
        .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", err)),
        OutputMode::Human => format!("(error) {:#}", err),
    }
}

fn format_human(summary: &Summary) -> String {
    match summary {
        Summary::Checked { operations } => format!("Plan OK: {} operations", operations),
        Summary::Finished {
            operations,
            report,
            saved,
        } => {
            let mut out = format!(
                "{} operations run\n{} mappings, {} posts changed, {} not changed",
                operations, report.mappings, report.changed, report.unchanged
            );
            if !saved {
                out.push_str("\n(dry run, nothing saved)");
            }
            out
        }
    }
}

fn format_json(summary: &Summary) -> String {
    let value = match summary {
        Summary::Checked { operations } => serde_json::json!({
            "checked": true,
            "operations": operations,
        }),
        Summary::Finished {
            operations,
            report,
            saved,
        } => serde_json::json!({
            "operations": operations,
            "mappings": report.mappings,
            "changed": report.changed,
            "unchanged": report.unchanged,
            "saved": saved,
        }),
    };
    serde_json::to_string_pretty(&value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}
