//! Common display utilities for CLI commands.

use std::io::{self, Write};

use action_usage::{UsageAction, UsagePipeline};
use colored::Colorize;
use serde::Serialize;

/// Placeholder for outer-join levels an attachment does not reach.
const MISSING: &str = "-";

/// Print a value as pretty JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(handle, "{json}")
}

/// Marker shown next to usages that cross a visibility boundary.
fn warning_marker(warning: bool) -> String {
    if warning {
        format!(" {}", "⚠ no group access".yellow().bold())
    } else {
        String::new()
    }
}

/// Display pipeline usages, one job per line.
///
/// Rows arrive sorted by project key and pipeline name; the order is kept.
pub fn print_pipeline_usages(usages: &[UsagePipeline]) {
    for usage in usages {
        let project = usage.project_key().unwrap_or(MISSING);
        let pipeline = usage.pipeline_name().unwrap_or(MISSING);
        let stage = usage.stage.as_ref().map_or(MISSING, |s| s.name.as_str());

        println!(
            "  {} {} / {} / {} / {} {}{}",
            "•".dimmed(),
            project.white().bold(),
            pipeline,
            stage,
            usage.job.name.cyan(),
            format!("(job {})", usage.job.id).dimmed(),
            warning_marker(usage.warning)
        );
    }
}

/// Display action usages, one parent action per line.
pub fn print_action_usages(usages: &[UsageAction]) {
    for usage in usages {
        let group = usage
            .parent_action_group_name
            .as_deref()
            .unwrap_or(MISSING);

        println!(
            "  {} {} {} {}{}",
            "•".dimmed(),
            usage.parent_action_name.cyan(),
            format!("(action {})", usage.parent_action_id).dimmed(),
            format!("[{group}]").white(),
            warning_marker(usage.warning)
        );
    }
}
