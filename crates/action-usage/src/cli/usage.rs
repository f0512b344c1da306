//! `action-usage usage` command implementation.

use action_usage::{ActionId, UsageOps};
use colored::Colorize;

use super::display::{print_action_usages, print_json, print_pipeline_usages};
use super::Context;

/// Run the usage command.
pub fn run(ctx: &Context, action: ActionId) -> Result<(), action_usage::Error> {
    let usage = ctx.analyzer.usage(ctx.shared_infra_group, action)?;

    if ctx.json {
        print_json(&usage)?;
        return Ok(());
    }

    if usage.is_empty() {
        println!("Action {} is not used", action.to_string().cyan());
        return Ok(());
    }

    println!("Usage of action {}", action.to_string().cyan().bold());

    println!();
    println!("  {} ({})", "Pipelines".white().bold(), usage.pipelines.len());
    print_pipeline_usages(&usage.pipelines);

    println!();
    println!("  {} ({})", "Actions".white().bold(), usage.actions.len());
    print_action_usages(&usage.actions);

    println!();
    println!(
        "{}: {} usages without group access",
        "Warnings".dimmed(),
        usage.warning_count().to_string().yellow()
    );

    Ok(())
}
