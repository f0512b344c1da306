//! `action-usage pipelines` command implementation.

use action_usage::{ActionId, UsageOps};
use colored::Colorize;

use super::display::{print_json, print_pipeline_usages};
use super::Context;

/// Run the pipelines command.
pub fn run(ctx: &Context, action: ActionId) -> Result<(), action_usage::Error> {
    let usages = ctx
        .analyzer
        .pipeline_usages(ctx.shared_infra_group, action)?;

    if ctx.json {
        print_json(&usages)?;
        return Ok(());
    }

    if usages.is_empty() {
        println!("No pipelines use action {}", action.to_string().cyan());
        return Ok(());
    }

    println!("Pipelines using action {}:", action.to_string().cyan().bold());
    println!();
    print_pipeline_usages(&usages);

    let warnings = usages.iter().filter(|u| u.warning).count();
    println!();
    println!(
        "{}: {} jobs, {} without group access",
        "Total".dimmed(),
        usages.len().to_string().green(),
        warnings.to_string().yellow()
    );

    Ok(())
}
