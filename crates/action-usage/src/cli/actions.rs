//! `action-usage actions` command implementation.

use action_usage::{ActionId, UsageOps};
use colored::Colorize;

use super::display::{print_action_usages, print_json};
use super::Context;

/// Run the actions command.
pub fn run(ctx: &Context, action: ActionId) -> Result<(), action_usage::Error> {
    let usages = ctx.analyzer.action_usages(ctx.shared_infra_group, action)?;

    if ctx.json {
        print_json(&usages)?;
        return Ok(());
    }

    if usages.is_empty() {
        println!("No actions embed action {}", action.to_string().cyan());
        return Ok(());
    }

    println!("Actions embedding action {}:", action.to_string().cyan().bold());
    println!();
    print_action_usages(&usages);

    let warnings = usages.iter().filter(|u| u.warning).count();
    println!();
    println!(
        "{}: {} parent actions, {} without group access",
        "Total".dimmed(),
        usages.len().to_string().green(),
        warnings.to_string().yellow()
    );

    Ok(())
}
