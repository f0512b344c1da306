//! `action-usage used` command implementation.

use action_usage::{ActionId, UsageOps};
use colored::Colorize;
use serde::Serialize;

use super::display::print_json;
use super::Context;

#[derive(Serialize)]
struct UsedReport {
    action_id: ActionId,
    used: bool,
}

/// Run the used command.
pub fn run(ctx: &Context, action: ActionId) -> Result<(), action_usage::Error> {
    let used = ctx.analyzer.is_used(action)?;

    if ctx.json {
        print_json(&UsedReport {
            action_id: action,
            used,
        })?;
    } else if used {
        println!(
            "Action {} is {}",
            action.to_string().cyan(),
            "in use".yellow().bold()
        );
    } else {
        println!(
            "Action {} is {}",
            action.to_string().cyan(),
            "not used".green().bold()
        );
    }

    Ok(())
}
