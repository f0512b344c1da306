//! Action usages: parent actions embedding an action as a step.

use rusqlite::Connection;
use tracing::{debug, trace};

use super::helpers::{row_to_action_usage, ACTION_USAGE_COLUMNS};
use crate::error::{wrap, Result};
use crate::types::{ActionId, GroupId, UsageAction};

const OPERATION: &str = "action usages";

/// List the actions that embed an action directly (one edge, not transitive).
///
/// Parents without an owning group are skipped. A parent whose group row is
/// missing is kept with no group name. Rows are ordered by parent action
/// name and action name, then by parent ID.
///
/// # Errors
///
/// Returns [`Error::Query`](crate::Error::Query) if the statement fails and
/// [`Error::Decode`](crate::Error::Decode) if a row cannot be mapped. No rows
/// are returned on error.
pub fn action_usages(
    conn: &Connection,
    shared_infra_group: GroupId,
    action_id: ActionId,
) -> Result<Vec<UsageAction>> {
    debug!(action_id = %action_id, "Loading action usages");
    let fail = wrap(action_id, OPERATION);

    let sql = format!(
        "SELECT {ACTION_USAGE_COLUMNS}
         FROM action
         JOIN action_edge ON action_edge.child_id = action.id
         JOIN action AS parent ON parent.id = action_edge.parent_id
         LEFT JOIN \"group\" ON \"group\".id = parent.group_id
         WHERE action.id = ?1 AND parent.group_id IS NOT NULL
         ORDER BY parent.name, action.name, parent.id"
    );

    let mut stmt = conn.prepare(&sql).map_err(fail)?;
    let usages = stmt
        .query_map([action_id.as_i64()], |row| {
            row_to_action_usage(row, shared_infra_group)
        })
        .map_err(fail)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(fail)?;

    trace!(
        action_id = %action_id,
        count = usages.len(),
        warnings = usages.iter().filter(|u| u.warning).count(),
        "Loaded action usages"
    );

    Ok(usages)
}
