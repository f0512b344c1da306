//! Delete guard: is an action referenced anywhere?

use rusqlite::Connection;
use tracing::trace;

use crate::error::{wrap, Result};
use crate::types::ActionId;

/// Check whether an action is attached to a job or embedded in another action.
///
/// The job attachment count runs first; when it is positive the edge count
/// is never issued.
///
/// # Errors
///
/// Returns [`Error::Query`](crate::Error::Query) as soon as either count
/// fails.
pub fn is_used(conn: &Connection, action_id: ActionId) -> Result<bool> {
    let attached: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pipeline_action WHERE action_id = ?1",
            [action_id.as_i64()],
            |row| row.get(0),
        )
        .map_err(wrap(action_id, "pipeline attachment count"))?;

    if attached > 0 {
        trace!(action_id = %action_id, attached, "Action attached to pipeline jobs");
        return Ok(true);
    }

    let embedded: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM action_edge WHERE child_id = ?1",
            [action_id.as_i64()],
            |row| row.get(0),
        )
        .map_err(wrap(action_id, "action edge count"))?;

    trace!(action_id = %action_id, embedded, "Counted parent actions");
    Ok(embedded > 0)
}
