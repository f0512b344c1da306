//! Pipeline usages: jobs reaching an action through one composition edge.

use rusqlite::Connection;
use tracing::{debug, trace};

use super::helpers::{row_to_pipeline_usage, PIPELINE_USAGE_COLUMNS};
use crate::error::{wrap, Result};
use crate::types::{ActionId, GroupId, UsagePipeline};

const OPERATION: &str = "pipeline usages";

/// List the pipeline jobs that use an action.
///
/// A job uses the action when the parent action attached to it has an edge
/// to the action. Actions attached directly to a job, and actions further
/// than one edge below the attached parent, are not reported.
///
/// Stage, pipeline and project are outer-joined: orphaned attachments are
/// still listed with those levels set to `None`. Rows are ordered by project
/// key, pipeline name and action name, then by stage, job and attachment ID.
///
/// # Errors
///
/// Returns [`Error::Query`](crate::Error::Query) if the statement fails and
/// [`Error::Decode`](crate::Error::Decode) if a row cannot be mapped. No rows
/// are returned on error.
pub fn pipeline_usages(
    conn: &Connection,
    shared_infra_group: GroupId,
    action_id: ActionId,
) -> Result<Vec<UsagePipeline>> {
    debug!(action_id = %action_id, "Loading pipeline usages");
    let fail = wrap(action_id, OPERATION);

    let sql = format!(
        "SELECT {PIPELINE_USAGE_COLUMNS}
         FROM action
         JOIN action_edge ON action_edge.child_id = action.id
         JOIN action AS parent ON parent.id = action_edge.parent_id
         JOIN pipeline_action ON pipeline_action.action_id = parent.id
         LEFT JOIN pipeline_stage ON pipeline_stage.id = pipeline_action.pipeline_stage_id
         LEFT JOIN pipeline ON pipeline.id = pipeline_stage.pipeline_id
         LEFT JOIN project ON project.id = pipeline.project_id
         WHERE action.id = ?1
         ORDER BY project.project_key, pipeline.name, action.name,
                  pipeline_stage.id, parent.id, pipeline_action.id"
    );

    let mut stmt = conn.prepare(&sql).map_err(fail)?;
    let usages = stmt
        .query_map([action_id.as_i64()], |row| {
            row_to_pipeline_usage(row, shared_infra_group)
        })
        .map_err(fail)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(fail)?;

    trace!(
        action_id = %action_id,
        count = usages.len(),
        warnings = usages.iter().filter(|u| u.warning).count(),
        "Loaded pipeline usages"
    );

    Ok(usages)
}
