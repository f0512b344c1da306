//! Helper functions for usage row conversion.
//!
//! Column lists are kept next to the converters that read them so the
//! positional indexes stay in sync.

use crate::types::{
    ActionId, ActionRef, GroupId, PipelineId, PipelineRef, ProjectId, ProjectRef, StageId,
    StageRef, UsageAction, UsagePipeline,
};
use crate::warning::{action_warning, pipeline_warning};

/// SQL column list for pipeline usage rows.
///
/// Use with `row_to_pipeline_usage` for consistent column ordering.
pub(crate) const PIPELINE_USAGE_COLUMNS: &str = "project.id, project.project_key, project.name, \
     pipeline.id, pipeline.name, \
     pipeline_stage.id, pipeline_stage.name, \
     parent.id, parent.name, \
     action.id, action.name, action.group_id, \
     EXISTS (SELECT 1 FROM project_group \
             WHERE project_group.project_id = project.id \
               AND project_group.group_id = action.group_id)";

/// SQL column list for action usage rows.
///
/// Use with `row_to_action_usage` for consistent column ordering.
pub(crate) const ACTION_USAGE_COLUMNS: &str = "parent.id, \"group\".name, parent.name, parent.group_id, \
     action.id, action.name, action.group_id";

/// Convert a database row to a [`UsagePipeline`].
///
/// Project, pipeline and stage come from outer joins; a NULL ID means the
/// attachment does not reach that level.
pub(crate) fn row_to_pipeline_usage(
    row: &rusqlite::Row,
    shared_infra_group: GroupId,
) -> rusqlite::Result<UsagePipeline> {
    let project = match row.get::<_, Option<i64>>(0)? {
        Some(id) => Some(ProjectRef {
            id: ProjectId::from(id),
            key: row.get(1)?,
            name: row.get(2)?,
        }),
        None => None,
    };
    let pipeline = match row.get::<_, Option<i64>>(3)? {
        Some(id) => Some(PipelineRef {
            id: PipelineId::from(id),
            name: row.get(4)?,
        }),
        None => None,
    };
    let stage = match row.get::<_, Option<i64>>(5)? {
        Some(id) => Some(StageRef {
            id: StageId::from(id),
            name: row.get(6)?,
        }),
        None => None,
    };

    let child_group = row.get::<_, Option<i64>>(11)?.map(GroupId::from);
    let granted: bool = row.get(12)?;

    Ok(UsagePipeline {
        project,
        pipeline,
        stage,
        job: ActionRef {
            id: ActionId::from(row.get::<_, i64>(7)?),
            name: row.get(8)?,
        },
        action: ActionRef {
            id: ActionId::from(row.get::<_, i64>(9)?),
            name: row.get(10)?,
        },
        warning: pipeline_warning(child_group, granted, shared_infra_group),
    })
}

/// Convert a database row to a [`UsageAction`].
///
/// The query filters out parents without a group, so `parent.group_id` is
/// read as non-null.
pub(crate) fn row_to_action_usage(
    row: &rusqlite::Row,
    shared_infra_group: GroupId,
) -> rusqlite::Result<UsageAction> {
    let parent_group = GroupId::from(row.get::<_, i64>(3)?);
    let child_group = row.get::<_, Option<i64>>(6)?.map(GroupId::from);

    Ok(UsageAction {
        parent_action_id: ActionId::from(row.get::<_, i64>(0)?),
        parent_action_group_name: row.get(1)?,
        parent_action_name: row.get(2)?,
        action_id: ActionId::from(row.get::<_, i64>(4)?),
        action_name: row.get(5)?,
        warning: action_warning(child_group, parent_group, shared_infra_group),
    })
}
