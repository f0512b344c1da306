//! Group-visibility warning rules.
//!
//! A usage is flagged when it crosses a group boundary without an explicit
//! grant. Actions owned by the shared-infra group are visible everywhere and
//! never flagged. An action with no owning group matches neither condition.

use crate::types::GroupId;

/// Warning for a pipeline job using `child_group`'s action.
///
/// No warning if the job's project grants the action's group, or if the
/// action belongs to the shared-infra group.
#[must_use]
pub fn pipeline_warning(
    child_group: Option<GroupId>,
    project_grants_group: bool,
    shared_infra_group: GroupId,
) -> bool {
    !(project_grants_group || child_group == Some(shared_infra_group))
}

/// Warning for a parent action in `parent_group` embedding a child action.
///
/// No warning if both actions share a group, or if the child belongs to the
/// shared-infra group.
#[must_use]
pub fn action_warning(
    child_group: Option<GroupId>,
    parent_group: GroupId,
    shared_infra_group: GroupId,
) -> bool {
    !(child_group == Some(parent_group) || child_group == Some(shared_infra_group))
}
