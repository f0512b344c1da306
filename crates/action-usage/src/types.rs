//! Domain types for action usage reporting.
//!
//! - **Identifiers**: `ActionId`, `GroupId`, `ProjectId`, `PipelineId`, `StageId`
//! - **Results**: `UsagePipeline`, `UsageAction`, `Usage` (query results)
//!
//! ## Design Decisions
//!
//! | Decision | Choice | Rationale |
//! |----------|--------|-----------|
//! | IDs | Newtypes over `i64` | Keeps action and group IDs from being swapped |
//! | Outer-join columns | `Option<...Ref>` | "No pipeline" is not "pipeline 0" |
//! | `warning` | Computed on read | Never persisted; derived from group grants |
//! | Field names | snake_case everywhere | One convention for every serialized shape |

use serde::{Deserialize, Serialize};

// ============================================================================
// Strongly-typed ID wrappers
// ============================================================================

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Extract the raw i64 value.
            #[must_use]
            pub fn as_i64(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of an action (a reusable pipeline step definition).
    ActionId
);

define_id!(
    /// Identifier of an access-control group.
    GroupId
);

define_id!(
    /// Identifier of a project.
    ProjectId
);

define_id!(
    /// Identifier of a pipeline.
    PipelineId
);

define_id!(
    /// Identifier of a pipeline stage.
    StageId
);

// ============================================================================
// Joined references
// ============================================================================

/// Project side of a pipeline usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    /// Project ID.
    pub id: ProjectId,
    /// Short project key (e.g. `PROJ`).
    pub key: String,
    /// Display name.
    pub name: String,
}

/// Pipeline side of a pipeline usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineRef {
    /// Pipeline ID.
    pub id: PipelineId,
    /// Pipeline name.
    pub name: String,
}

/// Stage side of a pipeline usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRef {
    /// Stage ID.
    pub id: StageId,
    /// Stage name.
    pub name: String,
}

/// An action identified by ID and name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRef {
    /// Action ID.
    pub id: ActionId,
    /// Action name.
    pub name: String,
}

// ============================================================================
// Query results
// ============================================================================

/// A pipeline job that uses an action through its attached parent action.
///
/// The job is the parent action attached to the pipeline; `action` is the
/// queried child. Project, pipeline and stage come from outer joins and are
/// `None` for orphaned attachments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsagePipeline {
    /// Owning project, if the attachment reaches one.
    pub project: Option<ProjectRef>,
    /// Pipeline containing the stage, if any.
    pub pipeline: Option<PipelineRef>,
    /// Stage the job is attached to, if any.
    pub stage: Option<StageRef>,
    /// The parent action attached as a job.
    pub job: ActionRef,
    /// The queried (child) action.
    pub action: ActionRef,
    /// `true` when the project has no grant on the action's group and the
    /// action is not shared-infra.
    pub warning: bool,
}

impl UsagePipeline {
    /// Project ID, if the usage reaches a project.
    #[must_use]
    pub fn project_id(&self) -> Option<ProjectId> {
        self.project.as_ref().map(|p| p.id)
    }

    /// Project key, if the usage reaches a project.
    #[must_use]
    pub fn project_key(&self) -> Option<&str> {
        self.project.as_ref().map(|p| p.key.as_str())
    }

    /// Pipeline ID, if the usage reaches a pipeline.
    #[must_use]
    pub fn pipeline_id(&self) -> Option<PipelineId> {
        self.pipeline.as_ref().map(|p| p.id)
    }

    /// Pipeline name, if the usage reaches a pipeline.
    #[must_use]
    pub fn pipeline_name(&self) -> Option<&str> {
        self.pipeline.as_ref().map(|p| p.name.as_str())
    }

    /// Stage ID, if the attachment has a stage.
    #[must_use]
    pub fn stage_id(&self) -> Option<StageId> {
        self.stage.as_ref().map(|s| s.id)
    }

    /// Job ID (the attached parent action).
    #[must_use]
    pub fn job_id(&self) -> ActionId {
        self.job.id
    }

    /// ID of the queried action.
    #[must_use]
    pub fn action_id(&self) -> ActionId {
        self.action.id
    }
}

/// A parent action that embeds the queried action as a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageAction {
    /// Parent action ID.
    pub parent_action_id: ActionId,
    /// Name of the parent's group; `None` if the group row is missing.
    pub parent_action_group_name: Option<String>,
    /// Parent action name.
    pub parent_action_name: String,
    /// Queried (child) action ID.
    pub action_id: ActionId,
    /// Queried (child) action name.
    pub action_name: String,
    /// `true` when parent and child groups differ and the child is not
    /// shared-infra.
    pub warning: bool,
}

/// Every known consumer of an action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Jobs using the action through a parent action.
    pub pipelines: Vec<UsagePipeline>,
    /// Actions embedding the action directly.
    pub actions: Vec<UsageAction>,
}

impl Usage {
    /// Returns `true` if neither listing has rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty() && self.actions.is_empty()
    }

    /// Number of rows (across both listings) flagged with a warning.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.pipelines.iter().filter(|u| u.warning).count()
            + self.actions.iter().filter(|u| u.warning).count()
    }
}
