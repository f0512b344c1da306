//! # action-usage: Where is this CI action used, and may it be?
//!
//! Pipelines in a CI/CD system are built from *actions*. An action can embed
//! other actions as steps (an edge in the action graph), and a root action is
//! attached to a pipeline job. This crate reads that graph from the
//! pipeline database and answers, for one action:
//!
//! - which pipeline jobs use it through an attached parent action
//!   ([`usage::pipeline_usages`])
//! - which actions embed it directly ([`usage::action_usages`])
//! - whether it is referenced at all, as a delete guard ([`usage::is_used`])
//!
//! Each usage row carries a `warning` flag set when the consumer cannot see
//! the action's owning group. Actions owned by the shared-infra group are
//! visible everywhere; its ID is passed on every call.
//!
//! ## Design Philosophy
//!
//! - **Read-only** - No writes, no migrations, no caching
//! - **Caller owns the session** - Free functions take `&Connection`, so they
//!   run inside whatever transaction the caller holds
//! - **No partial results** - A listing is complete or the call fails
//!
//! ## Quick Start
//!
//! ```no_run
//! use action_usage::{ActionId, GroupId, UsageAnalyzer, UsageOps};
//! use std::path::Path;
//!
//! let analyzer = UsageAnalyzer::open(Path::new("/var/lib/pipelines/pipelines.db"))?;
//! let shared_infra = GroupId(1);
//!
//! for usage in analyzer.pipeline_usages(shared_infra, ActionId(42))? {
//!     println!("{:?} / {:?} warning={}", usage.project_key(), usage.pipeline_name(), usage.warning);
//! }
//!
//! if !analyzer.is_used(ActionId(42))? {
//!     println!("safe to delete");
//! }
//! # Ok::<(), action_usage::Error>(())
//! ```

mod analyzer;
mod error;
mod types;

pub mod config;
pub mod schema;
pub mod usage;
pub mod warning;

pub use analyzer::{UsageAnalyzer, UsageOps};
pub use error::{Error, Result};
pub use types::{
    ActionId, ActionRef, GroupId, PipelineId, PipelineRef, ProjectId, ProjectRef, StageId,
    StageRef, Usage, UsageAction, UsagePipeline,
};
