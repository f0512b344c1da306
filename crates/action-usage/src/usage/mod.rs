//! Usage queries over the action graph.
//!
//! Every function takes a borrowed [`rusqlite::Connection`], so callers can run
//! them inside their own transaction (`rusqlite::Transaction` derefs to a
//! connection) and get whatever read isolation that session provides.
//!
//! ## Module Structure
//!
//! - `helpers` - Row conversion and SQL column lists
//! - `pipelines` - Jobs using an action through a parent action
//! - `actions` - Parent actions embedding an action directly
//! - `used` - Delete-guard existence check

mod actions;
mod helpers;
mod pipelines;
mod used;

pub use actions::action_usages;
pub use pipelines::pipeline_usages;
pub use used::is_used;

use rusqlite::Connection;

use crate::error::Result;
use crate::types::{ActionId, GroupId, Usage};

/// Load both usage listings for an action.
///
/// # Errors
///
/// Fails if either listing fails; no partial [`Usage`] is returned.
pub fn load_usage(
    conn: &Connection,
    shared_infra_group: GroupId,
    action_id: ActionId,
) -> Result<Usage> {
    Ok(Usage {
        pipelines: pipeline_usages(conn, shared_infra_group, action_id)?,
        actions: action_usages(conn, shared_infra_group, action_id)?,
    })
}
