//! Connection-owning entry point for usage queries.
//!
//! `UsageAnalyzer` opens the pipeline database read-only and implements
//! [`UsageOps`] on top of the free functions in [`crate::usage`].

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use crate::error::{Error, Result};
use crate::schema;
use crate::types::{ActionId, GroupId, Usage, UsageAction, UsagePipeline};
use crate::usage;

/// Usage reporting over the action dependency graph.
///
/// The shared-infra group is a parameter of every call rather than state of
/// the implementor.
pub trait UsageOps: Send + Sync {
    /// Jobs using `action_id` through an attached parent action.
    ///
    /// # Errors
    ///
    /// See [`usage::pipeline_usages`].
    fn pipeline_usages(
        &self,
        shared_infra_group: GroupId,
        action_id: ActionId,
    ) -> Result<Vec<UsagePipeline>>;

    /// Actions embedding `action_id` directly.
    ///
    /// # Errors
    ///
    /// See [`usage::action_usages`].
    fn action_usages(
        &self,
        shared_infra_group: GroupId,
        action_id: ActionId,
    ) -> Result<Vec<UsageAction>>;

    /// Whether `action_id` is attached to a job or embedded in an action.
    ///
    /// # Errors
    ///
    /// See [`usage::is_used`].
    fn is_used(&self, action_id: ActionId) -> Result<bool>;

    /// Both usage listings.
    ///
    /// # Errors
    ///
    /// Fails if either listing fails.
    fn usage(&self, shared_infra_group: GroupId, action_id: ActionId) -> Result<Usage> {
        Ok(Usage {
            pipelines: self.pipeline_usages(shared_infra_group, action_id)?,
            actions: self.action_usages(shared_infra_group, action_id)?,
        })
    }
}

/// Read-only handle on a pipeline database.
///
/// The connection is wrapped in a `Mutex` so one analyzer can be shared
/// across request handlers; each call holds the lock for its queries only.
pub struct UsageAnalyzer {
    conn: Mutex<Connection>,
}

impl UsageAnalyzer {
    /// Open an existing database read-only and verify its schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Database`] if the file cannot be opened and
    /// [`Error::Schema`] if a required table is missing.
    pub fn open(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Opening pipeline database");

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        Self::from_connection(conn)
    }

    /// Wrap an already-open connection after verifying its schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] if a required table is missing.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        schema::verify(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the connection lock.
    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            Error::Internal(format!(
                "database connection mutex poisoned (a thread panicked while holding the lock): {e}"
            ))
        })
    }
}

impl UsageOps for UsageAnalyzer {
    fn pipeline_usages(
        &self,
        shared_infra_group: GroupId,
        action_id: ActionId,
    ) -> Result<Vec<UsagePipeline>> {
        let conn = self.connection()?;
        usage::pipeline_usages(&conn, shared_infra_group, action_id)
    }

    fn action_usages(
        &self,
        shared_infra_group: GroupId,
        action_id: ActionId,
    ) -> Result<Vec<UsageAction>> {
        let conn = self.connection()?;
        usage::action_usages(&conn, shared_infra_group, action_id)
    }

    fn is_used(&self, action_id: ActionId) -> Result<bool> {
        let conn = self.connection()?;
        usage::is_used(&conn, action_id)
    }

    fn usage(&self, shared_infra_group: GroupId, action_id: ActionId) -> Result<Usage> {
        // Both listings run under one lock.
        let conn = self.connection()?;
        usage::load_usage(&conn, shared_infra_group, action_id)
    }
}
