//! Error types for action usage queries.
//!
//! Every failure is surfaced to the immediate caller exactly once. Nothing is
//! retried here and nothing is downgraded to an empty listing.
//!
//! ## Error Categorization
//!
//! Store failures for a specific action fall into two buckets:
//! - **Query**: the store rejected or could not run the statement
//!   (connectivity, missing table, permission)
//! - **Decode**: a returned row did not fit the expected result shape
//!   (schema drift)
//!
//! Both carry the action ID that was being queried.

use thiserror::Error;

use crate::types::ActionId;

/// Result type for action usage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for action usage operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A usage query could not be prepared or executed.
    #[error("cannot load {operation} for action with id {action_id}")]
    Query {
        /// Action being queried
        action_id: ActionId,
        /// What was being loaded (e.g. "pipeline usages")
        operation: &'static str,
        /// Underlying store error
        #[source]
        source: rusqlite::Error,
    },

    /// A row returned by a usage query could not be mapped.
    #[error("cannot decode {operation} row for action with id {action_id}")]
    Decode {
        /// Action being queried
        action_id: ActionId,
        /// What was being loaded (e.g. "pipeline usages")
        operation: &'static str,
        /// Underlying conversion error
        #[source]
        source: rusqlite::Error,
    },

    /// Opening or inspecting the database failed
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A table this crate reads from is absent
    #[error("schema error: {0}")]
    Schema(String),

    /// Invalid configuration or arguments
    #[error("configuration error: {0}")]
    Config(String),

    /// File system operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal invariant violated (e.g. poisoned connection lock)
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Wrap a store error raised while loading `operation` for `action_id`.
    ///
    /// Column conversion failures become [`Error::Decode`]; everything else is
    /// a [`Error::Query`].
    pub(crate) fn from_store(
        action_id: ActionId,
        operation: &'static str,
        source: rusqlite::Error,
    ) -> Self {
        match source {
            rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::IntegralValueOutOfRange(..)
            | rusqlite::Error::InvalidColumnIndex(..)
            | rusqlite::Error::InvalidColumnName(..) => Self::Decode {
                action_id,
                operation,
                source,
            },
            source => Self::Query {
                action_id,
                operation,
                source,
            },
        }
    }

    /// The action ID the failing call was made for, if any.
    #[must_use]
    pub fn action_id(&self) -> Option<ActionId> {
        match self {
            Self::Query { action_id, .. } | Self::Decode { action_id, .. } => Some(*action_id),
            _ => None,
        }
    }

    /// Returns `true` if a row failed to decode (schema drift).
    #[must_use]
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

/// Build a `map_err` adapter that wraps store errors for one operation.
pub(crate) fn wrap(
    action_id: ActionId,
    operation: &'static str,
) -> impl Fn(rusqlite::Error) -> Error + Copy {
    move |source| Error::from_store(action_id, operation, source)
}
