//! Relational schema read by the usage queries.
//!
//! The schema is owned by the pipeline system; this crate only reads it.
//! [`SCHEMA`] is never executed against a store opened here. It is provided
//! for test fixtures and embedding applications that need a compatible layout.

use rusqlite::{Connection, OptionalExtension};
use tracing::trace;

use crate::error::{Error, Result};

/// Tables the usage queries read from.
pub const REQUIRED_TABLES: &[&str] = &[
    "action",
    "action_edge",
    "pipeline_action",
    "pipeline_stage",
    "pipeline",
    "project",
    "project_group",
    "group",
];

/// Reference DDL for the consumed schema.
pub const SCHEMA: &str = r#"
-- Access-control domains
CREATE TABLE IF NOT EXISTS "group" (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

-- Reusable step definitions; group_id is NULL for ungrouped actions
CREATE TABLE IF NOT EXISTS action (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    group_id INTEGER REFERENCES "group"(id)
);

-- Composition: parent embeds child as one of its steps
CREATE TABLE IF NOT EXISTS action_edge (
    id INTEGER PRIMARY KEY,
    parent_id INTEGER NOT NULL REFERENCES action(id) ON DELETE CASCADE,
    child_id INTEGER NOT NULL REFERENCES action(id)
);

CREATE INDEX IF NOT EXISTS idx_action_edge_child ON action_edge(child_id);
CREATE INDEX IF NOT EXISTS idx_action_edge_parent ON action_edge(parent_id);

CREATE TABLE IF NOT EXISTS project (
    id INTEGER PRIMARY KEY,
    project_key TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL
);

-- Groups a project has been granted access to
CREATE TABLE IF NOT EXISTS project_group (
    project_id INTEGER NOT NULL REFERENCES project(id) ON DELETE CASCADE,
    group_id INTEGER NOT NULL REFERENCES "group"(id) ON DELETE CASCADE,
    PRIMARY KEY (project_id, group_id)
);

CREATE TABLE IF NOT EXISTS pipeline (
    id INTEGER PRIMARY KEY,
    project_id INTEGER NOT NULL REFERENCES project(id) ON DELETE CASCADE,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS pipeline_stage (
    id INTEGER PRIMARY KEY,
    pipeline_id INTEGER NOT NULL REFERENCES pipeline(id) ON DELETE CASCADE,
    name TEXT NOT NULL
);

-- A job: a (parent) action attached to a stage
CREATE TABLE IF NOT EXISTS pipeline_action (
    id INTEGER PRIMARY KEY,
    pipeline_stage_id INTEGER NOT NULL REFERENCES pipeline_stage(id) ON DELETE CASCADE,
    action_id INTEGER NOT NULL REFERENCES action(id)
);

CREATE INDEX IF NOT EXISTS idx_pipeline_action_action ON pipeline_action(action_id);
"#;

/// Check that every table in [`REQUIRED_TABLES`] exists.
///
/// # Errors
///
/// Returns [`Error::Schema`] naming the first missing table, or
/// [`Error::Database`] if `sqlite_master` cannot be read.
pub fn verify(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
    )?;

    for table in REQUIRED_TABLES {
        let found: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
        if found.is_none() {
            return Err(Error::Schema(format!("missing table `{table}`")));
        }
        trace!(table, "Found required table");
    }

    Ok(())
}
