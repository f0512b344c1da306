//! Shared fixture for usage integration tests.
//!
//! Builds a pipeline database in a temp directory from the reference schema.
//! Foreign key enforcement is switched off on the seeding connection (bundled
//! SQLite enables it by default) so orphaned rows can be seeded on purpose.

#![allow(dead_code)]

use std::path::PathBuf;

use action_usage::schema::SCHEMA;
use action_usage::UsageAnalyzer;
use rusqlite::{params, Connection};
use tempfile::TempDir;

/// The shared-infra group used by every fixture.
pub const SHARED_INFRA: i64 = 1;

/// Writable pipeline database plus helpers to seed it.
pub struct Fixture {
    _dir: TempDir,
    path: PathBuf,
    conn: Connection,
}

impl Fixture {
    /// Create an empty database with the reference schema and the shared-infra group.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("pipelines.db");
        let conn = Connection::open(&path).expect("should open database");
        conn.pragma_update(None, "foreign_keys", false)
            .expect("should disable foreign keys");
        conn.execute_batch(SCHEMA).expect("should apply schema");

        let fixture = Self {
            _dir: dir,
            path,
            conn,
        };
        fixture.group(SHARED_INFRA, "shared.infra");
        fixture
    }

    /// Whether the seeding connection enforces foreign keys.
    pub fn foreign_keys_enforced(&self) -> bool {
        self.conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .expect("should read foreign_keys pragma")
    }

    /// Writable connection for seeding or for calling the free functions.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Path of the database file.
    pub fn path(&self) -> PathBuf {
        self.path.clone()
    }

    /// Mutable connection, for tests that open their own transaction.
    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Open a read-only analyzer on the fixture database.
    pub fn analyzer(&self) -> UsageAnalyzer {
        UsageAnalyzer::open(&self.path).expect("should open analyzer")
    }

    pub fn group(&self, id: i64, name: &str) {
        self.conn
            .execute(
                "INSERT INTO \"group\" (id, name) VALUES (?1, ?2)",
                params![id, name],
            )
            .expect("should insert group");
    }

    pub fn action(&self, id: i64, name: &str, group_id: Option<i64>) {
        self.conn
            .execute(
                "INSERT INTO action (id, name, group_id) VALUES (?1, ?2, ?3)",
                params![id, name, group_id],
            )
            .expect("should insert action");
    }

    /// Record that `parent` embeds `child` as a step.
    pub fn edge(&self, parent: i64, child: i64) {
        self.conn
            .execute(
                "INSERT INTO action_edge (parent_id, child_id) VALUES (?1, ?2)",
                params![parent, child],
            )
            .expect("should insert action edge");
    }

    pub fn project(&self, id: i64, key: &str, name: &str) {
        self.conn
            .execute(
                "INSERT INTO project (id, project_key, name) VALUES (?1, ?2, ?3)",
                params![id, key, name],
            )
            .expect("should insert project");
    }

    /// Grant `project` access to `group`.
    pub fn grant(&self, project: i64, group: i64) {
        self.conn
            .execute(
                "INSERT INTO project_group (project_id, group_id) VALUES (?1, ?2)",
                params![project, group],
            )
            .expect("should insert project group");
    }

    pub fn pipeline(&self, id: i64, project: i64, name: &str) {
        self.conn
            .execute(
                "INSERT INTO pipeline (id, project_id, name) VALUES (?1, ?2, ?3)",
                params![id, project, name],
            )
            .expect("should insert pipeline");
    }

    pub fn stage(&self, id: i64, pipeline: i64, name: &str) {
        self.conn
            .execute(
                "INSERT INTO pipeline_stage (id, pipeline_id, name) VALUES (?1, ?2, ?3)",
                params![id, pipeline, name],
            )
            .expect("should insert stage");
    }

    /// Attach `action` as a job of `stage`, returning the attachment ID.
    pub fn attach(&self, stage: i64, action: i64) -> i64 {
        self.conn
            .execute(
                "INSERT INTO pipeline_action (pipeline_stage_id, action_id) VALUES (?1, ?2)",
                params![stage, action],
            )
            .expect("should insert pipeline action");
        self.conn.last_insert_rowid()
    }

    /// Run raw SQL against the fixture (schema damage for error-path tests).
    pub fn exec(&self, sql: &str) {
        self.conn.execute_batch(sql).expect("should execute SQL");
    }
}

/// Standard graph used across tests.
///
/// ```text
///   project 10 "APP" (grants group 2)      project 20 "OPS" (no grants)
///     pipeline 100 "build"                   pipeline 200 "deploy"
///       stage 1000 "compile"                   stage 2000 "release"
///         job: action 50 "build-job"             job: action 60 "release-job"
///                  \                                  /
///                   +---------> action 5 <-----------+
///                             "checkout" (group 2)
/// ```
pub fn two_projects() -> Fixture {
    let fx = Fixture::new();
    fx.group(2, "team-a");
    fx.group(3, "team-b");

    fx.action(5, "checkout", Some(2));
    fx.action(50, "build-job", Some(2));
    fx.action(60, "release-job", Some(3));
    fx.edge(50, 5);
    fx.edge(60, 5);

    fx.project(10, "APP", "Application");
    fx.project(20, "OPS", "Operations");
    fx.grant(10, 2);

    fx.pipeline(100, 10, "build");
    fx.pipeline(200, 20, "deploy");
    fx.stage(1000, 100, "compile");
    fx.stage(2000, 200, "release");
    fx.attach(1000, 50);
    fx.attach(2000, 60);

    fx
}
