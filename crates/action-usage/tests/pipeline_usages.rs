//! Integration tests for pipeline usage listings.
//!
//! Covers the one-hop join from a child action to the jobs of its parents,
//! outer-join gaps, ordering, and the project grant warning.

mod common;

use action_usage::{ActionId, GroupId, PipelineId, ProjectId, StageId, UsageOps};
use common::{two_projects, Fixture, SHARED_INFRA};
use rstest::rstest;

const SHARED: GroupId = GroupId(SHARED_INFRA);

#[test]
fn unused_action_has_no_pipeline_usages() {
    let fx = Fixture::new();
    fx.action(5, "checkout", Some(2));

    let usages = fx
        .analyzer()
        .pipeline_usages(SHARED, ActionId(5))
        .expect("query should succeed");

    assert!(usages.is_empty());
}

#[test]
fn unknown_action_has_no_pipeline_usages() {
    let fx = two_projects();

    let usages = fx
        .analyzer()
        .pipeline_usages(SHARED, ActionId(999))
        .expect("query should succeed");

    assert!(usages.is_empty());
}

#[test]
fn child_of_attached_parent_is_reported_once() {
    let fx = Fixture::new();
    fx.action(5, "checkout", Some(SHARED_INFRA));
    fx.action(50, "build-job", Some(SHARED_INFRA));
    fx.edge(50, 5);
    fx.project(10, "APP", "Application");
    fx.pipeline(100, 10, "build");
    fx.stage(1000, 100, "compile");
    fx.attach(1000, 50);

    let usages = fx
        .analyzer()
        .pipeline_usages(SHARED, ActionId(5))
        .expect("query should succeed");

    assert_eq!(usages.len(), 1, "expected exactly one usage: {usages:?}");
    let usage = &usages[0];
    assert_eq!(usage.project_id(), Some(ProjectId(10)));
    assert_eq!(usage.project_key(), Some("APP"));
    assert_eq!(usage.pipeline_id(), Some(PipelineId(100)));
    assert_eq!(usage.pipeline_name(), Some("build"));
    assert_eq!(usage.stage_id(), Some(StageId(1000)));
    assert_eq!(usage.job_id(), ActionId(50));
    assert_eq!(usage.job.name, "build-job");
    assert_eq!(usage.action_id(), ActionId(5));
    assert_eq!(usage.action.name, "checkout");
}

#[test]
fn directly_attached_action_is_not_a_pipeline_usage() {
    let fx = Fixture::new();
    fx.action(5, "checkout", Some(2));
    fx.project(10, "APP", "Application");
    fx.pipeline(100, 10, "build");
    fx.stage(1000, 100, "compile");
    fx.attach(1000, 5);

    let usages = fx
        .analyzer()
        .pipeline_usages(SHARED, ActionId(5))
        .expect("query should succeed");

    assert!(
        usages.is_empty(),
        "attachment without an edge should not be listed: {usages:?}"
    );
}

#[test]
fn grandchild_is_not_reported_through_two_edges() {
    let fx = Fixture::new();
    fx.action(1, "leaf", Some(2));
    fx.action(2, "middle", Some(2));
    fx.action(3, "root", Some(2));
    fx.edge(3, 2);
    fx.edge(2, 1);
    fx.project(10, "APP", "Application");
    fx.pipeline(100, 10, "build");
    fx.stage(1000, 100, "compile");
    fx.attach(1000, 3);

    let analyzer = fx.analyzer();

    assert!(analyzer
        .pipeline_usages(SHARED, ActionId(1))
        .expect("query should succeed")
        .is_empty());
    assert_eq!(
        analyzer
            .pipeline_usages(SHARED, ActionId(2))
            .expect("query should succeed")
            .len(),
        1
    );
}

#[test]
fn parent_attached_to_several_jobs_yields_one_row_per_job() {
    let fx = two_projects();
    fx.stage(1001, 100, "package");
    fx.attach(1001, 50);

    let usages = fx
        .analyzer()
        .pipeline_usages(SHARED, ActionId(5))
        .expect("query should succeed");

    let stages: Vec<_> = usages.iter().filter_map(|u| u.stage_id()).collect();
    assert_eq!(stages, vec![StageId(1000), StageId(1001), StageId(2000)]);
}

#[test]
fn rows_are_ordered_by_project_key_then_pipeline_name() {
    let fx = Fixture::new();
    fx.action(5, "checkout", Some(2));
    fx.action(50, "job", Some(2));
    fx.edge(50, 5);
    fx.project(10, "ZED", "Last");
    fx.project(20, "ALPHA", "First");
    fx.pipeline(100, 10, "a-pipeline");
    fx.pipeline(200, 20, "z-pipeline");
    fx.pipeline(201, 20, "m-pipeline");
    fx.stage(1000, 100, "s");
    fx.stage(2000, 200, "s");
    fx.stage(2010, 201, "s");
    fx.attach(1000, 50);
    fx.attach(2000, 50);
    fx.attach(2010, 50);

    let usages = fx
        .analyzer()
        .pipeline_usages(SHARED, ActionId(5))
        .expect("query should succeed");

    let order: Vec<_> = usages
        .iter()
        .map(|u| (u.project_key().unwrap(), u.pipeline_name().unwrap()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("ALPHA", "m-pipeline"),
            ("ALPHA", "z-pipeline"),
            ("ZED", "a-pipeline"),
        ]
    );
}

#[test]
fn orphaned_attachment_keeps_row_with_missing_levels() {
    let fx = Fixture::new();
    fx.action(5, "checkout", Some(2));
    fx.action(50, "job", Some(2));
    fx.edge(50, 5);
    // Stage points at a pipeline that does not exist.
    fx.stage(1000, 404, "dangling");
    fx.attach(1000, 50);

    let usages = fx
        .analyzer()
        .pipeline_usages(SHARED, ActionId(5))
        .expect("query should succeed");

    assert_eq!(usages.len(), 1);
    let usage = &usages[0];
    assert_eq!(usage.stage_id(), Some(StageId(1000)));
    assert!(usage.pipeline.is_none());
    assert!(usage.project.is_none());
    assert_eq!(usage.job_id(), ActionId(50));
    assert!(usage.warning, "no project means no grant");
}

#[test]
fn embedding_parent_without_attachment_is_not_reported() {
    let fx = Fixture::new();
    fx.action(5, "checkout", Some(2));
    fx.action(50, "library", Some(2));
    fx.edge(50, 5);

    let usages = fx
        .analyzer()
        .pipeline_usages(SHARED, ActionId(5))
        .expect("query should succeed");

    assert!(usages.is_empty());
}

#[test]
fn seeding_connection_accepts_dangling_references() {
    let fx = Fixture::new();

    assert!(!fx.foreign_keys_enforced());
    // Group 77, stage 404 and pipeline 404 do not exist.
    fx.action(5, "checkout", Some(77));
    fx.stage(1000, 404, "dangling");
    fx.attach(1000, 5);
}

#[test]
fn orphaned_attachment_sorts_before_projects() {
    let fx = two_projects();
    // Stage 3000 belongs to no pipeline.
    fx.stage(3000, 404, "dangling");
    fx.attach(3000, 50);

    let usages = fx
        .analyzer()
        .pipeline_usages(SHARED, ActionId(5))
        .expect("query should succeed");

    let rows: Vec<_> = usages
        .iter()
        .map(|u| (u.project_key(), u.stage_id(), u.warning))
        .collect();
    assert_eq!(
        rows,
        vec![
            (None, Some(StageId(3000)), true),
            (Some("APP"), Some(StageId(1000)), false),
            (Some("OPS"), Some(StageId(2000)), true),
        ]
    );
}

// ============================================================================
// Warning Tests
// ============================================================================

#[rstest]
#[case::granted_private(Some(2), true, false)]
#[case::ungranted_private(Some(2), false, true)]
#[case::ungranted_shared(Some(SHARED_INFRA), false, false)]
#[case::granted_shared(Some(SHARED_INFRA), true, false)]
#[case::ungranted_groupless(None, false, true)]
fn warning_follows_project_grant_or_shared_infra(
    #[case] child_group: Option<i64>,
    #[case] granted: bool,
    #[case] expected_warning: bool,
) {
    let fx = Fixture::new();
    fx.group(2, "team-a");
    fx.action(5, "checkout", child_group);
    fx.action(50, "job", Some(2));
    fx.edge(50, 5);
    fx.project(10, "APP", "Application");
    if granted {
        fx.grant(10, child_group.unwrap_or(2));
    }
    fx.pipeline(100, 10, "build");
    fx.stage(1000, 100, "compile");
    fx.attach(1000, 50);

    let usages = fx
        .analyzer()
        .pipeline_usages(SHARED, ActionId(5))
        .expect("query should succeed");

    assert_eq!(usages.len(), 1);
    assert_eq!(usages[0].warning, expected_warning);
}

#[test]
fn grant_on_unrelated_group_does_not_clear_warning() {
    let fx = two_projects();
    fx.grant(20, 3);

    let usages = fx
        .analyzer()
        .pipeline_usages(SHARED, ActionId(5))
        .expect("query should succeed");

    let ops = usages
        .iter()
        .find(|u| u.project_key() == Some("OPS"))
        .expect("OPS usage should be listed");
    assert!(ops.warning);
}

#[test]
fn warning_is_per_project() {
    let fx = two_projects();

    let usages = fx
        .analyzer()
        .pipeline_usages(SHARED, ActionId(5))
        .expect("query should succeed");

    let flags: Vec<_> = usages
        .iter()
        .map(|u| (u.project_key().unwrap(), u.warning))
        .collect();
    assert_eq!(flags, vec![("APP", false), ("OPS", true)]);
}

#[test]
fn shared_infra_parameter_is_honoured_per_call() {
    let fx = two_projects();
    let analyzer = fx.analyzer();

    // Treating the action's own group as shared-infra clears every warning.
    let usages = analyzer
        .pipeline_usages(GroupId(2), ActionId(5))
        .expect("query should succeed");

    assert!(usages.iter().all(|u| !u.warning));
}

#[test]
fn free_function_runs_inside_caller_transaction() {
    let mut fx = two_projects();
    let tx = fx
        .conn_mut()
        .transaction()
        .expect("should begin transaction");

    let usages = action_usage::usage::pipeline_usages(&tx, SHARED, ActionId(5))
        .expect("query should succeed");

    assert_eq!(usages.len(), 2);
    tx.rollback().expect("should roll back");
}
