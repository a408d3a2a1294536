//! Domain-focused tests for project values and derived counters.

use crate::project::domain::{
    ColorHex, CompletionChange, DEFAULT_PROJECT_EMOJI, Project, ProjectDomainError, ProjectName,
    TaskCounters,
};
use crate::user::domain::UserId;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn sample_project(clock: &DefaultClock) -> Project {
    Project::new(
        ProjectName::new("Website redesign").expect("valid name"),
        "Refresh the marketing pages".to_owned(),
        ColorHex::default_accent(),
        DEFAULT_PROJECT_EMOJI.to_owned(),
        UserId::new(),
        false,
        clock,
    )
}

#[rstest]
fn project_name_trims_and_accepts_non_empty() {
    let name = ProjectName::new("  Website redesign  ").expect("valid name");
    assert_eq!(name.as_str(), "Website redesign");
}

#[rstest]
fn project_name_rejects_whitespace_only() {
    let result = ProjectName::new("   ");
    assert_eq!(result, Err(ProjectDomainError::EmptyProjectName));
}

#[rstest]
#[case("#3b82f6", "#3b82f6")]
#[case("#FFAA00", "#ffaa00")]
#[case(" #00ff00 ", "#00ff00")]
fn color_hex_normalises_valid_values(#[case] input: &str, #[case] expected: &str) {
    let color = ColorHex::new(input).expect("valid colour");
    assert_eq!(color.as_str(), expected);
}

#[rstest]
#[case("3b82f6")]
#[case("#3b82f")]
#[case("#3b82f6a")]
#[case("#gggggg")]
#[case("")]
fn color_hex_rejects_malformed_values(#[case] input: &str) {
    let result = ColorHex::new(input);
    assert_eq!(
        result,
        Err(ProjectDomainError::InvalidColor(input.to_owned()))
    );
}

#[rstest]
#[case(false, false, CompletionChange::Unchanged)]
#[case(false, true, CompletionChange::Completed)]
#[case(true, false, CompletionChange::Reopened)]
#[case(true, true, CompletionChange::Unchanged)]
fn completion_change_between_covers_all_crossings(
    #[case] was: bool,
    #[case] now: bool,
    #[case] expected: CompletionChange,
) {
    assert_eq!(CompletionChange::between(was, now), expected);
}

#[rstest]
fn counters_track_created_and_deleted_tasks() {
    let mut counters = TaskCounters::zero();
    counters.record_created(false);
    counters.record_created(true);
    assert_eq!(counters.task_count(), 2);
    assert_eq!(counters.completed_task_count(), 1);

    counters.record_deleted(true).expect("counter in range");
    assert_eq!(counters.task_count(), 1);
    assert_eq!(counters.completed_task_count(), 0);

    counters.record_deleted(false).expect("counter in range");
    assert_eq!(counters, TaskCounters::zero());
}

#[rstest]
fn counters_reject_deletion_at_zero() {
    let mut counters = TaskCounters::zero();
    let result = counters.record_deleted(false);
    assert_eq!(
        result,
        Err(ProjectDomainError::CountersOutOfSync {
            task_count: 0,
            completed_task_count: 0,
        })
    );
}

#[rstest]
fn counters_reject_completed_deletion_without_completed_tasks() {
    let mut counters = TaskCounters::from_counts(2, 0).expect("valid counts");
    let result = counters.record_deleted(true);
    assert_eq!(
        result,
        Err(ProjectDomainError::CountersOutOfSync {
            task_count: 2,
            completed_task_count: 0,
        })
    );
}

#[rstest]
fn counters_apply_completion_crossings() {
    let mut counters = TaskCounters::from_counts(3, 1).expect("valid counts");
    counters
        .apply_completion_change(CompletionChange::Completed)
        .expect("counter in range");
    assert_eq!(counters.completed_task_count(), 2);

    counters
        .apply_completion_change(CompletionChange::Reopened)
        .expect("counter in range");
    assert_eq!(counters.completed_task_count(), 1);

    counters
        .apply_completion_change(CompletionChange::Unchanged)
        .expect("no-op always succeeds");
    assert_eq!(counters.completed_task_count(), 1);
}

#[rstest]
fn counters_reject_completed_count_exceeding_total() {
    let mut counters = TaskCounters::from_counts(1, 1).expect("valid counts");
    let result = counters.apply_completion_change(CompletionChange::Completed);
    assert_eq!(
        result,
        Err(ProjectDomainError::CountersOutOfSync {
            task_count: 1,
            completed_task_count: 1,
        })
    );
}

#[rstest]
fn counters_reject_reopening_without_completed_tasks() {
    let mut counters = TaskCounters::from_counts(2, 0).expect("valid counts");
    let result = counters.apply_completion_change(CompletionChange::Reopened);
    assert_eq!(
        result,
        Err(ProjectDomainError::CountersOutOfSync {
            task_count: 2,
            completed_task_count: 0,
        })
    );
}

#[rstest]
fn counters_from_counts_rejects_completed_exceeding_total() {
    let result = TaskCounters::from_counts(1, 2);
    assert_eq!(
        result,
        Err(ProjectDomainError::CountersOutOfSync {
            task_count: 1,
            completed_task_count: 2,
        })
    );
}

#[rstest]
fn project_new_starts_active_with_zero_counters(clock: DefaultClock) {
    let project = sample_project(&clock);

    assert!(project.is_active());
    assert!(!project.is_public());
    assert_eq!(project.counters(), TaskCounters::zero());
    assert_eq!(project.created_at(), project.updated_at());
}

#[rstest]
fn project_counter_mutations_bump_updated_at(clock: DefaultClock) {
    let mut project = sample_project(&clock);
    let later = project.created_at() + chrono::Duration::seconds(5);

    project.record_task_created(true, later);
    assert_eq!(project.updated_at(), later);
    assert_eq!(project.counters().task_count(), 1);
    assert_eq!(project.counters().completed_task_count(), 1);

    let even_later = later + chrono::Duration::seconds(5);
    project
        .record_task_deleted(true, even_later)
        .expect("counter in range");
    assert_eq!(project.updated_at(), even_later);
    assert_eq!(project.counters(), TaskCounters::zero());
}
