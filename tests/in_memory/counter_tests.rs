//! In-memory integration tests for derived project counter maintenance.

use rstest::rstest;
use tasklane::project::domain::ProjectId;
use tasklane::task::{
    domain::TaskStatus,
    ports::TaskRepositoryError,
    services::{CreateTaskRequest, TaskLifecycleError, UpdateTaskRequest},
};

use super::helpers::{TestEnv, env};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn counters_follow_the_full_task_lifecycle(env: TestEnv) -> Result<(), eyre::Report> {
    let owner = env.create_user("owner@example.com", "Owner").await?;
    let project = env.create_project("Lifecycle", owner.id()).await?;

    let open = env
        .create_task(project.id(), "Open work", owner.id(), TaskStatus::Todo)
        .await?;
    let done = env
        .create_task(project.id(), "Done work", owner.id(), TaskStatus::Completed)
        .await?;
    assert_eq!(env.counters(project.id()).await?, (2, 1));

    // Completing the open task moves the completed counter.
    env.tasks
        .update_task(
            project.id(),
            open.id(),
            UpdateTaskRequest::new().with_status(TaskStatus::Completed),
        )
        .await?;
    assert_eq!(env.counters(project.id()).await?, (2, 2));

    // Reopening moves it back.
    env.tasks
        .update_task(
            project.id(),
            open.id(),
            UpdateTaskRequest::new().with_status(TaskStatus::InProgress),
        )
        .await?;
    assert_eq!(env.counters(project.id()).await?, (2, 1));

    // Archiving a completed task is not a boundary crossing.
    env.tasks
        .update_task(
            project.id(),
            done.id(),
            UpdateTaskRequest::new().with_status(TaskStatus::Archived),
        )
        .await?;
    assert_eq!(env.counters(project.id()).await?, (2, 1));

    // Deleting the archived task decrements both counters.
    env.tasks.delete_task(project.id(), done.id()).await?;
    assert_eq!(env.counters(project.id()).await?, (1, 0));

    env.verify_counters_against_tasks(project.id()).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn counters_stay_consistent_across_mixed_operations(
    env: TestEnv,
) -> Result<(), eyre::Report> {
    let owner = env.create_user("owner@example.com", "Owner").await?;
    let project = env.create_project("Mixed", owner.id()).await?;

    let mut task_ids = Vec::new();
    for index in 0_u32..5 {
        let status = if index.is_multiple_of(2) {
            TaskStatus::Todo
        } else {
            TaskStatus::Completed
        };
        let task = env
            .create_task(project.id(), &format!("Task {index}"), owner.id(), status)
            .await?;
        task_ids.push(task.id());
    }
    assert_eq!(env.counters(project.id()).await?, (5, 2));

    let [first, second, _, fourth, _] = task_ids.as_slice() else {
        eyre::bail!("expected five task identifiers");
    };
    env.tasks
        .update_task(
            project.id(),
            *first,
            UpdateTaskRequest::new().with_status(TaskStatus::Completed),
        )
        .await?;
    env.tasks.delete_task(project.id(), *second).await?;
    env.tasks
        .update_task(
            project.id(),
            *fourth,
            UpdateTaskRequest::new().with_status(TaskStatus::Todo),
        )
        .await?;

    assert_eq!(env.counters(project.id()).await?, (4, 1));
    env.verify_counters_against_tasks(project.id()).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_task_creation_leaves_counters_untouched(
    env: TestEnv,
) -> Result<(), eyre::Report> {
    let owner = env.create_user("owner@example.com", "Owner").await?;
    let project = env.create_project("Guarded", owner.id()).await?;
    env.create_task(project.id(), "Existing", owner.id(), TaskStatus::Todo)
        .await?;

    // An invalid title fails validation before any store write.
    let result = env
        .tasks
        .create_task(CreateTaskRequest::new(project.id(), "   ", owner.id()))
        .await;
    assert!(matches!(result, Err(TaskLifecycleError::Domain(_))));

    // A missing project fails inside the repository transaction.
    let missing = ProjectId::new();
    let result = env
        .tasks
        .create_task(CreateTaskRequest::new(missing, "Orphan", owner.id()))
        .await;
    assert!(matches!(
        result,
        Err(TaskLifecycleError::Repository(
            TaskRepositoryError::ProjectNotFound(_)
        ))
    ));

    assert_eq!(env.counters(project.id()).await?, (1, 0));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn counters_are_scoped_per_project(env: TestEnv) -> Result<(), eyre::Report> {
    let owner = env.create_user("owner@example.com", "Owner").await?;
    let first = env.create_project("First", owner.id()).await?;
    let second = env.create_project("Second", owner.id()).await?;

    env.create_task(first.id(), "Only here", owner.id(), TaskStatus::Completed)
        .await?;

    assert_eq!(env.counters(first.id()).await?, (1, 1));
    assert_eq!(env.counters(second.id()).await?, (0, 0));
    Ok(())
}
