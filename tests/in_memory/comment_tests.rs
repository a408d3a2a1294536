//! In-memory integration tests for the comment workflow.

use rstest::rstest;
use tasklane::task::{
    domain::TaskStatus,
    services::{AddCommentRequest, UpdateCommentRequest},
};

use super::helpers::{TestEnv, env};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comment_workflow_maintains_the_task_counter(env: TestEnv) -> Result<(), eyre::Report> {
    let owner = env.create_user("owner@example.com", "Owner").await?;
    let reviewer = env.create_user("reviewer@example.com", "Reviewer").await?;
    let project = env.create_project("Discussion", owner.id()).await?;
    let task = env
        .create_task(project.id(), "Needs review", owner.id(), TaskStatus::Todo)
        .await?;

    let first = env
        .comments
        .add_comment(AddCommentRequest::new(
            project.id(),
            task.id(),
            reviewer.id(),
            "First pass looks fine",
        ))
        .await?;
    let second = env
        .comments
        .add_comment(AddCommentRequest::new(
            project.id(),
            task.id(),
            owner.id(),
            "Thanks, addressing notes",
        ))
        .await?;

    let stored_task = env
        .tasks
        .get_task(project.id(), task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    assert_eq!(stored_task.comment_count(), 2);

    let listed = env.comments.list_comments(project.id(), task.id()).await?;
    let listed_ids: Vec<_> = listed.iter().map(tasklane::task::domain::Comment::id).collect();
    assert_eq!(listed_ids, vec![first.id(), second.id()]);

    env.comments
        .delete_comment(project.id(), task.id(), first.id())
        .await?;
    let stored_task = env
        .tasks
        .get_task(project.id(), task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    assert_eq!(stored_task.comment_count(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn editing_a_comment_does_not_move_the_counter(env: TestEnv) -> Result<(), eyre::Report> {
    let owner = env.create_user("owner@example.com", "Owner").await?;
    let project = env.create_project("Discussion", owner.id()).await?;
    let task = env
        .create_task(project.id(), "Needs review", owner.id(), TaskStatus::Todo)
        .await?;
    let comment = env
        .comments
        .add_comment(AddCommentRequest::new(
            project.id(),
            task.id(),
            owner.id(),
            "Draft",
        ))
        .await?;

    let updated = env
        .comments
        .update_comment(
            project.id(),
            task.id(),
            comment.id(),
            UpdateCommentRequest::new().with_body("Final").with_active(false),
        )
        .await?;

    assert_eq!(updated.body().as_str(), "Final");
    assert!(!updated.is_active());
    let stored_task = env
        .tasks
        .get_task(project.id(), task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    assert_eq!(stored_task.comment_count(), 1);
    Ok(())
}
