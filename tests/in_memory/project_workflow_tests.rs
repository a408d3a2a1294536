//! In-memory integration tests for the project catalog workflow.

use rstest::rstest;
use tasklane::project::services::{CreateProjectRequest, UpdateProjectRequest};
use tasklane::task::{domain::TaskStatus, services::AddCommentRequest};

use super::helpers::{TestEnv, env};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn projects_list_per_owner_in_creation_order(env: TestEnv) -> Result<(), eyre::Report> {
    let alice = env.create_user("alice@example.com", "Alice").await?;
    let bob = env.create_user("bob@example.com", "Bob").await?;

    let first = env.create_project("Alpha", alice.id()).await?;
    let second = env.create_project("Beta", alice.id()).await?;
    env.create_project("Gamma", bob.id()).await?;

    let listed = env.projects.list_projects(alice.id()).await?;
    let ids: Vec<_> = listed
        .iter()
        .map(tasklane::project::domain::Project::id)
        .collect();
    assert_eq!(ids, vec![first.id(), second.id()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_update_round_trips_through_the_store(env: TestEnv) -> Result<(), eyre::Report> {
    let owner = env.create_user("owner@example.com", "Owner").await?;
    let project = env
        .projects
        .create_project(CreateProjectRequest::new("Before", owner.id()).with_color("#112233"))
        .await?;

    env.projects
        .update_project(
            project.id(),
            UpdateProjectRequest::new()
                .with_name("After")
                .with_description("Updated in place")
                .with_active(false),
        )
        .await?;

    let fetched = env
        .projects
        .get_project(project.id())
        .await?
        .ok_or_else(|| eyre::eyre!("project should exist"))?;
    assert_eq!(fetched.name().as_str(), "After");
    assert_eq!(fetched.description(), "Updated in place");
    assert!(!fetched.is_active());
    assert_eq!(fetched.color().as_str(), "#112233");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_project_cascades_to_tasks_and_comments(
    env: TestEnv,
) -> Result<(), eyre::Report> {
    let owner = env.create_user("owner@example.com", "Owner").await?;
    let project = env.create_project("Doomed", owner.id()).await?;
    let task = env
        .create_task(project.id(), "Doomed task", owner.id(), TaskStatus::Todo)
        .await?;
    env.comments
        .add_comment(AddCommentRequest::new(
            project.id(),
            task.id(),
            owner.id(),
            "Doomed comment",
        ))
        .await?;

    env.projects.delete_project(project.id()).await?;

    assert_eq!(env.projects.get_project(project.id()).await?, None);
    assert_eq!(env.tasks.get_task(project.id(), task.id()).await?, None);
    let listed = env.comments.list_comments(project.id(), task.id()).await?;
    assert!(listed.is_empty());
    Ok(())
}
