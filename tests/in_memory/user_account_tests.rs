//! In-memory integration tests for user account management.

use rstest::rstest;
use tasklane::user::{
    domain::Theme,
    services::{CreateUserRequest, UpdateUserRequest},
};

use super::helpers::{TestEnv, env};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn account_profile_updates_round_trip_through_the_store(
    env: TestEnv,
) -> Result<(), eyre::Report> {
    let created = env
        .users
        .create_user(
            CreateUserRequest::new("grace@example.com", "Grace")
                .with_timezone("America/New_York")
                .with_theme(Theme::Dark)
                .with_avatar("\u{1f469}\u{200d}\u{1f4bb}"),
        )
        .await?;

    env.users
        .update_user(
            created.id(),
            UpdateUserRequest::new()
                .with_email("grace.hopper@example.com")
                .with_active(false),
        )
        .await?;

    let fetched = env
        .users
        .get_user(created.id())
        .await?
        .ok_or_else(|| eyre::eyre!("user should exist"))?;
    assert_eq!(fetched.email().as_str(), "grace.hopper@example.com");
    assert!(!fetched.is_active());
    assert_eq!(fetched.timezone(), "America/New_York");
    assert_eq!(fetched.theme(), Theme::Dark);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn touch_last_active_persists_the_stamp(env: TestEnv) -> Result<(), eyre::Report> {
    let created = env.create_user("grace@example.com", "Grace").await?;
    assert_eq!(created.last_active_at(), None);

    let touched = env.users.touch_last_active(created.id()).await?;
    assert!(touched.last_active_at() >= Some(created.created_at()));

    let fetched = env
        .users
        .get_user(created.id())
        .await?
        .ok_or_else(|| eyre::eyre!("user should exist"))?;
    assert_eq!(fetched.last_active_at(), touched.last_active_at());
    Ok(())
}
