//! Service orchestration tests for user accounts.

use std::sync::Arc;

use crate::store::MemoryStore;
use crate::user::{
    adapters::InMemoryUserRepository,
    domain::{Theme, UserId},
    ports::UserRepositoryError,
    services::{CreateUserRequest, UpdateUserRequest, UserAccountError, UserAccountService},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = UserAccountService<InMemoryUserRepository, DefaultClock>;

#[fixture]
fn service() -> TestService {
    UserAccountService::new(
        Arc::new(InMemoryUserRepository::new(MemoryStore::new())),
        Arc::new(DefaultClock),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_user_applies_defaults(service: TestService) {
    let created = service
        .create_user(CreateUserRequest::new("ada@example.com", "Ada"))
        .await
        .expect("user creation should succeed");

    assert_eq!(created.email().as_str(), "ada@example.com");
    assert_eq!(created.display_name(), "Ada");
    assert_eq!(created.avatar(), "");
    assert_eq!(created.timezone(), "UTC");
    assert_eq!(created.theme(), Theme::System);
    assert_eq!(created.last_active_at(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_user_rejects_invalid_email(service: TestService) {
    let result = service
        .create_user(CreateUserRequest::new("not-an-email", "Ada"))
        .await;
    assert!(matches!(result, Err(UserAccountError::Domain(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_user_rejects_blank_display_name(service: TestService) {
    let result = service
        .create_user(CreateUserRequest::new("ada@example.com", "   "))
        .await;
    assert!(matches!(result, Err(UserAccountError::Domain(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_user_replaces_profile_fields(service: TestService) {
    let created = service
        .create_user(CreateUserRequest::new("ada@example.com", "Ada"))
        .await
        .expect("user creation should succeed");

    let updated = service
        .update_user(
            created.id(),
            UpdateUserRequest::new()
                .with_display_name("Ada Lovelace")
                .with_timezone("Europe/London")
                .with_theme(Theme::Dark),
        )
        .await
        .expect("update should succeed");

    assert_eq!(updated.display_name(), "Ada Lovelace");
    assert_eq!(updated.timezone(), "Europe/London");
    assert_eq!(updated.theme(), Theme::Dark);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_missing_user_reports_not_found(service: TestService) {
    let missing = UserId::new();
    let result = service
        .update_user(missing, UpdateUserRequest::new().with_display_name("Ghost"))
        .await;

    assert!(matches!(
        result,
        Err(UserAccountError::Repository(
            UserRepositoryError::NotFound(id)
        )) if id == missing
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn touch_last_active_stamps_the_timestamp(service: TestService) {
    let created = service
        .create_user(CreateUserRequest::new("ada@example.com", "Ada"))
        .await
        .expect("user creation should succeed");

    let touched = service
        .touch_last_active(created.id())
        .await
        .expect("touch should succeed");

    assert!(touched.last_active_at().is_some());
    let fetched = service
        .get_user(created.id())
        .await
        .expect("lookup should succeed")
        .expect("user should exist");
    assert_eq!(fetched.last_active_at(), touched.last_active_at());
}
