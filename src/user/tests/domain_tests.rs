//! Domain-focused tests for user profile values.

use crate::user::domain::{EmailAddress, Theme, User, UserDomainError, UserUpdate};
use chrono::Duration;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn sample_user(clock: &DefaultClock) -> User {
    User::new(
        EmailAddress::new("ada@example.com").expect("valid email"),
        "Ada".to_owned(),
        String::new(),
        "UTC".to_owned(),
        Theme::System,
        clock,
    )
}

#[rstest]
#[case("ada@example.com")]
#[case("  ada@example.com  ")]
#[case("a.b+c@sub.example.com")]
fn email_accepts_local_at_domain(#[case] input: &str) {
    let email = EmailAddress::new(input).expect("valid email");
    assert_eq!(email.as_str(), input.trim());
}

#[rstest]
#[case("")]
#[case("ada")]
#[case("@example.com")]
#[case("ada@")]
#[case("ada@@example.com")]
#[case("ada smith@example.com")]
fn email_rejects_malformed_values(#[case] input: &str) {
    let result = EmailAddress::new(input);
    assert_eq!(
        result,
        Err(UserDomainError::InvalidEmail(input.to_owned()))
    );
}

#[rstest]
#[case("light", Theme::Light)]
#[case("dark", Theme::Dark)]
#[case(" SYSTEM ", Theme::System)]
fn theme_parses_canonical_values(#[case] input: &str, #[case] expected: Theme) {
    assert_eq!(Theme::try_from(input), Ok(expected));
}

#[rstest]
fn theme_rejects_unknown_values() {
    assert!(Theme::try_from("midnight").is_err());
}

#[rstest]
fn user_new_starts_active_without_last_active(clock: DefaultClock) {
    let user = sample_user(&clock);
    assert!(user.is_active());
    assert_eq!(user.last_active_at(), None);
    assert_eq!(user.theme(), Theme::System);
}

#[rstest]
fn apply_update_replaces_only_provided_fields(clock: DefaultClock) {
    let mut user = sample_user(&clock);
    user.apply_update(UserUpdate {
        display_name: Some("Ada Lovelace".to_owned()),
        theme: Some(Theme::Dark),
        ..UserUpdate::default()
    });

    assert_eq!(user.display_name(), "Ada Lovelace");
    assert_eq!(user.theme(), Theme::Dark);
    assert_eq!(user.email().as_str(), "ada@example.com");
    assert_eq!(user.timezone(), "UTC");
}

#[rstest]
fn touch_last_active_stamps_the_timestamp(clock: DefaultClock) {
    let mut user = sample_user(&clock);
    let now = user.created_at() + Duration::hours(1);
    user.touch_last_active(now);
    assert_eq!(user.last_active_at(), Some(now));
}
