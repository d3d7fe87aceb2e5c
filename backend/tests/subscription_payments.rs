//! Subscription payment lifecycle over the in-memory user repository.

use rstest::rstest;
use taxdesk::domain::ports::{PaymentTracker, UserRepository};
use taxdesk::domain::{ErrorCode, PaymentStatus, UserId};
use taxdesk::test_support::{Harness, fixed_now};

#[rstest]
#[tokio::test]
async fn fresh_payment_is_valid_for_thirty_days() {
    let harness = Harness::new();
    let client = harness.register_client("kim").await.expect("client");

    let paid_at = harness.payments.charge(&client.id).await.expect("charge");
    let report = harness.payments.status(&client.id).await.expect("status");

    assert_eq!(paid_at, fixed_now());
    assert_eq!(report.status, PaymentStatus::Paid);
    assert!(report.valid);
    assert_eq!(report.days_remaining, 30);
    assert_eq!(report.last_payment_at, Some(paid_at));
}

#[rstest]
#[case(1, 29)]
#[case(29, 1)]
#[case(30, 0)]
#[tokio::test]
async fn days_remaining_counts_down(#[case] elapsed: i64, #[case] remaining: i64) {
    let harness = Harness::new();
    let client = harness.register_client("kim").await.expect("client");
    harness.payments.charge(&client.id).await.expect("charge");

    harness.clock.advance_days(elapsed);
    let report = harness.payments.status(&client.id).await.expect("status");

    assert!(report.valid);
    assert_eq!(report.days_remaining, remaining);
}

#[rstest]
#[tokio::test]
async fn lapsed_subscription_is_downgraded_and_persisted() {
    let harness = Harness::new();
    let client = harness.register_client("kim").await.expect("client");
    harness.payments.charge(&client.id).await.expect("charge");

    harness.clock.advance_days(31);
    let report = harness.payments.status(&client.id).await.expect("status");

    assert!(!report.valid);
    assert_eq!(report.days_remaining, 0);
    assert_eq!(report.status, PaymentStatus::Unpaid);
    let stored = harness
        .users
        .find_by_id(&client.id)
        .await
        .expect("lookup")
        .expect("user exists");
    assert_eq!(stored.payment_status, PaymentStatus::Unpaid);
    assert_eq!(stored.last_payment_at, Some(fixed_now()));
}

#[rstest]
#[tokio::test]
async fn never_paid_accounts_are_invalid() {
    let harness = Harness::new();
    let client = harness.register_client("kim").await.expect("client");

    let report = harness.payments.status(&client.id).await.expect("status");

    assert_eq!(report.status, PaymentStatus::Unpaid);
    assert!(!report.valid);
    assert_eq!(report.days_remaining, 0);
    assert!(report.last_payment_at.is_none());
}

#[rstest]
#[tokio::test]
async fn paying_again_restarts_the_window() {
    let harness = Harness::new();
    let client = harness.register_client("kim").await.expect("client");
    harness.payments.charge(&client.id).await.expect("charge");
    harness.clock.advance_days(40);
    harness.payments.status(&client.id).await.expect("lapse");

    harness.payments.charge(&client.id).await.expect("charge again");
    let report = harness.payments.status(&client.id).await.expect("status");

    assert!(report.valid);
    assert_eq!(report.days_remaining, 30);
}

#[rstest]
#[tokio::test]
async fn charging_an_unknown_user_fails() {
    let harness = Harness::new();

    let err = harness
        .payments
        .charge(&UserId::random())
        .await
        .expect_err("no such user");

    assert_eq!(err.code(), ErrorCode::NotFound);
}
