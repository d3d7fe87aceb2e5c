//! Verification code lifecycle: issue, redeem, expire, sweep.

use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;
use rstest::rstest;
use taxdesk::domain::ports::PhoneVerification;
use taxdesk::domain::{
    CODE_TTL_SECS, ErrorCode, PhoneVerificationFailure, PhoneVerificationOutcome,
    VerificationSweeper,
};
use taxdesk::test_support::Harness;

const PHONE: &str = "010-1234-5678";
const DIGITS: &str = "01012345678";

#[rstest]
#[case("010-1234-5678")]
#[case("01012345678")]
#[case("011-234-5678")]
#[tokio::test]
async fn issuing_normalises_and_reports_the_ttl(#[case] raw: &str) {
    let harness = Harness::new();

    let issue = harness
        .phone_verification
        .issue(raw)
        .await
        .expect("valid mobile number");

    assert_eq!(issue.phone.as_str(), raw.replace('-', ""));
    assert_eq!(issue.expires_in_secs, 180);
    assert_eq!(issue.code.as_str(), "123456");
}

#[rstest]
#[case("")]
#[case("02-123-4567")]
#[case("010-12-34")]
#[case("010-١٢٣٤-٥٦٧٨")]
#[tokio::test]
async fn non_mobile_numbers_are_refused(#[case] raw: &str) {
    let harness = Harness::new();

    let err = harness
        .phone_verification
        .issue(raw)
        .await
        .expect_err("not a mobile number");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(harness.code_store.len().expect("store readable"), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_redemptions_succeed_once() {
    const ATTEMPTS: usize = 16;
    let harness = Harness::new();
    harness.phone_verification.issue(PHONE).await.expect("issued");

    let attempts: Vec<_> = (0..ATTEMPTS)
        .map(|_| {
            let service = Arc::clone(&harness.phone_verification);
            tokio::spawn(async move { service.verify(DIGITS, "123456").await })
        })
        .collect();
    let mut outcomes = Vec::with_capacity(ATTEMPTS);
    for attempt in attempts {
        outcomes.push(attempt.await.expect("task joined").expect("verify"));
    }

    let verified = outcomes
        .iter()
        .filter(|outcome| **outcome == PhoneVerificationOutcome::Verified)
        .count();
    let missing = outcomes
        .iter()
        .filter(|outcome| {
            **outcome
                == PhoneVerificationOutcome::Rejected(PhoneVerificationFailure::ExpiredOrMissing)
        })
        .count();
    assert_eq!(verified, 1);
    assert_eq!(missing, ATTEMPTS - 1);
    assert_eq!(harness.code_store.len().expect("store readable"), 0);
}

#[rstest]
#[tokio::test]
async fn codes_are_single_use() {
    let harness = Harness::new();
    harness.phone_verification.issue(PHONE).await.expect("issued");

    let first = harness
        .phone_verification
        .verify(DIGITS, "123456")
        .await
        .expect("verify");
    let second = harness
        .phone_verification
        .verify(PHONE, "123456")
        .await
        .expect("verify again");

    assert_eq!(first, PhoneVerificationOutcome::Verified);
    assert_eq!(
        second,
        PhoneVerificationOutcome::Rejected(PhoneVerificationFailure::ExpiredOrMissing)
    );
}

#[rstest]
#[tokio::test]
async fn a_mismatch_keeps_the_code_alive() {
    let harness = Harness::new();
    harness.phone_verification.issue(PHONE).await.expect("issued");

    let wrong = harness
        .phone_verification
        .verify(PHONE, "000000")
        .await
        .expect("verify");
    let right = harness
        .phone_verification
        .verify(PHONE, "123456")
        .await
        .expect("verify");

    assert_eq!(
        wrong,
        PhoneVerificationOutcome::Rejected(PhoneVerificationFailure::Mismatch)
    );
    assert_eq!(right, PhoneVerificationOutcome::Verified);
}

#[rstest]
#[tokio::test]
async fn reissuing_replaces_the_previous_code() {
    let harness = Harness::new();
    harness.phone_verification.issue(PHONE).await.expect("first");
    let second = harness.phone_verification.issue(PHONE).await.expect("second");
    assert_eq!(second.code.as_str(), "654321");

    let stale = harness
        .phone_verification
        .verify(PHONE, "123456")
        .await
        .expect("verify");

    assert_eq!(
        stale,
        PhoneVerificationOutcome::Rejected(PhoneVerificationFailure::Mismatch)
    );
}

#[rstest]
#[case(i64::from(CODE_TTL_SECS) - 1, PhoneVerificationOutcome::Verified)]
#[case(
    i64::from(CODE_TTL_SECS),
    PhoneVerificationOutcome::Rejected(PhoneVerificationFailure::ExpiredOrMissing)
)]
#[tokio::test]
async fn expiry_is_enforced_on_read(
    #[case] elapsed: i64,
    #[case] expected: PhoneVerificationOutcome,
) {
    let harness = Harness::new();
    harness.phone_verification.issue(PHONE).await.expect("issued");

    harness.clock.advance_seconds(elapsed);
    let outcome = harness
        .phone_verification
        .verify(PHONE, "123456")
        .await
        .expect("verify");

    assert_eq!(outcome, expected);
}

#[rstest]
#[tokio::test]
async fn sweep_purges_only_expired_codes() {
    let harness = Harness::new();
    harness.phone_verification.issue(PHONE).await.expect("issued");
    harness.clock.advance_seconds(100);
    harness
        .phone_verification
        .issue("010-9999-8888")
        .await
        .expect("issued");
    harness.clock.advance_seconds(100);
    let clock: Arc<dyn Clock> = harness.clock.clone();
    let sweeper =
        VerificationSweeper::new(harness.code_store.clone(), clock, Duration::from_secs(30));

    let purged = sweeper.sweep_once().await.expect("sweep");

    assert_eq!(purged, 1);
    assert_eq!(harness.code_store.len().expect("store readable"), 1);
}

#[rstest]
#[tokio::test]
async fn background_sweeper_empties_the_store() {
    let harness = Harness::new();
    harness.phone_verification.issue(PHONE).await.expect("issued");
    harness.clock.advance_seconds(i64::from(CODE_TTL_SECS) + 1);
    let clock: Arc<dyn Clock> = harness.clock.clone();

    let handle = VerificationSweeper::new(
        harness.code_store.clone(),
        clock,
        Duration::from_millis(10),
    )
    .spawn();
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(harness.code_store.is_empty().expect("store readable"));
    assert!(!handle.is_finished());
}
