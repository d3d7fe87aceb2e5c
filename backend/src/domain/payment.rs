//! Subscription validity derived from the last payment time.
//!
//! A payment keeps the account `PAID` for [`SUBSCRIPTION_VALIDITY_DAYS`]
//! whole days. Past that window the stored status is downgraded the next time
//! somebody asks.

use chrono::{DateTime, Utc};

use super::PaymentStatus;

/// Whole days a payment stays valid.
pub const SUBSCRIPTION_VALIDITY_DAYS: i64 = 30;

/// Snapshot reported by the payment status query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentAssessment {
    /// Status after any downgrade.
    pub status: PaymentStatus,
    /// Most recent payment.
    pub last_payment_at: Option<DateTime<Utc>>,
    /// Whether the subscription is active at query time.
    pub valid: bool,
    /// Whole days left; zero once lapsed.
    pub days_remaining: i64,
    /// `true` when the stored status must be downgraded to `UNPAID`.
    pub lapsed: bool,
}

/// Evaluate the stored payment state at `now`.
///
/// Elapsed days are whole days, truncated. `days_remaining` is not clamped:
/// a payment stamped in the future reports more than the full window.
///
/// # Examples
/// ```
/// use chrono::{Duration, Utc};
/// use taxdesk::domain::{assess_payment, PaymentStatus};
///
/// let now = Utc::now();
/// let report = assess_payment(PaymentStatus::Paid, Some(now - Duration::days(10)), now);
/// assert!(report.valid);
/// assert_eq!(report.days_remaining, 20);
/// ```
#[must_use]
pub fn assess_payment(
    status: PaymentStatus,
    last_payment_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> PaymentAssessment {
    let Some(paid_at) = last_payment_at.filter(|_| status == PaymentStatus::Paid) else {
        return PaymentAssessment {
            status,
            last_payment_at,
            valid: false,
            days_remaining: 0,
            lapsed: false,
        };
    };

    let elapsed_days = (now - paid_at).num_days();
    if elapsed_days > SUBSCRIPTION_VALIDITY_DAYS {
        return PaymentAssessment {
            status: PaymentStatus::Unpaid,
            last_payment_at,
            valid: false,
            days_remaining: 0,
            lapsed: true,
        };
    }

    PaymentAssessment {
        status,
        last_payment_at,
        valid: true,
        days_remaining: SUBSCRIPTION_VALIDITY_DAYS - elapsed_days,
        lapsed: false,
    }
}
