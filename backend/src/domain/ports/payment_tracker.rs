//! Driving port for the mock subscription payment flow.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Error, PaymentAssessment, UserId};

/// Driving port for service-fee payments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentTracker: Send + Sync {
    /// Record a payment made now. Returns the payment time.
    async fn charge(&self, user: &UserId) -> Result<DateTime<Utc>, Error>;

    /// Report subscription validity, downgrading lapsed accounts.
    async fn status(&self, user: &UserId) -> Result<PaymentAssessment, Error>;
}
