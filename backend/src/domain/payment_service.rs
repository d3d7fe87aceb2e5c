//! Mock subscription payments.
//!
//! No gateway is involved: charging simply stamps the account as paid now.
//! Status queries evaluate the stored state with [`assess_payment`] and write
//! back the downgrade when the subscription window has lapsed.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{PaymentTracker, UserRepository};
use crate::domain::{Error, PaymentAssessment, PaymentStatus, User, UserId, assess_payment};

/// Payment tracker backed by the user repository.
pub struct PaymentService<U> {
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U> PaymentService<U> {
    /// Create a tracker over `users`.
    #[must_use]
    pub const fn new(users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

impl<U> PaymentService<U>
where
    U: UserRepository,
{
    async fn load(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }
}

#[async_trait]
impl<U> PaymentTracker for PaymentService<U>
where
    U: UserRepository,
{
    async fn charge(&self, user_id: &UserId) -> Result<DateTime<Utc>, Error> {
        let user = self.load(user_id).await?;
        let now = self.clock.utc();
        let rows = self
            .users
            .update_payment_status(&user.id, PaymentStatus::Paid, Some(now), now)
            .await?;
        if rows == 0 {
            return Err(Error::conflict(format!(
                "payment could not be recorded for user {}",
                user.id
            )));
        }
        info!(user_id = %user.id, paid_at = %now, "payment recorded");
        Ok(now)
    }

    async fn status(&self, user_id: &UserId) -> Result<PaymentAssessment, Error> {
        let user = self.load(user_id).await?;
        let now = self.clock.utc();
        let assessment = assess_payment(user.payment_status, user.last_payment_at, now);
        if assessment.lapsed {
            let rows = self
                .users
                .update_payment_status(&user.id, PaymentStatus::Unpaid, user.last_payment_at, now)
                .await?;
            if rows == 0 {
                warn!(user_id = %user.id, "lapsed subscription downgrade affected no rows");
            } else {
                info!(user_id = %user.id, "subscription lapsed; status set to unpaid");
            }
        }
        Ok(assessment)
    }
}
