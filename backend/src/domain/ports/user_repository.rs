//! Port abstraction for user persistence adapters and their errors.
//!
//! Writes report the number of affected rows. Services treat zero as a
//! failed update rather than the adapter raising an error.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Error, MandateStatus, PaymentStatus, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Persistence for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch the user whose username or email equals `identifier`.
    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Store a new user. Returns 0 when the id, username, or email is taken.
    async fn insert(&self, user: &User) -> Result<u64, UserPersistenceError>;

    /// Set the mandate status of one user.
    async fn update_mandate_status(
        &self,
        id: &UserId,
        status: MandateStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<u64, UserPersistenceError>;

    /// Set the payment status and last payment time of one user.
    async fn update_payment_status(
        &self,
        id: &UserId,
        status: PaymentStatus,
        last_payment_at: Option<DateTime<Utc>>,
        updated_at: DateTime<Utc>,
    ) -> Result<u64, UserPersistenceError>;

    /// Overwrite name, email, contact details, and `updated_at` from `user`.
    /// Returns 0 when the email now collides with another account.
    async fn update_profile(&self, user: &User) -> Result<u64, UserPersistenceError>;

    /// Every user holding the tax accountant role.
    async fn list_tax_accountants(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Every user whose mandate status is not `NONE`, in storage order.
    async fn list_mandate_requests(&self) -> Result<Vec<User>, UserPersistenceError>;
}

impl From<UserPersistenceError> for Error {
    fn from(err: UserPersistenceError) -> Self {
        match err {
            UserPersistenceError::Connection { message } => {
                Self::internal(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Self::internal(format!("user repository error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(UserPersistenceError::connection("refused"), "user repository unavailable: refused")]
    #[case(UserPersistenceError::query("lock poisoned"), "user repository error: lock poisoned")]
    fn persistence_failures_surface_as_internal_errors(
        #[case] failure: UserPersistenceError,
        #[case] expected: &str,
    ) {
        let err = Error::from(failure);
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), expected);
    }
}
