//! Port for short-lived phone verification codes.
//!
//! Adapters must make [`VerificationCodeStore::consume`] atomic: comparing
//! and removing a code happen under one critical section so a code can be
//! redeemed at most once even under concurrent verification.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{CodeRedemption, Error, IssuedCode, PhoneNumber, VerificationCode};

use super::define_port_error;

define_port_error! {
    /// Errors raised by verification code stores.
    pub enum VerificationStoreError {
        /// Backing storage is unusable.
        Unavailable { message: String } => "verification code store unavailable: {message}",
    }
}

/// Storage for outstanding phone verification codes.
///
/// `consume` removes the code atomically so a code can be redeemed once.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VerificationCodeStore: Send + Sync {
    /// Store `issued`, replacing any code held for the same phone.
    async fn put(&self, issued: IssuedCode) -> Result<(), VerificationStoreError>;

    /// Compare `code` with the live entry for `phone` and remove it on match.
    /// Entries past their deadline at `now` count as missing.
    async fn consume(
        &self,
        phone: &PhoneNumber,
        code: &VerificationCode,
        now: DateTime<Utc>,
    ) -> Result<CodeRedemption, VerificationStoreError>;

    /// Drop every entry whose deadline has passed at `now`. Returns how many
    /// were removed.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, VerificationStoreError>;
}

impl From<VerificationStoreError> for Error {
    fn from(err: VerificationStoreError) -> Self {
        match err {
            VerificationStoreError::Unavailable { message } => {
                Self::internal(format!("verification code store unavailable: {message}"))
            }
        }
    }
}
