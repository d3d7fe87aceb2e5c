//! Driving port for account registration, login, and profile edits.
//!
//! Inbound adapters authenticate and manage accounts through this trait
//! without importing the backing repository, so handler tests can substitute
//! a mock.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, ProfileChanges, RegistrationForm, User, UserId};

/// Driving port for registration, login, and profile edits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Validate and store a new client account.
    async fn register(&self, form: RegistrationForm) -> Result<User, Error>;

    /// Verify credentials and return the matching account.
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Apply profile edits and return the stored account.
    async fn update_profile(&self, id: &UserId, changes: ProfileChanges) -> Result<User, Error>;
}
