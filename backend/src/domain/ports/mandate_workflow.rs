//! Driving port for the mandate lifecycle.

use async_trait::async_trait;

use crate::domain::{Error, MandateStatus, User, UserId};

/// Driving port for the client/accountant mandate handshake.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MandateWorkflow: Send + Sync {
    /// Client asks for consent. Every tax accountant is notified.
    async fn request(&self, client: &UserId) -> Result<MandateStatus, Error>;

    /// Accountant reports the request was filed externally. The client is
    /// notified.
    async fn send(&self, accountant: &UserId, client: &UserId) -> Result<MandateStatus, Error>;

    /// Accountant asks the client to clear an existing mandate. The client is
    /// notified.
    async fn release(&self, accountant: &UserId, client: &UserId)
    -> Result<MandateStatus, Error>;

    /// Client has accepted externally.
    async fn complete(&self, client: &UserId) -> Result<MandateStatus, Error>;

    /// Every client with a mandate in progress or completed.
    async fn list(&self) -> Result<Vec<User>, Error>;
}
