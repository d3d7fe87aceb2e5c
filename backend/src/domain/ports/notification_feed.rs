//! Driving port for reading a user's notifications.

use async_trait::async_trait;

use crate::domain::{Error, Notification, NotificationId, UserId};

/// Driving port for reading a user's notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationFeed: Send + Sync {
    /// Notifications addressed to `user`, newest first.
    async fn list_for(&self, user: &UserId) -> Result<Vec<Notification>, Error>;

    /// Flag one notification as read.
    async fn mark_read(&self, id: &NotificationId) -> Result<(), Error>;

    /// Unread notifications addressed to `user`.
    async fn unread_count(&self, user: &UserId) -> Result<u64, Error>;
}
