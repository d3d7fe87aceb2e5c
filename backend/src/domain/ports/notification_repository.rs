//! Port abstraction for notification persistence.

use async_trait::async_trait;

use crate::domain::{Error, Notification, NotificationId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by notification repository adapters.
    pub enum NotificationPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "notification repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "notification repository query failed: {message}",
    }
}

/// Persistence for notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Append a notification. Returns the number of stored rows.
    async fn insert(&self, notification: &Notification)
    -> Result<u64, NotificationPersistenceError>;

    /// All notifications addressed to `recipient`, newest first.
    async fn find_by_user(
        &self,
        recipient: &UserId,
    ) -> Result<Vec<Notification>, NotificationPersistenceError>;

    /// Flag a notification as read. Returns 0 for an unknown id.
    async fn mark_read(&self, id: &NotificationId) -> Result<u64, NotificationPersistenceError>;

    /// Number of unread notifications addressed to `recipient`.
    async fn count_unread_by_user(
        &self,
        recipient: &UserId,
    ) -> Result<u64, NotificationPersistenceError>;
}

impl From<NotificationPersistenceError> for Error {
    fn from(err: NotificationPersistenceError) -> Self {
        match err {
            NotificationPersistenceError::Connection { message } => {
                Self::internal(format!("notification repository unavailable: {message}"))
            }
            NotificationPersistenceError::Query { message } => {
                Self::internal(format!("notification repository error: {message}"))
            }
        }
    }
}
