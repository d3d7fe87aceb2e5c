//! In-memory `NotificationRepository`.

use std::cmp::Reverse;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{NotificationPersistenceError, NotificationRepository};
use crate::domain::{Notification, NotificationId, UserId};

/// Append-only notification log.
#[derive(Debug, Default)]
pub struct InMemoryNotificationRepository {
    entries: RwLock<Vec<Notification>>,
}

impl InMemoryNotificationRepository {
    /// Empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Notification>>, NotificationPersistenceError> {
        self.entries
            .read()
            .map_err(|_| NotificationPersistenceError::query("notification store lock poisoned"))
    }

    fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, Vec<Notification>>, NotificationPersistenceError> {
        self.entries
            .write()
            .map_err(|_| NotificationPersistenceError::query("notification store lock poisoned"))
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn insert(
        &self,
        notification: &Notification,
    ) -> Result<u64, NotificationPersistenceError> {
        let mut entries = self.write()?;
        if entries.iter().any(|entry| entry.id == notification.id) {
            return Ok(0);
        }
        entries.push(notification.clone());
        Ok(1)
    }

    async fn find_by_user(
        &self,
        recipient: &UserId,
    ) -> Result<Vec<Notification>, NotificationPersistenceError> {
        // Reverse insertion order first so equal timestamps also list newest first.
        let mut found: Vec<Notification> = self
            .read()?
            .iter()
            .rev()
            .filter(|entry| &entry.recipient_id == recipient)
            .cloned()
            .collect();
        found.sort_by_key(|entry| Reverse(entry.created_at));
        Ok(found)
    }

    async fn mark_read(&self, id: &NotificationId) -> Result<u64, NotificationPersistenceError> {
        let mut entries = self.write()?;
        Ok(entries
            .iter_mut()
            .find(|entry| &entry.id == id)
            .map_or(0, |entry| {
                entry.read = true;
                1
            }))
    }

    async fn count_unread_by_user(
        &self,
        recipient: &UserId,
    ) -> Result<u64, NotificationPersistenceError> {
        let count = self
            .read()?
            .iter()
            .filter(|entry| &entry.recipient_id == recipient && !entry.read)
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }
}
