//! Notification sink and feed.
//!
//! Notifications are only ever created as a side effect of mandate
//! transitions; callers outside the domain can read them and flag them as
//! read through [`NotificationFeed`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{NotificationFeed, NotificationRepository};
use crate::domain::{Error, Notification, NotificationDraft, NotificationId, UserId};

/// Notification service over a repository.
pub struct NotificationService<N> {
    repo: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<N> NotificationService<N> {
    /// Create a service over `repo`.
    #[must_use]
    pub const fn new(repo: Arc<N>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

impl<N> NotificationService<N>
where
    N: NotificationRepository,
{
    /// Stamp and store `draft` as an unread notification.
    pub async fn create(&self, draft: NotificationDraft) -> Result<Notification, Error> {
        let notification = draft.into_notification(NotificationId::random(), self.clock.utc());
        let rows = self.repo.insert(&notification).await?;
        if rows == 0 {
            return Err(Error::write_failure(format!(
                "notification for user {} was not stored",
                notification.recipient_id
            )));
        }
        debug!(
            notification_id = %notification.id,
            recipient = %notification.recipient_id,
            kind = ?notification.kind,
            "notification stored"
        );
        Ok(notification)
    }
}

#[async_trait]
impl<N> NotificationFeed for NotificationService<N>
where
    N: NotificationRepository,
{
    async fn list_for(&self, user: &UserId) -> Result<Vec<Notification>, Error> {
        self.repo
            .find_by_user(user)
            .await
            .map_err(Error::from)
    }

    async fn mark_read(&self, id: &NotificationId) -> Result<(), Error> {
        let rows = self.repo.mark_read(id).await?;
        if rows == 0 {
            return Err(Error::write_failure(format!(
                "notification {id} could not be marked as read"
            )));
        }
        Ok(())
    }

    async fn unread_count(&self, user: &UserId) -> Result<u64, Error> {
        self.repo
            .count_unread_by_user(user)
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockNotificationRepository, NotificationPersistenceError};
    use crate::domain::{ErrorCode, NotificationKind};
    use crate::test_support::{MutableClock, fixed_now};

    fn service(
        repo: MockNotificationRepository,
    ) -> NotificationService<MockNotificationRepository> {
        NotificationService::new(Arc::new(repo), Arc::new(MutableClock::new(fixed_now())))
    }

    fn draft() -> NotificationDraft {
        NotificationDraft {
            recipient_id: UserId::random(),
            sender_id: None,
            kind: NotificationKind::TaxToClient,
            text: "hello".into(),
        }
    }

    #[tokio::test]
    async fn create_stamps_unread_notifications() {
        let mut repo = MockNotificationRepository::new();
        repo.expect_insert()
            .withf(|n: &Notification| !n.read && n.created_at == fixed_now())
            .times(1)
            .returning(|_| Ok(1));

        let stored = service(repo).create(draft()).await.expect("stored");
        assert_eq!(stored.text, "hello");
    }

    #[tokio::test]
    async fn create_reports_write_failure_on_zero_rows() {
        let mut repo = MockNotificationRepository::new();
        repo.expect_insert().returning(|_| Ok(0));

        let err = service(repo).create(draft()).await.expect_err("not stored");
        assert_eq!(err.code(), ErrorCode::WriteFailure);
    }

    #[tokio::test]
    async fn mark_read_of_unknown_id_is_a_write_failure() {
        let mut repo = MockNotificationRepository::new();
        repo.expect_mark_read().returning(|_| Ok(0));

        let err = service(repo)
            .mark_read(&NotificationId::random())
            .await
            .expect_err("unknown id");
        assert_eq!(err.code(), ErrorCode::WriteFailure);
    }

    #[tokio::test]
    async fn unread_count_passes_through() {
        let mut repo = MockNotificationRepository::new();
        repo.expect_count_unread_by_user().returning(|_| Ok(3));

        let count = service(repo)
            .unread_count(&UserId::random())
            .await
            .expect("count");
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn query_failures_are_internal() {
        let mut repo = MockNotificationRepository::new();
        repo.expect_find_by_user()
            .returning(|_| Err(NotificationPersistenceError::query("timeout")));

        let err = service(repo)
            .list_for(&UserId::random())
            .await
            .expect_err("failure");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
