//! Per-user notification log entries.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserId;

/// Notification identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(Uuid);

impl NotificationId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Direction of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    /// Sent by a client to accountants.
    ClientToTax,
    /// Sent by an accountant to a client.
    TaxToClient,
}

/// Stored notification. Only `read` ever changes, and only to `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Primary key.
    pub id: NotificationId,
    /// Addressee.
    pub recipient_id: UserId,
    /// Originating user, if any.
    pub sender_id: Option<UserId>,
    /// Direction.
    pub kind: NotificationKind,
    /// Message body.
    pub text: String,
    /// Set once the recipient opens it.
    pub read: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Notification content before it is stamped and stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    /// Addressee.
    pub recipient_id: UserId,
    /// Originating user, if any.
    pub sender_id: Option<UserId>,
    /// Direction.
    pub kind: NotificationKind,
    /// Message body.
    pub text: String,
}

impl NotificationDraft {
    /// Stamp the draft as an unread notification.
    #[must_use]
    pub fn into_notification(self, id: NotificationId, now: DateTime<Utc>) -> Notification {
        Notification {
            id,
            recipient_id: self.recipient_id,
            sender_id: self.sender_id,
            kind: self.kind,
            text: self.text,
            read: false,
            created_at: now,
        }
    }
}
