//! In-memory `UserRepository`.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{MandateStatus, PaymentStatus, User, UserId, UserRole};

/// Users kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<User>>, UserPersistenceError> {
        self.users
            .read()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<User>>, UserPersistenceError> {
        self.users
            .write()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }

    fn find_where(
        &self,
        predicate: impl Fn(&User) -> bool,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.read()?.iter().find(|user| predicate(user)).cloned())
    }

    fn filter_where(
        &self,
        predicate: impl Fn(&User) -> bool,
    ) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self
            .read()?
            .iter()
            .filter(|user| predicate(user))
            .cloned()
            .collect())
    }

    fn update_one(
        &self,
        id: &UserId,
        apply: impl FnOnce(&mut User),
    ) -> Result<u64, UserPersistenceError> {
        let mut users = self.write()?;
        Ok(users
            .iter_mut()
            .find(|user| &user.id == id)
            .map_or(0, |user| {
                apply(user);
                1
            }))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        self.find_where(|user| &user.id == id)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError> {
        self.find_where(|user| user.username == username)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        self.find_where(|user| user.email == email)
    }

    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.find_where(|user| user.username == identifier || user.email == identifier)
    }

    async fn insert(&self, user: &User) -> Result<u64, UserPersistenceError> {
        let mut users = self.write()?;
        let taken = users.iter().any(|existing| {
            existing.id == user.id
                || existing.username == user.username
                || existing.email == user.email
        });
        if taken {
            return Ok(0);
        }
        users.push(user.clone());
        Ok(1)
    }

    async fn update_mandate_status(
        &self,
        id: &UserId,
        status: MandateStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<u64, UserPersistenceError> {
        self.update_one(id, |user| {
            user.mandate_status = status;
            user.updated_at = updated_at;
        })
    }

    async fn update_payment_status(
        &self,
        id: &UserId,
        status: PaymentStatus,
        last_payment_at: Option<DateTime<Utc>>,
        updated_at: DateTime<Utc>,
    ) -> Result<u64, UserPersistenceError> {
        self.update_one(id, |user| {
            user.payment_status = status;
            user.last_payment_at = last_payment_at;
            user.updated_at = updated_at;
        })
    }

    async fn update_profile(&self, user: &User) -> Result<u64, UserPersistenceError> {
        let mut users = self.write()?;
        if users
            .iter()
            .any(|other| other.id != user.id && other.email == user.email)
        {
            return Ok(0);
        }
        Ok(users
            .iter_mut()
            .find(|stored| stored.id == user.id)
            .map_or(0, |stored| {
                stored.name.clone_from(&user.name);
                stored.email.clone_from(&user.email);
                stored.contact = user.contact.clone();
                stored.updated_at = user.updated_at;
                1
            }))
    }

    async fn list_tax_accountants(&self) -> Result<Vec<User>, UserPersistenceError> {
        self.filter_where(|user| user.role == UserRole::TaxAccountant)
    }

    async fn list_mandate_requests(&self) -> Result<Vec<User>, UserPersistenceError> {
        self.filter_where(|user| user.mandate_status.is_in_progress())
    }
}
