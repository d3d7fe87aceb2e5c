//! In-memory `VerificationCodeStore`.
//!
//! One entry per normalised phone number. Every operation takes the map's
//! mutex once, which makes compare-and-remove in `consume` atomic.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{VerificationCodeStore, VerificationStoreError};
use crate::domain::{CodeRedemption, IssuedCode, PhoneNumber, VerificationCode};

/// Mutex-guarded map of live codes.
#[derive(Debug, Default)]
pub struct InMemoryVerificationCodeStore {
    codes: Mutex<HashMap<PhoneNumber, IssuedCode>>,
}

impl InMemoryVerificationCodeStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<PhoneNumber, IssuedCode>>, VerificationStoreError> {
        self.codes
            .lock()
            .map_err(|_| VerificationStoreError::unavailable("code store lock poisoned"))
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> Result<usize, VerificationStoreError> {
        Ok(self.lock()?.len())
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> Result<bool, VerificationStoreError> {
        Ok(self.lock()?.is_empty())
    }
}

#[async_trait]
impl VerificationCodeStore for InMemoryVerificationCodeStore {
    async fn put(&self, issued: IssuedCode) -> Result<(), VerificationStoreError> {
        self.lock()?.insert(issued.phone.clone(), issued);
        Ok(())
    }

    async fn consume(
        &self,
        phone: &PhoneNumber,
        code: &VerificationCode,
        now: DateTime<Utc>,
    ) -> Result<CodeRedemption, VerificationStoreError> {
        let mut codes = self.lock()?;
        let redemption = match codes.get(phone) {
            None => CodeRedemption::Missing,
            Some(entry) if entry.is_expired_at(now) => CodeRedemption::Missing,
            Some(entry) if entry.code != *code => CodeRedemption::Mismatch,
            Some(_) => CodeRedemption::Redeemed,
        };
        match redemption {
            CodeRedemption::Redeemed => {
                codes.remove(phone);
            }
            CodeRedemption::Missing => {
                // Drop a lazily discovered expired entry.
                codes.remove(phone);
            }
            CodeRedemption::Mismatch => {}
        }
        Ok(redemption)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, VerificationStoreError> {
        let mut codes = self.lock()?;
        let before = codes.len();
        codes.retain(|_, entry| !entry.is_expired_at(now));
        Ok(before - codes.len())
    }
}
