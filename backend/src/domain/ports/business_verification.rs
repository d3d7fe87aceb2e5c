//! Driving port for registration number checks used during sign-up.

use async_trait::async_trait;

use crate::domain::{BusinessCheck, Error};

/// Driving port that validates business and corporate numbers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BusinessVerification: Send + Sync {
    /// Check a 10-digit business registration number.
    async fn verify_business_number(&self, raw: &str) -> Result<BusinessCheck, Error>;

    /// Check a 13-digit corporate registration number.
    async fn verify_corporate_number(&self, raw: &str) -> Result<BusinessCheck, Error>;
}
