//! Driving port for the phone one-time-code flow.

use async_trait::async_trait;

use crate::domain::{CodeIssue, Error, PhoneVerificationOutcome};

/// Driving port for SMS code issue and redemption.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhoneVerification: Send + Sync {
    /// Generate and store a code for `phone`, replacing any live one.
    async fn issue(&self, phone: &str) -> Result<CodeIssue, Error>;

    /// Check `code` against the live code for `phone`, consuming it on match.
    async fn verify(&self, phone: &str, code: &str) -> Result<PhoneVerificationOutcome, Error>;
}
