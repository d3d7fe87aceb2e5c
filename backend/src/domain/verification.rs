//! One-time phone verification codes.
//!
//! A code is six ASCII digits, lives for [`CODE_TTL_SECS`] seconds, and is
//! consumed by the first matching verification. At most one live code exists
//! per phone number; issuing again replaces it.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use super::PhoneNumber;

/// Lifetime of an issued code.
pub const CODE_TTL_SECS: u32 = 180;

/// Exclusive upper bound of generated code values.
pub const CODE_SPACE: u32 = 1_000_000;

/// Six-digit, zero-padded verification code.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Render a generated value. Values outside the code space wrap into it.
    ///
    /// # Examples
    /// ```
    /// use taxdesk::domain::VerificationCode;
    ///
    /// assert_eq!(VerificationCode::from_value(42).as_str(), "000042");
    /// ```
    #[must_use]
    pub fn from_value(value: u32) -> Self {
        Self(format!("{:06}", value.rem_euclid(CODE_SPACE)))
    }

    /// Wrap a submitted code verbatim for comparison.
    #[must_use]
    pub fn submitted(raw: &str) -> Self {
        Self(raw.to_owned())
    }

    /// Digits as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VerificationCode(******)")
    }
}

/// Stored code with its deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCode {
    /// Normalised phone number.
    pub phone: PhoneNumber,
    /// Six-digit code.
    pub code: VerificationCode,
    /// Issue time.
    pub issued_at: DateTime<Utc>,
    /// Deadline; the code is dead from this instant.
    pub expires_at: DateTime<Utc>,
}

impl IssuedCode {
    /// New entry expiring [`CODE_TTL_SECS`] after `issued_at`.
    #[must_use]
    pub fn new(phone: PhoneNumber, code: VerificationCode, issued_at: DateTime<Utc>) -> Self {
        Self {
            phone,
            code,
            issued_at,
            expires_at: issued_at + Duration::seconds(i64::from(CODE_TTL_SECS)),
        }
    }

    /// Whether the deadline has passed at `now`. The deadline itself is
    /// already expired.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Result of asking the store to consume a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeRedemption {
    /// The code matched and has been removed.
    Redeemed,
    /// A live code exists but differs; it stays stored.
    Mismatch,
    /// Nothing live is stored for the phone.
    Missing,
}

/// Returned to the caller after issuing a code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeIssue {
    /// Normalised phone number.
    pub phone: PhoneNumber,
    /// Code that was sent.
    pub code: VerificationCode,
    /// Seconds until the code expires.
    pub expires_in_secs: u32,
}

/// Why a phone verification did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneVerificationFailure {
    /// No live code: never issued, expired, or already used.
    ExpiredOrMissing,
    /// A live code exists but the submitted one differs.
    Mismatch,
}

impl PhoneVerificationFailure {
    /// Stable snake_case reason for clients.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::ExpiredOrMissing => "expired_or_not_found",
            Self::Mismatch => "mismatch",
        }
    }
}

impl fmt::Display for PhoneVerificationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpiredOrMissing => write!(f, "verification code expired or not found"),
            Self::Mismatch => write!(f, "verification code does not match"),
        }
    }
}

/// Outcome of verifying a submitted code. Failures are values, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneVerificationOutcome {
    /// Code matched and was consumed.
    Verified,
    /// Code refused.
    Rejected(PhoneVerificationFailure),
}

impl From<CodeRedemption> for PhoneVerificationOutcome {
    fn from(value: CodeRedemption) -> Self {
        match value {
            CodeRedemption::Redeemed => Self::Verified,
            CodeRedemption::Mismatch => Self::Rejected(PhoneVerificationFailure::Mismatch),
            CodeRedemption::Missing => Self::Rejected(PhoneVerificationFailure::ExpiredOrMissing),
        }
    }
}
