//! User data model.
//!
//! A [`User`] carries identity, role, and the two pieces of workflow state the
//! platform tracks per account: the mandate status and the payment status.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::PasswordHash;

/// Validation errors returned when parsing user identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIdError {
    /// Blank input.
    Empty,
    /// Not a UUID.
    Invalid,
}

impl fmt::Display for UserIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "user id must not be empty"),
            Self::Invalid => write!(f, "user id must be a valid UUID"),
        }
    }
}

impl std::error::Error for UserIdError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserIdError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserIdError> {
        if id.is_empty() {
            return Err(UserIdError::Empty);
        }
        if id.trim() != id {
            return Err(UserIdError::Invalid);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserIdError::Invalid)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Role an account plays on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Taxpayer using the platform.
    Client,
    /// Staff member acting on behalf of clients.
    TaxAccountant,
}

/// Position of a client in the mandate (power-of-attorney) lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MandateStatus {
    /// No mandate activity.
    None,
    /// Client asked for a mandate.
    Requested,
    /// Accountant filed the request with the tax office.
    Sent,
    /// Client accepted the mandate.
    Completed,
}

impl MandateStatus {
    /// Whether the status belongs in the accountant's mandate listing.
    #[must_use]
    pub const fn is_in_progress(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Stored subscription flag. Only meaningful together with the last payment
/// timestamp; see [`crate::domain::payment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// No active subscription.
    Unpaid,
    /// Fee paid within the subscription window.
    Paid,
}

/// Kind of taxpayer declared at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxpayerKind {
    /// Sole proprietor; needs a business registration number.
    Individual,
    /// Incorporated business; needs business and corporate numbers.
    Corporate,
    /// Not running a business.
    NonBusiness,
}

/// Error returned when a taxpayer kind string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTaxpayerKind(pub String);

impl fmt::Display for UnknownTaxpayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown taxpayer kind: {}", self.0)
    }
}

impl std::error::Error for UnknownTaxpayerKind {}

impl FromStr for TaxpayerKind {
    type Err = UnknownTaxpayerKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INDIVIDUAL" => Ok(Self::Individual),
            "CORPORATE" => Ok(Self::Corporate),
            "NON_BUSINESS" => Ok(Self::NonBusiness),
            other => Err(UnknownTaxpayerKind(other.to_owned())),
        }
    }
}

/// Contact and address details a user may edit after registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    /// Mobile number as entered.
    pub phone_number: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Unit, floor, or building detail.
    pub address_detail: Option<String>,
}

/// Tax identity captured at client registration. Fixed once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxpayerIdentity {
    /// Declared taxpayer kind.
    pub kind: TaxpayerKind,
    /// National resident registration number.
    pub resident_number: String,
    /// Ten-digit business registration number.
    pub business_number: Option<String>,
    /// Thirteen-digit corporate registration number.
    pub corporate_number: Option<String>,
}

/// Stored account.
///
/// ## Invariants
/// - `username` and `email` are unique across all users.
/// - `mandate_status` only changes through the mandate workflow.
/// - `payment_status` is `Paid` only while `last_payment_at` lies within the
///   subscription window.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Primary key.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// SHA-256 password digest.
    pub password_hash: PasswordHash,
    /// Display name.
    pub name: String,
    /// Client or tax accountant.
    pub role: UserRole,
    /// Current mandate lifecycle position.
    pub mandate_status: MandateStatus,
    /// Stored subscription flag.
    pub payment_status: PaymentStatus,
    /// When the fee was last paid.
    pub last_payment_at: Option<DateTime<Utc>>,
    /// Editable contact details.
    pub contact: ContactDetails,
    /// Absent for staff accounts.
    pub taxpayer: Option<TaxpayerIdentity>,
    /// Registration time.
    pub created_at: DateTime<Utc>,
    /// Time of the last write.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether the account may drive accountant-side mandate transitions.
    #[must_use]
    pub fn is_tax_accountant(&self) -> bool {
        self.role == UserRole::TaxAccountant
    }
}

/// Editable subset of a user's profile. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    /// New display name.
    pub name: Option<String>,
    /// New email; must stay unique.
    pub email: Option<String>,
    /// New mobile number.
    pub phone_number: Option<String>,
    /// New postal code.
    pub postal_code: Option<String>,
    /// New street address.
    pub address: Option<String>,
    /// New address detail.
    pub address_detail: Option<String>,
}

impl ProfileChanges {
    /// Copy every provided field onto `user`.
    pub fn apply_to(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        let contact = &mut user.contact;
        if self.phone_number.is_some() {
            contact.phone_number = self.phone_number;
        }
        if self.postal_code.is_some() {
            contact.postal_code = self.postal_code;
        }
        if self.address.is_some() {
            contact.address = self.address;
        }
        if self.address_detail.is_some() {
            contact.address_detail = self.address_detail;
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserIdError::Empty)]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserIdError::Invalid)]
    #[case("not-a-uuid", UserIdError::Invalid)]
    fn rejects_bad_ids(#[case] raw: &str, #[case] expected: UserIdError) {
        assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
    }

    #[rstest]
    #[case("INDIVIDUAL", TaxpayerKind::Individual)]
    #[case("CORPORATE", TaxpayerKind::Corporate)]
    #[case("NON_BUSINESS", TaxpayerKind::NonBusiness)]
    fn parses_taxpayer_kinds(#[case] raw: &str, #[case] expected: TaxpayerKind) {
        assert_eq!(raw.parse::<TaxpayerKind>().expect("known kind"), expected);
    }

    #[test]
    fn rejects_lowercase_taxpayer_kind() {
        assert!("individual".parse::<TaxpayerKind>().is_err());
    }

    #[rstest]
    #[case(MandateStatus::None, false)]
    #[case(MandateStatus::Requested, true)]
    #[case(MandateStatus::Sent, true)]
    #[case(MandateStatus::Completed, true)]
    fn in_progress_statuses(#[case] status: MandateStatus, #[case] expected: bool) {
        assert_eq!(status.is_in_progress(), expected);
    }

    #[test]
    fn statuses_serialise_screaming_snake() {
        let json = serde_json::to_string(&UserRole::TaxAccountant).expect("serialise");
        assert_eq!(json, "\"TAX_ACCOUNTANT\"");
    }
}
