//! Response bodies shared by the HTTP handlers.
//!
//! Domain aggregates stay free of wire concerns; these DTOs pick the fields
//! clients may see (password digests and resident numbers never leave the
//! server) and fix their camelCase JSON shape for OpenAPI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    CodeIssue, MandateStatus, Notification, NotificationKind, PaymentAssessment, PaymentStatus,
    RegistrationNumber, RegistryRecord, TaxpayerKind, User, UserRole,
};

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    /// Account identifier.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Client or tax accountant.
    pub role: UserRole,
    /// Mandate lifecycle position.
    pub mandate_status: MandateStatus,
    /// Stored subscription flag.
    pub payment_status: PaymentStatus,
    /// Most recent payment.
    pub last_payment_at: Option<DateTime<Utc>>,
    /// Mobile number.
    pub phone_number: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Address detail.
    pub address_detail: Option<String>,
    /// Absent for staff accounts.
    pub taxpayer_kind: Option<TaxpayerKind>,
    /// Business registration number.
    pub business_number: Option<String>,
    /// Corporate registration number.
    pub corporate_number: Option<String>,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let (taxpayer_kind, business_number, corporate_number) =
            user.taxpayer.map_or((None, None, None), |identity| {
                (
                    Some(identity.kind),
                    identity.business_number,
                    identity.corporate_number,
                )
            });
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
            name: user.name,
            role: user.role,
            mandate_status: user.mandate_status,
            payment_status: user.payment_status,
            last_payment_at: user.last_payment_at,
            phone_number: user.contact.phone_number,
            postal_code: user.contact.postal_code,
            address: user.contact.address,
            address_detail: user.contact.address_detail,
            taxpayer_kind,
            business_number,
            corporate_number,
            created_at: user.created_at,
        }
    }
}

/// Mandate status after a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MandateStatusResponse {
    /// Client whose mandate moved.
    pub client_id: String,
    /// Status after the transition.
    pub mandate_status: MandateStatus,
}

/// Notification as shown to its recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    /// Notification identifier.
    pub id: String,
    /// Addressee.
    pub recipient_id: String,
    /// Originating user, if any.
    pub sender_id: Option<String>,
    /// Direction.
    pub kind: NotificationKind,
    /// Message body.
    pub text: String,
    /// Whether the recipient has opened it.
    pub read: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(value: Notification) -> Self {
        Self {
            id: value.id.to_string(),
            recipient_id: value.recipient_id.to_string(),
            sender_id: value.sender_id.map(|id| id.to_string()),
            kind: value.kind,
            text: value.text,
            read: value.read,
            created_at: value.created_at,
        }
    }
}

/// Unread notification count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountResponse {
    /// Notifications not yet read.
    pub count: u64,
}

/// Result of a successful charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceiptResponse {
    /// Paying client.
    pub user_id: String,
    /// Always `PAID`.
    pub payment_status: PaymentStatus,
    /// Charge time.
    pub paid_at: DateTime<Utc>,
}

/// Subscription state as reported by `GET /api/payment/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusResponse {
    /// Status after any downgrade.
    pub payment_status: PaymentStatus,
    /// Most recent payment.
    pub last_payment_date: Option<DateTime<Utc>>,
    /// Whether the subscription currently grants access.
    pub valid: bool,
    /// Days left before the subscription lapses; zero once invalid.
    pub days_remaining: i64,
}

impl From<PaymentAssessment> for PaymentStatusResponse {
    fn from(value: PaymentAssessment) -> Self {
        Self {
            payment_status: value.status,
            last_payment_date: value.last_payment_at,
            valid: value.valid,
            days_remaining: value.days_remaining,
        }
    }
}

/// Issued verification code. `code` is present only when exposure is on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerificationCodeResponse {
    /// Normalised digits-only phone number.
    #[schema(example = "01012345678")]
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "042917")]
    /// Issued code; omitted unless exposure is enabled.
    pub code: Option<String>,
    /// Seconds until the code expires.
    #[schema(example = 180)]
    pub expires_in: u32,
}

impl VerificationCodeResponse {
    /// Build the body for `issue`, dropping the code unless `expose_code`.
    #[must_use]
    pub fn from_issue(issue: &CodeIssue, expose_code: bool) -> Self {
        Self {
            phone_number: issue.phone.as_str().to_owned(),
            code: expose_code.then(|| issue.code.as_str().to_owned()),
            expires_in: issue.expires_in_secs,
        }
    }
}

/// Confirmation that a phone number was verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhoneVerifiedResponse {
    /// Always `true`; failures are reported as errors.
    pub verified: bool,
}

/// Registry record for a verified registration number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationNumberResponse {
    /// Always `true`; refusals are reported as errors.
    pub valid: bool,
    /// Normalised digits.
    pub number: String,
    /// Name on the registry.
    pub registered_name: String,
    /// Registry category.
    pub category: String,
}

impl RegistrationNumberResponse {
    /// Combine a verified number with its registry entry.
    #[must_use]
    pub fn new(number: &RegistrationNumber, record: RegistryRecord) -> Self {
        Self {
            valid: true,
            number: number.as_str().to_owned(),
            registered_name: record.name,
            category: record.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RegistrationNumberKind;
    use crate::test_support::{client_fixture, fixed_now};
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    fn user_response_hides_credentials_and_resident_number() {
        let user = client_fixture("Kim");

        let value = serde_json::to_value(UserResponse::from(user)).expect("serialise user");

        let object = value.as_object().expect("user is an object");
        assert!(!object.contains_key("passwordHash"));
        assert!(!object.contains_key("residentNumber"));
        assert_eq!(object.get("mandateStatus"), Some(&Value::from("NONE")));
        assert_eq!(object.get("paymentStatus"), Some(&Value::from("UNPAID")));
    }

    #[rstest]
    fn payment_status_uses_client_field_names() {
        let assessment = PaymentAssessment {
            status: PaymentStatus::Paid,
            last_payment_at: Some(fixed_now()),
            valid: true,
            days_remaining: 30,
            lapsed: false,
        };

        let value = serde_json::to_value(PaymentStatusResponse::from(assessment))
            .expect("serialise status");

        assert_eq!(value.get("paymentStatus"), Some(&Value::from("PAID")));
        assert_eq!(value.get("daysRemaining"), Some(&Value::from(30)));
        assert!(value.get("lastPaymentDate").is_some());
    }

    #[rstest]
    fn valid_checks_carry_the_registry_record() {
        let number = RegistrationNumber::parse(RegistrationNumberKind::Business, "1234567890")
            .expect("ten digits");
        let record = RegistryRecord {
            name: "Test Business".to_owned(),
            category: "Sole proprietorship".to_owned(),
        };

        let response = RegistrationNumberResponse::new(&number, record);

        assert_eq!(response.number, "1234567890");
        assert_eq!(response.registered_name, "Test Business");
    }
}
