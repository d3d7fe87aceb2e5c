//! Authentication primitives: login credentials, registration forms, and the
//! stored password digest.
//!
//! Inbound payload parsing stays outside the domain. Handlers hand raw strings
//! to the constructors here, which validate them before any port is touched.

use std::fmt;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::user::{
    ContactDetails, MandateStatus, PaymentStatus, TaxpayerIdentity, TaxpayerKind, User, UserId,
    UserRole,
};

/// Minimum accepted password length, in characters.
pub const PASSWORD_MIN_CHARS: usize = 4;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username or email was missing or blank once trimmed.
    EmptyIdentifier,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyIdentifier => write!(f, "username or email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `identifier` is trimmed and non-empty. It is matched against both the
///   username and the email column.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use taxdesk::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" kim@example.com ", "pw").unwrap();
/// assert_eq!(creds.identifier(), "kim@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    identifier: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(identifier: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = identifier.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyIdentifier);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            identifier: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username or email used for the lookup.
    #[must_use]
    pub fn identifier(&self) -> &str {
        self.identifier.as_str()
    }

    /// Password provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Lowercase hex SHA-256 digest of a password.
///
/// Unsalted, so equal passwords share a digest. Existing records depend on
/// this exact format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Digest a plaintext password.
    ///
    /// # Examples
    /// ```
    /// use taxdesk::domain::PasswordHash;
    ///
    /// let hash = PasswordHash::digest("test");
    /// assert_eq!(
    ///     hash.as_str(),
    ///     "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
    /// );
    /// ```
    #[must_use]
    pub fn digest(password: &str) -> Self {
        Self(hex::encode(Sha256::digest(password.as_bytes())))
    }

    /// Whether `password` digests to this hash.
    #[must_use]
    pub fn matches(&self, password: &str) -> bool {
        Self::digest(password) == *self
    }

    /// Hex representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Reasons a registration form is rejected. Checked in declaration order and
/// the first failure wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// Username missing.
    EmptyUsername,
    /// Email missing.
    EmptyEmail,
    /// Email lacks an `@`.
    MalformedEmail,
    /// Password below the minimum length.
    PasswordTooShort {
        /// Minimum accepted length in characters.
        min: usize,
    },
    /// Display name missing.
    EmptyName,
    /// Resident number missing.
    EmptyResidentNumber,
    /// Phone number missing.
    EmptyPhoneNumber,
    /// Taxpayer kind missing.
    MissingTaxpayerKind,
    /// Taxpayer kind not recognised.
    UnknownTaxpayerKind,
    /// Individual or corporate taxpayer without a business number.
    BusinessNumberRequired,
    /// Corporate taxpayer without a corporate number.
    CorporateNumberRequired,
}

impl RegistrationValidationError {
    /// Request field the error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "username",
            Self::EmptyEmail | Self::MalformedEmail => "email",
            Self::PasswordTooShort { .. } => "password",
            Self::EmptyName => "name",
            Self::EmptyResidentNumber => "residentNumber",
            Self::EmptyPhoneNumber => "phoneNumber",
            Self::MissingTaxpayerKind | Self::UnknownTaxpayerKind => "taxpayerKind",
            Self::BusinessNumberRequired => "businessNumber",
            Self::CorporateNumberRequired => "corporateNumber",
        }
    }

    /// Stable snake_case code for clients.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "empty_username",
            Self::EmptyEmail => "empty_email",
            Self::MalformedEmail => "malformed_email",
            Self::PasswordTooShort { .. } => "password_too_short",
            Self::EmptyName => "empty_name",
            Self::EmptyResidentNumber => "empty_resident_number",
            Self::EmptyPhoneNumber => "empty_phone_number",
            Self::MissingTaxpayerKind => "missing_taxpayer_kind",
            Self::UnknownTaxpayerKind => "unknown_taxpayer_kind",
            Self::BusinessNumberRequired => "business_number_required",
            Self::CorporateNumberRequired => "corporate_number_required",
        }
    }
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::MalformedEmail => write!(f, "email must contain '@'"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyResidentNumber => {
                write!(f, "resident registration number must not be empty")
            }
            Self::EmptyPhoneNumber => write!(f, "phone number must not be empty"),
            Self::MissingTaxpayerKind => write!(f, "taxpayer kind must be selected"),
            Self::UnknownTaxpayerKind => write!(
                f,
                "taxpayer kind must be one of INDIVIDUAL, CORPORATE, or NON_BUSINESS",
            ),
            Self::BusinessNumberRequired => {
                write!(f, "business registration number is required for this taxpayer kind")
            }
            Self::CorporateNumberRequired => {
                write!(f, "corporate registration number is required for corporate taxpayers")
            }
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// Raw client sign-up input. Blank strings count as missing.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    /// Requested login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Plaintext password, wiped on drop.
    pub password: Zeroizing<String>,
    /// Display name.
    pub name: String,
    /// National resident registration number.
    pub resident_number: String,
    /// Mobile number.
    pub phone_number: String,
    /// `INDIVIDUAL`, `CORPORATE`, or `NON_BUSINESS`.
    pub taxpayer_kind: String,
    /// Required unless non-business.
    pub business_number: Option<String>,
    /// Required for corporate taxpayers.
    pub corporate_number: Option<String>,
    /// Optional postal code.
    pub postal_code: Option<String>,
    /// Optional street address.
    pub address: Option<String>,
    /// Optional address detail.
    pub address_detail: Option<String>,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn present(value: Option<&String>) -> bool {
    value.is_some_and(|v| !is_blank(v))
}

impl RegistrationForm {
    /// Check the form and digest its password.
    pub fn validate(self) -> Result<NewAccount, RegistrationValidationError> {
        use RegistrationValidationError as E;

        if is_blank(&self.username) {
            return Err(E::EmptyUsername);
        }
        if is_blank(&self.email) {
            return Err(E::EmptyEmail);
        }
        if !self.email.contains('@') {
            return Err(E::MalformedEmail);
        }
        if self.password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(E::PasswordTooShort {
                min: PASSWORD_MIN_CHARS,
            });
        }
        if is_blank(&self.name) {
            return Err(E::EmptyName);
        }
        if is_blank(&self.resident_number) {
            return Err(E::EmptyResidentNumber);
        }
        if is_blank(&self.phone_number) {
            return Err(E::EmptyPhoneNumber);
        }
        if is_blank(&self.taxpayer_kind) {
            return Err(E::MissingTaxpayerKind);
        }
        let kind: TaxpayerKind = self
            .taxpayer_kind
            .parse()
            .map_err(|_| E::UnknownTaxpayerKind)?;
        let needs_business = matches!(kind, TaxpayerKind::Individual | TaxpayerKind::Corporate);
        if needs_business && !present(self.business_number.as_ref()) {
            return Err(E::BusinessNumberRequired);
        }
        if kind == TaxpayerKind::Corporate && !present(self.corporate_number.as_ref()) {
            return Err(E::CorporateNumberRequired);
        }

        Ok(NewAccount {
            username: self.username,
            email: self.email,
            password_hash: PasswordHash::digest(&self.password),
            name: self.name,
            role: UserRole::Client,
            contact: ContactDetails {
                phone_number: Some(self.phone_number),
                postal_code: self.postal_code,
                address: self.address,
                address_detail: self.address_detail,
            },
            taxpayer: Some(TaxpayerIdentity {
                kind,
                resident_number: self.resident_number,
                business_number: self.business_number,
                corporate_number: self.corporate_number,
            }),
        })
    }
}

/// Validated account data awaiting an identifier and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Digest of the chosen password.
    pub password_hash: PasswordHash,
    /// Display name.
    pub name: String,
    /// Account role.
    pub role: UserRole,
    /// Contact details.
    pub contact: ContactDetails,
    /// Present for clients only.
    pub taxpayer: Option<TaxpayerIdentity>,
}

impl NewAccount {
    /// Staff account without a taxpayer identity.
    #[must_use]
    pub fn tax_accountant(username: &str, email: &str, password: &str, name: &str) -> Self {
        Self {
            username: username.to_owned(),
            email: email.to_owned(),
            password_hash: PasswordHash::digest(password),
            name: name.to_owned(),
            role: UserRole::TaxAccountant,
            contact: ContactDetails::default(),
            taxpayer: None,
        }
    }

    /// Materialise the stored record. New accounts start with no mandate and
    /// no payment.
    #[must_use]
    pub fn into_user(self, id: UserId, now: DateTime<Utc>) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            name: self.name,
            role: self.role,
            mandate_status: MandateStatus::None,
            payment_status: PaymentStatus::Unpaid,
            last_payment_at: None,
            contact: self.contact,
            taxpayer: self.taxpayer,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyIdentifier)]
    #[case("   ", "pw", LoginValidationError::EmptyIdentifier)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] identifier: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(identifier, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn password_whitespace_is_preserved() {
        let creds = LoginCredentials::try_from_parts("kim", " pw ").expect("valid");
        assert_eq!(creds.password(), " pw ");
    }

    #[test]
    fn digest_is_lowercase_hex_sha256() {
        let hash = PasswordHash::digest("password");
        assert_eq!(
            hash.as_str(),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
        assert!(hash.matches("password"));
        assert!(!hash.matches("Password"));
    }

    #[test]
    fn debug_output_hides_digest() {
        let rendered = format!("{:?}", PasswordHash::digest("secret"));
        assert_eq!(rendered, "PasswordHash(..)");
    }

    #[fixture]
    fn form() -> RegistrationForm {
        RegistrationForm {
            username: "kim".into(),
            email: "kim@example.com".into(),
            password: Zeroizing::new("pass1".into()),
            name: "Kim Minji".into(),
            resident_number: "900101-1234567".into(),
            phone_number: "010-1234-5678".into(),
            taxpayer_kind: "NON_BUSINESS".into(),
            ..RegistrationForm::default()
        }
    }

    #[rstest]
    fn valid_form_produces_client_account(form: RegistrationForm) {
        let account = form.validate().expect("valid form");
        assert_eq!(account.role, UserRole::Client);
        assert!(account.password_hash.matches("pass1"));
        let taxpayer = account.taxpayer.expect("taxpayer identity");
        assert_eq!(taxpayer.kind, TaxpayerKind::NonBusiness);
    }

    #[rstest]
    #[case::blank_username(|f: &mut RegistrationForm| f.username = " ".into(), RegistrationValidationError::EmptyUsername)]
    #[case::blank_email(|f: &mut RegistrationForm| f.email = String::new(), RegistrationValidationError::EmptyEmail)]
    #[case::no_at_sign(|f: &mut RegistrationForm| f.email = "kim.example.com".into(), RegistrationValidationError::MalformedEmail)]
    #[case::short_password(|f: &mut RegistrationForm| f.password = Zeroizing::new("abc".into()), RegistrationValidationError::PasswordTooShort { min: 4 })]
    #[case::blank_name(|f: &mut RegistrationForm| f.name = String::new(), RegistrationValidationError::EmptyName)]
    #[case::blank_resident(|f: &mut RegistrationForm| f.resident_number = String::new(), RegistrationValidationError::EmptyResidentNumber)]
    #[case::blank_phone(|f: &mut RegistrationForm| f.phone_number = String::new(), RegistrationValidationError::EmptyPhoneNumber)]
    #[case::no_kind(|f: &mut RegistrationForm| f.taxpayer_kind = String::new(), RegistrationValidationError::MissingTaxpayerKind)]
    #[case::bad_kind(|f: &mut RegistrationForm| f.taxpayer_kind = "FREELANCER".into(), RegistrationValidationError::UnknownTaxpayerKind)]
    #[case::individual_without_business(|f: &mut RegistrationForm| f.taxpayer_kind = "INDIVIDUAL".into(), RegistrationValidationError::BusinessNumberRequired)]
    #[case::corporate_without_corporate(|f: &mut RegistrationForm| {
        f.taxpayer_kind = "CORPORATE".into();
        f.business_number = Some("123-45-67890".into());
    }, RegistrationValidationError::CorporateNumberRequired)]
    #[case::corporate_with_blank_business(|f: &mut RegistrationForm| {
        f.taxpayer_kind = "CORPORATE".into();
        f.business_number = Some("  ".into());
        f.corporate_number = Some("110111-1234567".into());
    }, RegistrationValidationError::BusinessNumberRequired)]
    fn rejects_invalid_forms(
        form: RegistrationForm,
        #[case] mutate: fn(&mut RegistrationForm),
        #[case] expected: RegistrationValidationError,
    ) {
        let mut form = form;
        mutate(&mut form);
        assert_eq!(form.validate().expect_err("invalid form"), expected);
    }

    #[rstest]
    fn first_failure_wins(form: RegistrationForm) {
        let mut form = form;
        form.username = String::new();
        form.password = Zeroizing::new(String::new());
        assert_eq!(
            form.validate().expect_err("invalid form"),
            RegistrationValidationError::EmptyUsername
        );
    }

    #[test]
    fn new_accounts_start_without_mandate_or_payment() {
        let now = Utc::now();
        let user = NewAccount::tax_accountant("lee", "lee@example.com", "pw12", "Lee")
            .into_user(UserId::random(), now);
        assert_eq!(user.role, UserRole::TaxAccountant);
        assert_eq!(user.mandate_status, MandateStatus::None);
        assert_eq!(user.payment_status, PaymentStatus::Unpaid);
        assert!(user.last_payment_at.is_none());
        assert!(user.taxpayer.is_none());
    }
}
