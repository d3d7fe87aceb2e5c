//! Mobile phone numbers used as verification-code keys.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

static MOBILE_RE: OnceLock<Regex> = OnceLock::new();

fn mobile_regex() -> &'static Regex {
    MOBILE_RE.get_or_init(|| {
        Regex::new(r"^01[0-9][0-9]{7,8}$")
            .unwrap_or_else(|error| panic!("mobile number regex failed to compile: {error}"))
    })
}

/// Errors raised while normalising a phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneNumberError {
    /// Nothing was submitted.
    Empty,
    /// Not `01X` followed by 7 or 8 ASCII digits once hyphens are removed.
    Malformed,
}

impl fmt::Display for PhoneNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "phone number must not be empty"),
            Self::Malformed => write!(f, "phone number must look like 010-1234-5678"),
        }
    }
}

impl std::error::Error for PhoneNumberError {}

/// Hyphen-free mobile number.
///
/// Issuing and verifying both go through [`PhoneNumber::parse`], so
/// `010-1234-5678` and `01012345678` address the same stored code.
///
/// # Examples
/// ```
/// use taxdesk::domain::PhoneNumber;
///
/// let phone = PhoneNumber::parse("010-1234-5678").unwrap();
/// assert_eq!(phone.as_str(), "01012345678");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Strip hyphens and check the mobile number shape.
    pub fn parse(raw: &str) -> Result<Self, PhoneNumberError> {
        if raw.is_empty() {
            return Err(PhoneNumberError::Empty);
        }
        let digits = raw.replace('-', "");
        if !mobile_regex().is_match(&digits) {
            return Err(PhoneNumberError::Malformed);
        }
        Ok(Self(digits))
    }

    /// Normalised digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
