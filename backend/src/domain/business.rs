//! Business and corporate registration numbers.
//!
//! Both are digit strings that users often type with hyphens. Only the shape
//! is checked locally; lookups go through the
//! [`BusinessRegistry`](super::ports::BusinessRegistry) port.

use std::fmt;

/// Which registry a number belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationNumberKind {
    /// 10-digit business registration number.
    Business,
    /// 13-digit corporate registration number.
    Corporate,
}

impl RegistrationNumberKind {
    /// Required digit count.
    #[must_use]
    pub const fn digits(self) -> usize {
        match self {
            Self::Business => 10,
            Self::Corporate => 13,
        }
    }

    const fn noun(self) -> &'static str {
        match self {
            Self::Business => "business registration number",
            Self::Corporate => "corporate registration number",
        }
    }
}

/// Why a registration number was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationNumberRejection {
    /// Empty input.
    Missing {
        /// Which number was checked.
        kind: RegistrationNumberKind,
    },
    /// Wrong digit count after removing hyphens.
    WrongLength {
        /// Which number was checked.
        kind: RegistrationNumberKind,
    },
    /// Contains characters other than digits and hyphens.
    NonDigit {
        /// Which number was checked.
        kind: RegistrationNumberKind,
    },
}

impl RegistrationNumberRejection {
    /// Stable snake_case reason for clients.
    #[must_use]
    pub fn reason(self) -> &'static str {
        match self {
            Self::Missing { .. } => "required",
            Self::WrongLength { .. } => "length",
            Self::NonDigit { .. } => "digits",
        }
    }
}

impl fmt::Display for RegistrationNumberRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Missing { kind } => write!(f, "{} is required", kind.noun()),
            Self::WrongLength { kind } => {
                write!(f, "{} must be {} digits", kind.noun(), kind.digits())
            }
            Self::NonDigit { kind } => write!(f, "{} may only contain digits", kind.noun()),
        }
    }
}

/// Registration number with hyphens removed and its length checked.
///
/// # Examples
/// ```
/// use taxdesk::domain::{RegistrationNumber, RegistrationNumberKind};
///
/// let number =
///     RegistrationNumber::parse(RegistrationNumberKind::Business, "123-45-67890").unwrap();
/// assert_eq!(number.as_str(), "1234567890");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistrationNumber {
    kind: RegistrationNumberKind,
    digits: String,
}

impl RegistrationNumber {
    /// Normalise `raw`. Length is checked before the digit rule.
    pub fn parse(
        kind: RegistrationNumberKind,
        raw: &str,
    ) -> Result<Self, RegistrationNumberRejection> {
        if raw.is_empty() {
            return Err(RegistrationNumberRejection::Missing { kind });
        }
        let cleaned = raw.replace('-', "");
        if cleaned.chars().count() != kind.digits() {
            return Err(RegistrationNumberRejection::WrongLength { kind });
        }
        if !cleaned.chars().all(|c| c.is_ascii_digit()) {
            return Err(RegistrationNumberRejection::NonDigit { kind });
        }
        Ok(Self {
            kind,
            digits: cleaned,
        })
    }

    /// Registry the number belongs to.
    #[must_use]
    pub const fn kind(&self) -> RegistrationNumberKind {
        self.kind
    }

    /// Normalised digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.digits.as_str()
    }
}

/// Details a registry returns for a known number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryRecord {
    /// Registered trading or corporate name.
    pub name: String,
    /// Registry category, e.g. sole proprietorship or stock company.
    pub category: String,
}

/// Outcome of a registration number check. Rejections are values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusinessCheck {
    /// Well-formed and found in the registry.
    Valid {
        /// Normalised number.
        number: RegistrationNumber,
        /// Registry entry for the number.
        record: RegistryRecord,
    },
    /// Refused before reaching the registry.
    Invalid(RegistrationNumberRejection),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use RegistrationNumberKind::{Business, Corporate};

    #[rstest]
    #[case(Business, "123-45-67890", "1234567890")]
    #[case(Business, "1234567890", "1234567890")]
    #[case(Corporate, "110111-1234567", "1101111234567")]
    fn accepts_well_formed(
        #[case] kind: RegistrationNumberKind,
        #[case] raw: &str,
        #[case] digits: &str,
    ) {
        let number = RegistrationNumber::parse(kind, raw).expect("valid");
        assert_eq!(number.as_str(), digits);
        assert_eq!(number.kind(), kind);
    }

    #[rstest]
    #[case(Business, "", "required")]
    #[case(Business, "123-45-6789", "length")]
    #[case(Business, "123456789012", "length")]
    #[case(Business, "12345abcde", "digits")]
    #[case(Corporate, "1234567890", "length")]
    #[case(Corporate, "110111-123456x", "digits")]
    fn rejects_malformed(
        #[case] kind: RegistrationNumberKind,
        #[case] raw: &str,
        #[case] reason: &str,
    ) {
        let rejection = RegistrationNumber::parse(kind, raw).expect_err("invalid");
        assert_eq!(rejection.reason(), reason);
    }

    #[test]
    fn length_message_names_digit_count() {
        let rejection =
            RegistrationNumber::parse(Corporate, "12").expect_err("too short");
        assert_eq!(
            rejection.to_string(),
            "corporate registration number must be 13 digits"
        );
    }
}
