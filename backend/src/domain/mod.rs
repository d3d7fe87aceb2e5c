//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the strongly typed entities of the tax platform and the
//! services that implement its driving ports. Nothing in here knows about
//! HTTP or storage; adapters reach the domain through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User and its status enums: identity plus mandate and payment state.
//! - Account, mandate, notification, payment, and verification services.

pub mod account_service;
pub mod auth;
pub mod business;
pub mod business_verification_service;
pub mod error;
pub mod mandate;
pub mod mandate_service;
pub mod notification;
pub mod notification_service;
pub mod payment;
pub mod payment_service;
pub mod phone;
pub mod phone_verification_service;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod verification;
pub mod verification_sweeper;

pub use self::account_service::AccountManager;
pub use self::auth::{
    LoginCredentials, LoginValidationError, NewAccount, PASSWORD_MIN_CHARS, PasswordHash,
    RegistrationForm, RegistrationValidationError,
};
pub use self::business::{
    BusinessCheck, RegistrationNumber, RegistrationNumberKind, RegistrationNumberRejection,
    RegistryRecord,
};
pub use self::business_verification_service::BusinessVerificationService;
pub use self::error::{Error, ErrorCode};
pub use self::mandate::{MandateNotice, MandateTransition};
pub use self::mandate_service::MandateService;
pub use self::notification::{Notification, NotificationDraft, NotificationId, NotificationKind};
pub use self::notification_service::NotificationService;
pub use self::payment::{PaymentAssessment, SUBSCRIPTION_VALIDITY_DAYS, assess_payment};
pub use self::payment_service::PaymentService;
pub use self::phone::{PhoneNumber, PhoneNumberError};
pub use self::phone_verification_service::PhoneVerificationService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    ContactDetails, MandateStatus, PaymentStatus, ProfileChanges, TaxpayerIdentity, TaxpayerKind,
    User, UserId, UserIdError, UserRole,
};
pub use self::verification::{
    CODE_SPACE, CODE_TTL_SECS, CodeIssue, CodeRedemption, IssuedCode, PhoneVerificationFailure,
    PhoneVerificationOutcome, VerificationCode,
};
pub use self::verification_sweeper::{SweeperHandle, VerificationSweeper};
