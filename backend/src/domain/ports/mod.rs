//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, the code store, the code generator, the
//! business registry) are implemented by outbound adapters. Driving ports
//! (`AccountService`, `MandateWorkflow`, ...) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod business_registry;
mod business_verification;
mod code_generator;
mod mandate_workflow;
mod notification_feed;
mod notification_repository;
mod payment_tracker;
mod phone_verification;
mod user_repository;
mod verification_code_store;

#[cfg(test)]
pub use account_service::MockAccountService;
pub use account_service::AccountService;
#[cfg(test)]
pub use business_registry::MockBusinessRegistry;
pub use business_registry::{BusinessRegistry, BusinessRegistryError};
#[cfg(test)]
pub use business_verification::MockBusinessVerification;
pub use business_verification::BusinessVerification;
#[cfg(test)]
pub use code_generator::MockCodeGenerator;
pub use code_generator::CodeGenerator;
#[cfg(test)]
pub use mandate_workflow::MockMandateWorkflow;
pub use mandate_workflow::MandateWorkflow;
#[cfg(test)]
pub use notification_feed::MockNotificationFeed;
pub use notification_feed::NotificationFeed;
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
pub use notification_repository::{NotificationPersistenceError, NotificationRepository};
#[cfg(test)]
pub use payment_tracker::MockPaymentTracker;
pub use payment_tracker::PaymentTracker;
#[cfg(test)]
pub use phone_verification::MockPhoneVerification;
pub use phone_verification::PhoneVerification;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use verification_code_store::MockVerificationCodeStore;
pub use verification_code_store::{VerificationCodeStore, VerificationStoreError};
