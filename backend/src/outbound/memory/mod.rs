//! In-process adapters guarded by std locks.
//!
//! State lives for the lifetime of the process. A poisoned lock surfaces as
//! the port's query or availability error rather than a panic.

mod notification_repository;
mod user_repository;
mod verification_code_store;

pub use notification_repository::InMemoryNotificationRepository;
pub use user_repository::InMemoryUserRepository;
pub use verification_code_store::InMemoryVerificationCodeStore;
