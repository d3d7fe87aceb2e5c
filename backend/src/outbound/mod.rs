//! Outbound adapters implementing domain ports.
//!
//! - **memory**: process-local repositories and the verification code store
//! - **code_generator**: `rand`-backed one-time code values
//! - **registry**: simulated business registry
//!
//! Adapters are thin translators between domain types and their storage.
//! They contain no business logic.

pub mod code_generator;
pub mod memory;
pub mod registry;
