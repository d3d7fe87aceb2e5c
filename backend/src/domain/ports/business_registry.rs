//! Port for external business and corporate registry lookups.

use async_trait::async_trait;

use crate::domain::{RegistrationNumber, RegistryRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by registry adapters.
    pub enum BusinessRegistryError {
        /// Registry could not be reached.
        Unavailable { message: String } => "business registry unavailable: {message}",
    }
}

/// Lookup of registration numbers in the national business registry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BusinessRegistry: Send + Sync {
    /// Look up a well-formed registration number.
    async fn lookup(
        &self,
        number: &RegistrationNumber,
    ) -> Result<RegistryRecord, BusinessRegistryError>;
}
