//! Simulated business registry.
//!
//! No registry is contacted. Every well-formed number resolves to a fixed
//! placeholder record for its registry kind.

use async_trait::async_trait;

use crate::domain::ports::{BusinessRegistry, BusinessRegistryError};
use crate::domain::{RegistrationNumber, RegistrationNumberKind, RegistryRecord};

/// Registry stand-in used until a real integration exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedBusinessRegistry;

#[async_trait]
impl BusinessRegistry for SimulatedBusinessRegistry {
    async fn lookup(
        &self,
        number: &RegistrationNumber,
    ) -> Result<RegistryRecord, BusinessRegistryError> {
        let (name, category) = match number.kind() {
            RegistrationNumberKind::Business => ("Test Business", "Sole proprietorship"),
            RegistrationNumberKind::Corporate => ("Test Corporation", "Stock company"),
        };
        Ok(RegistryRecord {
            name: name.to_owned(),
            category: category.to_owned(),
        })
    }
}
