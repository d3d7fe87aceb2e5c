//! Registration number checks used during sign-up.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{BusinessRegistry, BusinessRegistryError, BusinessVerification};
use crate::domain::{BusinessCheck, Error, RegistrationNumber, RegistrationNumberKind};

/// Shape check followed by a registry lookup.
pub struct BusinessVerificationService<R> {
    registry: Arc<R>,
}

impl<R> BusinessVerificationService<R> {
    /// Create a service over `registry`.
    #[must_use]
    pub const fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }
}

impl<R> BusinessVerificationService<R>
where
    R: BusinessRegistry,
{
    async fn check(&self, kind: RegistrationNumberKind, raw: &str) -> Result<BusinessCheck, Error> {
        let number = match RegistrationNumber::parse(kind, raw) {
            Ok(number) => number,
            Err(rejection) => {
                debug!(?kind, reason = rejection.reason(), "registration number rejected");
                return Ok(BusinessCheck::Invalid(rejection));
            }
        };
        let record = self
            .registry
            .lookup(&number)
            .await
            .map_err(|err| match err {
                BusinessRegistryError::Unavailable { message } => {
                    Error::internal(format!("business registry unavailable: {message}"))
                }
            })?;
        Ok(BusinessCheck::Valid { number, record })
    }
}

#[async_trait]
impl<R> BusinessVerification for BusinessVerificationService<R>
where
    R: BusinessRegistry,
{
    async fn verify_business_number(&self, raw: &str) -> Result<BusinessCheck, Error> {
        self.check(RegistrationNumberKind::Business, raw).await
    }

    async fn verify_corporate_number(&self, raw: &str) -> Result<BusinessCheck, Error> {
        self.check(RegistrationNumberKind::Corporate, raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockBusinessRegistry;
    use crate::domain::{ErrorCode, RegistrationNumberRejection, RegistryRecord};

    #[tokio::test]
    async fn valid_numbers_are_looked_up() {
        let mut registry = MockBusinessRegistry::new();
        registry
            .expect_lookup()
            .withf(|number: &RegistrationNumber| number.as_str() == "1234567890")
            .times(1)
            .returning(|_| {
                Ok(RegistryRecord {
                    name: "Hanbit Bakery".into(),
                    category: "sole proprietorship".into(),
                })
            });

        let check = BusinessVerificationService::new(Arc::new(registry))
            .verify_business_number("123-45-67890")
            .await
            .expect("check");
        let BusinessCheck::Valid { record, .. } = check else {
            panic!("expected a valid check, got {check:?}");
        };
        assert_eq!(record.name, "Hanbit Bakery");
    }

    #[tokio::test]
    async fn malformed_numbers_skip_the_registry() {
        let mut registry = MockBusinessRegistry::new();
        registry.expect_lookup().never();

        let check = BusinessVerificationService::new(Arc::new(registry))
            .verify_corporate_number("1234567890")
            .await
            .expect("check");
        assert_eq!(
            check,
            BusinessCheck::Invalid(RegistrationNumberRejection::WrongLength {
                kind: RegistrationNumberKind::Corporate
            })
        );
    }

    #[tokio::test]
    async fn registry_outage_is_internal() {
        let mut registry = MockBusinessRegistry::new();
        registry
            .expect_lookup()
            .returning(|_| Err(BusinessRegistryError::unavailable("timeout")));

        let err = BusinessVerificationService::new(Arc::new(registry))
            .verify_business_number("1234567890")
            .await
            .expect_err("outage");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
