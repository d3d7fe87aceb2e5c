//! Phone one-time-code issuing and verification.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{CodeGenerator, PhoneVerification, VerificationCodeStore};
use crate::domain::{
    CODE_TTL_SECS, CodeIssue, Error, IssuedCode, PhoneNumber, PhoneNumberError,
    PhoneVerificationFailure, PhoneVerificationOutcome, VerificationCode,
};

/// Verification service over a code store and a code generator.
pub struct PhoneVerificationService<S, G> {
    store: Arc<S>,
    generator: Arc<G>,
    clock: Arc<dyn Clock>,
}

impl<S, G> PhoneVerificationService<S, G> {
    /// Create a service.
    #[must_use]
    pub fn new(store: Arc<S>, generator: Arc<G>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            generator,
            clock,
        }
    }
}

fn phone_error(error: &PhoneNumberError) -> Error {
    let code = match error {
        PhoneNumberError::Empty => "empty_phone_number",
        PhoneNumberError::Malformed => "malformed_phone_number",
    };
    Error::invalid_request(error.to_string())
        .with_details(json!({ "field": "phoneNumber", "code": code }))
}

#[async_trait]
impl<S, G> PhoneVerification for PhoneVerificationService<S, G>
where
    S: VerificationCodeStore,
    G: CodeGenerator,
{
    async fn issue(&self, raw_phone: &str) -> Result<CodeIssue, Error> {
        let phone = PhoneNumber::parse(raw_phone).map_err(|err| phone_error(&err))?;
        let code = VerificationCode::from_value(self.generator.next_value());
        let issued = IssuedCode::new(phone.clone(), code.clone(), self.clock.utc());
        self.store.put(issued).await?;
        info!(phone = %phone, ttl_secs = CODE_TTL_SECS, "verification code issued");
        Ok(CodeIssue {
            phone,
            code,
            expires_in_secs: CODE_TTL_SECS,
        })
    }

    async fn verify(&self, raw_phone: &str, code: &str) -> Result<PhoneVerificationOutcome, Error> {
        if raw_phone.trim().is_empty() || code.trim().is_empty() {
            return Err(Error::invalid_request("phone number and code are required"));
        }
        // A number that cannot be issued to cannot hold a code either.
        let Ok(phone) = PhoneNumber::parse(raw_phone) else {
            return Ok(PhoneVerificationOutcome::Rejected(
                PhoneVerificationFailure::ExpiredOrMissing,
            ));
        };
        let redemption = self
            .store
            .consume(&phone, &VerificationCode::submitted(code), self.clock.utc())
            .await?;
        let outcome = PhoneVerificationOutcome::from(redemption);
        debug!(phone = %phone, outcome = ?outcome, "verification code checked");
        Ok(outcome)
    }
}
