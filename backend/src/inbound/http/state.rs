//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountService, BusinessVerification, MandateWorkflow, NotificationFeed, PaymentTracker,
    PhoneVerification,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Registration, login, and profiles.
    pub accounts: Arc<dyn AccountService>,
    /// Mandate lifecycle.
    pub mandates: Arc<dyn MandateWorkflow>,
    /// Notification reads.
    pub notifications: Arc<dyn NotificationFeed>,
    /// Subscription payments.
    pub payments: Arc<dyn PaymentTracker>,
    /// SMS code flow.
    pub phone_verification: Arc<dyn PhoneVerification>,
    /// Registration number checks.
    pub business_verification: Arc<dyn BusinessVerification>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration, login, and profiles.
    pub accounts: Arc<dyn AccountService>,
    /// Mandate lifecycle.
    pub mandates: Arc<dyn MandateWorkflow>,
    /// Notification reads.
    pub notifications: Arc<dyn NotificationFeed>,
    /// Subscription payments.
    pub payments: Arc<dyn PaymentTracker>,
    /// SMS code flow.
    pub phone_verification: Arc<dyn PhoneVerification>,
    /// Registration number checks.
    pub business_verification: Arc<dyn BusinessVerification>,
    /// Echo issued verification codes in the response body. There is no SMS
    /// gateway, so development builds hand the code straight back.
    pub expose_verification_code: bool,
}

impl HttpState {
    /// Construct state from a ports bundle. Verification codes stay hidden.
    #[must_use]
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            accounts,
            mandates,
            notifications,
            payments,
            phone_verification,
            business_verification,
        } = ports;
        Self {
            accounts,
            mandates,
            notifications,
            payments,
            phone_verification,
            business_verification,
            expose_verification_code: false,
        }
    }

    /// Toggle whether issued codes are echoed to the caller.
    #[must_use]
    pub fn with_code_exposure(mut self, expose: bool) -> Self {
        self.expose_verification_code = expose;
        self
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
