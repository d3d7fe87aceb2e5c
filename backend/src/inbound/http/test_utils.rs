//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use serde_json::Value;

use super::state::{HttpState, HttpStatePorts};
use crate::domain::ports::{
    MockAccountService, MockBusinessVerification, MockMandateWorkflow, MockNotificationFeed,
    MockPaymentTracker, MockPhoneVerification,
};

/// Driving-port mocks with no expectations set. Tests configure the one
/// they exercise and leave the rest untouched, so stray calls panic.
#[derive(Default)]
pub struct MockPorts {
    /// Account port mock.
    pub accounts: MockAccountService,
    /// Mandate port mock.
    pub mandates: MockMandateWorkflow,
    /// Notification port mock.
    pub notifications: MockNotificationFeed,
    /// Payment port mock.
    pub payments: MockPaymentTracker,
    /// Phone verification port mock.
    pub phone_verification: MockPhoneVerification,
    /// Business verification port mock.
    pub business_verification: MockBusinessVerification,
}

impl MockPorts {
    /// Wrap the mocks as handler state.
    #[must_use]
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            accounts: Arc::new(self.accounts),
            mandates: Arc::new(self.mandates),
            notifications: Arc::new(self.notifications),
            payments: Arc::new(self.payments),
            phone_verification: Arc::new(self.phone_verification),
            business_verification: Arc::new(self.business_verification),
        })
    }
}

/// App with every API route mounted over `state`.
#[must_use]
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(super::json_config())
        .service(web::scope("/api").configure(super::configure))
}

/// Pull `details.<key>` out of an error body as a string.
#[must_use]
pub fn detail<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get("details")
        .and_then(|details| details.get(key))
        .and_then(Value::as_str)
}
