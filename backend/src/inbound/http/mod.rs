//! HTTP inbound adapter exposing REST endpoints.
//!
//! ```text
//! /api/auth/*            registration, login, number and phone checks
//! /api/users/{id}/...    profile edits
//! /api/mandate/*         mandate consent workflow
//! /api/notifications/*   per-user notification feed
//! /api/payment/*         subscription charge and status
//! ```

use actix_web::web;

pub mod auth;
pub mod error;
pub mod health;
pub mod mandate;
pub mod notifications;
pub mod payment;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register every API handler. Mount inside the `/api` scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::register)
        .service(auth::login)
        .service(auth::verify_business_number)
        .service(auth::verify_corporate_number)
        .service(auth::send_verification_code)
        .service(auth::verify_phone_code)
        .service(users::update_profile)
        .service(mandate::request)
        .service(mandate::send_request)
        .service(mandate::release_request)
        .service(mandate::complete)
        .service(mandate::list)
        .service(notifications::unread_count)
        .service(notifications::list)
        .service(notifications::mark_read)
        .service(payment::process)
        .service(payment::status);
}

/// JSON extractor settings shared by the server and handler tests.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(error::json_error_handler)
}
