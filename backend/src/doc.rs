//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates every HTTP handler annotated with `#[utoipa::path]`
//! and the request/response bodies they reference. Swagger UI serves it at
//! `/docs` in debug builds.

use utoipa::OpenApi;

use crate::domain::{
    Error, ErrorCode, MandateStatus, NotificationKind, PaymentStatus, TaxpayerKind, UserRole,
};
use crate::inbound::http::auth::{
    BusinessNumberRequest, CorporateNumberRequest, LoginRequest, RegisterRequest, SendCodeRequest,
    VerifyCodeRequest,
};
use crate::inbound::http::mandate::{AccountantMandateRequest, ClientMandateRequest};
use crate::inbound::http::payment::PaymentRequest;
use crate::inbound::http::schemas::{
    MandateStatusResponse, NotificationResponse, PaymentReceiptResponse, PaymentStatusResponse,
    PhoneVerifiedResponse, RegistrationNumberResponse, UnreadCountResponse, UserResponse,
    VerificationCodeResponse,
};
use crate::inbound::http::users::ProfileUpdateRequest;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Taxdesk backend API",
        description = "Client registration, mandate consent, notifications, and subscription payments for the tax filing platform."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::verify_business_number,
        crate::inbound::http::auth::verify_corporate_number,
        crate::inbound::http::auth::send_verification_code,
        crate::inbound::http::auth::verify_phone_code,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::mandate::request,
        crate::inbound::http::mandate::send_request,
        crate::inbound::http::mandate::release_request,
        crate::inbound::http::mandate::complete,
        crate::inbound::http::mandate::list,
        crate::inbound::http::notifications::list,
        crate::inbound::http::notifications::mark_read,
        crate::inbound::http::notifications::unread_count,
        crate::inbound::http::payment::process,
        crate::inbound::http::payment::status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        UserRole,
        MandateStatus,
        PaymentStatus,
        TaxpayerKind,
        NotificationKind,
        RegisterRequest,
        LoginRequest,
        BusinessNumberRequest,
        CorporateNumberRequest,
        SendCodeRequest,
        VerifyCodeRequest,
        ProfileUpdateRequest,
        ClientMandateRequest,
        AccountantMandateRequest,
        PaymentRequest,
        UserResponse,
        MandateStatusResponse,
        NotificationResponse,
        UnreadCountResponse,
        PaymentReceiptResponse,
        PaymentStatusResponse,
        VerificationCodeResponse,
        PhoneVerifiedResponse,
        RegistrationNumberResponse,
    )),
    tags(
        (name = "auth", description = "Registration, login, and identity checks"),
        (name = "users", description = "Profile maintenance"),
        (name = "mandate", description = "Mandate consent workflow"),
        (name = "notifications", description = "Per-user notification feed"),
        (name = "payment", description = "Subscription payments"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
