//! Account and verification handlers under `/api/auth`.
//!
//! ```text
//! POST /api/auth/register {"username":"kim","email":"kim@example.com",...}
//! POST /api/auth/login {"usernameOrEmail":"kim","password":"pw12"}
//! POST /api/auth/send-verification-code {"phoneNumber":"010-1234-5678"}
//! POST /api/auth/verify-phone-code {"phoneNumber":"01012345678","code":"042917"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::{
    BusinessCheck, Error, LoginCredentials, LoginValidationError, PhoneVerificationOutcome,
    RegistrationForm,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    PhoneVerifiedResponse, RegistrationNumberResponse, UserResponse, VerificationCodeResponse,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::field_error;

/// Client sign-up body. Absent fields read as blank and fail validation.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Requested login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Display name.
    pub name: String,
    /// National resident registration number.
    pub resident_number: String,
    /// Mobile number.
    pub phone_number: String,
    /// `INDIVIDUAL`, `CORPORATE`, or `NON_BUSINESS`.
    #[serde(alias = "userType")]
    #[schema(example = "INDIVIDUAL")]
    pub taxpayer_kind: String,
    /// Required unless `NON_BUSINESS`.
    pub business_number: Option<String>,
    /// Required for `CORPORATE`.
    pub corporate_number: Option<String>,
    /// Optional postal code.
    pub postal_code: Option<String>,
    /// Optional street address.
    pub address: Option<String>,
    /// Optional address detail.
    pub address_detail: Option<String>,
}

impl From<RegisterRequest> for RegistrationForm {
    fn from(value: RegisterRequest) -> Self {
        Self {
            username: value.username,
            email: value.email,
            password: Zeroizing::new(value.password),
            name: value.name,
            resident_number: value.resident_number,
            phone_number: value.phone_number,
            taxpayer_kind: value.taxpayer_kind,
            business_number: value.business_number,
            corporate_number: value.corporate_number,
            postal_code: value.postal_code,
            address: value.address,
            address_detail: value.address_detail,
        }
    }
}

/// Login body. The identifier matches either the username or the email.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(alias = "username")]
    /// Username or email.
    pub username_or_email: String,
    /// Plaintext password.
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username_or_email, &value.password)
    }
}

/// Business registration number to check.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct BusinessNumberRequest {
    #[schema(example = "123-45-67890")]
    /// Ten digits, hyphens allowed.
    pub business_number: String,
}

/// Corporate registration number to check.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CorporateNumberRequest {
    #[schema(example = "110111-1234567")]
    /// Thirteen digits, hyphens allowed.
    pub corporate_number: String,
}

/// Phone number to send a verification code to.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SendCodeRequest {
    #[schema(example = "010-1234-5678")]
    /// Mobile number, hyphens allowed.
    pub phone_number: String,
}

/// Code submitted for a phone number.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct VerifyCodeRequest {
    /// Number the code was sent to.
    pub phone_number: String,
    /// Six-digit code.
    pub code: String,
}

fn map_login_validation_error(err: &LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyIdentifier => {
            field_error("usernameOrEmail", "empty_identifier", err.to_string())
        }
        LoginValidationError::EmptyPassword => {
            field_error("password", "empty_password", err.to_string())
        }
    }
}

fn registration_number_response(
    check: BusinessCheck,
    field: &str,
    code: &str,
) -> ApiResult<web::Json<RegistrationNumberResponse>> {
    match check {
        BusinessCheck::Valid { number, record } => {
            Ok(web::Json(RegistrationNumberResponse::new(&number, record)))
        }
        BusinessCheck::Invalid(rejection) => {
            warn!(field, reason = rejection.reason(), "registration number rejected");
            Err(Error::invalid_request(rejection.to_string()).with_details(json!({
                "field": field,
                "code": code,
                "reason": rejection.reason(),
            })))
        }
    }
}

/// Register a client account.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Account could not be stored", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register"
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let form = RegistrationForm::from(payload.into_inner());
    let user = state.accounts.register(form).await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Authenticate by username or email.
///
/// Unknown accounts and wrong passwords yield the same 401 body.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())
        .map_err(|err| map_login_validation_error(&err))?;
    let user = state.accounts.login(&credentials).await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Check a 10-digit business registration number against the registry.
#[utoipa::path(
    post,
    path = "/api/auth/verify-business-number",
    request_body = BusinessNumberRequest,
    responses(
        (status = 200, description = "Number is registered", body = RegistrationNumberResponse),
        (status = 400, description = "Number rejected", body = Error)
    ),
    tags = ["auth"],
    operation_id = "verifyBusinessNumber"
)]
#[post("/auth/verify-business-number")]
pub async fn verify_business_number(
    state: web::Data<HttpState>,
    payload: web::Json<BusinessNumberRequest>,
) -> ApiResult<web::Json<RegistrationNumberResponse>> {
    let check = state
        .business_verification
        .verify_business_number(&payload.business_number)
        .await?;
    registration_number_response(check, "businessNumber", "invalid_business_number")
}

/// Check a 13-digit corporate registration number against the registry.
#[utoipa::path(
    post,
    path = "/api/auth/verify-corporate-number",
    request_body = CorporateNumberRequest,
    responses(
        (status = 200, description = "Number is registered", body = RegistrationNumberResponse),
        (status = 400, description = "Number rejected", body = Error)
    ),
    tags = ["auth"],
    operation_id = "verifyCorporateNumber"
)]
#[post("/auth/verify-corporate-number")]
pub async fn verify_corporate_number(
    state: web::Data<HttpState>,
    payload: web::Json<CorporateNumberRequest>,
) -> ApiResult<web::Json<RegistrationNumberResponse>> {
    let check = state
        .business_verification
        .verify_corporate_number(&payload.corporate_number)
        .await?;
    registration_number_response(check, "corporateNumber", "invalid_corporate_number")
}

/// Issue a six-digit code for a mobile number. Reissuing replaces the
/// previous code.
#[utoipa::path(
    post,
    path = "/api/auth/send-verification-code",
    request_body = SendCodeRequest,
    responses(
        (status = 200, description = "Code issued", body = VerificationCodeResponse),
        (status = 400, description = "Phone number rejected", body = Error)
    ),
    tags = ["auth"],
    operation_id = "sendVerificationCode"
)]
#[post("/auth/send-verification-code")]
pub async fn send_verification_code(
    state: web::Data<HttpState>,
    payload: web::Json<SendCodeRequest>,
) -> ApiResult<web::Json<VerificationCodeResponse>> {
    let issue = state
        .phone_verification
        .issue(&payload.phone_number)
        .await?;
    Ok(web::Json(VerificationCodeResponse::from_issue(
        &issue,
        state.expose_verification_code,
    )))
}

/// Redeem a previously issued code. Success consumes it.
#[utoipa::path(
    post,
    path = "/api/auth/verify-phone-code",
    request_body = VerifyCodeRequest,
    responses(
        (status = 200, description = "Phone verified", body = PhoneVerifiedResponse),
        (status = 400, description = "Verification failed", body = Error)
    ),
    tags = ["auth"],
    operation_id = "verifyPhoneCode"
)]
#[post("/auth/verify-phone-code")]
pub async fn verify_phone_code(
    state: web::Data<HttpState>,
    payload: web::Json<VerifyCodeRequest>,
) -> ApiResult<web::Json<PhoneVerifiedResponse>> {
    let outcome = state
        .phone_verification
        .verify(&payload.phone_number, &payload.code)
        .await?;
    match outcome {
        PhoneVerificationOutcome::Verified => {
            Ok(web::Json(PhoneVerifiedResponse { verified: true }))
        }
        PhoneVerificationOutcome::Rejected(failure) => {
            Err(Error::invalid_request(failure.to_string()).with_details(json!({
                "code": "verification_failed",
                "reason": failure.reason(),
            })))
        }
    }
}
