//! Subscription payment handlers.
//!
//! ```text
//! POST /api/payment/process {"userId":"..."}
//! GET  /api/payment/status?userId=...
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, PaymentStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::notifications::UserQuery;
use crate::inbound::http::schemas::{PaymentReceiptResponse, PaymentStatusResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, required_user_id};

const USER_ID: FieldName = FieldName::new("userId");

/// Client paying the subscription fee.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Paying client.
    pub user_id: Option<String>,
}

/// Record a subscription payment. No real charge is made.
#[utoipa::path(
    post,
    path = "/api/payment/process",
    request_body = PaymentRequest,
    responses(
        (status = 200, description = "Payment recorded", body = PaymentReceiptResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 409, description = "Payment not stored", body = Error)
    ),
    tags = ["payment"],
    operation_id = "processPayment"
)]
#[post("/payment/process")]
pub async fn process(
    state: web::Data<HttpState>,
    payload: web::Json<PaymentRequest>,
) -> ApiResult<web::Json<PaymentReceiptResponse>> {
    let user = required_user_id(payload.user_id.as_deref(), USER_ID)?;
    let paid_at = state.payments.charge(&user).await?;
    Ok(web::Json(PaymentReceiptResponse {
        user_id: user.to_string(),
        payment_status: PaymentStatus::Paid,
        paid_at,
    }))
}

/// Subscription validity and days remaining. Lapsed subscriptions are
/// downgraded to `UNPAID` as a side effect.
#[utoipa::path(
    get,
    path = "/api/payment/status",
    params(UserQuery),
    responses(
        (status = 200, description = "Subscription state", body = PaymentStatusResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["payment"],
    operation_id = "paymentStatus"
)]
#[get("/payment/status")]
pub async fn status(
    state: web::Data<HttpState>,
    query: web::Query<UserQuery>,
) -> ApiResult<web::Json<PaymentStatusResponse>> {
    let user = required_user_id(query.user_id.as_deref(), USER_ID)?;
    let assessment = state.payments.status(&user).await?;
    Ok(web::Json(PaymentStatusResponse::from(assessment)))
}
