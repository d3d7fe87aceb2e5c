//! Profile maintenance handlers.
//!
//! ```text
//! PUT /api/users/{id}/profile {"name":"Kim","phoneNumber":"010-9876-5432"}
//! ```

use actix_web::{put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, ProfileChanges};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::UserResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_user_id};

/// Editable profile fields. Omitted fields keep their stored value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New mobile number.
    pub phone_number: Option<String>,
    /// New postal code.
    pub postal_code: Option<String>,
    /// New street address.
    pub address: Option<String>,
    /// New address detail.
    pub address_detail: Option<String>,
}

impl From<ProfileUpdateRequest> for ProfileChanges {
    fn from(value: ProfileUpdateRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone_number: value.phone_number,
            postal_code: value.postal_code,
            address: value.address,
            address_detail: value.address_detail,
        }
    }
}

/// Update the contact details of an account.
#[utoipa::path(
    put,
    path = "/api/users/{id}/profile",
    params(("id" = String, Path, description = "User identifier")),
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 409, description = "Profile changed concurrently", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateProfile"
)]
#[put("/users/{id}/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ProfileUpdateRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(&path.into_inner(), FieldName::new("id"))?;
    let user = state
        .accounts
        .update_profile(&id, payload.into_inner().into())
        .await?;
    Ok(web::Json(UserResponse::from(user)))
}
