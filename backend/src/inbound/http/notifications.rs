//! Notification feed handlers.
//!
//! ```text
//! GET /api/notifications?userId=...
//! GET /api/notifications/unread-count?userId=...
//! PUT /api/notifications/{id}/read
//! ```

use actix_web::{HttpResponse, get, put, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{NotificationResponse, UnreadCountResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_notification_id, required_user_id};

/// Query string selecting whose notifications to read.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    /// Recipient identifier.
    pub user_id: Option<String>,
}

const USER_ID: FieldName = FieldName::new("userId");

/// Newest-first notifications for a user.
#[utoipa::path(
    get,
    path = "/api/notifications",
    params(UserQuery),
    responses(
        (status = 200, description = "Notifications, newest first", body = [NotificationResponse]),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["notifications"],
    operation_id = "listNotifications"
)]
#[get("/notifications")]
pub async fn list(
    state: web::Data<HttpState>,
    query: web::Query<UserQuery>,
) -> ApiResult<web::Json<Vec<NotificationResponse>>> {
    let user = required_user_id(query.user_id.as_deref(), USER_ID)?;
    let notifications = state.notifications.list_for(&user).await?;
    Ok(web::Json(
        notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
    ))
}

/// Mark one notification as read.
#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    params(("id" = String, Path, description = "Notification identifier")),
    responses(
        (status = 204, description = "Marked as read"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Notification not updated", body = Error)
    ),
    tags = ["notifications"],
    operation_id = "markNotificationRead"
)]
#[put("/notifications/{id}/read")]
pub async fn mark_read(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_notification_id(&path.into_inner(), FieldName::new("id"))?;
    state.notifications.mark_read(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Count of unread notifications for a user.
#[utoipa::path(
    get,
    path = "/api/notifications/unread-count",
    params(UserQuery),
    responses(
        (status = 200, description = "Unread count", body = UnreadCountResponse),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["notifications"],
    operation_id = "countUnreadNotifications"
)]
#[get("/notifications/unread-count")]
pub async fn unread_count(
    state: web::Data<HttpState>,
    query: web::Query<UserQuery>,
) -> ApiResult<web::Json<UnreadCountResponse>> {
    let user = required_user_id(query.user_id.as_deref(), USER_ID)?;
    let count = state.notifications.unread_count(&user).await?;
    Ok(web::Json(UnreadCountResponse { count }))
}
