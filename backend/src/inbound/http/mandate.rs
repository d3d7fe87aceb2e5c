//! Mandate consent workflow handlers.
//!
//! ```text
//! POST /api/mandate/request         {"userId":"..."}                       client asks
//! POST /api/mandate/send-request    {"taxAccountantId":"...","clientId":"..."}
//! POST /api/mandate/release-request {"taxAccountantId":"...","clientId":"..."}
//! POST /api/mandate/complete        {"userId":"..."}                       client consents
//! GET  /api/mandate/list
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, MandateStatus, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{MandateStatusResponse, UserResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, required_user_id};

const USER_ID: FieldName = FieldName::new("userId");
const CLIENT_ID: FieldName = FieldName::new("clientId");
const TAX_ACCOUNTANT_ID: FieldName = FieldName::new("taxAccountantId");

/// Body naming the client acting on their own mandate.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientMandateRequest {
    /// Acting client.
    pub user_id: Option<String>,
}

/// Body naming the accountant acting on a client's mandate.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountantMandateRequest {
    /// Acting accountant.
    pub tax_accountant_id: Option<String>,
    /// Client whose mandate changes.
    pub client_id: Option<String>,
}

struct AccountantAction {
    accountant: UserId,
    client: UserId,
}

impl TryFrom<AccountantMandateRequest> for AccountantAction {
    type Error = Error;

    fn try_from(value: AccountantMandateRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            accountant: required_user_id(value.tax_accountant_id.as_deref(), TAX_ACCOUNTANT_ID)?,
            client: required_user_id(value.client_id.as_deref(), CLIENT_ID)?,
        })
    }
}

fn status_response(
    client: &UserId,
    status: MandateStatus,
) -> web::Json<MandateStatusResponse> {
    web::Json(MandateStatusResponse {
        client_id: client.to_string(),
        mandate_status: status,
    })
}

/// Client requests a mandate; every tax accountant is notified.
#[utoipa::path(
    post,
    path = "/api/mandate/request",
    request_body = ClientMandateRequest,
    responses(
        (status = 200, description = "Mandate requested", body = MandateStatusResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 409, description = "Status update lost", body = Error),
        (status = 500, description = "Notification not stored", body = Error)
    ),
    tags = ["mandate"],
    operation_id = "requestMandate"
)]
#[post("/mandate/request")]
pub async fn request(
    state: web::Data<HttpState>,
    payload: web::Json<ClientMandateRequest>,
) -> ApiResult<web::Json<MandateStatusResponse>> {
    let client = required_user_id(payload.user_id.as_deref(), USER_ID)?;
    let status = state.mandates.request(&client).await?;
    Ok(status_response(&client, status))
}

/// Accountant sends the consent request to the client.
#[utoipa::path(
    post,
    path = "/api/mandate/send-request",
    request_body = AccountantMandateRequest,
    responses(
        (status = 200, description = "Mandate request sent", body = MandateStatusResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Actor is not a tax accountant", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 409, description = "Status update lost", body = Error)
    ),
    tags = ["mandate"],
    operation_id = "sendMandateRequest"
)]
#[post("/mandate/send-request")]
pub async fn send_request(
    state: web::Data<HttpState>,
    payload: web::Json<AccountantMandateRequest>,
) -> ApiResult<web::Json<MandateStatusResponse>> {
    let action = AccountantAction::try_from(payload.into_inner())?;
    let status = state.mandates.send(&action.accountant, &action.client).await?;
    Ok(status_response(&action.client, status))
}

/// Accountant releases a client's mandate back to `NONE`.
#[utoipa::path(
    post,
    path = "/api/mandate/release-request",
    request_body = AccountantMandateRequest,
    responses(
        (status = 200, description = "Mandate released", body = MandateStatusResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Actor is not a tax accountant", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 409, description = "Status update lost", body = Error)
    ),
    tags = ["mandate"],
    operation_id = "releaseMandate"
)]
#[post("/mandate/release-request")]
pub async fn release_request(
    state: web::Data<HttpState>,
    payload: web::Json<AccountantMandateRequest>,
) -> ApiResult<web::Json<MandateStatusResponse>> {
    let action = AccountantAction::try_from(payload.into_inner())?;
    let status = state
        .mandates
        .release(&action.accountant, &action.client)
        .await?;
    Ok(status_response(&action.client, status))
}

/// Client confirms the mandate.
#[utoipa::path(
    post,
    path = "/api/mandate/complete",
    request_body = ClientMandateRequest,
    responses(
        (status = 200, description = "Mandate completed", body = MandateStatusResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 409, description = "Status update lost", body = Error)
    ),
    tags = ["mandate"],
    operation_id = "completeMandate"
)]
#[post("/mandate/complete")]
pub async fn complete(
    state: web::Data<HttpState>,
    payload: web::Json<ClientMandateRequest>,
) -> ApiResult<web::Json<MandateStatusResponse>> {
    let client = required_user_id(payload.user_id.as_deref(), USER_ID)?;
    let status = state.mandates.complete(&client).await?;
    Ok(status_response(&client, status))
}

/// Clients with a mandate in progress, for the accountant dashboard.
#[utoipa::path(
    get,
    path = "/api/mandate/list",
    responses(
        (status = 200, description = "Clients with open mandates", body = [UserResponse]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["mandate"],
    operation_id = "listMandates"
)]
#[get("/mandate/list")]
pub async fn list(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.mandates.list().await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{MockPorts, detail, test_app};
    use crate::test_support::client_fixture;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    async fn call(ports: MockPorts, req: actix_test::TestRequest) -> (StatusCode, Value) {
        let app = actix_test::init_service(test_app(ports.into_state())).await;
        let response = actix_test::call_service(&app, req.to_request()).await;
        let status = response.status();
        (status, actix_test::read_body_json(response).await)
    }

    fn post(uri: &str, body: &Value) -> actix_test::TestRequest {
        actix_test::TestRequest::post().uri(uri).set_json(body)
    }

    #[rstest]
    #[actix_web::test]
    async fn request_returns_the_new_status() {
        let client = UserId::random();
        let expected = client.clone();
        let mut ports = MockPorts::default();
        ports
            .mandates
            .expect_request()
            .withf(move |id: &UserId| *id == expected)
            .times(1)
            .returning(|_| Ok(MandateStatus::Requested));

        let (status, body) = call(
            ports,
            post("/api/mandate/request", &json!({"userId": client.to_string()})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"clientId": client.to_string(), "mandateStatus": "REQUESTED"})
        );
    }

    #[rstest]
    #[case("/api/mandate/send-request")]
    #[case("/api/mandate/release-request")]
    #[actix_web::test]
    async fn accountant_actions_require_both_ids(#[case] uri: &str) {
        let mut ports = MockPorts::default();
        ports.mandates.expect_send().never();
        ports.mandates.expect_release().never();

        let (status, body) = call(
            ports,
            post(uri, &json!({"clientId": UserId::random().to_string()})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(detail(&body, "field"), Some("taxAccountantId"));
        assert_eq!(detail(&body, "code"), Some("missing_field"));
    }

    #[rstest]
    #[actix_web::test]
    async fn non_accountant_actor_is_forbidden() {
        let mut ports = MockPorts::default();
        ports.mandates.expect_send().returning(|_, _| {
            Err(Error::forbidden(
                "only tax accountants may send mandate requests",
            ))
        });

        let (status, body) = call(
            ports,
            post(
                "/api/mandate/send-request",
                &json!({
                    "taxAccountantId": UserId::random().to_string(),
                    "clientId": UserId::random().to_string(),
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.get("code").and_then(Value::as_str), Some("forbidden"));
    }

    #[rstest]
    #[actix_web::test]
    async fn zero_row_update_is_a_conflict() {
        let mut ports = MockPorts::default();
        ports
            .mandates
            .expect_complete()
            .returning(|_| Err(Error::conflict("mandate status was not updated")));

        let (status, _) = call(
            ports,
            post(
                "/api/mandate/complete",
                &json!({"userId": UserId::random().to_string()}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[rstest]
    #[actix_web::test]
    async fn list_renders_public_user_views() {
        let mut ports = MockPorts::default();
        ports.mandates.expect_list().returning(|| {
            let mut kim = client_fixture("Kim");
            kim.mandate_status = MandateStatus::Sent;
            Ok(vec![kim])
        });

        let (status, body) = call(
            ports,
            actix_test::TestRequest::get().uri("/api/mandate/list"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let entries = body.as_array().expect("array body");
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries
                .first()
                .and_then(|entry| entry.get("mandateStatus"))
                .and_then(Value::as_str),
            Some("SENT")
        );
    }
}
