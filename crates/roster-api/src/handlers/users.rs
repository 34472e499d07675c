//! User handlers

use axum::{extract::State, Json};
use roster_service::dto::{CreateUserRequest, UserResponse};
use roster_service::UserService;
use serde::Serialize;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// A freshly provisioned user
///
/// In development the response also carries a bearer token for the new user
/// so local clients and end-to-end tests can authenticate.
#[derive(Debug, Serialize)]
pub struct ProvisionedUser {
    #[serde(flatten)]
    pub user: UserResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Create a user
///
/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Created<Json<ProvisionedUser>>> {
    let user = UserService::new(state.service_context())
        .create_user(request)
        .await?;

    let access_token = if state.config().app.env.is_development() {
        Some(state.jwt_service().issue_token(user.id)?)
    } else {
        None
    };

    Ok(Created(Json(ProvisionedUser { user, access_token })))
}

/// Get the authenticated user
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let response = UserService::new(state.service_context())
        .get_user(auth.user_id)
        .await?;
    Ok(Json(response))
}
