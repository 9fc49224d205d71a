//! User create and lookup handlers.
//!
//! Both handlers are thin: decode the request, delegate to `UserService`,
//! and let `ApiError` shape any failure.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, instrument};
use userstore_core::CreateUserRequest;

use crate::{error::ApiError, AppState};

/// Creates a user from a JSON body.
///
/// # Errors
///
/// Returns 400 with a coded error body when:
/// - the body is not a JSON user (E1001)
/// - the id is not a positive integer (E1002)
/// - the blog is not an http(s) URL (E1003)
/// - the id already exists (E1005)
/// - the insert fails (E2001)
#[instrument(name = "create_user_handler", skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;

    let user = state.users.create(request).await?;
    info!(user_id = %user.id, "User created");

    Ok((StatusCode::OK, Json(user)).into_response())
}

/// Fetches a user by the id in the path.
///
/// # Errors
///
/// Returns 400 (E1002) for a malformed id without querying the store, and
/// 404 when the user does not exist (E1004) or the query fails (E2002).
#[instrument(name = "get_user_by_id", skip(state))]
pub async fn get_user_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let user = state.users.find(&id).await?;

    Ok((StatusCode::OK, Json(user)).into_response())
}
