use axum::{extract::State, routing::get, Json, Router};

use crate::dto::auth_dto::UserProfile;
use crate::dto::user_dto::{UpdateUserRequest, UserDetail, UserResponse};
use crate::dto::{ApiResponse, MessageResponse};
use crate::middleware::{CanDelete, CanRead, CanWrite};
use crate::services::UserService;
use crate::state::AppState;
use crate::utils::extract::{IdPath, ValidatedJson};
use crate::utils::AppResult;

/// Accounts are created through `/auth/register`; there is no POST here.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/:id", get(get_user).patch(update_user).delete(delete_user))
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("access_token" = [])),
    responses((status = 200, body = [UserResponse]))
)]
pub async fn list_users(
    _auth: CanRead,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserResponse>>> {
    Ok(Json(UserService::new(&state).find_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User id")),
    security(("access_token" = [])),
    responses(
        (status = 200, body = UserDetail),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    _auth: CanRead,
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
) -> AppResult<Json<UserDetail>> {
    Ok(Json(UserService::new(&state).find_one(id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserRequest,
    security(("access_token" = [])),
    responses(
        (status = 200, body = ApiResponse<UserProfile>),
        (status = 403, description = "Insufficient permissions"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update_user(
    _auth: CanWrite,
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<UserProfile>>> {
    let user = UserService::new(&state).update(id, request).await?;
    Ok(Json(ApiResponse::with_message("User Updated Successfully", user)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User id")),
    security(("access_token" = [])),
    responses(
        (status = 200, body = MessageResponse),
        (status = 403, description = "Insufficient permissions"),
        (status = 404, description = "User not found"),
        (status = 409, description = "User still referenced by other records")
    )
)]
pub async fn delete_user(
    _auth: CanDelete,
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    UserService::new(&state).delete(id).await?;
    Ok(Json(MessageResponse::new("User Deleted Successfully")))
}
