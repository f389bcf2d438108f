use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::dto::driver_dto::{
    CreateDriverRequest, DriverDetail, DriverListItem, DriverResponse, UpdateDriverRequest,
};
use crate::dto::{ApiResponse, MessageResponse};
use crate::middleware::{CanDelete, CanRead, CanWrite};
use crate::services::DriverService;
use crate::state::AppState;
use crate::utils::extract::{IdPath, ValidatedJson};
use crate::utils::AppResult;

pub fn driver_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_drivers).post(create_driver))
        .route(
            "/:id",
            get(get_driver).patch(update_driver).delete(delete_driver),
        )
}

#[utoipa::path(
    post,
    path = "/api/v1/drivers",
    tag = "Drivers",
    request_body = CreateDriverRequest,
    security(("access_token" = [])),
    responses(
        (status = 201, body = ApiResponse<DriverResponse>),
        (status = 400, description = "Validation failed or creator missing"),
        (status = 403, description = "Insufficient permissions"),
        (status = 409, description = "License number already registered")
    )
)]
pub async fn create_driver(
    auth: CanWrite,
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateDriverRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<DriverResponse>>)> {
    let driver = DriverService::new(&state)
        .create(request, auth.user().id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Driver created Successfully", driver)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/drivers",
    tag = "Drivers",
    security(("access_token" = [])),
    responses((status = 200, body = [DriverListItem]))
)]
pub async fn list_drivers(
    _auth: CanRead,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DriverListItem>>> {
    Ok(Json(DriverService::new(&state).find_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/drivers/{id}",
    tag = "Drivers",
    params(("id" = i32, Path, description = "Driver id")),
    security(("access_token" = [])),
    responses(
        (status = 200, body = DriverDetail),
        (status = 404, description = "Driver not found")
    )
)]
pub async fn get_driver(
    _auth: CanRead,
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
) -> AppResult<Json<DriverDetail>> {
    Ok(Json(DriverService::new(&state).find_one(id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/drivers/{id}",
    tag = "Drivers",
    params(("id" = i32, Path, description = "Driver id")),
    request_body = UpdateDriverRequest,
    security(("access_token" = [])),
    responses(
        (status = 200, body = ApiResponse<DriverResponse>),
        (status = 404, description = "Driver not found"),
        (status = 409, description = "License number already registered")
    )
)]
pub async fn update_driver(
    _auth: CanWrite,
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateDriverRequest>,
) -> AppResult<Json<ApiResponse<DriverResponse>>> {
    let driver = DriverService::new(&state).update(id, request).await?;
    Ok(Json(ApiResponse::with_message("Driver updated Successfully", driver)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/drivers/{id}",
    tag = "Drivers",
    params(("id" = i32, Path, description = "Driver id")),
    security(("access_token" = [])),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "Driver not found"),
        (status = 409, description = "Driver has trips")
    )
)]
pub async fn delete_driver(
    _auth: CanDelete,
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    DriverService::new(&state).delete(id).await?;
    Ok(Json(MessageResponse::new("Driver deleted Successfully")))
}
