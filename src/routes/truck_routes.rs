use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::dto::truck_dto::{
    CreateTruckRequest, TruckDetail, TruckListItem, TruckResponse, UpdateTruckRequest,
};
use crate::dto::{ApiResponse, MessageResponse};
use crate::middleware::{CanDelete, CanRead, CanWrite};
use crate::services::TruckService;
use crate::state::AppState;
use crate::utils::extract::{IdPath, ValidatedJson};
use crate::utils::AppResult;

pub fn truck_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trucks).post(create_truck))
        .route(
            "/:id",
            get(get_truck).patch(update_truck).delete(delete_truck),
        )
}

#[utoipa::path(
    post,
    path = "/api/v1/trucks",
    tag = "Trucks",
    request_body = CreateTruckRequest,
    security(("access_token" = [])),
    responses(
        (status = 201, body = ApiResponse<TruckResponse>),
        (status = 400, description = "Validation failed or creator missing"),
        (status = 403, description = "Insufficient permissions"),
        (status = 409, description = "Truck number already registered")
    )
)]
pub async fn create_truck(
    auth: CanWrite,
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateTruckRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<TruckResponse>>)> {
    let truck = TruckService::new(&state)
        .create(request, auth.user().id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Truck created Successfully", truck)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/trucks",
    tag = "Trucks",
    security(("access_token" = [])),
    responses((status = 200, body = [TruckListItem]))
)]
pub async fn list_trucks(
    _auth: CanRead,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<TruckListItem>>> {
    Ok(Json(TruckService::new(&state).find_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/trucks/{id}",
    tag = "Trucks",
    params(("id" = i32, Path, description = "Truck id")),
    security(("access_token" = [])),
    responses(
        (status = 200, body = TruckDetail),
        (status = 404, description = "Truck not found")
    )
)]
pub async fn get_truck(
    _auth: CanRead,
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
) -> AppResult<Json<TruckDetail>> {
    Ok(Json(TruckService::new(&state).find_one(id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/trucks/{id}",
    tag = "Trucks",
    params(("id" = i32, Path, description = "Truck id")),
    request_body = UpdateTruckRequest,
    security(("access_token" = [])),
    responses(
        (status = 200, body = ApiResponse<TruckResponse>),
        (status = 404, description = "Truck not found"),
        (status = 409, description = "Truck number already registered")
    )
)]
pub async fn update_truck(
    _auth: CanWrite,
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateTruckRequest>,
) -> AppResult<Json<ApiResponse<TruckResponse>>> {
    let truck = TruckService::new(&state).update(id, request).await?;
    Ok(Json(ApiResponse::with_message("Truck updated Successfully", truck)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/trucks/{id}",
    tag = "Trucks",
    params(("id" = i32, Path, description = "Truck id")),
    security(("access_token" = [])),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "Truck not found"),
        (status = 409, description = "Truck has trips")
    )
)]
pub async fn delete_truck(
    _auth: CanDelete,
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    TruckService::new(&state).delete(id).await?;
    Ok(Json(MessageResponse::new("Truck deleted Successfully")))
}
