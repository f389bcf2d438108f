use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::dto::trip_dto::{
    CreateTripExpenseRequest, CreateTripRequest, TripDetail, TripExpenseResponse, TripListItem,
    TripResponse, UpdateTripExpenseRequest, UpdateTripRequest,
};
use crate::dto::{ApiResponse, MessageResponse};
use crate::middleware::{CanDelete, CanRead, CanWrite};
use crate::services::TripService;
use crate::state::AppState;
use crate::utils::extract::{IdPath, ValidatedJson};
use crate::utils::AppResult;

/// Trips, with their expenses nested under `/:id/expenses`.
pub fn trip_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trips).post(create_trip))
        .route("/:id", get(get_trip).patch(update_trip).delete(delete_trip))
        .route("/:id/expenses", get(list_expenses).post(create_expense))
        .route(
            "/:id/expenses/:expense_id",
            axum::routing::patch(update_expense).delete(delete_expense),
        )
}

#[utoipa::path(
    post,
    path = "/api/v1/trips",
    tag = "Trips",
    request_body = CreateTripRequest,
    security(("access_token" = [])),
    responses(
        (status = 201, body = ApiResponse<TripResponse>),
        (status = 400, description = "Validation failed or unknown client, driver or truck"),
        (status = 403, description = "Insufficient permissions")
    )
)]
pub async fn create_trip(
    auth: CanWrite,
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateTripRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<TripResponse>>)> {
    let trip = TripService::new(&state).create(request, auth.user().id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Trip created Successfully", trip)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/trips",
    tag = "Trips",
    security(("access_token" = [])),
    responses((status = 200, body = [TripListItem]))
)]
pub async fn list_trips(
    _auth: CanRead,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<TripListItem>>> {
    Ok(Json(TripService::new(&state).find_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/trips/{id}",
    tag = "Trips",
    params(("id" = i32, Path, description = "Trip id")),
    security(("access_token" = [])),
    responses(
        (status = 200, body = TripDetail),
        (status = 404, description = "Trip not found")
    )
)]
pub async fn get_trip(
    _auth: CanRead,
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
) -> AppResult<Json<TripDetail>> {
    Ok(Json(TripService::new(&state).find_one(id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/trips/{id}",
    tag = "Trips",
    params(("id" = i32, Path, description = "Trip id")),
    request_body = UpdateTripRequest,
    security(("access_token" = [])),
    responses(
        (status = 200, body = ApiResponse<TripResponse>),
        (status = 400, description = "Unknown client, driver or truck"),
        (status = 404, description = "Trip not found")
    )
)]
pub async fn update_trip(
    _auth: CanWrite,
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateTripRequest>,
) -> AppResult<Json<ApiResponse<TripResponse>>> {
    let trip = TripService::new(&state).update(id, request).await?;
    Ok(Json(ApiResponse::with_message("Trip updated Successfully", trip)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/trips/{id}",
    tag = "Trips",
    params(("id" = i32, Path, description = "Trip id")),
    security(("access_token" = [])),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "Trip not found")
    )
)]
pub async fn delete_trip(
    _auth: CanDelete,
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    TripService::new(&state).delete(id).await?;
    Ok(Json(MessageResponse::new("Trip deleted Successfully")))
}

#[utoipa::path(
    post,
    path = "/api/v1/trips/{id}/expenses",
    tag = "Trip expenses",
    params(("id" = i32, Path, description = "Trip id")),
    request_body = CreateTripExpenseRequest,
    security(("access_token" = [])),
    responses(
        (status = 201, body = ApiResponse<TripExpenseResponse>),
        (status = 404, description = "Trip not found")
    )
)]
pub async fn create_expense(
    _auth: CanWrite,
    State(state): State<AppState>,
    IdPath(trip_id): IdPath<i32>,
    ValidatedJson(request): ValidatedJson<CreateTripExpenseRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<TripExpenseResponse>>)> {
    let expense = TripService::new(&state)
        .create_expense(trip_id, request)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Trip expense created Successfully",
            expense,
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/trips/{id}/expenses",
    tag = "Trip expenses",
    params(("id" = i32, Path, description = "Trip id")),
    security(("access_token" = [])),
    responses(
        (status = 200, body = [TripExpenseResponse]),
        (status = 404, description = "Trip not found")
    )
)]
pub async fn list_expenses(
    _auth: CanRead,
    State(state): State<AppState>,
    IdPath(trip_id): IdPath<i32>,
) -> AppResult<Json<Vec<TripExpenseResponse>>> {
    Ok(Json(TripService::new(&state).find_expenses(trip_id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/trips/{id}/expenses/{expense_id}",
    tag = "Trip expenses",
    params(
        ("id" = i32, Path, description = "Trip id"),
        ("expense_id" = i32, Path, description = "Expense id")
    ),
    request_body = UpdateTripExpenseRequest,
    security(("access_token" = [])),
    responses(
        (status = 200, body = ApiResponse<TripExpenseResponse>),
        (status = 404, description = "Trip or expense not found")
    )
)]
pub async fn update_expense(
    _auth: CanWrite,
    State(state): State<AppState>,
    IdPath((trip_id, expense_id)): IdPath<(i32, i32)>,
    ValidatedJson(request): ValidatedJson<UpdateTripExpenseRequest>,
) -> AppResult<Json<ApiResponse<TripExpenseResponse>>> {
    let expense = TripService::new(&state)
        .update_expense(trip_id, expense_id, request)
        .await?;
    Ok(Json(ApiResponse::with_message(
        "Trip expense updated Successfully",
        expense,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/v1/trips/{id}/expenses/{expense_id}",
    tag = "Trip expenses",
    params(
        ("id" = i32, Path, description = "Trip id"),
        ("expense_id" = i32, Path, description = "Expense id")
    ),
    security(("access_token" = [])),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "Trip or expense not found")
    )
)]
pub async fn delete_expense(
    _auth: CanDelete,
    State(state): State<AppState>,
    IdPath((trip_id, expense_id)): IdPath<(i32, i32)>,
) -> AppResult<Json<MessageResponse>> {
    TripService::new(&state)
        .delete_expense(trip_id, expense_id)
        .await?;
    Ok(Json(MessageResponse::new("Trip expense deleted Successfully")))
}
