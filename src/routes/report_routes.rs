use axum::{extract::State, routing::get, Json, Router};

use crate::dto::report_dto::{ClientReport, DriverReport, TripFinancialReport, TruckReport};
use crate::middleware::CanRead;
use crate::services::ReportService;
use crate::state::AppState;
use crate::utils::extract::IdPath;
use crate::utils::AppResult;

/// Read-only; open to every role.
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/driver/:id", get(driver_report))
        .route("/truck/:id", get(truck_report))
        .route("/client/:id", get(client_report))
        .route("/trip/:id", get(trip_report))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/driver/{id}",
    tag = "Reports",
    params(("id" = i32, Path, description = "Driver id")),
    security(("access_token" = [])),
    responses(
        (status = 200, body = DriverReport),
        (status = 404, description = "Driver not found")
    )
)]
pub async fn driver_report(
    _auth: CanRead,
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
) -> AppResult<Json<DriverReport>> {
    Ok(Json(ReportService::new(&state).driver_report(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/truck/{id}",
    tag = "Reports",
    params(("id" = i32, Path, description = "Truck id")),
    security(("access_token" = [])),
    responses(
        (status = 200, body = TruckReport),
        (status = 404, description = "Truck not found")
    )
)]
pub async fn truck_report(
    _auth: CanRead,
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
) -> AppResult<Json<TruckReport>> {
    Ok(Json(ReportService::new(&state).truck_report(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/client/{id}",
    tag = "Reports",
    params(("id" = i32, Path, description = "Client id")),
    security(("access_token" = [])),
    responses(
        (status = 200, body = ClientReport),
        (status = 404, description = "Client not found")
    )
)]
pub async fn client_report(
    _auth: CanRead,
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
) -> AppResult<Json<ClientReport>> {
    Ok(Json(ReportService::new(&state).client_report(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/trip/{id}",
    tag = "Reports",
    params(("id" = i32, Path, description = "Trip id")),
    security(("access_token" = [])),
    responses(
        (status = 200, body = TripFinancialReport),
        (status = 404, description = "Trip not found")
    )
)]
pub async fn trip_report(
    _auth: CanRead,
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
) -> AppResult<Json<TripFinancialReport>> {
    Ok(Json(ReportService::new(&state).trip_report(id).await?))
}
