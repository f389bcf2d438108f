//! HTTP surface
//!
//! Everything lives under `/api/v1`. Auth, health and the OpenAPI document
//! are public; the rest sits behind `auth_middleware`, with per-handler role
//! checks done by the `Authorized` extractors.

pub mod auth_routes;
pub mod client_routes;
pub mod driver_routes;
pub mod report_routes;
pub mod trip_routes;
pub mod truck_routes;
pub mod user_routes;

use axum::{
    http::{Method, Uri},
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{catch_panic::CatchPanicLayer, compression::CompressionLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::docs::ApiDoc;
use crate::middleware::{auth_middleware, cors_middleware, error_envelope};
use crate::state::AppState;
use crate::utils::AppError;

pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/users", user_routes::user_routes())
        .nest("/drivers", driver_routes::driver_routes())
        .nest("/trucks", truck_routes::truck_routes())
        .nest("/clients", client_routes::client_routes())
        .nest("/trips", trip_routes::trip_routes())
        .nest("/reports", report_routes::report_routes())
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let api = Router::new()
        .nest("/auth", auth_routes::auth_routes())
        .route("/health", get(health))
        .route("/docs/openapi.json", get(openapi_document))
        .merge(protected);

    let cors = cors_middleware(&state.config.cors_origins);

    Router::new()
        .nest("/api/v1", api)
        .fallback(route_not_found)
        .layer(CatchPanicLayer::new())
        .layer(from_fn(error_envelope))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn openapi_document() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn route_not_found(method: Method, uri: Uri) -> AppError {
    AppError::NotFound(format!("Cannot {} {}", method, uri.path()))
}
