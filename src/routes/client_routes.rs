use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::dto::client_dto::{
    CreateClientRequest, ClientDetail, ClientListItem, ClientResponse, UpdateClientRequest,
};
use crate::dto::{ApiResponse, MessageResponse};
use crate::middleware::{CanDelete, CanRead, CanWrite};
use crate::services::ClientService;
use crate::state::AppState;
use crate::utils::extract::{IdPath, ValidatedJson};
use crate::utils::AppResult;

pub fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route(
            "/:id",
            get(get_client).patch(update_client).delete(delete_client),
        )
}

#[utoipa::path(
    post,
    path = "/api/v1/clients",
    tag = "Clients",
    request_body = CreateClientRequest,
    security(("access_token" = [])),
    responses(
        (status = 201, body = ApiResponse<ClientResponse>),
        (status = 400, description = "Validation failed or creator missing"),
        (status = 403, description = "Insufficient permissions"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_client(
    auth: CanWrite,
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateClientRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ClientResponse>>)> {
    let client = ClientService::new(&state)
        .create(request, auth.user().id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Client created Successfully", client)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/clients",
    tag = "Clients",
    security(("access_token" = [])),
    responses((status = 200, body = [ClientListItem]))
)]
pub async fn list_clients(
    _auth: CanRead,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ClientListItem>>> {
    Ok(Json(ClientService::new(&state).find_all().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/clients/{id}",
    tag = "Clients",
    params(("id" = i32, Path, description = "Client id")),
    security(("access_token" = [])),
    responses(
        (status = 200, body = ClientDetail),
        (status = 404, description = "Client not found")
    )
)]
pub async fn get_client(
    _auth: CanRead,
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
) -> AppResult<Json<ClientDetail>> {
    Ok(Json(ClientService::new(&state).find_one(id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/clients/{id}",
    tag = "Clients",
    params(("id" = i32, Path, description = "Client id")),
    request_body = UpdateClientRequest,
    security(("access_token" = [])),
    responses(
        (status = 200, body = ApiResponse<ClientResponse>),
        (status = 404, description = "Client not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update_client(
    _auth: CanWrite,
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateClientRequest>,
) -> AppResult<Json<ApiResponse<ClientResponse>>> {
    let client = ClientService::new(&state).update(id, request).await?;
    Ok(Json(ApiResponse::with_message("Client updated Successfully", client)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/clients/{id}",
    tag = "Clients",
    params(("id" = i32, Path, description = "Client id")),
    security(("access_token" = [])),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "Client not found"),
        (status = 409, description = "Client has trips")
    )
)]
pub async fn delete_client(
    _auth: CanDelete,
    State(state): State<AppState>,
    IdPath(id): IdPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    ClientService::new(&state).delete(id).await?;
    Ok(Json(MessageResponse::new("Client deleted Successfully")))
}
