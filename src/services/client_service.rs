use tracing::info;

use super::{users_by_id, RECENT_LIMIT};
use crate::dto::client_dto::{
    CreateClientRequest, ClientDetail, ClientListItem, ClientResponse, UpdateClientRequest,
};
use crate::dto::{CreatorDetail, CreatorSummary};
use crate::models::TripLink;
use crate::repositories::StoreError;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, conflict_error, not_found_error};
use crate::utils::AppResult;

const DUPLICATE_EMAIL: &str = "Client with this email already exists";

pub struct ClientService<'a> {
    state: &'a AppState,
}

impl<'a> ClientService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn create(
        &self,
        request: CreateClientRequest,
        created_by: i32,
    ) -> AppResult<ClientResponse> {
        let client = self
            .state
            .repositories
            .clients
            .create(request.into_new_client(created_by))
            .await
            .map_err(|error| match error {
                StoreError::UniqueViolation(_) => conflict_error(DUPLICATE_EMAIL),
                StoreError::ForeignKeyViolation(_) => bad_request_error("Invalid created_by user ID"),
                other => other.into(),
            })?;

        info!("🏢 Client {} created by user {}", client.id, created_by);
        Ok(ClientResponse::from(&client))
    }

    pub async fn find_all(&self) -> AppResult<Vec<ClientListItem>> {
        let repositories = &self.state.repositories;
        let clients = repositories.clients.find_all().await?;

        let ids: Vec<i32> = clients.iter().map(|client| client.id).collect();
        let trip_counts = repositories
            .trips
            .count_linked_many(TripLink::Client, &ids)
            .await?;
        let creators =
            users_by_id(repositories, clients.iter().map(|client| client.created_by).collect())
                .await?;

        Ok(clients
            .iter()
            .map(|client| ClientListItem {
                client: ClientResponse::from(client),
                creator: creators.get(&client.created_by).map(CreatorSummary::from),
                trip_count: trip_counts.get(&client.id).copied().unwrap_or(0),
            })
            .collect())
    }

    pub async fn find_one(&self, id: i32) -> AppResult<ClientDetail> {
        let repositories = &self.state.repositories;
        let client = repositories
            .clients
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Client", id))?;

        let creator = repositories.users.find_by_id(client.created_by).await?;
        let trips = repositories
            .trips
            .find_linked(TripLink::Client, id, Some(RECENT_LIMIT))
            .await?;
        let trip_count = repositories.trips.count_linked(TripLink::Client, id).await?;

        Ok(ClientDetail {
            client: ClientResponse::from(&client),
            creator: creator.as_ref().map(CreatorDetail::from),
            trips: trips.iter().map(Into::into).collect(),
            trip_count,
        })
    }

    pub async fn update(&self, id: i32, request: UpdateClientRequest) -> AppResult<ClientResponse> {
        let client = self
            .state
            .repositories
            .clients
            .update(id, request.into())
            .await
            .map_err(|error| match error {
                StoreError::NotFound => not_found_error("Client", id),
                StoreError::UniqueViolation(_) => conflict_error(DUPLICATE_EMAIL),
                other => other.into(),
            })?;

        info!("✏️ Client {} updated", id);
        Ok(ClientResponse::from(&client))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.state
            .repositories
            .clients
            .delete(id)
            .await
            .map_err(|error| match error {
                StoreError::NotFound => not_found_error("Client", id),
                StoreError::ForeignKeyViolation(_) => {
                    conflict_error("Cannot delete client with associated trips")
                }
                other => other.into(),
            })?;

        info!("🗑️ Client {} deleted", id);
        Ok(())
    }
}
