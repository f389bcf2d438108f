use tracing::info;

use super::{users_by_id, RECENT_LIMIT};
use crate::dto::truck_dto::{
    CreateTruckRequest, TruckDetail, TruckListItem, TruckResponse, UpdateTruckRequest,
};
use crate::dto::{CreatorDetail, CreatorSummary};
use crate::models::TripLink;
use crate::repositories::StoreError;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, conflict_error, not_found_error};
use crate::utils::AppResult;

const DUPLICATE_NUMBER: &str = "Truck with this number already exists";

pub struct TruckService<'a> {
    state: &'a AppState,
}

impl<'a> TruckService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn create(
        &self,
        request: CreateTruckRequest,
        created_by: i32,
    ) -> AppResult<TruckResponse> {
        let truck = self
            .state
            .repositories
            .trucks
            .create(request.into_new_truck(created_by))
            .await
            .map_err(|error| match error {
                StoreError::UniqueViolation(_) => conflict_error(DUPLICATE_NUMBER),
                StoreError::ForeignKeyViolation(_) => bad_request_error("Invalid user ID"),
                other => other.into(),
            })?;

        info!("🚛 Truck {} created by user {}", truck.id, created_by);
        Ok(TruckResponse::from(&truck))
    }

    pub async fn find_all(&self) -> AppResult<Vec<TruckListItem>> {
        let repositories = &self.state.repositories;
        let trucks = repositories.trucks.find_all().await?;

        let ids: Vec<i32> = trucks.iter().map(|truck| truck.id).collect();
        let trip_counts = repositories
            .trips
            .count_linked_many(TripLink::Truck, &ids)
            .await?;
        let creators =
            users_by_id(repositories, trucks.iter().map(|truck| truck.created_by).collect())
                .await?;

        Ok(trucks
            .iter()
            .map(|truck| TruckListItem {
                truck: TruckResponse::from(truck),
                creator: creators.get(&truck.created_by).map(CreatorSummary::from),
                trip_count: trip_counts.get(&truck.id).copied().unwrap_or(0),
            })
            .collect())
    }

    pub async fn find_one(&self, id: i32) -> AppResult<TruckDetail> {
        let repositories = &self.state.repositories;
        let truck = repositories
            .trucks
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Truck", id))?;

        let creator = repositories.users.find_by_id(truck.created_by).await?;
        let trips = repositories
            .trips
            .find_linked(TripLink::Truck, id, Some(RECENT_LIMIT))
            .await?;
        let trip_count = repositories.trips.count_linked(TripLink::Truck, id).await?;

        Ok(TruckDetail {
            truck: TruckResponse::from(&truck),
            creator: creator.as_ref().map(CreatorDetail::from),
            trips: trips.iter().map(Into::into).collect(),
            trip_count,
        })
    }

    pub async fn update(&self, id: i32, request: UpdateTruckRequest) -> AppResult<TruckResponse> {
        let truck = self
            .state
            .repositories
            .trucks
            .update(id, request.into())
            .await
            .map_err(|error| match error {
                StoreError::NotFound => not_found_error("Truck", id),
                StoreError::UniqueViolation(_) => conflict_error(DUPLICATE_NUMBER),
                other => other.into(),
            })?;

        info!("✏️ Truck {} updated", id);
        Ok(TruckResponse::from(&truck))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.state
            .repositories
            .trucks
            .delete(id)
            .await
            .map_err(|error| match error {
                StoreError::NotFound => not_found_error("Truck", id),
                StoreError::ForeignKeyViolation(_) => {
                    conflict_error("Cannot delete truck with associated trips")
                }
                other => other.into(),
            })?;

        info!("🗑️ Truck {} deleted", id);
        Ok(())
    }
}
