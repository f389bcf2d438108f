use tracing::info;

use super::{users_by_id, RECENT_LIMIT};
use crate::dto::driver_dto::{
    CreateDriverRequest, DriverDetail, DriverListItem, DriverResponse, UpdateDriverRequest,
};
use crate::dto::{CreatorDetail, CreatorSummary};
use crate::models::TripLink;
use crate::repositories::StoreError;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, conflict_error, not_found_error};
use crate::utils::AppResult;

const DUPLICATE_LICENSE: &str = "Driver with this license number already exists";

pub struct DriverService<'a> {
    state: &'a AppState,
}

impl<'a> DriverService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn create(
        &self,
        request: CreateDriverRequest,
        created_by: i32,
    ) -> AppResult<DriverResponse> {
        let driver = self
            .state
            .repositories
            .drivers
            .create(request.into_new_driver(created_by))
            .await
            .map_err(|error| match error {
                StoreError::UniqueViolation(_) => conflict_error(DUPLICATE_LICENSE),
                StoreError::ForeignKeyViolation(_) => bad_request_error("Invalid created_by user ID"),
                other => other.into(),
            })?;

        info!("🚚 Driver {} created by user {}", driver.id, created_by);
        Ok(DriverResponse::from(&driver))
    }

    pub async fn find_all(&self) -> AppResult<Vec<DriverListItem>> {
        let repositories = &self.state.repositories;
        let drivers = repositories.drivers.find_all().await?;

        let ids: Vec<i32> = drivers.iter().map(|driver| driver.id).collect();
        let trip_counts = repositories
            .trips
            .count_linked_many(TripLink::Driver, &ids)
            .await?;
        let creators =
            users_by_id(repositories, drivers.iter().map(|driver| driver.created_by).collect())
                .await?;

        Ok(drivers
            .iter()
            .map(|driver| DriverListItem {
                driver: DriverResponse::from(driver),
                creator: creators.get(&driver.created_by).map(CreatorSummary::from),
                trip_count: trip_counts.get(&driver.id).copied().unwrap_or(0),
            })
            .collect())
    }

    pub async fn find_one(&self, id: i32) -> AppResult<DriverDetail> {
        let repositories = &self.state.repositories;
        let driver = repositories
            .drivers
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Driver", id))?;

        let creator = repositories.users.find_by_id(driver.created_by).await?;
        let trips = repositories
            .trips
            .find_linked(TripLink::Driver, id, Some(RECENT_LIMIT))
            .await?;
        let trip_count = repositories.trips.count_linked(TripLink::Driver, id).await?;

        Ok(DriverDetail {
            driver: DriverResponse::from(&driver),
            creator: creator.as_ref().map(CreatorDetail::from),
            trips: trips.iter().map(Into::into).collect(),
            trip_count,
        })
    }

    pub async fn update(&self, id: i32, request: UpdateDriverRequest) -> AppResult<DriverResponse> {
        let driver = self
            .state
            .repositories
            .drivers
            .update(id, request.into())
            .await
            .map_err(|error| match error {
                StoreError::NotFound => not_found_error("Driver", id),
                StoreError::UniqueViolation(_) => conflict_error(DUPLICATE_LICENSE),
                other => other.into(),
            })?;

        info!("✏️ Driver {} updated", id);
        Ok(DriverResponse::from(&driver))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.state
            .repositories
            .drivers
            .delete(id)
            .await
            .map_err(|error| match error {
                StoreError::NotFound => not_found_error("Driver", id),
                StoreError::ForeignKeyViolation(_) => {
                    conflict_error("Cannot delete driver with active trips")
                }
                other => other.into(),
            })?;

        info!("🗑️ Driver {} deleted", id);
        Ok(())
    }
}
