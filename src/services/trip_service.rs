//! Trips and their nested expenses

use tracing::info;

use super::users_by_id;
use crate::dto::client_dto::ClientResponse;
use crate::dto::driver_dto::DriverResponse;
use crate::dto::trip_dto::{
    CreateTripExpenseRequest, CreateTripRequest, TripClient, TripDetail, TripDriver,
    TripExpenseResponse, TripListItem, TripResponse, TripTruck, UpdateTripExpenseRequest,
    UpdateTripRequest,
};
use crate::dto::truck_dto::TruckResponse;
use crate::dto::{CreatorDetail, CreatorSummary};
use crate::models::Trip;
use crate::repositories::StoreError;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, not_found_error};
use crate::utils::{AppError, AppResult};

const INVALID_REFERENCES: &str = "Invalid client_id, driver_id, truck_id, or created_by user ID";

fn expense_not_found(trip_id: i32, expense_id: i32) -> AppError {
    AppError::NotFound(format!(
        "Trip expense with ID {} not found for trip {}",
        expense_id, trip_id
    ))
}

fn distinct(ids: impl Iterator<Item = i32>) -> Vec<i32> {
    let mut ids: Vec<i32> = ids.collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

pub struct TripService<'a> {
    state: &'a AppState,
}

impl<'a> TripService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn create(&self, request: CreateTripRequest, created_by: i32) -> AppResult<TripResponse> {
        let trip = self
            .state
            .repositories
            .trips
            .create(request.into_new_trip(created_by))
            .await
            .map_err(|error| match error {
                StoreError::ForeignKeyViolation(_) => bad_request_error(INVALID_REFERENCES),
                other => other.into(),
            })?;

        info!("🧭 Trip {} created by user {}", trip.id, created_by);
        Ok(TripResponse::from(&trip))
    }

    /// Every trip with its client, driver, truck, creator and expense count.
    pub async fn find_all(&self) -> AppResult<Vec<TripListItem>> {
        let repositories = &self.state.repositories;
        let trips = repositories.trips.find_all().await?;

        let clients = repositories
            .clients
            .find_by_ids(&distinct(trips.iter().map(|trip| trip.client_id)))
            .await?;
        let drivers = repositories
            .drivers
            .find_by_ids(&distinct(trips.iter().filter_map(|trip| trip.driver_id)))
            .await?;
        let trucks = repositories
            .trucks
            .find_by_ids(&distinct(trips.iter().filter_map(|trip| trip.truck_id)))
            .await?;
        let creators =
            users_by_id(repositories, trips.iter().map(|trip| trip.created_by).collect()).await?;

        let trip_ids: Vec<i32> = trips.iter().map(|trip| trip.id).collect();
        let expense_counts = repositories.expenses.count_by_trips(&trip_ids).await?;

        Ok(trips
            .iter()
            .map(|trip| TripListItem {
                trip: TripResponse::from(trip),
                client: clients
                    .iter()
                    .find(|client| client.id == trip.client_id)
                    .map(TripClient::from),
                driver: trip
                    .driver_id
                    .and_then(|id| drivers.iter().find(|driver| driver.id == id))
                    .map(TripDriver::from),
                truck: trip
                    .truck_id
                    .and_then(|id| trucks.iter().find(|truck| truck.id == id))
                    .map(TripTruck::from),
                creator: creators.get(&trip.created_by).map(CreatorSummary::from),
                expense_count: expense_counts.get(&trip.id).copied().unwrap_or(0),
            })
            .collect())
    }

    pub async fn find_one(&self, id: i32) -> AppResult<TripDetail> {
        let repositories = &self.state.repositories;
        let trip = self.require_trip(id).await?;

        let client = repositories.clients.find_by_id(trip.client_id).await?;
        let driver = match trip.driver_id {
            Some(driver_id) => repositories.drivers.find_by_id(driver_id).await?,
            None => None,
        };
        let truck = match trip.truck_id {
            Some(truck_id) => repositories.trucks.find_by_id(truck_id).await?,
            None => None,
        };
        let creator = repositories.users.find_by_id(trip.created_by).await?;
        let expenses = repositories.expenses.find_by_trip(id).await?;

        Ok(TripDetail {
            trip: TripResponse::from(&trip),
            client: client.as_ref().map(ClientResponse::from),
            driver: driver.as_ref().map(DriverResponse::from),
            truck: truck.as_ref().map(TruckResponse::from),
            creator: creator.as_ref().map(CreatorDetail::from),
            expense_count: expenses.len() as i64,
            expenses: expenses.iter().map(TripExpenseResponse::from).collect(),
        })
    }

    pub async fn update(&self, id: i32, request: UpdateTripRequest) -> AppResult<TripResponse> {
        let trip = self
            .state
            .repositories
            .trips
            .update(id, request.into())
            .await
            .map_err(|error| match error {
                StoreError::NotFound => not_found_error("Trip", id),
                StoreError::ForeignKeyViolation(_) => bad_request_error(INVALID_REFERENCES),
                other => other.into(),
            })?;

        info!("✏️ Trip {} updated", id);
        Ok(TripResponse::from(&trip))
    }

    /// Expenses go with the trip.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.state
            .repositories
            .trips
            .delete(id)
            .await
            .map_err(|error| match error {
                StoreError::NotFound => not_found_error("Trip", id),
                other => other.into(),
            })?;

        info!("🗑️ Trip {} deleted", id);
        Ok(())
    }

    pub async fn create_expense(
        &self,
        trip_id: i32,
        request: CreateTripExpenseRequest,
    ) -> AppResult<TripExpenseResponse> {
        self.require_trip(trip_id).await?;

        let expense = self
            .state
            .repositories
            .expenses
            .create(request.into_new_expense(trip_id))
            .await
            .map_err(|error| match error {
                StoreError::ForeignKeyViolation(_) => bad_request_error("Invalid trip ID"),
                other => other.into(),
            })?;

        info!("🧾 Expense {} booked on trip {}", expense.id, trip_id);
        Ok(TripExpenseResponse::from(&expense))
    }

    pub async fn find_expenses(&self, trip_id: i32) -> AppResult<Vec<TripExpenseResponse>> {
        self.require_trip(trip_id).await?;

        let expenses = self.state.repositories.expenses.find_by_trip(trip_id).await?;
        Ok(expenses.iter().map(TripExpenseResponse::from).collect())
    }

    pub async fn update_expense(
        &self,
        trip_id: i32,
        expense_id: i32,
        request: UpdateTripExpenseRequest,
    ) -> AppResult<TripExpenseResponse> {
        self.require_trip(trip_id).await?;

        let expense = self
            .state
            .repositories
            .expenses
            .update(trip_id, expense_id, request.into())
            .await
            .map_err(|error| match error {
                StoreError::NotFound => expense_not_found(trip_id, expense_id),
                other => other.into(),
            })?;

        info!("✏️ Expense {} on trip {} updated", expense_id, trip_id);
        Ok(TripExpenseResponse::from(&expense))
    }

    pub async fn delete_expense(&self, trip_id: i32, expense_id: i32) -> AppResult<()> {
        self.require_trip(trip_id).await?;

        self.state
            .repositories
            .expenses
            .delete(trip_id, expense_id)
            .await
            .map_err(|error| match error {
                StoreError::NotFound => expense_not_found(trip_id, expense_id),
                other => other.into(),
            })?;

        info!("🗑️ Expense {} on trip {} deleted", expense_id, trip_id);
        Ok(())
    }

    async fn require_trip(&self, id: i32) -> AppResult<Trip> {
        self.state
            .repositories
            .trips
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Trip", id))
    }
}
