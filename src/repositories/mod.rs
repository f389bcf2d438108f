//! Repositories
//!
//! One trait per aggregate. `Pg*Repository` types implement them over a
//! `PgPool`; `memory::MemoryStore` implements all of them in process and
//! enforces the same unique and foreign-key rules as the SQL schema.

pub mod client_repository;
pub mod driver_repository;
pub mod memory;
pub mod trip_repository;
pub mod truck_repository;
pub mod user_repository;

use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::models::{
    Client, ClientChanges, Driver, DriverChanges, NewClient, NewDriver, NewTrip, NewTripExpense,
    NewTruck, NewUser, Trip, TripChanges, TripExpense, TripExpenseChanges, TripLink, Truck,
    TruckChanges, User, UserChanges,
};

pub use client_repository::PgClientRepository;
pub use driver_repository::PgDriverRepository;
pub use memory::MemoryStore;
pub use trip_repository::{PgTripExpenseRepository, PgTripRepository};
pub use truck_repository::PgTruckRepository;
pub use user_repository::PgUserRepository;

/// Store failures, classified so services can pick the HTTP outcome.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = error {
            return StoreError::NotFound;
        }

        if let sqlx::Error::Database(db_error) = &error {
            let constraint = db_error.constraint().unwrap_or_default().to_string();
            if db_error.is_unique_violation() {
                return StoreError::UniqueViolation(constraint);
            }
            if db_error.is_foreign_key_violation() {
                return StoreError::ForeignKeyViolation(constraint);
            }
        }

        StoreError::Database(error)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> StoreResult<User>;
    /// Newest first.
    async fn find_all(&self) -> StoreResult<Vec<User>>;
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<User>>;
    async fn find_by_ids(&self, ids: &[i32]) -> StoreResult<Vec<User>>;
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn update(&self, id: i32, changes: UserChanges) -> StoreResult<User>;
    async fn delete(&self, id: i32) -> StoreResult<()>;
}

#[async_trait]
pub trait DriverRepository: Send + Sync {
    async fn create(&self, driver: NewDriver) -> StoreResult<Driver>;
    async fn find_all(&self) -> StoreResult<Vec<Driver>>;
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Driver>>;
    async fn find_by_ids(&self, ids: &[i32]) -> StoreResult<Vec<Driver>>;
    /// Most recently created first, at most `limit` rows.
    async fn find_by_creator(&self, user_id: i32, limit: i64) -> StoreResult<Vec<Driver>>;
    async fn count_by_creator(&self, user_id: i32) -> StoreResult<i64>;
    async fn update(&self, id: i32, changes: DriverChanges) -> StoreResult<Driver>;
    async fn delete(&self, id: i32) -> StoreResult<()>;
}

#[async_trait]
pub trait TruckRepository: Send + Sync {
    async fn create(&self, truck: NewTruck) -> StoreResult<Truck>;
    async fn find_all(&self) -> StoreResult<Vec<Truck>>;
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Truck>>;
    async fn find_by_ids(&self, ids: &[i32]) -> StoreResult<Vec<Truck>>;
    async fn find_by_creator(&self, user_id: i32, limit: i64) -> StoreResult<Vec<Truck>>;
    async fn count_by_creator(&self, user_id: i32) -> StoreResult<i64>;
    async fn update(&self, id: i32, changes: TruckChanges) -> StoreResult<Truck>;
    async fn delete(&self, id: i32) -> StoreResult<()>;
}

#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn create(&self, client: NewClient) -> StoreResult<Client>;
    async fn find_all(&self) -> StoreResult<Vec<Client>>;
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Client>>;
    async fn find_by_ids(&self, ids: &[i32]) -> StoreResult<Vec<Client>>;
    async fn find_by_creator(&self, user_id: i32, limit: i64) -> StoreResult<Vec<Client>>;
    async fn count_by_creator(&self, user_id: i32) -> StoreResult<i64>;
    async fn update(&self, id: i32, changes: ClientChanges) -> StoreResult<Client>;
    async fn delete(&self, id: i32) -> StoreResult<()>;
}

#[async_trait]
pub trait TripRepository: Send + Sync {
    async fn create(&self, trip: NewTrip) -> StoreResult<Trip>;
    async fn find_all(&self) -> StoreResult<Vec<Trip>>;
    async fn find_by_id(&self, id: i32) -> StoreResult<Option<Trip>>;
    /// Trips pointing at `id` through `link`, latest start date first.
    async fn find_linked(
        &self,
        link: TripLink,
        id: i32,
        limit: Option<i64>,
    ) -> StoreResult<Vec<Trip>>;
    async fn count_linked(&self, link: TripLink, id: i32) -> StoreResult<i64>;
    /// Trip counts keyed by linked id. Ids without trips are absent.
    async fn count_linked_many(
        &self,
        link: TripLink,
        ids: &[i32],
    ) -> StoreResult<HashMap<i32, i64>>;
    async fn update(&self, id: i32, changes: TripChanges) -> StoreResult<Trip>;
    /// Removes the trip and, by cascade, its expenses.
    async fn delete(&self, id: i32) -> StoreResult<()>;
}

#[async_trait]
pub trait TripExpenseRepository: Send + Sync {
    async fn create(&self, expense: NewTripExpense) -> StoreResult<TripExpense>;
    /// Latest expense date first.
    async fn find_by_trip(&self, trip_id: i32) -> StoreResult<Vec<TripExpense>>;
    async fn count_by_trips(&self, trip_ids: &[i32]) -> StoreResult<HashMap<i32, i64>>;
    async fn update(
        &self,
        trip_id: i32,
        expense_id: i32,
        changes: TripExpenseChanges,
    ) -> StoreResult<TripExpense>;
    async fn delete(&self, trip_id: i32, expense_id: i32) -> StoreResult<()>;
}

/// Handles to every repository, shared through `AppState`.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub drivers: Arc<dyn DriverRepository>,
    pub trucks: Arc<dyn TruckRepository>,
    pub clients: Arc<dyn ClientRepository>,
    pub trips: Arc<dyn TripRepository>,
    pub expenses: Arc<dyn TripExpenseRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            drivers: Arc::new(PgDriverRepository::new(pool.clone())),
            trucks: Arc::new(PgTruckRepository::new(pool.clone())),
            clients: Arc::new(PgClientRepository::new(pool.clone())),
            trips: Arc::new(PgTripRepository::new(pool.clone())),
            expenses: Arc::new(PgTripExpenseRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::default());
        Self {
            users: store.clone(),
            drivers: store.clone(),
            trucks: store.clone(),
            clients: store.clone(),
            trips: store.clone(),
            expenses: store,
        }
    }
}
