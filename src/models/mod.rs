//! Data models
//!
//! Row types that map the PostgreSQL schema in `migrations/`, plus the
//! insert and partial-update payloads the repositories accept.

pub mod auth;
pub mod client;
pub mod driver;
pub mod trip;
pub mod truck;
pub mod user;

pub use auth::JwtClaims;
pub use client::{Client, ClientChanges, NewClient};
pub use driver::{Driver, DriverChanges, NewDriver};
pub use trip::{
    ExpenseType, NewTrip, NewTripExpense, Trip, TripChanges, TripExpense, TripExpenseChanges,
    TripLink, TripStatus,
};
pub use truck::{FuelType, NewTruck, Truck, TruckChanges, TruckStatus};
pub use user::{NewUser, Role, User, UserChanges};
