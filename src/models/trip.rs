//! Trips and the expenses booked against them

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "trip_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Scheduled => "SCHEDULED",
            TripStatus::InProgress => "IN_PROGRESS",
            TripStatus::Completed => "COMPLETED",
            TripStatus::Cancelled => "CANCELLED",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "expense_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseType {
    Fuel,
    Toll,
    Maintenance,
    Food,
    Lodging,
    Parking,
    Other,
}

#[derive(Debug, Clone, FromRow)]
pub struct Trip {
    pub id: i32,
    pub client_id: i32,
    pub driver_id: Option<i32>,
    pub truck_id: Option<i32>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub origin_address: String,
    pub destination_address: String,
    pub base_revenue: Decimal,
    pub additional_charges: Decimal,
    pub status: TripStatus,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    /// Base revenue plus additional charges.
    pub fn total_revenue(&self) -> Decimal {
        self.base_revenue + self.additional_charges
    }
}

#[derive(Debug, Clone)]
pub struct NewTrip {
    pub client_id: i32,
    pub driver_id: Option<i32>,
    pub truck_id: Option<i32>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub origin_address: String,
    pub destination_address: String,
    pub base_revenue: Decimal,
    pub additional_charges: Decimal,
    pub status: TripStatus,
    pub created_by: i32,
}

/// Partial update. Nullable columns can be set but not cleared.
#[derive(Debug, Clone, Default)]
pub struct TripChanges {
    pub client_id: Option<i32>,
    pub driver_id: Option<i32>,
    pub truck_id: Option<i32>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub origin_address: Option<String>,
    pub destination_address: Option<String>,
    pub base_revenue: Option<Decimal>,
    pub additional_charges: Option<Decimal>,
    pub status: Option<TripStatus>,
}

/// Column through which a trip points at another record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripLink {
    Client,
    Driver,
    Truck,
    Creator,
}

impl TripLink {
    pub fn column(self) -> &'static str {
        match self {
            TripLink::Client => "client_id",
            TripLink::Driver => "driver_id",
            TripLink::Truck => "truck_id",
            TripLink::Creator => "created_by",
        }
    }

    pub fn target(self, trip: &Trip) -> Option<i32> {
        match self {
            TripLink::Client => Some(trip.client_id),
            TripLink::Driver => trip.driver_id,
            TripLink::Truck => trip.truck_id,
            TripLink::Creator => Some(trip.created_by),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct TripExpense {
    pub id: i32,
    pub trip_id: i32,
    #[sqlx(rename = "type")]
    pub expense_type: ExpenseType,
    pub amount: Decimal,
    pub description: String,
    pub receipt_number: Option<String>,
    pub vendor_name: Option<String>,
    pub expense_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTripExpense {
    pub trip_id: i32,
    pub expense_type: ExpenseType,
    pub amount: Decimal,
    pub description: String,
    pub receipt_number: Option<String>,
    pub vendor_name: Option<String>,
    pub expense_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct TripExpenseChanges {
    pub expense_type: Option<ExpenseType>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub receipt_number: Option<String>,
    pub vendor_name: Option<String>,
    pub expense_date: Option<DateTime<Utc>>,
}
