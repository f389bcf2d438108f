//! Trucks and their operating state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "fuel_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FuelType {
    #[default]
    Diesel,
    Petrol,
    Electric,
    Hybrid,
    Cng,
}

/// Where the truck currently is in its duty cycle.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "truck_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TruckStatus {
    #[default]
    Available,
    InTransit,
    Maintenance,
    OutOfService,
}

#[derive(Debug, Clone, FromRow)]
pub struct Truck {
    pub id: i32,
    pub number: String,
    pub model: String,
    pub fuel_type: FuelType,
    pub current_status: TruckStatus,
    pub is_active: bool,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTruck {
    pub number: String,
    pub model: String,
    pub fuel_type: FuelType,
    pub current_status: TruckStatus,
    pub is_active: bool,
    pub created_by: i32,
}

#[derive(Debug, Clone, Default)]
pub struct TruckChanges {
    pub number: Option<String>,
    pub model: Option<String>,
    pub fuel_type: Option<FuelType>,
    pub current_status: Option<TruckStatus>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_use_screaming_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&TruckStatus::OutOfService).unwrap(),
            "\"OUT_OF_SERVICE\""
        );
        let fuel: FuelType = serde_json::from_str("\"CNG\"").unwrap();
        assert_eq!(fuel, FuelType::Cng);
    }
}
