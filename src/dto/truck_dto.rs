use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::common::{CreatorDetail, CreatorSummary, TripSummary};
use crate::models::{FuelType, NewTruck, Truck, TruckChanges, TruckStatus};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTruckRequest {
    #[validate(length(min = 1, max = 50))]
    #[schema(example = "TRK-001")]
    pub number: String,

    #[validate(length(min = 1, max = 255))]
    #[schema(example = "Volvo FH16")]
    pub model: String,

    /// Defaults to DIESEL.
    pub fuel_type: Option<FuelType>,

    /// Defaults to AVAILABLE.
    pub current_status: Option<TruckStatus>,

    pub is_active: Option<bool>,
}

impl CreateTruckRequest {
    pub fn into_new_truck(self, created_by: i32) -> NewTruck {
        NewTruck {
            number: self.number,
            model: self.model,
            fuel_type: self.fuel_type.unwrap_or_default(),
            current_status: self.current_status.unwrap_or_default(),
            is_active: self.is_active.unwrap_or(true),
            created_by,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTruckRequest {
    #[validate(length(min = 1, max = 50))]
    pub number: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub model: Option<String>,

    pub fuel_type: Option<FuelType>,

    pub current_status: Option<TruckStatus>,

    pub is_active: Option<bool>,
}

impl From<UpdateTruckRequest> for TruckChanges {
    fn from(request: UpdateTruckRequest) -> Self {
        Self {
            number: request.number,
            model: request.model,
            fuel_type: request.fuel_type,
            current_status: request.current_status,
            is_active: request.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TruckResponse {
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

impl From<&Truck> for TruckResponse {
    fn from(truck: &Truck) -> Self {
        Self {
            id: truck.id,
            number: truck.number.clone(),
            model: truck.model.clone(),
            fuel_type: truck.fuel_type,
            current_status: truck.current_status,
            is_active: truck.is_active,
            created_by: truck.created_by,
            created_at: truck.created_at,
            updated_at: truck.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TruckBrief {
    pub id: i32,
    pub number: String,
    pub model: String,
    pub current_status: TruckStatus,
    pub is_active: bool,
}

impl From<&Truck> for TruckBrief {
    fn from(truck: &Truck) -> Self {
        Self {
            id: truck.id,
            number: truck.number.clone(),
            model: truck.model.clone(),
            current_status: truck.current_status,
            is_active: truck.is_active,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TruckListItem {
    #[serde(flatten)]
    pub truck: TruckResponse,
    pub creator: Option<CreatorSummary>,
    pub trip_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TruckDetail {
    #[serde(flatten)]
    pub truck: TruckResponse,
    pub creator: Option<CreatorDetail>,
    pub trips: Vec<TripSummary>,
    pub trip_count: i64,
}
