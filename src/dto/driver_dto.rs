use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::common::{CreatorDetail, CreatorSummary, TripSummary};
use crate::models::{Driver, DriverChanges, NewDriver};
use crate::utils::validation::PHONE_REGEX;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDriverRequest {
    #[validate(length(min = 1, max = 255))]
    pub first_name: String,

    #[validate(length(min = 1, max = 255))]
    pub last_name: String,

    #[validate(length(min = 1, max = 50))]
    #[schema(example = "DL-2024-88731")]
    pub license_number: String,

    #[validate(regex(path = "PHONE_REGEX", message = "Phone number must be a valid format"))]
    #[schema(example = "+14155550123")]
    pub phone: String,

    pub is_active: Option<bool>,
}

impl CreateDriverRequest {
    pub fn into_new_driver(self, created_by: i32) -> NewDriver {
        NewDriver {
            first_name: self.first_name,
            last_name: self.last_name,
            license_number: self.license_number,
            phone: self.phone,
            is_active: self.is_active.unwrap_or(true),
            created_by,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateDriverRequest {
    #[validate(length(min = 1, max = 255))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub last_name: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub license_number: Option<String>,

    #[validate(regex(path = "PHONE_REGEX", message = "Phone number must be a valid format"))]
    pub phone: Option<String>,

    pub is_active: Option<bool>,
}

impl From<UpdateDriverRequest> for DriverChanges {
    fn from(request: UpdateDriverRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            license_number: request.license_number,
            phone: request.phone,
            is_active: request.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DriverResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub license_number: String,
    pub phone: String,
    pub is_active: bool,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Driver> for DriverResponse {
    fn from(driver: &Driver) -> Self {
        Self {
            id: driver.id,
            first_name: driver.first_name.clone(),
            last_name: driver.last_name.clone(),
            license_number: driver.license_number.clone(),
            phone: driver.phone.clone(),
            is_active: driver.is_active,
            created_by: driver.created_by,
            created_at: driver.created_at,
            updated_at: driver.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DriverBrief {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub license_number: String,
    pub is_active: bool,
}

impl From<&Driver> for DriverBrief {
    fn from(driver: &Driver) -> Self {
        Self {
            id: driver.id,
            first_name: driver.first_name.clone(),
            last_name: driver.last_name.clone(),
            license_number: driver.license_number.clone(),
            is_active: driver.is_active,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DriverListItem {
    #[serde(flatten)]
    pub driver: DriverResponse,
    pub creator: Option<CreatorSummary>,
    pub trip_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DriverDetail {
    #[serde(flatten)]
    pub driver: DriverResponse,
    pub creator: Option<CreatorDetail>,
    pub trips: Vec<TripSummary>,
    pub trip_count: i64,
}
