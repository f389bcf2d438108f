use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::client_dto::ClientBrief;
use super::common::TripSummary;
use super::driver_dto::DriverBrief;
use super::truck_dto::TruckBrief;
use crate::models::{Role, User};

/// Every field optional; a new password is hashed before it is stored.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub last_name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 6))]
    pub password: Option<String>,

    pub role: Option<Role>,

    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserRecordCounts {
    pub trips: i64,
    pub drivers: i64,
    pub trucks: i64,
    pub clients: i64,
}

/// A user together with the most recent records they created.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: UserResponse,
    pub created_trips: Vec<TripSummary>,
    pub created_drivers: Vec<DriverBrief>,
    pub created_trucks: Vec<TruckBrief>,
    pub created_clients: Vec<ClientBrief>,
    pub counts: UserRecordCounts,
}
