use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Trip, TripStatus, User};

/// `{message, data}` envelope returned by create and update endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// Creator as shown in list views
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreatorSummary {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for CreatorSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

// Creator as shown in detail views
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreatorDetail {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_active: bool,
}

impl From<&User> for CreatorDetail {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            is_active: user.is_active,
        }
    }
}

/// Short trip line used inside driver, truck, client and user details.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TripSummary {
    pub id: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: TripStatus,
    pub origin_address: String,
    pub destination_address: String,
}

impl From<&Trip> for TripSummary {
    fn from(trip: &Trip) -> Self {
        Self {
            id: trip.id,
            start_date: trip.start_date,
            end_date: trip.end_date,
            status: trip.status,
            origin_address: trip.origin_address.clone(),
            destination_address: trip.destination_address.clone(),
        }
    }
}
