use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::common::{CreatorDetail, CreatorSummary, TripSummary};
use crate::models::{Client, ClientChanges, NewClient};
use crate::utils::validation::PHONE_REGEX;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClientRequest {
    #[validate(length(min = 1, max = 255))]
    #[schema(example = "Acme Logistics")]
    pub name: String,

    #[validate(length(min = 1, max = 255))]
    pub contact_person: String,

    #[validate(regex(path = "PHONE_REGEX", message = "Phone number must be a valid format"))]
    pub phone: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 500))]
    pub address: String,

    pub is_active: Option<bool>,
}

impl CreateClientRequest {
    pub fn into_new_client(self, created_by: i32) -> NewClient {
        NewClient {
            name: self.name,
            contact_person: self.contact_person,
            phone: self.phone,
            email: self.email,
            address: self.address,
            is_active: self.is_active.unwrap_or(true),
            created_by,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateClientRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub contact_person: Option<String>,

    #[validate(regex(path = "PHONE_REGEX", message = "Phone number must be a valid format"))]
    pub phone: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 500))]
    pub address: Option<String>,

    pub is_active: Option<bool>,
}

impl From<UpdateClientRequest> for ClientChanges {
    fn from(request: UpdateClientRequest) -> Self {
        Self {
            name: request.name,
            contact_person: request.contact_person,
            phone: request.phone,
            email: request.email,
            address: request.address,
            is_active: request.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClientResponse {
    pub id: i32,
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub is_active: bool,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Client> for ClientResponse {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            name: client.name.clone(),
            contact_person: client.contact_person.clone(),
            phone: client.phone.clone(),
            email: client.email.clone(),
            address: client.address.clone(),
            is_active: client.is_active,
            created_by: client.created_by,
            created_at: client.created_at,
            updated_at: client.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClientBrief {
    pub id: i32,
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub is_active: bool,
}

impl From<&Client> for ClientBrief {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            name: client.name.clone(),
            contact_person: client.contact_person.clone(),
            email: client.email.clone(),
            is_active: client.is_active,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClientListItem {
    #[serde(flatten)]
    pub client: ClientResponse,
    pub creator: Option<CreatorSummary>,
    pub trip_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClientDetail {
    #[serde(flatten)]
    pub client: ClientResponse,
    pub creator: Option<CreatorDetail>,
    pub trips: Vec<TripSummary>,
    pub trip_count: i64,
}
