use tracing::info;

use super::auth_service::{hash_password, DUPLICATE_EMAIL};
use super::RECENT_LIMIT;
use crate::dto::auth_dto::UserProfile;
use crate::dto::user_dto::{UpdateUserRequest, UserDetail, UserRecordCounts, UserResponse};
use crate::models::{TripLink, UserChanges};
use crate::repositories::StoreError;
use crate::state::AppState;
use crate::utils::errors::not_found_error;
use crate::utils::{AppError, AppResult};

pub struct UserService<'a> {
    state: &'a AppState,
}

impl<'a> UserService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn find_all(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.state.repositories.users.find_all().await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    /// The user plus the latest drivers, trucks, clients and trips they created.
    pub async fn find_one(&self, id: i32) -> AppResult<UserDetail> {
        let repositories = &self.state.repositories;
        let user = repositories
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("User", id))?;

        let trips = repositories
            .trips
            .find_linked(TripLink::Creator, id, Some(RECENT_LIMIT))
            .await?;
        let drivers = repositories.drivers.find_by_creator(id, RECENT_LIMIT).await?;
        let trucks = repositories.trucks.find_by_creator(id, RECENT_LIMIT).await?;
        let clients = repositories.clients.find_by_creator(id, RECENT_LIMIT).await?;

        let counts = UserRecordCounts {
            trips: repositories.trips.count_linked(TripLink::Creator, id).await?,
            drivers: repositories.drivers.count_by_creator(id).await?,
            trucks: repositories.trucks.count_by_creator(id).await?,
            clients: repositories.clients.count_by_creator(id).await?,
        };

        Ok(UserDetail {
            user: UserResponse::from(&user),
            created_trips: trips.iter().map(Into::into).collect(),
            created_drivers: drivers.iter().map(Into::into).collect(),
            created_trucks: trucks.iter().map(Into::into).collect(),
            created_clients: clients.iter().map(Into::into).collect(),
            counts,
        })
    }

    pub async fn update(&self, id: i32, request: UpdateUserRequest) -> AppResult<UserProfile> {
        let password_hash = match request.password {
            Some(password) => Some(hash_password(password, self.state.config.bcrypt_cost).await?),
            None => None,
        };

        let changes = UserChanges {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password_hash,
            role: request.role,
            is_active: request.is_active,
        };

        let user = self
            .state
            .repositories
            .users
            .update(id, changes)
            .await
            .map_err(|error| match error {
                StoreError::NotFound => not_found_error("User", id),
                StoreError::UniqueViolation(_) => AppError::Conflict(DUPLICATE_EMAIL.to_string()),
                other => other.into(),
            })?;

        info!("✏️ Updated user {}", id);
        Ok(UserProfile::from(&user))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.state
            .repositories
            .users
            .delete(id)
            .await
            .map_err(|error| match error {
                StoreError::NotFound => not_found_error("User", id),
                StoreError::ForeignKeyViolation(_) => {
                    AppError::Conflict("Cannot delete user with associated records".to_string())
                }
                other => other.into(),
            })?;

        info!("🗑️ Deleted user {}", id);
        Ok(())
    }
}
