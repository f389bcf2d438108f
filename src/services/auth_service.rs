use tracing::{info, warn};

use crate::dto::auth_dto::{LoginRequest, RegisterRequest};
use crate::models::{NewUser, User};
use crate::repositories::StoreError;
use crate::state::AppState;
use crate::utils::{AppError, AppResult};

pub const DUPLICATE_EMAIL: &str = "User with this email already exists";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Registration and credential checks.
pub struct AuthService<'a> {
    state: &'a AppState,
}

impl<'a> AuthService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Creates the account with a bcrypt hash of the supplied password.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        let password_hash = hash_password(request.password, self.state.config.bcrypt_cost).await?;

        let new_user = NewUser {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password_hash,
            role: request.role.unwrap_or_default(),
            is_active: request.is_active.unwrap_or(true),
        };

        let user = self
            .state
            .repositories
            .users
            .create(new_user)
            .await
            .map_err(|error| match error {
                StoreError::UniqueViolation(_) => AppError::Conflict(DUPLICATE_EMAIL.to_string()),
                other => other.into(),
            })?;

        info!("✅ Registered user {} as {}", user.id, user.role);
        Ok(user)
    }

    /// Checks the credentials and issues an access token for the cookie.
    pub async fn login(&self, request: LoginRequest) -> AppResult<(User, String)> {
        let user = self
            .state
            .repositories
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(request.password, user.password_hash.clone()).await? {
            warn!("🔒 Failed login for user {}", user.id);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        if !user.is_active {
            warn!("🔒 Login refused for disabled user {}", user.id);
            return Err(AppError::Unauthorized("Account is disabled".to_string()));
        }

        let token = self.state.jwt.generate_access_token(&user)?;
        info!("✅ User {} logged in", user.id);
        Ok((user, token))
    }
}

/// bcrypt runs on the blocking pool so it does not stall the runtime.
pub async fn hash_password(password: String, cost: u32) -> AppResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|error| AppError::Internal(error.to_string()))?
        .map_err(AppError::from)
}

pub async fn verify_password(password: String, hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|error| AppError::Internal(error.to_string()))?
        .map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hashes_verify_against_plain_password() {
        let hash = hash_password("s3cret-pass".to_string(), 4).await.unwrap();
        assert_ne!(hash, "s3cret-pass");
        assert!(verify_password("s3cret-pass".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password("wrong-pass".to_string(), hash).await.unwrap());
    }
}
