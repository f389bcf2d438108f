use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Role, User};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255))]
    #[schema(example = "John")]
    pub first_name: String,

    #[validate(length(min = 1, max = 255))]
    #[schema(example = "Doe")]
    pub last_name: String,

    #[validate(email)]
    #[schema(example = "john.doe@company.com")]
    pub email: String,

    #[validate(length(min = 6))]
    pub password: String,

    /// Defaults to VIEWER.
    pub role: Option<Role>,

    /// Defaults to true.
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    #[schema(example = "john.doe@company.com")]
    pub email: String,

    #[validate(length(min = 6))]
    pub password: String,
}

/// User fields returned by register, login and user updates.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserProfile {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub is_active: bool,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
            is_active: user.is_active,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserProfile,
}
