use serde::{Deserialize, Serialize};

use super::user::Role;

/// Claims carried by the `access_token` cookie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: i32, // user id
    pub email: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}
