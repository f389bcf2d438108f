//! Cookie authentication and role checks
//!
//! `auth_middleware` runs on every protected router: it reads the
//! `access_token` cookie, validates the JWT and injects an
//! `AuthenticatedUser` into the request extensions. Handlers then take an
//! `Authorized<P>` argument, which rejects callers whose role is not in
//! `P::ALLOWED`.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use std::marker::PhantomData;
use tracing::{debug, warn};

use crate::{models::Role, state::AppState, utils::errors::AppError};

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Caller identity taken from a valid token.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub email: String,
    pub role: Role,
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = jar
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| AppError::Unauthorized("Access token not found".to_string()))?;

    let claims = state.jwt.validate_token(&token).map_err(|error| {
        debug!("Rejected access token: {}", error);
        AppError::Unauthorized("Invalid or expired token".to_string())
    })?;

    request.extensions_mut().insert(AuthenticatedUser {
        id: claims.sub,
        email: claims.email,
        role: claims.role,
    });

    Ok(next.run(request).await)
}

/// Static allow-list of roles for a group of operations.
pub trait AccessPolicy: Send + Sync + 'static {
    const ALLOWED: &'static [Role];

    fn permits(role: Role) -> bool {
        Self::ALLOWED.contains(&role)
    }
}

/// Reads: every role.
pub struct ReadAccess;

impl AccessPolicy for ReadAccess {
    const ALLOWED: &'static [Role] = &[Role::Admin, Role::Staff, Role::Viewer];
}

/// Creates and updates.
pub struct WriteAccess;

impl AccessPolicy for WriteAccess {
    const ALLOWED: &'static [Role] = &[Role::Admin, Role::Staff];
}

pub struct DeleteAccess;

impl AccessPolicy for DeleteAccess {
    const ALLOWED: &'static [Role] = &[Role::Admin];
}

/// The authenticated caller, admitted by policy `P`.
#[derive(Debug, Clone)]
pub struct Authorized<P>(pub AuthenticatedUser, PhantomData<P>);

impl<P> Authorized<P> {
    pub fn user(&self) -> &AuthenticatedUser {
        &self.0
    }
}

pub type CanRead = Authorized<ReadAccess>;
pub type CanWrite = Authorized<WriteAccess>;
pub type CanDelete = Authorized<DeleteAccess>;

#[async_trait]
impl<P, S> FromRequestParts<S> for Authorized<P>
where
    P: AccessPolicy,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Access token not found".to_string()))?;

        if !P::permits(user.role) {
            warn!(
                "🔒 {} {} refused for user {} with role {}",
                parts.method, parts.uri, user.id, user.role
            );
            return Err(AppError::Forbidden("Insufficient permissions".to_string()));
        }

        Ok(Self(user, PhantomData))
    }
}
