//! Services module
//!
//! Business logic between the HTTP handlers and the repositories. Services
//! load the rows a response needs, shape them into DTOs and translate
//! `StoreError` into the `AppError` each endpoint reports.

pub mod auth_service;
pub mod client_service;
pub mod driver_service;
pub mod jwt_service;
pub mod report_service;
pub mod trip_service;
pub mod truck_service;
pub mod user_service;

use std::collections::HashMap;

use crate::models::User;
use crate::repositories::{Repositories, StoreResult};

pub use auth_service::AuthService;
pub use client_service::ClientService;
pub use driver_service::DriverService;
pub use jwt_service::JwtService;
pub use report_service::ReportService;
pub use trip_service::TripService;
pub use truck_service::TruckService;
pub use user_service::UserService;

/// Recent related rows shown on detail views.
pub const RECENT_LIMIT: i64 = 10;

/// Users keyed by id, for attaching creators to a page of rows.
pub(crate) async fn users_by_id(
    repositories: &Repositories,
    mut ids: Vec<i32>,
) -> StoreResult<HashMap<i32, User>> {
    ids.sort_unstable();
    ids.dedup();

    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let users = repositories.users.find_by_ids(&ids).await?;
    Ok(users.into_iter().map(|user| (user.id, user)).collect())
}
