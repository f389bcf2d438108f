//! Request and response payloads
//!
//! Requests derive `Validate` and are read through `ValidatedJson`.
//! Responses are built from model rows with `From` impls.

pub mod auth_dto;
pub mod client_dto;
pub mod common;
pub mod driver_dto;
pub mod report_dto;
pub mod trip_dto;
pub mod truck_dto;
pub mod user_dto;

pub use common::{ApiResponse, CreatorDetail, CreatorSummary, MessageResponse, TripSummary};
