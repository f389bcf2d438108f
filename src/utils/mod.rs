//! Shared utilities: errors, validation rules and extractors.

pub mod errors;
pub mod extract;
pub mod validation;

pub use errors::{AppError, AppResult};
