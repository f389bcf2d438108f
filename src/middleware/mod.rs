//! HTTP middleware
//!
//! Cookie authentication with role policies, CORS, and the envelope that
//! wraps every error response.

pub mod auth;
pub mod cors;
pub mod error_envelope;

pub use auth::*;
pub use cors::*;
pub use error_envelope::error_envelope;
