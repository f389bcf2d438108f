//! Error handling
//!
//! Every failure a handler can return is an `AppError`. Its response body
//! becomes the `response` field of the envelope that
//! `middleware::error_envelope` wraps around every error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, warn};
use validator::{ValidationError, ValidationErrors};

use crate::repositories::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Hash error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Handled error body, kept on the response so the envelope middleware
/// can rebuild it with the request path.
#[derive(Debug, Clone)]
pub struct ErrorPayload(pub Value);

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Store(_) | AppError::Jwt(_) | AppError::Hash(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let payload = match self {
            AppError::Validation(errors) => {
                let messages = validation_messages(&errors);
                warn!("⚠️ Validation failed: {}", messages.join("; "));
                json!({
                    "statusCode": status.as_u16(),
                    "message": messages,
                    "error": "Bad Request",
                })
            }
            AppError::BadRequest(message)
            | AppError::Unauthorized(message)
            | AppError::Forbidden(message)
            | AppError::NotFound(message)
            | AppError::Conflict(message) => handled_error_body(status, &message),
            other => {
                error!("❌ {}", other);
                Value::String("Internal Server Error".to_string())
            }
        };

        let mut response = (status, Json(payload.clone())).into_response();
        response.extensions_mut().insert(ErrorPayload(payload));
        response
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// `{statusCode, message, error}` body for errors the service expects.
pub fn handled_error_body(status: StatusCode, message: &str) -> Value {
    json!({
        "statusCode": status.as_u16(),
        "message": message,
        "error": status.canonical_reason().unwrap_or("Error"),
    })
}

/// One readable line per failed field, sorted by field name.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    fields
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors
                .iter()
                .map(move |field_error| describe_field_error(field, field_error))
        })
        .collect()
}

fn describe_field_error(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    match error.code.as_ref() {
        "length" => match (error.params.get("min"), error.params.get("max")) {
            (Some(min), Some(max)) => {
                format!("{field} must be between {min} and {max} characters")
            }
            (Some(min), None) => format!("{field} must be at least {min} characters"),
            (None, Some(max)) => format!("{field} must be at most {max} characters"),
            (None, None) => format!("{field} has an invalid length"),
        },
        "email" => format!("{field} must be an email"),
        "regex" => format!("{field} has an invalid format"),
        "positive" => format!("{field} must be a positive number"),
        "non_negative" => format!("{field} must not be less than 0"),
        "money_precision" => format!("{field} must have at most 2 decimal places"),
        "money_range" => format!("{field} must not be greater than 9999999999.99"),
        code => format!("{field} is invalid ({code})"),
    }
}

pub fn not_found_error(resource: &str, id: i32) -> AppError {
    AppError::NotFound(format!("{} with ID {} not found", resource, id))
}

pub fn conflict_error(message: &str) -> AppError {
    AppError::Conflict(message.to_string())
}

pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, max = 5))]
        name: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn maps_variants_to_status_codes() {
        assert_eq!(
            not_found_error("Driver", 7).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(conflict_error("dup").status_code(), StatusCode::CONFLICT);
        assert_eq!(
            bad_request_error("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Store(StoreError::NotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_message_names_the_entity() {
        let err = not_found_error("Trip", 42);
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Trip with ID 42 not found"));
    }

    #[test]
    fn describes_each_failed_field() {
        let sample = Sample {
            name: "too long name".to_string(),
            email: "nope".to_string(),
        };
        let errors = sample.validate().unwrap_err();
        let messages = validation_messages(&errors);

        assert_eq!(
            messages,
            vec![
                "email must be an email".to_string(),
                "name must be between 1 and 5 characters".to_string(),
            ]
        );
    }

    #[test]
    fn handled_body_carries_reason_phrase() {
        let body = handled_error_body(StatusCode::CONFLICT, "Truck with this number already exists");
        assert_eq!(body["statusCode"], 409);
        assert_eq!(body["error"], "Conflict");
        assert_eq!(body["message"], "Truck with this number already exists");
    }

    #[test]
    fn internal_errors_hide_details() {
        let response = AppError::Internal("pool exhausted".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let payload = response.extensions().get::<ErrorPayload>().cloned().unwrap();
        assert_eq!(payload.0, Value::String("Internal Server Error".to_string()));
    }
}
