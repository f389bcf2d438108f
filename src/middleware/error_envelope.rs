//! Global error envelope
//!
//! Every response with a 4xx or 5xx status leaves the service as
//! `{statusCode, timeStamp, path, response}`. Errors raised as `AppError`
//! carry their body in an `ErrorPayload` extension; anything else (axum
//! rejections, the fallback, caught panics) gets a default body built from
//! the status code.

use axum::{
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::utils::errors::{handled_error_body, ErrorPayload};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub status_code: u16,
    pub time_stamp: String,
    pub path: String,
    pub response: Value,
}

pub async fn error_envelope(request: Request, next: Next) -> Response {
    let path = request
        .uri()
        .path_and_query()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let (mut parts, _body) = response.into_parts();
    let payload = parts
        .extensions
        .remove::<ErrorPayload>()
        .map(|payload| payload.0)
        .unwrap_or_else(|| default_payload(status));

    let envelope = ErrorEnvelope {
        status_code: status.as_u16(),
        time_stamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        path,
        response: payload,
    };

    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    let (_, body) = Json(envelope).into_response().into_parts();
    Response::from_parts(parts, body)
}

fn default_payload(status: StatusCode) -> Value {
    if status.is_server_error() {
        return Value::String("Internal Server Error".to_string());
    }
    handled_error_body(status, status.canonical_reason().unwrap_or("Error"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::AppError;
    use axum::{body::Body, middleware::from_fn, routing::get, Router};
    use tower::ServiceExt;

    async fn read_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/conflict",
                get(|| async { Err::<(), _>(AppError::Conflict("Already there".to_string())) }),
            )
            .route(
                "/boom",
                get(|| async { Err::<(), _>(AppError::Internal("disk on fire".to_string())) }),
            )
            .route("/teapot", get(|| async { StatusCode::IM_A_TEAPOT }))
            .route("/ok", get(|| async { "fine" }))
            .layer(from_fn(error_envelope))
    }

    #[tokio::test]
    async fn wraps_handled_errors_with_path_and_query() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/conflict?verbose=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = read_json(response).await;
        assert_eq!(body["statusCode"], 409);
        assert_eq!(body["path"], "/conflict?verbose=1");
        assert_eq!(body["response"]["message"], "Already there");
        assert_eq!(body["response"]["error"], "Conflict");
        assert!(body["timeStamp"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn server_errors_hide_the_cause() {
        let response = app()
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = read_json(response).await;
        assert_eq!(body["response"], "Internal Server Error");
    }

    #[tokio::test]
    async fn bare_statuses_get_a_default_body() {
        let response = app()
            .oneshot(Request::builder().uri("/teapot").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = read_json(response).await;
        assert_eq!(body["statusCode"], 418);
        assert_eq!(body["response"]["statusCode"], 418);
    }

    #[tokio::test]
    async fn leaves_success_untouched() {
        let response = app()
            .oneshot(Request::builder().uri("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"fine");
    }
}
