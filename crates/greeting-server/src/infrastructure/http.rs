//! HTTP surface of the config service.
//!
//! | Method | Path                                       | Response                                  |
//! |--------|--------------------------------------------|-------------------------------------------|
//! | GET    | `/config`                                  | 200 `{ birthdayName, wisherName }`        |
//! | POST   | `/config`                                  | 200 `{ message }` / 400 / 401 / 500 `{ error }` |
//! | other  | `/config`                                  | 405 `Method Not Allowed`                  |
//!
//! The same routes are also mounted at `/.netlify/functions/config`, the path
//! the presentation layer originally called, so it can switch backends
//! without a code change.
//!
//! Error bodies are fixed strings.  Storage paths, I/O errors and the
//! submitted password are logged, never returned.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, MethodRouter};
use axum::{Json, Router};
use greeting_core::{ConfigRecord, ConfigService, WriteError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::settings::CorsPolicy;

/// Primary route for the config record.
pub const CONFIG_PATH: &str = "/config";

/// Route the presentation layer used when the store ran as a serverless
/// function.
pub const LEGACY_CONFIG_PATH: &str = "/.netlify/functions/config";

/// Body returned after a successful write.
pub const UPDATED_MESSAGE: &str = "Updated globally!";

/// Shared handler state.
pub type SharedService = Arc<ConfigService>;

// ── Wire types ────────────────────────────────────────────────────────────────

/// `POST /config` body: the new names plus the admin password.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub birthday_name: String,
    pub wisher_name: String,
    pub password: String,
}

impl UpdateRequest {
    /// Splits the request into the candidate record and the credential.
    pub fn into_parts(self) -> (ConfigRecord, String) {
        (
            ConfigRecord::new(self.birthday_name, self.wisher_name),
            self.password,
        )
    }
}

/// `{ "message": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// `{ "error": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// Failures surfaced to HTTP callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The admin password did not match.
    #[error("invalid admin password")]
    Unauthorized,

    /// The backing store failed to persist the record.
    #[error("storage failure")]
    StorageFailure,

    /// The request body was not JSON or lacked a field.
    #[error("invalid request body: {0}")]
    InvalidBody(String),
}

impl ApiError {
    /// Status code for this error.
    ///
    /// - Unauthorized: 401
    /// - StorageFailure: 500
    /// - InvalidBody: 400
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::StorageFailure => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Generic text placed in the `error` field.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::Unauthorized => "Invalid Admin Password",
            Self::StorageFailure => "Database Connection Failed",
            Self::InvalidBody(_) => "Invalid request body",
        }
    }
}

impl From<WriteError> for ApiError {
    fn from(err: WriteError) -> Self {
        match err {
            WriteError::Unauthorized => Self::Unauthorized,
            // The store error was already logged by the service.
            WriteError::Storage(_) => Self::StorageFailure,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.public_message().to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /config`: always 200 with the current (or default) names.
async fn read_config(State(service): State<SharedService>) -> impl IntoResponse {
    let record = service.read().await;
    // Viewers must see a rename immediately, not a cached copy.
    ([(header::CACHE_CONTROL, "no-cache")], Json(record))
}

/// `POST /config`: replace the names if the password matches.
///
/// The body is parsed as JSON regardless of `Content-Type`, matching what the
/// presentation layer sends.
async fn write_config(
    State(service): State<SharedService>,
    body: Bytes,
) -> Result<Json<MessageBody>, ApiError> {
    let request: UpdateRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!("rejected config write: malformed body: {e}");
        ApiError::InvalidBody(e.to_string())
    })?;

    let (record, password) = request.into_parts();
    service.write(record, &password).await?;

    Ok(Json(MessageBody {
        message: UPDATED_MESSAGE.to_string(),
    }))
}

/// Any method other than GET/HEAD/POST.
async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "GET, HEAD, POST")],
        "Method Not Allowed",
    )
}

// ── Router ────────────────────────────────────────────────────────────────────

fn config_routes() -> MethodRouter<SharedService> {
    get(read_config)
        .post(write_config)
        .fallback(method_not_allowed)
}

fn cors_layer(policy: &CorsPolicy) -> Option<CorsLayer> {
    let origin = match policy {
        CorsPolicy::Disabled => return None,
        CorsPolicy::Any => AllowOrigin::any(),
        CorsPolicy::List(origins) => AllowOrigin::list(origins.iter().cloned()),
    };
    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(60 * 60)),
    )
}

/// Builds the application router over `service`.
pub fn router(service: SharedService, cors: &CorsPolicy) -> Router {
    let app = Router::new()
        .route(CONFIG_PATH, config_routes())
        .route(LEGACY_CONFIG_PATH, config_routes())
        .with_state(service);

    match cors_layer(cors) {
        Some(layer) => app.layer(layer),
        None => app,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use greeting_core::StoreError;

    #[test]
    fn test_unauthorized_maps_to_401() {
        assert_eq!(
            ApiError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_storage_failure_maps_to_500() {
        assert_eq!(
            ApiError::StorageFailure.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_body_maps_to_400() {
        assert_eq!(
            ApiError::InvalidBody("eof".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_write_errors_convert_to_api_errors() {
        assert!(matches!(
            ApiError::from(WriteError::Unauthorized),
            ApiError::Unauthorized
        ));
        let storage = WriteError::Storage(StoreError::Unavailable("down".to_string()));
        assert!(matches!(
            ApiError::from(storage),
            ApiError::StorageFailure
        ));
    }

    #[test]
    fn test_public_message_does_not_leak_parse_details() {
        let err = ApiError::InvalidBody("expected value at line 1 column 1".to_string());
        assert_eq!(err.public_message(), "Invalid request body");
    }

    #[test]
    fn test_update_request_parses_presentation_layer_body() {
        // Arrange
        let body = r#"{ "birthdayName": "Sam", "wisherName": "Lee", "password": "Akilan" }"#;

        // Act
        let request: UpdateRequest = serde_json::from_str(body).unwrap();
        let (record, password) = request.into_parts();

        // Assert
        assert_eq!(record, ConfigRecord::new("Sam", "Lee"));
        assert_eq!(password, "Akilan");
    }

    #[test]
    fn test_update_request_without_password_is_rejected() {
        let body = r#"{ "birthdayName": "Sam", "wisherName": "Lee" }"#;
        let result: Result<UpdateRequest, _> = serde_json::from_str(body);
        assert!(result.is_err());
    }

    #[test]
    fn test_cors_layer_absent_when_disabled() {
        assert!(cors_layer(&CorsPolicy::Disabled).is_none());
        assert!(cors_layer(&CorsPolicy::Any).is_some());
    }
}
