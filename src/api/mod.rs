//! REST API endpoints.
//!
//! Axum-based HTTP API serving the refreshed leaderboard and the
//! player registration endpoint.

pub mod routes;
pub mod state;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::roster::RegistrationError;
use crate::storage::StorageError;
use state::AppState;

pub const MSG_INCOMPLETE: &str = "Datos incompletos";
pub const MSG_ALREADY_EXISTS: &str = "Jugador ya existe";
pub const MSG_NOT_FOUND: &str = "Jugador no encontrado en Riot";

/// API error types. The display text is the client-facing message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Registration failures collapse onto three coarse client messages.
impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::InvalidInput(_) => ApiError::BadRequest(MSG_INCOMPLETE.to_string()),
            RegistrationError::Conflict(_) => ApiError::Conflict(MSG_ALREADY_EXISTS.to_string()),
            RegistrationError::NotFound(_) | RegistrationError::Storage(_) => {
                ApiError::Internal(MSG_NOT_FOUND.to_string())
            }
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Internal(format!("Roster storage error: {}", err))
    }
}

fn cors_layer(cors_origin: &str) -> CorsLayer {
    if cors_origin == "*" {
        return CorsLayer::permissive();
    }
    match HeaderValue::from_str(cors_origin) {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]),
        Err(_) => {
            warn!("Invalid CORS origin {:?}, allowing any origin", cors_origin);
            CorsLayer::permissive()
        }
    }
}

/// Router allowing any CORS origin.
pub fn build_router(state: AppState) -> Router {
    router_with_cors(state, "*")
}

/// Router restricted to a single CORS origin (`"*"` allows any).
pub fn router_with_cors(state: AppState, cors_origin: &str) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/leaderboard", get(routes::leaderboard::leaderboard))
        .route("/admin/add", post(routes::admin::add_player))
        .layer(cors_layer(cors_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::path::Path;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    use super::state::AppState;
    use crate::fetch::MockRiotApi;
    use crate::storage::RosterStore;

    pub fn setup_test_state(dir: &Path, api: Arc<MockRiotApi>) -> AppState {
        AppState {
            store: Arc::new(RosterStore::new(dir.join("players.json"))),
            riot: api,
        }
    }

    pub async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn post_json(app: axum::Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::fetch::{FetchError, MockRiotApi};
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    #[test]
    fn test_registration_error_mapping() {
        let cases = [
            (
                ApiError::from(RegistrationError::InvalidInput("summoner")),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(RegistrationError::Conflict("p-1".to_string())),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(RegistrationError::NotFound(FetchError::AccountNotFound(
                    "x#y".to_string(),
                ))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ApiError::from(RegistrationError::InvalidInput("region")).to_string(),
            MSG_INCOMPLETE
        );
        assert_eq!(
            ApiError::from(RegistrationError::Conflict("p".to_string())).to_string(),
            MSG_ALREADY_EXISTS
        );
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(
            ApiError::from(RegistrationError::Storage(StorageError::Io(io))).to_string(),
            MSG_NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_health() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path(), Arc::new(MockRiotApi::new())));

        let (status, json) = get_json(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_route_404() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path(), Arc::new(MockRiotApi::new())));

        let (status, _) = get_json(app, "/admin/remove").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_header_present() {
        let tmp = tempfile::tempdir().unwrap();
        let app = router_with_cors(
            setup_test_state(tmp.path(), Arc::new(MockRiotApi::new())),
            "http://localhost:5173",
        );

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("origin", "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            resp.headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("http://localhost:5173")
        );
    }
}
