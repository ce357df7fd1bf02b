use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dealpulse_core::error::CoreError;
use dealpulse_integrations::IntegrationError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`IntegrationError`] for the
/// external services, and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `dealpulse_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure talking to HubSpot, Gong or the language model.
    #[error(transparent)]
    Integration(#[from] IntegrationError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A feature that needs configuration the server does not have.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Integration errors ---
            AppError::Integration(err) => classify_integration_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                msg.clone(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify an integration error into an HTTP status, error code, and message.
///
/// - Lookups that found nothing map to 404, role checks to 403.
/// - Missing credentials map to 503.
/// - Transport failures, remote errors and unusable payloads map to 502.
fn classify_integration_error(err: &IntegrationError) -> (StatusCode, &'static str, String) {
    match err {
        IntegrationError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        IntegrationError::Forbidden(msg) => (
            StatusCode::FORBIDDEN,
            "FORBIDDEN",
            format!("Access denied: {msg}"),
        ),
        IntegrationError::NotConfigured(msg) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            msg.clone(),
        ),
        IntegrationError::Request(_)
        | IntegrationError::Api { .. }
        | IntegrationError::Decode { .. }
        | IntegrationError::Schema(_) => {
            tracing::error!(error = %err, "Upstream integration error");
            (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", err.to_string())
        }
    }
}
