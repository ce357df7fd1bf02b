/// Errors from the external integrations layer.
#[derive(Debug, thiserror::Error)]
pub enum IntegrationError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote service returned a non-2xx status code.
    #[error("{service} API error ({status}): {body}")]
    Api {
        service: &'static str,
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("Failed to decode {service} response: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },

    /// Model output parsed but broke a field constraint.
    #[error("Schema violation: {0}")]
    Schema(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("Integration not configured: {0}")]
    NotConfigured(String),
}
