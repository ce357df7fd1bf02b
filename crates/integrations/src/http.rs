//! Response handling shared by the HTTP clients.

use serde::de::DeserializeOwned;

use crate::error::IntegrationError;

/// Return the response unchanged on a success status, or an
/// [`IntegrationError::Api`] carrying the status and body text.
pub(crate) async fn ensure_success(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, IntegrationError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(IntegrationError::Api {
            service,
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Check the status, then decode the JSON body into `T`.
pub(crate) async fn read_json<T: DeserializeOwned>(
    service: &'static str,
    response: reqwest::Response,
) -> Result<T, IntegrationError> {
    let response = ensure_success(service, response).await?;
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| IntegrationError::Decode {
        service,
        message: e.to_string(),
    })
}
