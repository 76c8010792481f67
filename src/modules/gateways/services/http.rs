//! Outbound HTTP plumbing shared by the gateway clients.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use super::gateway_trait::InitiationError;
use crate::core::{AppError, Result};

/// Build the shared HTTP client with a bounded request timeout
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .build()
        .map_err(AppError::HttpClient)
}

/// Send a request and decode the JSON body of a 2xx response
pub(crate) async fn send_json(
    gateway: &'static str,
    request: RequestBuilder,
) -> std::result::Result<Value, InitiationError> {
    let response = request
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|source| InitiationError::Network {
            gateway,
            source: Arc::new(source),
        })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| InitiationError::Network {
            gateway,
            source: Arc::new(source),
        })?;

    if !status.is_success() {
        return Err(InitiationError::HttpStatus {
            gateway,
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| InitiationError::UnexpectedResponse {
        gateway,
        detail: format!("invalid JSON ({}): {}", e, body),
    })
}
