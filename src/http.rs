//! HTTP plumbing shared by the generator and provider clients

use std::time::Duration;

use reqwest::{Client, Response};
use tracing::{error, warn};

use crate::{PlannerError, Result};

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("travel-planner/", env!("CARGO_PKG_VERSION"));

/// Build a client with the given timeout. A zero timeout disables it.
pub fn build_client(timeout_seconds: u32) -> Result<Client> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if timeout_seconds > 0 {
        builder = builder.timeout(Duration::from_secs(timeout_seconds.into()));
    }
    builder
        .build()
        .map_err(|e| PlannerError::config(format!("Failed to create HTTP client: {e}")))
}

/// Turn a non-success HTTP status into a provider error carrying the body text.
pub async fn ensure_success(response: Response, service: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    match status.as_u16() {
        401 | 403 => {
            error!("{} rejected the credentials (HTTP {})", service, status);
            Err(PlannerError::provider(format!(
                "{service}: invalid or missing API key"
            )))
        }
        429 => {
            warn!("{} rate limit exceeded", service);
            Err(PlannerError::provider(format!(
                "{service}: rate limit exceeded"
            )))
        }
        _ => {
            warn!("{} request failed with HTTP {}", service, status);
            Err(PlannerError::provider(format!(
                "{service} error {status}: {body}"
            )))
        }
    }
}

/// Hide credentials in a URL before it is logged.
#[must_use]
pub fn redact(url: &str, secret: Option<&str>) -> String {
    match secret {
        Some(secret) if !secret.is_empty() => url.replace(secret, "***"),
        _ => url.to_string(),
    }
}
