// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::config::EngineConfig;
use crate::error::Result;

/// Create the shared asynchronous HTTP client.
///
/// One client serves both fetch sources and publish channels, with the
/// configured user agent and request timeout.
pub fn create_async_client(config: &EngineConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;
    Ok(client)
}
