//! Katapult HTTP client
//!
//! A single request primitive handles authentication, URL construction and
//! error decoding for every endpoint.

use acme_dns_core::config::DEFAULT_KATAPULT_HOST;
use acme_dns_core::{Error, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::model::ErrorEnvelope;

/// Default HTTP timeout for API requests (30 seconds)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const JSON_CONTENT_TYPE: &str = "application/json";

/// Query parameters for a request; keys are unique
pub type Params = BTreeMap<String, String>;

/// Katapult core API client
///
/// Holds the API token and base host; no DNS state is kept between calls.
pub struct KatapultClient {
    /// Katapult API token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// API origin without trailing slash
    host: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for KatapultClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KatapultClient")
            .field("api_token", &"<REDACTED>")
            .field("host", &self.host)
            .finish()
    }
}

impl KatapultClient {
    /// Create a client against the production API
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::with_host(api_token, DEFAULT_KATAPULT_HOST)
    }

    /// Create a client against a custom API origin
    ///
    /// # Errors
    ///
    /// - `Error::Config` if the token is empty
    /// - `Error::Transport` if the HTTP client cannot be built
    pub fn with_host(api_token: impl Into<String>, host: impl Into<String>) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(Error::config("Katapult API token cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_token,
            host: host.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// API origin requests are sent to
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Perform one authenticated API call
    ///
    /// # Parameters
    ///
    /// - `method`: HTTP method
    /// - `path`: Path relative to the host (e.g., "core/v1/dns_zones/_")
    /// - `params`: Query parameters, URL-encoded onto the request
    /// - `body`: Optional JSON body; sets `Content-Type: application/json`
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<u8>)`: Raw body of a 200 JSON response
    /// - `Err(Error::Transport)`: The request could not be completed
    /// - `Err(Error::UnexpectedContentType)`: The response was not JSON
    /// - `Err(Error::Api)`: Non-200 status with a decodable error envelope
    /// - `Err(Error::Json)`: Non-200 status whose body is not an error envelope
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        body: Option<String>,
    ) -> Result<Vec<u8>> {
        let url = format!("{}/{}", self.host, path.trim_start_matches('/'));

        let mut request = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(&self.api_token);

        if !params.is_empty() {
            request = request.query(params);
        }

        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(body);
        }

        tracing::debug!("Katapult request: {} {}", method, path);

        let response = request
            .send()
            .await
            .map_err(|e| Error::transport(format!("{} {} failed: {}", method, path, e)))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(format!("Failed to read response body: {}", e)))?;

        tracing::debug!("Katapult response: {} {} -> {}", method, path, status);

        if !content_type.contains(JSON_CONTENT_TYPE) {
            return Err(Error::unexpected_content_type(format!(
                "expected {} but got '{}' (status {})",
                JSON_CONTENT_TYPE, content_type, status
            )));
        }

        if status == StatusCode::OK {
            return Ok(body.to_vec());
        }

        let envelope: ErrorEnvelope = serde_json::from_slice(&body)?;
        Err(Error::api(
            status.as_u16(),
            envelope.error.code,
            envelope.error.description,
        ))
    }
}
