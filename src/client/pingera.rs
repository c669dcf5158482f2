//! Pingera REST client

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

use super::{CheckJob, CheckResult, ChecksApi};
use crate::error::{ApiError, ConfigError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("pngr/", env!("CARGO_PKG_VERSION"));

/// Pingera API client
#[derive(Debug, Clone)]
pub struct PingeraClient {
    http: HttpClient,
    base_url: Url,
    api_key: String,
}

impl PingeraClient {
    /// Create a client for the API at `base_url`
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let base_url = Url::parse(base_url)
            .map_err(|e| ConfigError::Invalid(format!("API URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            let msg = format!("API URL '{}' cannot be a base", base_url);
            return Err(ConfigError::Invalid(msg).into());
        }

        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Endpoint URL under the base; each segment is percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Make an authenticated GET request
    async fn get<T: for<'de> Deserialize<'de>>(&self, url: Url, what: &str) -> Result<T> {
        debug!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .header("Authorization", &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        debug!("GET {} -> {}", url, status);

        match status {
            StatusCode::OK => {
                let data = response.json::<T>().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
                })?;
                Ok(data)
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(what.to_string()).into()),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                Err(ApiError::RateLimit(Duration::from_secs(retry_after)).into())
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(error_msg).into())
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }
}

#[async_trait]
impl ChecksApi for PingeraClient {
    async fn get_result(&self, result_id: &str) -> Result<CheckResult> {
        let url = self.endpoint(&["v1", "checks", "results", result_id]);
        self.get(url, &format!("Check result {}", result_id)).await
    }

    async fn get_job(&self, job_id: &str) -> Result<CheckJob> {
        let url = self.endpoint(&["v1", "checks", "jobs", job_id]);
        self.get(url, &format!("Check job {}", job_id)).await
    }
}
