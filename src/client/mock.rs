//! Mock checks client for testing
//!
//! Serves canned results and jobs without making real API calls.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{CheckJob, CheckResult, ChecksApi};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockChecksClient::new()
///     .with_result(CheckResult { id: "r1".into(), ..Default::default() })
///     .await;
/// let result = mock.get_result("r1").await?;
/// ```
#[derive(Default)]
pub struct MockChecksClient {
    results: Arc<Mutex<Vec<CheckResult>>>,
    jobs: Arc<Mutex<Vec<CheckJob>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// IDs requested, in call order
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockChecksClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a result served by get_result.
    pub async fn with_result(self, result: CheckResult) -> Self {
        self.results.lock().await.push(result);
        self
    }

    /// Add a job served by get_job.
    pub async fn with_job(self, job: CheckJob) -> Self {
        self.jobs.lock().await.push(job);
        self
    }

    /// Fail the next call with this error.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    pub async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }

    async fn record(&self, id: &str) -> Result<()> {
        self.requests.lock().await.push(id.to_string());
        match self.error.lock().await.take() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ChecksApi for MockChecksClient {
    async fn get_result(&self, result_id: &str) -> Result<CheckResult> {
        self.record(result_id).await?;
        self.results
            .lock()
            .await
            .iter()
            .find(|r| r.id == result_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Check result {}", result_id)).into())
    }

    async fn get_job(&self, job_id: &str) -> Result<CheckJob> {
        self.record(job_id).await?;
        self.jobs
            .lock()
            .await
            .iter()
            .find(|j| j.id == job_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Check job {}", job_id)).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[tokio::test]
    async fn test_mock_returns_configured_result() {
        let mock = MockChecksClient::new()
            .with_result(CheckResult {
                id: "r1".to_string(),
                ..Default::default()
            })
            .await;

        let result = mock.get_result("r1").await.unwrap();
        assert_eq!(result.id, "r1");
        assert_eq!(mock.requests().await, vec!["r1".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_missing_is_not_found() {
        let mock = MockChecksClient::new();

        assert!(matches!(
            mock.get_job("nope").await,
            Err(Error::Api(ApiError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_mock_error_consumed_once() {
        let mock = MockChecksClient::new()
            .with_job(CheckJob {
                id: "j1".to_string(),
                ..Default::default()
            })
            .await
            .with_error(ApiError::Unauthorized)
            .await;

        assert!(mock.get_job("j1").await.is_err());
        assert!(mock.get_job("j1").await.is_ok());
    }
}
