//! Pingera API client
//!
//! Only the read endpoints needed to fetch check results and jobs for display.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::formatters::CheckMetadata;

#[cfg(test)]
pub mod mock;
pub mod pingera;

#[cfg(test)]
pub use mock::MockChecksClient;
pub use pingera::PingeraClient;

/// Read access to monitoring check results
#[async_trait]
pub trait ChecksApi: Send + Sync {
    /// Fetch a single check result by ID
    async fn get_result(&self, result_id: &str) -> Result<CheckResult>;

    /// Fetch an on-demand check job, including any results it produced
    async fn get_job(&self, job_id: &str) -> Result<CheckJob>;
}

/// One execution of a monitoring check
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Result ID
    pub id: String,

    /// Check this result belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_id: Option<String>,

    /// Outcome (`ok`, `failed`, `timeout`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// When the check ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_at: Option<String>,

    /// Total response time in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<f64>,

    /// Region or agent location that ran the check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Check-type specific payload
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl CheckResult {
    pub fn check_metadata(&self) -> CheckMetadata {
        CheckMetadata::new(self.metadata.clone())
    }
}

/// An on-demand check run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckJob {
    /// Job ID
    pub id: String,

    /// Job state (`pending`, `running`, `completed`, `failed`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Check type requested (`web`, `ssl`, `dns`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Results produced by the job so far
    #[serde(default)]
    pub results: Vec<CheckResult>,
}
