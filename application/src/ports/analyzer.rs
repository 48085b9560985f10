//! Analyzer client port
//!
//! The two calls of the long-running-operation protocol: submit a job,
//! then check its status. Looping, intervals and timeouts are the
//! orchestrator's business, not the client's.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a single submit or status call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerError {
    /// Network failure, non-success HTTP status, or unreadable response
    #[error("{0}")]
    Transport(String),

    /// The invoice file could not be read for upload
    #[error("Unable to read {}: {message}", path.display())]
    FileRead {
        path: PathBuf,
        not_found: bool,
        message: String,
    },

    /// A bearer token could not be obtained for the request
    #[error("{0}")]
    Credential(String),
}

/// One submit call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeJob {
    pub analyzer_id: String,
    pub file_path: PathBuf,
    pub content_type: Option<String>,
}

/// Opaque reference to a submitted operation (the service's status URL).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationHandle {
    location: String,
}

impl OperationHandle {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

/// Result of one status check.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationStatus {
    /// Not finished; carries the service's status string
    Running(String),
    /// Finished; carries the full response payload
    Succeeded(serde_json::Value),
    /// Finished unsuccessfully; carries the service's reason
    Failed(String),
}

#[async_trait]
pub trait AnalyzerClient: Send + Sync {
    /// Start an analysis and return the operation to poll.
    async fn begin_analyze(&self, job: &AnalyzeJob) -> Result<OperationHandle, AnalyzerError>;

    /// Check the operation once.
    async fn poll_status(&self, operation: &OperationHandle)
    -> Result<OperationStatus, AnalyzerError>;
}
