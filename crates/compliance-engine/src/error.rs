//! Error types for the compliance engine

use thiserror::Error;

/// Failures on the AI analysis path.
///
/// None of these reach callers of [`crate::ComplianceEngine::analyze`]; each
/// one degrades to the baseline analyzer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("AI text generation is not configured")]
    ConfigurationAbsent,

    #[error("Upstream failure: {0}")]
    UpstreamFailure(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Text generation timed out after {0}ms")]
    Timeout(u64),
}

impl AnalysisError {
    /// Stable label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::ConfigurationAbsent => "ConfigurationAbsent",
            AnalysisError::UpstreamFailure(_) => "UpstreamFailure",
            AnalysisError::MalformedResponse(_) => "MalformedResponse",
            // A timeout is treated as the service being unavailable
            AnalysisError::Timeout(_) => "UpstreamFailure",
        }
    }
}

/// Failures surfaced to the caller of the submission and review operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Authorization denied: {0}")]
    AuthorizationDenied(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}
