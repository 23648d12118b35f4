pub mod ai;
pub mod assignment;
pub mod baseline;
pub mod catalog;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod memory;
pub mod normalizer;
pub mod patterns;
pub mod service;
pub mod submission;
pub mod workflow;

use shared_types::{AnalysisResult, ComplianceDocument, DocumentStatus, User};

pub use ai::{AiAnalyzer, AnalysisRequest, GeminiClient, Generation, TextGenerator};
pub use collaborators::{
    DocumentScope, DocumentStore, EventPublisher, PublishError, StoreError, UserDirectory,
};
pub use config::AiConfig;
pub use error::{AnalysisError, WorkflowError};
pub use service::{ComplianceService, ServiceError};
pub use submission::SubmissionRequest;
pub use workflow::{Actor, ReviewUpdate};

/// ComplianceEngine entry point
///
/// Exposes the three pipeline operations: analysis, assignment and status
/// transitions. Holds no per-document state; clones share the AI backend.
#[derive(Debug, Clone)]
pub struct ComplianceEngine {
    analyzer: AiAnalyzer,
}

impl ComplianceEngine {
    pub fn new(analyzer: AiAnalyzer) -> Self {
        Self { analyzer }
    }

    /// Engine that never calls out; analysis is always the baseline
    pub fn baseline_only() -> Self {
        Self::new(AiAnalyzer::disabled())
    }

    pub fn from_config(config: &AiConfig) -> Self {
        Self::new(AiAnalyzer::from_config(config))
    }

    pub fn ai_enabled(&self) -> bool {
        self.analyzer.is_enabled()
    }

    /// Score a document. Never fails; AI problems degrade to the baseline.
    pub async fn analyze(&self, document: &ComplianceDocument) -> AnalysisResult {
        self.analyzer
            .analyze(&AnalysisRequest::from_document(document))
            .await
    }

    /// Deterministic keyword analysis
    pub fn analyze_baseline(&self, content: &str, regulations: &[String]) -> AnalysisResult {
        baseline::analyze_baseline(content, regulations)
    }

    pub fn resolve_assignment<'a>(
        &self,
        users: &'a [User],
        regulations: &[String],
    ) -> Option<&'a User> {
        assignment::resolve_assignment(users, regulations)
    }

    pub fn transition(
        &self,
        document: &ComplianceDocument,
        actor: &Actor,
        new_status: DocumentStatus,
        notes: Option<&str>,
    ) -> Result<ComplianceDocument, WorkflowError> {
        workflow::transition(document, actor, new_status, notes)
    }
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self::baseline_only()
    }
}
