//! AI-assisted analysis with baseline fallback

use std::sync::Arc;
use std::time::Duration;

use shared_types::AnalysisResult;
use tracing::{debug, info, warn};

use super::client::{GeminiClient, TextGenerator};
use super::prompt::{build_prompt, AnalysisRequest};
use crate::baseline::analyze_baseline;
use crate::config::{AiConfig, DEFAULT_TIMEOUT_MS};
use crate::error::AnalysisError;
use crate::normalizer;

/// Runs a document through the text generator and normalizer.
///
/// Cloning is cheap; the generator is shared.
#[derive(Clone)]
pub struct AiAnalyzer {
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
}

impl AiAnalyzer {
    /// Analyzer with no backend; every call goes straight to the baseline
    pub fn disabled() -> Self {
        Self {
            generator: None,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    pub fn new(generator: Arc<dyn TextGenerator>, timeout_ms: u64) -> Self {
        Self {
            generator: Some(generator),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Gemini-backed analyzer, or a disabled one when no key is configured
    pub fn from_config(config: &AiConfig) -> Self {
        if !config.enabled() {
            info!("No AI API key configured, using baseline analysis only");
            return Self::disabled();
        }

        match GeminiClient::new(config) {
            Ok(client) => {
                info!("AI analysis enabled: model={}", config.model);
                Self::new(Arc::new(client), config.timeout_ms)
            }
            Err(e) => {
                warn!("AI client unavailable ({}), using baseline analysis only", e);
                Self::disabled()
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Analyze a document. Never fails.
    ///
    /// Any failure on the AI path is logged by class and replaced with the
    /// baseline result.
    pub async fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult {
        match self.try_analyze(request).await {
            Ok(result) => {
                debug!(
                    "AI analysis of '{}': score={}, violations={}",
                    request.document_name,
                    result.compliance_score,
                    result.violations.len()
                );
                result
            }
            Err(e) => {
                warn!(
                    "AI analysis degraded to baseline [{}]: {}",
                    e.kind(),
                    e
                );
                analyze_baseline(&request.content, &request.regulations)
            }
        }
    }

    /// The AI path alone, with its failure reported
    pub async fn try_analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisError> {
        let generator = self
            .generator
            .as_ref()
            .ok_or(AnalysisError::ConfigurationAbsent)?;

        let prompt = build_prompt(request);
        debug!(
            "Requesting analysis from {} ({} byte prompt)",
            generator.name(),
            prompt.len()
        );

        let generation = tokio::time::timeout(self.timeout, generator.generate(&prompt))
            .await
            .map_err(|_| AnalysisError::Timeout(self.timeout.as_millis() as u64))??;

        normalizer::normalize(&generation, &request.regulations)
    }
}

impl std::fmt::Debug for AiAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiAnalyzer")
            .field("generator", &self.generator.as_ref().map(|g| g.name()))
            .field("timeout", &self.timeout)
            .finish()
    }
}
