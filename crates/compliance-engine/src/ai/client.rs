//! Text-generation backends

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::AiConfig;
use crate::error::AnalysisError;

/// Finish reason reported when output was cut at the token limit
const FINISH_MAX_TOKENS: &str = "MAX_TOKENS";

/// Raw output of one generation call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    /// Text of each content part, in order
    pub parts: Vec<String>,
    /// The backend stopped because it hit its output limit
    pub truncated: bool,
}

impl Generation {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![text.into()],
            truncated: false,
        }
    }
}

/// Anything that can turn a prompt into generated text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Generation, AnalysisError>;

    /// Backend name for logs
    fn name(&self) -> &str;
}

/// Google Gemini `generateContent` client
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_output_tokens: u32,
}

impl GeminiClient {
    /// Build a client from configuration.
    ///
    /// Fails with `ConfigurationAbsent` when no API key is configured.
    pub fn new(config: &AiConfig) -> Result<Self, AnalysisError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(AnalysisError::ConfigurationAbsent)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AnalysisError::UpstreamFailure(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.to_string(),
            max_output_tokens: config.max_output_tokens,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        )
    }

    fn request_body<'a>(&self, prompt: &'a str) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.1,
                top_k: 1,
                top_p: 1.0,
                max_output_tokens: self.max_output_tokens,
                response_mime_type: "application/json",
            },
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<Generation, AnalysisError> {
        let response = self
            .client
            .post(self.url())
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnalysisError::UpstreamFailure("request timed out".into())
                } else {
                    AnalysisError::UpstreamFailure(format!("request failed: {}", e.without_url()))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::UpstreamFailure(format!("reading body: {}", e.without_url())))?;

        if !status.is_success() {
            error!("Gemini request failed: {} {}", status.as_u16(), body);
            return Err(AnalysisError::UpstreamFailure(format!(
                "status {}",
                status.as_u16()
            )));
        }

        debug!("Gemini response: {} bytes", body.len());
        parse_envelope(&body)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Extract content parts and the truncation flag from a response envelope.
///
/// A body that is not an envelope, or has no `candidates[0].content`, is an
/// upstream failure rather than a malformed analysis.
pub fn parse_envelope(body: &str) -> Result<Generation, AnalysisError> {
    let envelope: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| AnalysisError::UpstreamFailure(format!("invalid envelope: {}", e)))?;

    let candidate = envelope
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| AnalysisError::UpstreamFailure("no candidates".into()))?;

    let content = candidate
        .content
        .ok_or_else(|| AnalysisError::UpstreamFailure("candidate has no content".into()))?;

    Ok(Generation {
        parts: content
            .parts
            .into_iter()
            .map(|p| p.text.unwrap_or_default())
            .collect(),
        truncated: candidate.finish_reason.as_deref() == Some(FINISH_MAX_TOKENS),
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}
