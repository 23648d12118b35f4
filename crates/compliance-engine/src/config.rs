//! AI backend configuration

use serde::{Deserialize, Serialize};

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;

/// Settings for the external text-generation backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Absent or blank disables AI analysis entirely
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_ms: u64,
    pub max_output_tokens: u32,
}

impl AiConfig {
    /// Configuration with AI analysis switched off
    pub fn disabled() -> Self {
        Self {
            api_key: None,
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn enabled(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_disabled() {
        assert!(!AiConfig::default().enabled());
        assert!(!AiConfig::disabled().enabled());
    }

    #[test]
    fn test_blank_key_is_disabled() {
        assert!(!AiConfig::default().with_api_key("   ").enabled());
    }

    #[test]
    fn test_key_enables() {
        let config = AiConfig::default().with_api_key("secret");
        assert!(config.enabled());
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.max_output_tokens, 8192);
    }
}
