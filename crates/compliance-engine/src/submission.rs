//! Submission validation

use serde::{Deserialize, Serialize};
use shared_types::DocumentType;

use crate::catalog::DEFAULT_REGULATION;
use crate::error::WorkflowError;

/// A document as submitted by a client; optional fields get defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    #[serde(default)]
    pub document_name: Option<String>,
    #[serde(default)]
    pub document_type: Option<DocumentType>,
    #[serde(default)]
    pub regulations: Option<Vec<String>>,
    #[serde(default)]
    pub content: Option<String>,
}

/// A submission that passed validation, defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub document_name: String,
    pub document_type: DocumentType,
    pub regulations: Vec<String>,
    pub content: String,
}

impl SubmissionRequest {
    pub fn new(document_name: &str, content: &str) -> Self {
        Self {
            document_name: Some(document_name.to_string()),
            content: Some(content.to_string()),
            ..Self::default()
        }
    }

    pub fn with_regulations(mut self, regulations: &[&str]) -> Self {
        self.regulations = Some(regulations.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_type(mut self, document_type: DocumentType) -> Self {
        self.document_type = Some(document_type);
        self
    }

    /// Name and content must be non-blank. Type defaults to privacy policy,
    /// regulations to GDPR; blank regulation codes are dropped.
    pub fn validate(self) -> Result<ValidSubmission, WorkflowError> {
        let document_name = required(self.document_name, "documentName")?;
        let content = required(self.content, "content")?;

        let mut regulations: Vec<String> = self
            .regulations
            .unwrap_or_default()
            .into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
        if regulations.is_empty() {
            regulations.push(DEFAULT_REGULATION.to_string());
        }

        Ok(ValidSubmission {
            document_name,
            document_type: self.document_type.unwrap_or_default(),
            regulations,
            content,
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, WorkflowError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(WorkflowError::ValidationFailed(format!("{} is required", field))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_applied() {
        let valid = SubmissionRequest::new("Notice", "We collect data").validate().unwrap();
        assert_eq!(valid.document_type, DocumentType::PrivacyPolicy);
        assert_eq!(valid.regulations, vec!["GDPR".to_string()]);
    }

    #[test]
    fn test_explicit_values_kept() {
        let valid = SubmissionRequest::new("MSA", "terms")
            .with_type(DocumentType::Contract)
            .with_regulations(&["CCPA", " ", "Contract Law"])
            .validate()
            .unwrap();
        assert_eq!(valid.document_type, DocumentType::Contract);
        assert_eq!(
            valid.regulations,
            vec!["CCPA".to_string(), "Contract Law".to_string()]
        );
    }

    #[test]
    fn test_missing_name_or_content() {
        assert_eq!(
            SubmissionRequest::new("  ", "text").validate(),
            Err(WorkflowError::ValidationFailed("documentName is required".into()))
        );
        assert_eq!(
            SubmissionRequest::new("Notice", "").validate(),
            Err(WorkflowError::ValidationFailed("content is required".into()))
        );
        assert!(SubmissionRequest::default().validate().is_err());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let request: SubmissionRequest = serde_json::from_str(
            r#"{"documentName": "Terms", "documentType": "terms", "regulations": ["HIPAA"], "content": "x"}"#,
        )
        .unwrap();
        let valid = request.validate().unwrap();
        assert_eq!(valid.document_type, DocumentType::Terms);
        assert_eq!(valid.regulations, vec!["HIPAA".to_string()]);
    }
}
