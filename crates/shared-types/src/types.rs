use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a wire string does not name a known variant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl FromStr for Severity {
    type Err = ParseEnumError;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(ParseEnumError::new("severity", s)),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk band derived from a compliance score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Map a score onto its band.
    ///
    /// Bands have inclusive lower bounds: 80..=100 low, 60..=79 medium,
    /// 40..=59 high, 0..=39 critical.
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => RiskLevel::Low,
            60..=79 => RiskLevel::Medium,
            40..=59 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

impl FromStr for RiskLevel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            "critical" => Ok(RiskLevel::Critical),
            _ => Err(ParseEnumError::new("risk level", s)),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    #[default]
    PrivacyPolicy,
    Terms,
    Contract,
    Policy,
    Other,
}

impl DocumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::PrivacyPolicy => "privacy_policy",
            DocumentType::Terms => "terms",
            DocumentType::Contract => "contract",
            DocumentType::Policy => "policy",
            DocumentType::Other => "other",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review workflow status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    #[default]
    PendingReview,
    InReview,
    Approved,
    Rejected,
    RevisionNeeded,
}

impl DocumentStatus {
    pub const ALL: [DocumentStatus; 5] = [
        DocumentStatus::PendingReview,
        DocumentStatus::InReview,
        DocumentStatus::Approved,
        DocumentStatus::Rejected,
        DocumentStatus::RevisionNeeded,
    ];

    /// APPROVED and REJECTED close a review and stamp `reviewed_at`.
    pub fn is_terminal(self) -> bool {
        matches!(self, DocumentStatus::Approved | DocumentStatus::Rejected)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::PendingReview => "PENDING_REVIEW",
            DocumentStatus::InReview => "IN_REVIEW",
            DocumentStatus::Approved => "APPROVED",
            DocumentStatus::Rejected => "REJECTED",
            DocumentStatus::RevisionNeeded => "REVISION_NEEDED",
        }
    }
}

impl FromStr for DocumentStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| ParseEnumError::new("document status", s))
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detected compliance gap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub clause: String, // e.g., "Missing Section"
    pub issue: String,
    pub regulation: String, // citation, e.g., "GDPR Art. 13(1)(a)"
    pub severity: Severity,
    pub suggestion: String,
}

/// Canonical analyzer output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub compliance_score: u8,
    pub risk_level: RiskLevel,
    pub violations: Vec<Violation>,
    pub related_skills: Vec<String>,
}

impl AnalysisResult {
    /// Result used when analysis itself could not run at all
    pub fn conservative(regulations: &[String]) -> Self {
        Self {
            compliance_score: 0,
            risk_level: RiskLevel::High,
            violations: Vec::new(),
            related_skills: regulations.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Lawyer,
    Admin,
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "client" => Ok(Role::Client),
            "lawyer" => Ok(Role::Lawyer),
            "admin" => Ok(Role::Admin),
            _ => Err(ParseEnumError::new("role", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub specializations: Vec<String>,
}

impl User {
    pub fn is_lawyer(&self) -> bool {
        self.role == Role::Lawyer
    }
}

/// The central entity routed through analysis, assignment and review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceDocument {
    pub id: String,
    pub document_name: String,
    pub document_type: DocumentType,
    pub regulations: Vec<String>,
    pub content: String,
    pub status: DocumentStatus,
    pub risk_level: RiskLevel,
    pub compliance_score: u8,
    pub violations: Vec<Violation>,
    pub created_by: String,
    pub assigned_lawyer: Option<String>,
    pub lawyer_notes: String,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ComplianceDocument {
    /// A freshly submitted document: pending review, unassigned, unscored.
    pub fn new(
        id: String,
        document_name: String,
        document_type: DocumentType,
        regulations: Vec<String>,
        content: String,
        created_by: String,
    ) -> Self {
        Self {
            id,
            document_name,
            document_type,
            regulations,
            content,
            status: DocumentStatus::PendingReview,
            risk_level: RiskLevel::Medium,
            compliance_score: 0,
            violations: Vec::new(),
            created_by,
            assigned_lawyer: None,
            lawyer_notes: String::new(),
            reviewed_at: None,
            created_at: Utc::now(),
        }
    }

    /// Replace score, risk and violations together.
    pub fn apply_analysis(&mut self, analysis: &AnalysisResult) {
        self.compliance_score = analysis.compliance_score;
        self.risk_level = analysis.risk_level;
        self.violations = analysis.violations.clone();
    }

    /// Hand the document to a lawyer and move it into review.
    pub fn assign_to(&mut self, lawyer_id: &str) {
        self.assigned_lawyer = Some(lawyer_id.to_string());
        self.status = DocumentStatus::InReview;
    }

    /// The regulation that drives citations and the default check set
    pub fn primary_regulation(&self) -> Option<&str> {
        self.regulations.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn violation(severity: Severity) -> Violation {
        Violation {
            clause: "Missing Section".to_string(),
            issue: "Missing disclosure: retention".to_string(),
            regulation: "GDPR Art. 13(2)(a)".to_string(),
            severity,
            suggestion: "Add a retention section.".to_string(),
        }
    }

    #[test]
    fn test_risk_band_boundaries() {
        assert_eq!(RiskLevel::from_score(100), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(80), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(79), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(60), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(59), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(40), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(39), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Critical);
    }

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&DocumentStatus::RevisionNeeded).unwrap();
        assert_eq!(json, "\"REVISION_NEEDED\"");
        assert_eq!(
            "PENDING_REVIEW".parse::<DocumentStatus>().unwrap(),
            DocumentStatus::PendingReview
        );
        assert!("approved".parse::<DocumentStatus>().is_err());
    }

    #[test]
    fn test_severity_parse_is_case_insensitive() {
        assert_eq!(" HIGH ".parse::<Severity>().unwrap(), Severity::High);
        assert!("severe".parse::<Severity>().is_err());
    }

    #[test]
    fn test_document_serializes_camel_case() {
        let doc = ComplianceDocument::new(
            "doc-1".into(),
            "Privacy Policy".into(),
            DocumentType::PrivacyPolicy,
            vec!["GDPR".into()],
            "We collect data.".into(),
            "client-1".into(),
        );
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["documentName"], "Privacy Policy");
        assert_eq!(value["documentType"], "privacy_policy");
        assert_eq!(value["status"], "PENDING_REVIEW");
        assert!(value["assignedLawyer"].is_null());
    }

    #[test]
    fn test_apply_analysis_replaces_violations_wholesale() {
        let mut doc = ComplianceDocument::new(
            "doc-1".into(),
            "Terms".into(),
            DocumentType::Terms,
            vec!["CCPA".into()],
            "text".into(),
            "client-1".into(),
        );
        doc.violations = vec![violation(Severity::Low), violation(Severity::Low)];

        let analysis = AnalysisResult {
            compliance_score: 72,
            risk_level: RiskLevel::Medium,
            violations: vec![violation(Severity::Critical)],
            related_skills: vec!["CCPA".into()],
        };
        doc.apply_analysis(&analysis);

        assert_eq!(doc.compliance_score, 72);
        assert_eq!(doc.risk_level, RiskLevel::Medium);
        assert_eq!(doc.violations, vec![violation(Severity::Critical)]);
    }

    #[test]
    fn test_assign_moves_into_review() {
        let mut doc = ComplianceDocument::new(
            "doc-1".into(),
            "Contract".into(),
            DocumentType::Contract,
            vec!["HIPAA".into()],
            "text".into(),
            "client-1".into(),
        );
        doc.assign_to("lawyer-7");
        assert_eq!(doc.assigned_lawyer.as_deref(), Some("lawyer-7"));
        assert_eq!(doc.status, DocumentStatus::InReview);
        assert_eq!(doc.primary_regulation(), Some("HIPAA"));
    }
}
