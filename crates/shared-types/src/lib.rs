pub mod audit;
pub mod types;

pub use audit::{AuditEvent, AuditTrail, DOCUMENT_UPLOADED};
pub use types::{
    AnalysisResult, ComplianceDocument, DocumentStatus, DocumentType, ParseEnumError, RiskLevel,
    Role, Severity, User, Violation,
};
