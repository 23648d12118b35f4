//! Regulation-scoped prompt construction

use shared_types::{ComplianceDocument, DocumentType};

use crate::catalog::DEFAULT_REGULATION;

/// Upper bound on violations requested from the model
pub const MAX_VIOLATIONS: usize = 8;

/// Audit guidance keyed by regulation code
const GUIDANCE: &[(&str, &str)] = &[
    (
        "GDPR",
        "Focus on GDPR Articles 12-22. Check: controller identity, DPO, purposes, legal basis, \
         data categories, recipients, international transfers, retention, rights (access, erasure, \
         portability, objection), automated decisions, complaint rights.",
    ),
    (
        "CCPA",
        "Focus on CCPA §1798.100-135. Check: categories of personal information, sources, business \
         purposes, third parties, right to know, right to delete, DO NOT SELL link, opt-out, \
         non-discrimination, authorized agent, contact information.",
    ),
    (
        "DPDPA",
        "Focus on India's DPDPA 2023 Sections 5-16. Check: data fiduciary identification, \
         processing purposes, consent, retention/erasure, data principal rights, grievance \
         mechanism, security measures, cross-border transfers, consent withdrawal.",
    ),
    (
        "HIPAA",
        "Focus on HIPAA Privacy & Security Rules. Check: covered entity identity, PHI \
         uses/disclosures, patient rights, minimum necessary, business associate agreements, \
         security safeguards, breach notification, complaint process.",
    ),
    (
        "SOX",
        "Focus on Sarbanes-Oxley compliance. Check: financial reporting controls, audit \
         requirements, data retention, disclosure controls.",
    ),
    (
        "Contract Law",
        "Focus on contractual obligations and legal requirements specific to the agreement.",
    ),
    (
        "Privacy Law",
        "Focus on general privacy principles and best practices.",
    ),
    (
        "Data Protection",
        "Focus on data protection principles, security measures, and lawful processing.",
    ),
];

/// Everything the analyzer needs to know about a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub document_name: String,
    pub document_type: DocumentType,
    pub regulations: Vec<String>,
    pub content: String,
}

impl AnalysisRequest {
    pub fn from_document(doc: &ComplianceDocument) -> Self {
        Self {
            document_name: doc.document_name.clone(),
            document_type: doc.document_type,
            regulations: doc.regulations.clone(),
            content: doc.content.clone(),
        }
    }

    /// First regulation, or GDPR when the list is empty
    pub fn primary_regulation(&self) -> &str {
        self.regulations
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_REGULATION)
    }
}

/// Guidance for a regulation code; unknown codes get the GDPR text
pub fn guidance_for(code: &str) -> &'static str {
    let code = code.trim();
    GUIDANCE
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(code))
        .or_else(|| GUIDANCE.iter().find(|(key, _)| *key == DEFAULT_REGULATION))
        .map(|(_, text)| *text)
        .unwrap_or_default()
}

/// Citation style shown to the model as an example
fn example_citation(primary: &str) -> &'static str {
    match primary.trim().to_ascii_uppercase().as_str() {
        "GDPR" => "GDPR Art. 13(1)(a)",
        "CCPA" => "CCPA §1798.100",
        "DPDPA" => "DPDPA Section 6",
        _ => "HIPAA §164.520",
    }
}

/// Build the prompt for one document
pub fn build_prompt(request: &AnalysisRequest) -> String {
    let regulations = if request.regulations.is_empty() {
        vec![DEFAULT_REGULATION.to_string()]
    } else {
        request.regulations.clone()
    };
    let listed = regulations.join(", ");
    let primary = request.primary_regulation();
    let related = serde_json::Value::from(regulations.clone()).to_string();

    format!(
        r#"You are a compliance auditor specializing in {listed}. Analyze this {doc_type} for {listed} compliance ONLY.

Document: {name}
Content: {content}

{guidance}

Return ONLY valid JSON (no markdown):
{{
  "complianceScore": 0-100,
  "riskLevel": "low"|"medium"|"high"|"critical",
  "violations": [
    {{
      "clause": "Section name or 'Missing Section'",
      "issue": "Brief {listed} compliance gap (max 100 chars)",
      "regulation": "{listed} specific citation (e.g., {citation})",
      "severity": "low"|"medium"|"high"|"critical",
      "suggestion": "Concise fix (max 100 chars)"
    }}
  ],
  "relatedSkills": {related}
}}

IMPORTANT: Cite {listed} articles/sections ONLY. Do NOT use GDPR if analyzing {primary}. Limit to top {max} critical issues. Be concise."#,
        listed = listed,
        doc_type = request.document_type.as_str(),
        name = request.document_name,
        content = request.content,
        guidance = guidance_for(primary),
        citation = example_citation(primary),
        related = related,
        primary = primary,
        max = MAX_VIOLATIONS,
    )
}
