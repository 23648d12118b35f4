//! Keyword rule catalog
//!
//! Per-regulation required-disclosure checks. A check is satisfied when the
//! case-folded document contains any one of its phrases. Unknown regulation
//! codes resolve to the GDPR set.
//!
//! Adding a regulation means adding a table here and an entry in `CATALOG`.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Serialize;
use shared_types::Severity;
use shared_types::Severity::{Critical, High, Low, Medium};

use crate::patterns::contains_any;

/// Regulation whose checks apply when a code is not in the catalog
pub const DEFAULT_REGULATION: &str = "GDPR";

/// A single required-disclosure check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCheck {
    /// Human label, e.g. "data retention periods"
    pub key: &'static str,
    /// Lowercase phrases; any one satisfies the check
    pub required_phrases: &'static [&'static str],
    pub severity: Severity,
    pub citation: &'static str,
}

impl RuleCheck {
    /// `folded` must already be lowercase
    pub fn is_satisfied_by(&self, folded: &str) -> bool {
        contains_any(folded, self.required_phrases)
    }
}

const fn check(
    key: &'static str,
    required_phrases: &'static [&'static str],
    severity: Severity,
    citation: &'static str,
) -> RuleCheck {
    RuleCheck {
        key,
        required_phrases,
        severity,
        citation,
    }
}

// ============================================================================
// GDPR - Articles 12-22
// ============================================================================

const GDPR: &[RuleCheck] = &[
    check(
        "controller identity and contact",
        &["controller", "contact", "company name", "address"],
        High,
        "GDPR Art. 13(1)(a)",
    ),
    check(
        "data protection officer contact",
        &["data protection officer", "dpo"],
        Medium,
        "GDPR Art. 37-39",
    ),
    check(
        "processing purposes and legal basis",
        &["purpose", "processing", "lawful basis", "legal basis"],
        High,
        "GDPR Art. 13(1)(c)",
    ),
    check(
        "categories of personal data",
        &["categories of data", "types of data", "personal information"],
        High,
        "GDPR Art. 13(1)(d)",
    ),
    check(
        "recipients or categories of recipients",
        &["recipient", "third part", "share", "disclose"],
        High,
        "GDPR Art. 13(1)(e)",
    ),
    check(
        "international data transfers",
        &["transfer", "international", "third country", "scc", "standard contractual"],
        Medium,
        "GDPR Art. 13(1)(f)",
    ),
    check(
        "data retention periods",
        &["retention", "storage period", "how long", "keep your data"],
        High,
        "GDPR Art. 13(2)(a)",
    ),
    check(
        "data subject rights",
        &[
            "right to access",
            "right to erasure",
            "right to rectification",
            "data portability",
            "right to object",
        ],
        High,
        "GDPR Arts. 15-21",
    ),
    check(
        "right to lodge complaint",
        &["supervisory authority", "lodge a complaint", "data protection authority"],
        Medium,
        "GDPR Art. 13(2)(d)",
    ),
    check(
        "automated decision-making",
        &["automated decision", "profiling", "automated processing"],
        Low,
        "GDPR Art. 22",
    ),
];

// ============================================================================
// CCPA - Cal. Civ. Code §1798.100-135
// ============================================================================

const CCPA: &[RuleCheck] = &[
    check(
        "categories of personal information collected",
        &["categories", "personal information", "collect"],
        High,
        "CCPA §1798.100(a)",
    ),
    check(
        "sources of personal information",
        &["source", "obtain", "collect from"],
        Medium,
        "CCPA §1798.100(b)",
    ),
    check(
        "business or commercial purpose",
        &["purpose", "use", "business purpose"],
        High,
        "CCPA §1798.100(b)",
    ),
    check(
        "categories of third parties",
        &["third part", "share", "disclose", "sell"],
        High,
        "CCPA §1798.100(d)",
    ),
    check(
        "right to know",
        &["right to know", "request disclosure", "access"],
        High,
        "CCPA §1798.100",
    ),
    check(
        "right to delete",
        &["right to delete", "deletion", "remove"],
        High,
        "CCPA §1798.105",
    ),
    check(
        "right to opt-out of sale",
        &["do not sell", "opt-out", "opt out", "sale of personal"],
        Critical,
        "CCPA §1798.120",
    ),
    check(
        "right to non-discrimination",
        &["non-discrimination", "discriminate", "exercise your rights"],
        High,
        "CCPA §1798.125",
    ),
    check(
        "authorized agent",
        &["authorized agent", "agent", "designate"],
        Medium,
        "CCPA §1798.135",
    ),
    check(
        "contact information for requests",
        &["contact", "submit", "request", "email", "phone"],
        High,
        "CCPA §1798.130",
    ),
];

// ============================================================================
// DPDPA - India Digital Personal Data Protection Act 2023
// ============================================================================

const DPDPA: &[RuleCheck] = &[
    check(
        "data fiduciary identification",
        &["data fiduciary", "organization", "company name"],
        High,
        "DPDPA Section 5",
    ),
    check(
        "purpose of data processing",
        &["purpose", "process", "use"],
        High,
        "DPDPA Section 6",
    ),
    check(
        "lawful basis for processing",
        &["consent", "lawful", "legal basis"],
        High,
        "DPDPA Section 6",
    ),
    check(
        "data retention and erasure",
        &["retention", "delete", "erase", "how long"],
        High,
        "DPDPA Section 8",
    ),
    check(
        "data principal rights",
        &["right", "access", "correction", "erasure", "data portability"],
        High,
        "DPDPA Section 11-14",
    ),
    check(
        "grievance redressal mechanism",
        &["grievance", "complaint", "redressal"],
        High,
        "DPDPA Section 15",
    ),
    check(
        "data security measures",
        &["security", "protect", "safeguard"],
        Medium,
        "DPDPA Section 8",
    ),
    check(
        "cross-border data transfer",
        &["transfer", "cross-border", "outside india"],
        Medium,
        "DPDPA Section 16",
    ),
    check(
        "consent withdrawal",
        &["withdraw consent", "opt-out", "stop processing"],
        High,
        "DPDPA Section 6",
    ),
];

// ============================================================================
// HIPAA - Privacy, Security and Breach Notification Rules
// ============================================================================

const HIPAA: &[RuleCheck] = &[
    check(
        "covered entity identification",
        &["covered entity", "healthcare provider", "organization"],
        High,
        "HIPAA Privacy Rule §164.520",
    ),
    check(
        "uses and disclosures of PHI",
        &["use", "disclosure", "protected health information", "phi"],
        Critical,
        "HIPAA Privacy Rule §164.506",
    ),
    check(
        "patient rights",
        &["right to access", "right to amend", "right to accounting"],
        High,
        "HIPAA Privacy Rule §164.524-528",
    ),
    check(
        "minimum necessary standard",
        &["minimum necessary", "least privilege"],
        Medium,
        "HIPAA Privacy Rule §164.502(b)",
    ),
    check(
        "business associate agreements",
        &["business associate", "baa", "agreement"],
        High,
        "HIPAA Privacy Rule §164.502(e)",
    ),
    check(
        "security safeguards",
        &["security", "safeguard", "protect", "encrypt"],
        Critical,
        "HIPAA Security Rule §164.306",
    ),
    check(
        "breach notification",
        &["breach", "notification", "incident"],
        High,
        "HIPAA Breach Notification Rule §164.404",
    ),
    check(
        "complaint process",
        &["complaint", "file a complaint", "grievance"],
        Medium,
        "HIPAA Privacy Rule §164.530",
    ),
];

lazy_static! {
    static ref CATALOG: HashMap<&'static str, &'static [RuleCheck]> = {
        let mut m: HashMap<&'static str, &'static [RuleCheck]> = HashMap::new();
        m.insert("GDPR", GDPR);
        m.insert("CCPA", CCPA);
        m.insert("DPDPA", DPDPA);
        m.insert("HIPAA", HIPAA);
        m
    };
}

/// Whether `code` has its own entry (case-insensitive)
pub fn has_entry(code: &str) -> bool {
    CATALOG.contains_key(code.trim().to_uppercase().as_str())
}

/// Resolve the check set for a regulation code (case-insensitive).
///
/// Never empty: unknown codes get the GDPR checks.
pub fn checks_for(code: &str) -> &'static [RuleCheck] {
    CATALOG
        .get(code.trim().to_uppercase().as_str())
        .copied()
        .unwrap_or(GDPR)
}

/// All catalogued regulation codes, sorted
pub fn regulations() -> Vec<&'static str> {
    let mut codes: Vec<_> = CATALOG.keys().copied().collect();
    codes.sort_unstable();
    codes
}
