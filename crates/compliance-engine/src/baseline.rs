//! Deterministic baseline analyzer
//!
//! Scores a document against the catalog checks for its primary regulation.
//! Needs nothing outside this crate and is the fallback for every failure on
//! the AI path.

use shared_types::{AnalysisResult, RiskLevel, Severity, Violation};
use tracing::{debug, warn};

use crate::catalog::{self, RuleCheck, DEFAULT_REGULATION};
use crate::patterns::fold;

const PENALTY_PER_VIOLATION: u32 = 5;
const PENALTY_PER_HIGH: u32 = 8;
const PENALTY_PER_CRITICAL: u32 = 12;

/// Analyze `content` against the checks of `regulations[0]`.
///
/// Never fails. If the score cannot be computed the conservative result
/// (score 0, high risk, no violations) is returned instead.
pub fn analyze_baseline(content: &str, regulations: &[String]) -> AnalysisResult {
    let primary = regulations
        .first()
        .map(String::as_str)
        .unwrap_or(DEFAULT_REGULATION);
    let checks = catalog::checks_for(primary);

    let violations = find_missing_disclosures(content, checks);

    let Some(score) = score_violations(&violations) else {
        warn!(
            "Baseline scoring failed for {} violations, using conservative result",
            violations.len()
        );
        return AnalysisResult::conservative(regulations);
    };

    debug!(
        "Baseline analysis: regulation={}, violations={}, score={}",
        primary,
        violations.len(),
        score
    );

    AnalysisResult {
        compliance_score: score,
        risk_level: RiskLevel::from_score(score),
        violations,
        related_skills: regulations.to_vec(),
    }
}

/// One violation per check none of whose phrases appear in the content
pub fn find_missing_disclosures(content: &str, checks: &[RuleCheck]) -> Vec<Violation> {
    let folded = fold(content);

    checks
        .iter()
        .filter(|c| !c.is_satisfied_by(&folded))
        .map(missing_disclosure)
        .collect()
}

fn missing_disclosure(check: &RuleCheck) -> Violation {
    Violation {
        clause: "Missing Section".to_string(),
        issue: format!("Missing disclosure: {}", check.key),
        regulation: check.citation.to_string(),
        severity: check.severity,
        suggestion: format!("Add a clear section covering {}.", check.key),
    }
}

/// `max(0, 100 - 5*total - 8*high - 12*critical)`
///
/// Returns `None` only if the counts do not fit the arithmetic.
pub fn score_violations(violations: &[Violation]) -> Option<u8> {
    let count = |severity: Severity| violations.iter().filter(|v| v.severity == severity).count();

    let total = u32::try_from(violations.len()).ok()?;
    let high = u32::try_from(count(Severity::High)).ok()?;
    let critical = u32::try_from(count(Severity::Critical)).ok()?;

    let penalty = total
        .checked_mul(PENALTY_PER_VIOLATION)?
        .checked_add(high.checked_mul(PENALTY_PER_HIGH)?)?
        .checked_add(critical.checked_mul(PENALTY_PER_CRITICAL)?)?;

    u8::try_from(100u32.saturating_sub(penalty)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn regs(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    fn violation(severity: Severity) -> Violation {
        Violation {
            clause: "Missing Section".to_string(),
            issue: "x".to_string(),
            regulation: "y".to_string(),
            severity,
            suggestion: "z".to_string(),
        }
    }

    #[test]
    fn test_empty_document_gets_every_gdpr_violation() {
        let result = analyze_baseline("", &regs(&["GDPR"]));
        assert_eq!(result.violations.len(), 10);
        // 10 violations, 6 high, 0 critical: 100 - 50 - 48 < 0
        assert_eq!(result.compliance_score, 0);
        assert_eq!(result.risk_level, RiskLevel::Critical);
        assert_eq!(result.related_skills, regs(&["GDPR"]));
    }

    #[test]
    fn test_violation_shape() {
        let result = analyze_baseline("", &regs(&["GDPR"]));
        let first = &result.violations[0];
        assert_eq!(first.clause, "Missing Section");
        assert_eq!(first.issue, "Missing disclosure: controller identity and contact");
        assert_eq!(first.regulation, "GDPR Art. 13(1)(a)");
        assert_eq!(first.severity, Severity::High);
        assert_eq!(
            first.suggestion,
            "Add a clear section covering controller identity and contact."
        );
    }

    #[test]
    fn test_ccpa_missing_opt_out_is_cited_critical() {
        let content = "We collect personal information from the source you provide. \
                       We use it for a business purpose and may share it. \
                       You have the right to know and the right to delete. \
                       We will not discriminate. An authorized agent may contact us by email.";
        let result = analyze_baseline(content, &regs(&["CCPA"]));

        let opt_out: Vec<_> = result
            .violations
            .iter()
            .filter(|v| v.regulation == "CCPA §1798.120")
            .collect();
        assert_eq!(opt_out.len(), 1);
        assert_eq!(opt_out[0].severity, Severity::Critical);
        // Only the opt-out disclosure is missing: 100 - 5 - 12
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.compliance_score, 83);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let upper = analyze_baseline("DATA PROTECTION OFFICER", &regs(&["GDPR"]));
        let lower = analyze_baseline("data protection officer", &regs(&["GDPR"]));
        assert_eq!(upper, lower);
        assert!(!upper
            .violations
            .iter()
            .any(|v| v.regulation == "GDPR Art. 37-39"));
    }

    #[test]
    fn test_unknown_regulation_uses_gdpr_checks() {
        let sox = analyze_baseline("", &regs(&["SOX", "CCPA"]));
        let gdpr = analyze_baseline("", &regs(&["GDPR"]));
        assert_eq!(sox.violations, gdpr.violations);
        assert_eq!(sox.related_skills, regs(&["SOX", "CCPA"]));
    }

    #[test]
    fn test_only_primary_regulation_is_checked() {
        // HIPAA primary, GDPR secondary: no GDPR citations
        let result = analyze_baseline("", &regs(&["HIPAA", "GDPR"]));
        assert!(result.violations.iter().all(|v| v.regulation.starts_with("HIPAA")));
    }

    #[test]
    fn test_empty_regulation_list_uses_gdpr() {
        let result = analyze_baseline("", &[]);
        assert_eq!(result.violations.len(), 10);
        assert!(result.related_skills.is_empty());
    }

    #[test]
    fn test_score_formula() {
        assert_eq!(score_violations(&[]), Some(100));
        assert_eq!(score_violations(&[violation(Severity::Low)]), Some(95));
        assert_eq!(score_violations(&[violation(Severity::Medium)]), Some(95));
        assert_eq!(score_violations(&[violation(Severity::High)]), Some(87));
        assert_eq!(score_violations(&[violation(Severity::Critical)]), Some(83));
        let many = vec![violation(Severity::Critical); 10];
        assert_eq!(score_violations(&many), Some(0));
    }
}
