//! Response normalizer
//!
//! Turns raw generated text into the canonical [`AnalysisResult`] or reports
//! [`AnalysisError::MalformedResponse`]. Pipeline:
//!
//! 1. Join content parts in order
//! 2. Strip a ```json fence
//! 3. Locate the object if the text does not start with `{`
//! 4. Close unmatched brackets and braces when the output was truncated
//! 5. Parse
//! 6. Coerce the violation list through the shape adapters
//! 7. Coerce score, risk band and related skills

pub mod extract;
pub mod shape;

use serde_json::Value;
use shared_types::AnalysisResult;
use tracing::{debug, warn};

use crate::ai::Generation;
use crate::error::AnalysisError;

/// Normalize a generation into the canonical schema.
///
/// `regulations` supplies `relatedSkills` when the response has none.
pub fn normalize(
    generation: &Generation,
    regulations: &[String],
) -> Result<AnalysisResult, AnalysisError> {
    let joined = extract::join_parts(&generation.parts);
    if joined.is_empty() {
        return Err(AnalysisError::MalformedResponse("empty response text".into()));
    }

    let unfenced = extract::strip_fence(&joined);
    let located = extract::locate_object(unfenced, generation.truncated);

    let candidate = if generation.truncated {
        warn!("Response was truncated at the token limit, attempting bracket repair");
        extract::repair_truncated(located)
    } else {
        located.to_string()
    };

    let parsed: Value = serde_json::from_str(&candidate)
        .map_err(|e| AnalysisError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    coerce(&parsed, regulations)
}

/// Coerce a parsed value into the canonical schema.
///
/// Only a top-level object qualifies; anything else is malformed.
pub fn coerce(parsed: &Value, regulations: &[String]) -> Result<AnalysisResult, AnalysisError> {
    let obj = parsed.as_object().ok_or_else(|| {
        AnalysisError::MalformedResponse("response is not a JSON object".into())
    })?;

    let (raw_violations, adapter) = shape::extract_violations(obj);
    debug!(
        "Violation shape: {}, entries={}",
        adapter.unwrap_or("none"),
        raw_violations.len()
    );

    let violations = raw_violations
        .iter()
        .filter_map(shape::normalize_violation)
        .collect();

    Ok(AnalysisResult {
        compliance_score: shape::coerce_score(obj.get("complianceScore")),
        risk_level: shape::coerce_risk_level(obj.get("riskLevel")),
        violations,
        related_skills: shape::coerce_related_skills(obj.get("relatedSkills"), regulations),
    })
}
