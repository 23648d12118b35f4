//! Schema coercion for parsed AI output
//!
//! The violation list can arrive in several shapes. Each shape has an
//! adapter in [`VIOLATION_ADAPTERS`]; they are tried in order and the first
//! one that recognizes the object supplies the raw entries. Supporting a new
//! shape means adding an adapter, not touching the control flow.

use serde_json::{Map, Value};
use shared_types::{RiskLevel, Severity, Violation};

/// Recognizes one shape of violation list inside the response object
pub struct ShapeAdapter {
    pub name: &'static str,
    pub extract: fn(&Map<String, Value>) -> Option<Vec<Value>>,
}

/// Ordered: first match wins. No match means an empty list.
pub const VIOLATION_ADAPTERS: &[ShapeAdapter] = &[
    ShapeAdapter {
        name: "violations-array",
        extract: violations_array,
    },
    ShapeAdapter {
        name: "violations-object",
        extract: violations_object,
    },
    ShapeAdapter {
        name: "recommendations-array",
        extract: recommendations_array,
    },
];

fn violations_array(obj: &Map<String, Value>) -> Option<Vec<Value>> {
    obj.get("violations")?.as_array().cloned()
}

fn violations_object(obj: &Map<String, Value>) -> Option<Vec<Value>> {
    let single = obj.get("violations").filter(|v| v.is_object())?;
    Some(vec![single.clone()])
}

fn recommendations_array(obj: &Map<String, Value>) -> Option<Vec<Value>> {
    obj.get("recommendations")?.as_array().cloned()
}

/// Field aliases, canonical name first
const CLAUSE_KEYS: &[&str] = &["clause", "section"];
const ISSUE_KEYS: &[&str] = &["issue", "problem", "description"];
const REGULATION_KEYS: &[&str] = &["regulation", "reference"];
const SEVERITY_KEYS: &[&str] = &["severity"];
const SUGGESTION_KEYS: &[&str] = &["suggestion", "fix", "action", "recommendation"];

const DEFAULT_CLAUSE: &str = "Unknown section";
const DEFAULT_ISSUE: &str = "Compliance issue";

/// Raw violation entries plus the name of the adapter that produced them
pub fn extract_violations(obj: &Map<String, Value>) -> (Vec<Value>, Option<&'static str>) {
    VIOLATION_ADAPTERS
        .iter()
        .find_map(|adapter| (adapter.extract)(obj).map(|items| (items, Some(adapter.name))))
        .unwrap_or((Vec::new(), None))
}

/// Map one raw entry onto the canonical violation.
///
/// Falsy entries (`null`, `false`, `0`, `""`) are dropped. A bare string
/// becomes the issue of an otherwise defaulted violation; any other
/// non-object entry becomes a fully defaulted one.
pub fn normalize_violation(raw: &Value) -> Option<Violation> {
    if !is_truthy(raw) {
        return None;
    }

    let Some(obj) = raw.as_object() else {
        let issue = match raw {
            Value::String(s) => s.clone(),
            _ => DEFAULT_ISSUE.to_string(),
        };
        return Some(Violation {
            clause: DEFAULT_CLAUSE.to_string(),
            issue,
            regulation: String::new(),
            severity: Severity::Medium,
            suggestion: String::new(),
        });
    };

    let severity = first_text(obj, SEVERITY_KEYS)
        .and_then(|s| s.parse::<Severity>().ok())
        .unwrap_or(Severity::Medium);

    Some(Violation {
        clause: first_text(obj, CLAUSE_KEYS).unwrap_or_else(|| DEFAULT_CLAUSE.to_string()),
        issue: first_text(obj, ISSUE_KEYS).unwrap_or_else(|| DEFAULT_ISSUE.to_string()),
        regulation: first_text(obj, REGULATION_KEYS).unwrap_or_default(),
        severity,
        suggestion: first_text(obj, SUGGESTION_KEYS).unwrap_or_default(),
    })
}

/// JSON truthiness: everything except `null`, `false`, zero and `""`
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// First alias holding a truthy string or number
fn first_text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        match obj.get(*key).filter(|v| is_truthy(v))? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    })
}

/// Coerce any JSON value to a score in [0, 100].
///
/// Numbers and numeric strings are rounded and clamped; booleans count as
/// 1/0; everything else is 0.
pub fn coerce_score(value: Option<&Value>) -> u8 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(0.0)
            }
        }
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        _ => 0.0,
    };

    if !raw.is_finite() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

/// Lowercased band name, or medium when it is not one of the four bands
pub fn coerce_risk_level(value: Option<&Value>) -> RiskLevel {
    value
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<RiskLevel>().ok())
        .unwrap_or(RiskLevel::Medium)
}

/// String entries of `relatedSkills`, or `fallback` when it is not an array
pub fn coerce_related_skills(value: Option<&Value>, fallback: &[String]) -> Vec<String> {
    match value.and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        None => fallback.to_vec(),
    }
}
