//! Text cleanup ahead of JSON parsing
//!
//! Generated output arrives fenced, embedded in prose, or cut off at the
//! token limit. These helpers turn it into the best candidate for a JSON
//! object without ever failing themselves.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// ```json fenced block, language tag in any case
    static ref JSON_FENCE: Regex = Regex::new(r"(?i)```json\s*([\s\S]*?)\s*```").unwrap();

    /// First `{` through last `}`
    static ref EMBEDDED_OBJECT: Regex = Regex::new(r"\{[\s\S]*\}").unwrap();
}

/// Concatenate content parts in order
pub fn join_parts(parts: &[String]) -> String {
    parts.join("\n").trim().to_string()
}

/// Unwrap a ```json fenced block if one is present
pub fn strip_fence(text: &str) -> &str {
    match JSON_FENCE.captures(text).and_then(|caps| caps.get(1)) {
        Some(inner) => inner.as_str().trim(),
        None => text,
    }
}

/// Locate the object when the text does not start with `{`.
///
/// Complete output uses the span from the first `{` to the last `}`.
/// Truncated output has no reliable closing brace, so everything from the
/// first `{` onward is kept for repair.
pub fn locate_object(text: &str, truncated: bool) -> &str {
    if text.starts_with('{') {
        return text;
    }

    if truncated {
        return match text.find('{') {
            Some(start) => &text[start..],
            None => text,
        };
    }

    match EMBEDDED_OBJECT.find(text) {
        Some(m) => m.as_str(),
        None => text,
    }
}

/// Append missing closers to output cut off at the token limit.
///
/// Counts unmatched `[` and `{` and appends `]` closers first, then `}`.
/// Brackets inside string literals are counted too; the result is only a
/// candidate and may still fail to parse.
pub fn repair_truncated(text: &str) -> String {
    let mut repaired = text.trim_end().to_string();

    let count = |c: char| repaired.chars().filter(|&x| x == c).count();
    let missing_brackets = count('[').saturating_sub(count(']'));
    let missing_braces = count('{').saturating_sub(count('}'));

    for _ in 0..missing_brackets {
        repaired.push_str("\n]");
    }
    for _ in 0..missing_braces {
        repaired.push_str("\n}");
    }

    repaired
}
