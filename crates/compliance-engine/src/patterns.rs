//! Phrase matching used by the disclosure checks

/// Case-fold document text once so every check can match against it
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// True if the folded text contains any one of the phrases.
///
/// Matching is plain substring containment: "share" inside "shareholder"
/// counts. Phrases are expected to be lowercase already.
pub fn contains_any(folded: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| folded.contains(phrase))
}
