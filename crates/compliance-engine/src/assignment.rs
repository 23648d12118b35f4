//! Lawyer assignment by specialization

use regex::{Regex, RegexBuilder};
use shared_types::User;
use tracing::{debug, warn};

/// Case-insensitive containment matcher over a document's regulation codes
#[derive(Debug)]
pub struct RegulationMatcher {
    patterns: Vec<Regex>,
}

impl RegulationMatcher {
    /// Blank codes are ignored. Codes are matched literally.
    pub fn new(regulations: &[String]) -> Self {
        let patterns = regulations
            .iter()
            .map(|code| code.trim())
            .filter(|code| !code.is_empty())
            .filter_map(|code| {
                RegexBuilder::new(&regex::escape(code))
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| warn!("Skipping regulation '{}': {}", code, e))
                    .ok()
            })
            .collect();

        Self { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True when any specialization contains any regulation code
    pub fn matches(&self, specializations: &[String]) -> bool {
        specializations
            .iter()
            .any(|s| self.patterns.iter().any(|p| p.is_match(s)))
    }
}

/// Pick the lawyer for a document.
///
/// The first lawyer whose specializations match a regulation wins. Without a
/// match any lawyer is taken; with no lawyers at all the result is `None`.
pub fn resolve_assignment<'a>(users: &'a [User], regulations: &[String]) -> Option<&'a User> {
    let matcher = RegulationMatcher::new(regulations);
    let mut lawyers = users.iter().filter(|u| u.is_lawyer());

    let specialist = lawyers.clone().find(|u| matcher.matches(&u.specializations));
    if let Some(lawyer) = specialist {
        debug!("Assigned specialist {} for {:?}", lawyer.id, regulations);
        return Some(lawyer);
    }

    let fallback = lawyers.next();
    match fallback {
        Some(lawyer) => debug!("No specialist for {:?}, falling back to {}", regulations, lawyer.id),
        None => debug!("No lawyers available, document stays unassigned"),
    }
    fallback
}
