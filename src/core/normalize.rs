use std::collections::HashSet;

use crate::models::UserPreferences;

/// Lower-case and trim a single term
#[inline]
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Normalize a list of terms, dropping empties and duplicates while keeping order
pub fn normalize_terms(terms: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(terms.len());

    terms
        .iter()
        .map(|t| normalize_term(t))
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// Normalize place tags into a set for exact matching
pub fn normalize_tags(tags: &[String]) -> HashSet<String> {
    tags.iter()
        .map(|t| normalize_term(t))
        .filter(|t| !t.is_empty())
        .collect()
}

/// User preferences prepared once per ranking call
#[derive(Debug, Clone)]
pub struct NormalizedPreferences {
    pub interests: Vec<String>,
    pub budget_ordinal: u8,
    pub travel_style: Option<String>,
}

impl NormalizedPreferences {
    pub fn from_preferences(prefs: &UserPreferences) -> Self {
        let travel_style = prefs
            .travel_style
            .as_deref()
            .map(normalize_term)
            .filter(|s| !s.is_empty());

        Self {
            interests: normalize_terms(&prefs.interests),
            budget_ordinal: prefs.budget.ordinal(),
            travel_style,
        }
    }

    pub fn has_interest(&self, term: &str) -> bool {
        self.interests.iter().any(|i| i == term)
    }
}
