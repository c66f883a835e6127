use std::collections::HashSet;

use crate::core::{
    normalize::{normalize_tags, normalize_term, NormalizedPreferences},
    styles::style_tags,
};
use crate::models::{Place, ScoringWeights};

/// Calculate the deterministic part of a place's score
///
/// Scoring formula (default weights):
/// score = (
///     3 per interest equal to a tag        # else 1 if found in the description
///   + 3 if the category is an interest
///   + 4 / 2 / 0 for budget distance 0 / 1 / 2
///   + 2 per tag shared with the travel style (+2 if the category is a style tag)
///   + (rating / 5) * 2
/// )
///
/// The tie-break jitter is added by the recommender, not here.
pub fn calculate_place_score(
    place: &Place,
    prefs: &NormalizedPreferences,
    weights: &ScoringWeights,
) -> f64 {
    let tags = normalize_tags(&place.tags);
    let category = normalize_term(&place.category);

    interest_score(place, &tags, prefs, weights)
        + category_score(&category, prefs, weights)
        + budget_score(prefs.budget_ordinal, place.effective_price_level().ordinal(), weights)
        + style_score(&category, &tags, prefs.travel_style.as_deref(), weights)
        + rating_score(place.rating, weights)
}

/// Interest matches against tags, falling back to the description
#[inline]
fn interest_score(
    place: &Place,
    tags: &HashSet<String>,
    prefs: &NormalizedPreferences,
    weights: &ScoringWeights,
) -> f64 {
    let description = place.description().to_lowercase();

    prefs
        .interests
        .iter()
        .map(|interest| {
            if tags.contains(interest) {
                weights.tag_match
            } else if description.contains(interest.as_str()) {
                weights.description_match
            } else {
                0.0
            }
        })
        .sum()
}

#[inline]
fn category_score(category: &str, prefs: &NormalizedPreferences, weights: &ScoringWeights) -> f64 {
    if !category.is_empty() && prefs.has_interest(category) {
        weights.category_match
    } else {
        0.0
    }
}

/// Budget alignment on the low/medium/high scale
#[inline]
pub fn budget_score(user_ordinal: u8, place_ordinal: u8, weights: &ScoringWeights) -> f64 {
    match user_ordinal.abs_diff(place_ordinal) {
        0 => weights.budget_exact,
        1 => weights.budget_adjacent,
        _ => 0.0,
    }
}

#[inline]
fn style_score(
    category: &str,
    tags: &HashSet<String>,
    travel_style: Option<&str>,
    weights: &ScoringWeights,
) -> f64 {
    let Some(style_set) = travel_style.and_then(style_tags) else {
        return 0.0;
    };

    let shared = style_set.iter().filter(|t| tags.contains(**t)).count() as f64;
    let mut score = shared * weights.style_tag;

    if style_set.contains(&category) {
        score += weights.style_category;
    }

    score
}

/// Rating bonus in [0, rating_max]; ratings are clamped to the 0-5 scale
#[inline]
pub fn rating_score(rating: Option<f64>, weights: &ScoringWeights) -> f64 {
    match rating {
        Some(r) if r.is_finite() => (r.clamp(0.0, 5.0) / 5.0) * weights.rating_max,
        _ => 0.0,
    }
}

/// Round a score to three decimals
#[inline]
pub fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}
