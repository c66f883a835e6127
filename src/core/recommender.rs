use rand::Rng;
use thiserror::Error;

use crate::core::{
    normalize::NormalizedPreferences,
    scoring::{calculate_place_score, round_score},
};
use crate::models::{Place, ScoredPlace, ScoringWeights, UserPreferences};

/// Number of recommendations returned when the caller does not ask for a limit
pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RankError {
    #[error("No places found")]
    EmptyCatalog,
}

/// Ranks catalog places against a user's preferences
///
/// # Pipeline
/// 1. Normalize the preferences once
/// 2. Score every place independently
/// 3. Add a small random jitter so equal scores don't always come back in the same order
/// 4. Stable sort descending by the rounded score and keep the top N
#[derive(Debug, Clone)]
pub struct Recommender {
    weights: ScoringWeights,
}

impl Recommender {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank places using the thread-local random source for the jitter
    pub fn rank(
        &self,
        places: &[Place],
        preferences: &UserPreferences,
        top_n: usize,
    ) -> Result<Vec<ScoredPlace>, RankError> {
        self.rank_with_rng(places, preferences, top_n, &mut rand::rng())
    }

    /// Rank places with an explicit random source
    ///
    /// # Arguments
    /// * `places` - The full catalog, in store order
    /// * `preferences` - The requesting user's preferences
    /// * `top_n` - Maximum number of places to return
    /// * `rng` - Source of the tie-break jitter
    ///
    /// # Returns
    /// Scored places, best first, or `RankError::EmptyCatalog` when there is
    /// nothing to rank.
    pub fn rank_with_rng<R: Rng + ?Sized>(
        &self,
        places: &[Place],
        preferences: &UserPreferences,
        top_n: usize,
        rng: &mut R,
    ) -> Result<Vec<ScoredPlace>, RankError> {
        if places.is_empty() {
            return Err(RankError::EmptyCatalog);
        }

        let prefs = NormalizedPreferences::from_preferences(preferences);

        let mut scored: Vec<ScoredPlace> = places
            .iter()
            .map(|place| {
                let base = calculate_place_score(place, &prefs, &self.weights);
                let jitter = if self.weights.jitter_max > 0.0 && self.weights.jitter_max.is_finite() {
                    rng.random_range(0.0..self.weights.jitter_max)
                } else {
                    0.0
                };

                ScoredPlace {
                    place: place.clone(),
                    score: round_score(base + jitter),
                }
            })
            .collect();

        // sort_by is stable, so equal scores keep catalog order
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        scored.truncate(top_n);

        tracing::debug!(
            "Ranked {} places, returning {}",
            places.len(),
            scored.len()
        );

        Ok(scored)
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
