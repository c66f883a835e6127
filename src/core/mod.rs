// Core algorithm exports
pub mod normalize;
pub mod recommender;
pub mod scoring;
pub mod styles;

pub use normalize::{normalize_tags, normalize_term, normalize_terms, NormalizedPreferences};
pub use recommender::{RankError, Recommender, DEFAULT_TOP_N};
pub use scoring::{budget_score, calculate_place_score, rating_score, round_score};
pub use styles::{style_tags, TRAVEL_STYLES};
