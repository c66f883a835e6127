//! Trip Buddy - travel recommendation service for Malta
//!
//! Users register, describe their interests, budget and travel style, and get a
//! ranked shortlist of places from the catalog. Admins curate the catalog.

pub mod auth;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_place_score, RankError, Recommender};
pub use crate::error::{AppError, AppResult};
pub use crate::models::{Place, PriceLevel, ScoredPlace, ScoringWeights, User, UserPreferences};
