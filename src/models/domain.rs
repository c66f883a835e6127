use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::lenient;

/// Ordinal price tier shared by place prices and user budgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl PriceLevel {
    /// Parse a tier name (case-insensitive) or a euro-sign tier such as "€€"
    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim().to_lowercase();

        match value.as_str() {
            "low" => Some(PriceLevel::Low),
            "medium" => Some(PriceLevel::Medium),
            "high" => Some(PriceLevel::High),
            _ => {
                let euros = value.chars().filter(|c| *c == '€').count();
                if euros == 0 || euros != value.chars().count() {
                    return None;
                }
                Some(match euros {
                    1 => PriceLevel::Low,
                    2 => PriceLevel::Medium,
                    _ => PriceLevel::High,
                })
            }
        }
    }

    /// Position on the low/medium/high scale
    pub fn ordinal(self) -> u8 {
        match self {
            PriceLevel::Low => 0,
            PriceLevel::Medium => 1,
            PriceLevel::High => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PriceLevel::Low => "low",
            PriceLevel::Medium => "medium",
            PriceLevel::High => "high",
        }
    }
}

impl fmt::Display for PriceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PriceLevel::parse(s).ok_or_else(|| {
            format!("invalid price level '{}', expected one of: low, medium, high", s)
        })
    }
}

// Request bodies are strict; stored documents go through `lenient::price_level`.
impl<'de> Deserialize<'de> for PriceLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Geographic position of a place
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// A place in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Assigned by the store on insert and never changed afterwards
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::location")]
    pub location: Option<Location>,
    #[serde(default, deserialize_with = "lenient::price_level")]
    pub price_level: Option<PriceLevel>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient::rating")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub duration: Option<String>,
}

impl Place {
    /// Minimal place with no optional attributes
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            category: category.into(),
            description: None,
            location: None,
            price_level: None,
            tags: Vec::new(),
            rating: None,
            image: None,
            duration: None,
        }
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Price tier used for budget comparison; missing prices count as medium
    pub fn effective_price_level(&self) -> PriceLevel {
        self.price_level.unwrap_or_default()
    }
}

/// Travel preferences used by the recommender
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub interests: Vec<String>,
    #[serde(default, deserialize_with = "lenient::budget")]
    pub budget: PriceLevel,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub travel_style: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// Registered account. Preferences are stored flat on the user document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub password_hash: String,
    #[serde(default, deserialize_with = "lenient::role")]
    pub role: Role,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(flatten)]
    pub preferences: UserPreferences,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Editable part of a user profile
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub travel_style: Option<String>,
    #[serde(default)]
    pub accessibility_needs: Option<String>,
}

/// Stored profile; at most one per user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: String,
    pub user_id: String,
    #[serde(flatten)]
    pub data: ProfileData,
}

/// A place together with its recommendation score. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPlace {
    #[serde(flatten)]
    pub place: Place,
    pub score: f64,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Interest exactly equal to a place tag
    pub tag_match: f64,
    /// Interest only found in the description
    pub description_match: f64,
    /// Place category listed among the interests
    pub category_match: f64,
    /// Budget tier equals price tier
    pub budget_exact: f64,
    /// Budget and price one tier apart
    pub budget_adjacent: f64,
    /// Per place tag shared with the travel style
    pub style_tag: f64,
    /// Place category belongs to the travel style
    pub style_category: f64,
    /// Bonus for a perfect 5.0 rating
    pub rating_max: f64,
    /// Upper bound (exclusive) of the tie-break jitter
    pub jitter_max: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            tag_match: 3.0,
            description_match: 1.0,
            category_match: 3.0,
            budget_exact: 4.0,
            budget_adjacent: 2.0,
            style_tag: 2.0,
            style_category: 2.0,
            rating_max: 2.0,
            jitter_max: 0.3,
        }
    }
}
