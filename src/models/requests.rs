use serde::{Deserialize, Serialize};
use validator::Validate;

use super::domain::{Location, Place, PriceLevel, ProfileData, UserPreferences};

/// Request to register a new account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

/// Login credentials
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Replacement travel preferences for the current user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PreferencesRequest {
    #[serde(default)]
    #[validate(length(max = 50))]
    pub interests: Vec<String>,
    #[serde(default)]
    pub budget: Option<PriceLevel>,
    #[serde(default, alias = "travelStyle")]
    #[validate(length(max = 50))]
    pub travel_style: Option<String>,
}

impl PreferencesRequest {
    pub fn into_preferences(self) -> UserPreferences {
        let interests = self
            .interests
            .into_iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect();

        let travel_style = self
            .travel_style
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        UserPreferences {
            interests,
            budget: self.budget.unwrap_or_default(),
            travel_style,
        }
    }
}

/// Create or update a place (admin)
///
/// On update, `name` and `category` always overwrite; the optional fields
/// only overwrite when present.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlaceRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub price_level: Option<PriceLevel>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

impl PlaceRequest {
    /// Build a new place; the store assigns the id
    pub fn into_place(self) -> Place {
        let mut place = Place::new(String::new(), String::new());
        self.apply_to(&mut place);
        place
    }

    /// Merge this request into an existing place
    pub fn apply_to(self, place: &mut Place) {
        place.name = self.name.trim().to_string();
        place.category = self.category.trim().to_string();

        if let Some(description) = self.description {
            place.description = Some(description);
        }
        if let Some(location) = self.location {
            place.location = Some(location);
        }
        if let Some(price_level) = self.price_level {
            place.price_level = Some(price_level);
        }
        if let Some(tags) = self.tags {
            place.tags = tags;
        }
        if let Some(rating) = self.rating {
            place.rating = Some(rating);
        }
        if let Some(image) = self.image {
            place.image = Some(image);
        }
        if let Some(duration) = self.duration {
            place.duration = Some(duration);
        }
    }
}

/// Create or update the current user's profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfileRequest {
    #[serde(default)]
    #[validate(length(max = 100))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(range(max = 130))]
    pub age: Option<u32>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub travel_style: Option<String>,
    #[serde(default)]
    pub accessibility_needs: Option<String>,
}

impl From<ProfileRequest> for ProfileData {
    fn from(req: ProfileRequest) -> Self {
        Self {
            name: req.name,
            age: req.age,
            nationality: req.nationality,
            travel_style: req.travel_style,
            accessibility_needs: req.accessibility_needs,
        }
    }
}

/// Query string of the recommendations endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationsQuery {
    pub limit: Option<usize>,
}
