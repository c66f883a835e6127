// Model exports
pub mod domain;
pub mod lenient;
pub mod requests;
pub mod responses;

pub use domain::{Location, Place, PriceLevel, Profile, ProfileData, Role, ScoredPlace, ScoringWeights, User, UserPreferences};
pub use requests::{LoginRequest, PlaceRequest, PreferencesRequest, ProfileRequest, RecommendationsQuery, RegisterRequest};
pub use responses::{ErrorResponse, HealthResponse, ImageUploadResponse, RecommendationsResponse, RegisterResponse, TokenResponse, UserResponse, UserSummary};
