use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Place, Profile, ProfileData, User, UserPreferences};

/// Errors that can occur when talking to the document store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Store returned error: {0}")]
    ApiError(String),

    #[error("Invalid document id: {0}")]
    InvalidId(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: invalid API key or project")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Store misconfigured: {0}")]
    Misconfigured(String),
}

/// Maximum length of a document id
pub const MAX_ID_LEN: usize = 36;

/// Check that an id is a well-formed document id
///
/// Ids are 1-36 characters of `a-z A-Z 0-9 . - _` and may not start with a
/// special character.
pub fn validate_document_id(id: &str) -> Result<(), StoreError> {
    let valid_chars = id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
    let valid_start = id.chars().next().is_some_and(|c| c.is_ascii_alphanumeric());

    if id.len() > MAX_ID_LEN || !valid_chars || !valid_start {
        return Err(StoreError::InvalidId(id.to_string()));
    }
    Ok(())
}

/// Places collection
///
/// `insert` assigns the id; any id on the input is discarded.
/// `update_by_id` replaces the stored document and keeps the path id.
#[async_trait]
pub trait PlaceStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Place>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Place>, StoreError>;

    async fn insert(&self, place: Place) -> Result<Place, StoreError>;

    async fn update_by_id(&self, id: &str, place: Place) -> Result<Option<Place>, StoreError>;

    /// Returns whether a document was deleted
    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

/// Users and their profiles
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `StoreError::Conflict` when the email is taken
    async fn insert_user(&self, user: User) -> Result<User, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    async fn update_preferences(
        &self,
        id: &str,
        preferences: &UserPreferences,
    ) -> Result<Option<User>, StoreError>;

    async fn set_travel_style(&self, id: &str, travel_style: &str) -> Result<(), StoreError>;

    async fn find_profile(&self, user_id: &str) -> Result<Option<Profile>, StoreError>;

    async fn upsert_profile(&self, user_id: &str, data: &ProfileData) -> Result<Profile, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_document_id() {
        assert!(validate_document_id("65a1f0c2e4b0").is_ok());
        assert!(validate_document_id("place_1.v2-x").is_ok());
        assert!(validate_document_id("").is_err());
        assert!(validate_document_id("_hidden").is_err());
        assert!(validate_document_id("has space").is_err());
        assert!(validate_document_id("../../etc").is_err());
        assert!(validate_document_id(&"a".repeat(37)).is_err());
    }
}
