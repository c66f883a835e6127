use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Place, Profile, ProfileData, User, UserPreferences};
use crate::services::store::{validate_document_id, PlaceStore, StoreError, UserStore};

/// In-process document store
///
/// Keeps every collection in insertion order, so listings come back the way
/// they were written. Used for local development and the HTTP tests.
#[derive(Default)]
pub struct MemoryStore {
    places: RwLock<Vec<Place>>,
    users: RwLock<Vec<User>>,
    profiles: RwLock<Vec<Profile>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with places; their ids are kept when well-formed
    pub fn with_places(places: Vec<Place>) -> Self {
        let places = places
            .into_iter()
            .map(|mut place| {
                if validate_document_id(&place.id).is_err() {
                    place.id = new_id();
                }
                place
            })
            .collect();

        Self {
            places: RwLock::new(places),
            ..Self::default()
        }
    }
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[async_trait]
impl PlaceStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Place>, StoreError> {
        Ok(self.places.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Place>, StoreError> {
        validate_document_id(id)?;
        let places = self.places.read().await;
        Ok(places.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, mut place: Place) -> Result<Place, StoreError> {
        place.id = new_id();
        self.places.write().await.push(place.clone());
        Ok(place)
    }

    async fn update_by_id(&self, id: &str, mut place: Place) -> Result<Option<Place>, StoreError> {
        validate_document_id(id)?;
        let mut places = self.places.write().await;

        let Some(slot) = places.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        place.id = id.to_string();
        *slot = place.clone();
        Ok(Some(place))
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        validate_document_id(id)?;
        let mut places = self.places.write().await;

        let before = places.len();
        places.retain(|p| p.id != id);
        Ok(places.len() != before)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, mut user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(format!(
                "User {} already exists",
                user.email
            )));
        }

        user.id = new_id();
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        validate_document_id(id)?;
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.clone())
    }

    async fn update_preferences(
        &self,
        id: &str,
        preferences: &UserPreferences,
    ) -> Result<Option<User>, StoreError> {
        validate_document_id(id)?;
        let mut users = self.users.write().await;

        Ok(users.iter_mut().find(|u| u.id == id).map(|user| {
            user.preferences = preferences.clone();
            user.clone()
        }))
    }

    async fn set_travel_style(&self, id: &str, travel_style: &str) -> Result<(), StoreError> {
        validate_document_id(id)?;
        let mut users = self.users.write().await;

        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.preferences.travel_style = Some(travel_style.to_string());
                Ok(())
            }
            None => Err(StoreError::ApiError(format!("User {} not found", id))),
        }
    }

    async fn find_profile(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.iter().find(|p| p.user_id == user_id).cloned())
    }

    async fn upsert_profile(&self, user_id: &str, data: &ProfileData) -> Result<Profile, StoreError> {
        let mut profiles = self.profiles.write().await;

        if let Some(existing) = profiles.iter_mut().find(|p| p.user_id == user_id) {
            existing.data = data.clone();
            return Ok(existing.clone());
        }

        let profile = Profile {
            id: new_id(),
            user_id: user_id.to_string(),
            data: data.clone(),
        };
        profiles.push(profile.clone());
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_user(email: &str) -> User {
        User {
            id: String::new(),
            name: Some("Test".to_string()),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: Default::default(),
            created_at: None,
            preferences: UserPreferences::default(),
        }
    }

    #[tokio::test]
    async fn test_place_crud() {
        let store = MemoryStore::new();

        let created = store.insert(Place::new("Mdina", "culture")).await.unwrap();
        assert!(!created.id.is_empty());

        let found = PlaceStore::find_by_id(&store, &created.id).await.unwrap();
        assert_eq!(found.as_ref().map(|p| p.name.as_str()), Some("Mdina"));

        let mut changed = Place::new("Mdina Old City", "culture");
        changed.id = "ignored".to_string();
        let updated = store
            .update_by_id(&created.id, changed)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, created.id);

        assert!(store.delete_by_id(&created.id).await.unwrap());
        assert!(!store.delete_by_id(&created.id).await.unwrap());
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_listing_keeps_insertion_order() {
        let store = MemoryStore::new();
        for name in ["a", "b", "c"] {
            store.insert(Place::new(name, "beach")).await.unwrap();
        }

        let names: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        store.insert_user(create_user("a@b.mt")).await.unwrap();

        let result = store.insert_user(create_user("a@b.mt")).await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_profile_upsert_keeps_one_per_user() {
        let store = MemoryStore::new();
        let mut data = ProfileData {
            age: Some(30),
            ..Default::default()
        };

        let first = store.upsert_profile("u1", &data).await.unwrap();
        data.age = Some(31);
        let second = store.upsert_profile("u1", &data).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(
            store.find_profile("u1").await.unwrap().unwrap().data.age,
            Some(31)
        );
    }

    #[tokio::test]
    async fn test_invalid_id_rejected() {
        let store = MemoryStore::new();
        let result = PlaceStore::find_by_id(&store, "../etc").await;
        assert!(matches!(result, Err(StoreError::InvalidId(_))));
    }
}
