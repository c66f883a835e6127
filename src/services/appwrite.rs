use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

use crate::models::{Place, Profile, ProfileData, User, UserPreferences};
use crate::services::store::{validate_document_id, PlaceStore, StoreError, UserStore};

/// Upper bound on documents fetched by a single list call
const MAX_LIST_LIMIT: usize = 1000;

/// Appwrite document store client
///
/// Handles all communication with the Appwrite databases API including:
/// - The places catalog
/// - User accounts and their travel preferences
/// - User profiles
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub places: String,
    pub users: String,
    pub profiles: String,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        })
    }

    fn documents_url(&self, collection: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection
        )
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}", self.documents_url(collection), id)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
    }

    /// List documents of a collection matching all `queries`
    async fn list_documents(
        &self,
        collection: &str,
        mut queries: Vec<Value>,
    ) -> Result<Vec<Value>, StoreError> {
        queries.push(query_limit(MAX_LIST_LIMIT));

        let params = queries
            .iter()
            .map(|q| format!("queries%5B%5D={}", urlencoding::encode(&q.to_string())))
            .collect::<Vec<_>>()
            .join("&");
        let url = format!("{}?{}", self.documents_url(collection), params);

        tracing::debug!("Listing documents from: {}", url);

        let response = self.request(Method::GET, &url).send().await?;

        if !response.status().is_success() {
            return Err(error_for_status(response.status(), "list documents"));
        }

        let mut json: Value = response.json().await?;

        let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0);

        let documents = match json.get_mut("documents").map(Value::take) {
            Some(Value::Array(documents)) => documents,
            _ => {
                return Err(StoreError::InvalidResponse(
                    "Missing documents array".into(),
                ))
            }
        };

        tracing::debug!(
            "Listed {} documents from {} (total: {})",
            documents.len(),
            collection,
            total
        );

        Ok(documents)
    }

    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        validate_document_id(id)?;

        let response = self
            .request(Method::GET, &self.document_url(collection, id))
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            status => Err(error_for_status(status, "get document")),
        }
    }

    async fn create_document(&self, collection: &str, data: Value) -> Result<Value, StoreError> {
        let payload = json!({
            "documentId": uuid::Uuid::new_v4().simple().to_string(),
            "data": data,
        });

        let response = self
            .request(Method::POST, &self.documents_url(collection))
            .json(&payload)
            .send()
            .await?;

        match response.status() {
            StatusCode::CONFLICT => Err(StoreError::Conflict(format!(
                "Document already exists in {}",
                collection
            ))),
            status if status.is_success() => Ok(response.json().await?),
            status => Err(error_for_status(status, "create document")),
        }
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        data: Value,
    ) -> Result<Option<Value>, StoreError> {
        validate_document_id(id)?;

        let response = self
            .request(Method::PATCH, &self.document_url(collection, id))
            .json(&json!({ "data": data }))
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            status => Err(error_for_status(status, "update document")),
        }
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        validate_document_id(id)?;

        let response = self
            .request(Method::DELETE, &self.document_url(collection, id))
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(error_for_status(status, "delete document")),
        }
    }
}

fn query_equal(attribute: &str, value: &str) -> Value {
    json!({ "method": "equal", "attribute": attribute, "values": [value] })
}

fn query_limit(limit: usize) -> Value {
    json!({ "method": "limit", "values": [limit] })
}

fn error_for_status(status: StatusCode, action: &str) -> StoreError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::Unauthorized,
        _ => StoreError::ApiError(format!("Failed to {}: {}", action, status)),
    }
}

/// Convert an Appwrite document into a model, exposing `$id` as `id`
fn decode<T: DeserializeOwned>(doc: Value) -> Result<T, StoreError> {
    let mut data = match doc.get("data") {
        Some(inner) if inner.is_object() => inner.clone(),
        _ => doc,
    };

    if let Some(obj) = data.as_object_mut() {
        if let Some(id) = obj.get("$id").cloned() {
            obj.insert("id".to_string(), id);
        }
    }

    serde_json::from_value(data)
        .map_err(|e| StoreError::InvalidResponse(format!("Failed to parse document: {}", e)))
}

/// Serialize a model as document data; the id lives in the document path
fn encode<T: Serialize>(value: &T) -> Result<Value, StoreError> {
    let mut data = serde_json::to_value(value)?;
    if let Some(obj) = data.as_object_mut() {
        obj.remove("id");
    }
    Ok(data)
}

#[async_trait]
impl PlaceStore for AppwriteClient {
    async fn find_all(&self) -> Result<Vec<Place>, StoreError> {
        let documents = self
            .list_documents(&self.collections.places, Vec::new())
            .await?;

        // Skip documents that are not places at all rather than failing the catalog
        let places: Vec<Place> = documents
            .into_iter()
            .filter_map(|doc| match decode(doc) {
                Ok(place) => Some(place),
                Err(e) => {
                    tracing::warn!("Skipping malformed place document: {}", e);
                    None
                }
            })
            .collect();

        Ok(places)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Place>, StoreError> {
        self.get_document(&self.collections.places, id)
            .await?
            .map(decode)
            .transpose()
    }

    async fn insert(&self, place: Place) -> Result<Place, StoreError> {
        let doc = self
            .create_document(&self.collections.places, encode(&place)?)
            .await?;

        let created: Place = decode(doc)?;
        tracing::debug!("Created place {} ({})", created.id, created.name);
        Ok(created)
    }

    async fn update_by_id(&self, id: &str, place: Place) -> Result<Option<Place>, StoreError> {
        self.update_document(&self.collections.places, id, encode(&place)?)
            .await?
            .map(decode)
            .transpose()
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        self.delete_document(&self.collections.places, id).await
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        self.list_documents(&self.collections.places, vec![query_limit(1)])
            .await
            .map(|_| true)
    }
}

#[async_trait]
impl UserStore for AppwriteClient {
    async fn insert_user(&self, user: User) -> Result<User, StoreError> {
        if UserStore::find_by_email(self, &user.email).await?.is_some() {
            return Err(StoreError::Conflict(format!(
                "User {} already exists",
                user.email
            )));
        }

        let doc = self
            .create_document(&self.collections.users, encode(&user)?)
            .await?;
        decode(doc)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.list_documents(&self.collections.users, vec![query_equal("email", email)])
            .await?
            .into_iter()
            .next()
            .map(decode)
            .transpose()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        self.get_document(&self.collections.users, id)
            .await?
            .map(decode)
            .transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let users = self
            .list_documents(&self.collections.users, Vec::new())
            .await?
            .into_iter()
            .filter_map(|doc| match decode(doc) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!("Skipping malformed user document: {}", e);
                    None
                }
            })
            .collect();

        Ok(users)
    }

    async fn update_preferences(
        &self,
        id: &str,
        preferences: &UserPreferences,
    ) -> Result<Option<User>, StoreError> {
        self.update_document(&self.collections.users, id, encode(preferences)?)
            .await?
            .map(decode)
            .transpose()
    }

    async fn set_travel_style(&self, id: &str, travel_style: &str) -> Result<(), StoreError> {
        let updated = self
            .update_document(
                &self.collections.users,
                id,
                json!({ "travel_style": travel_style }),
            )
            .await?;

        match updated {
            Some(_) => Ok(()),
            None => Err(StoreError::ApiError(format!("User {} not found", id))),
        }
    }

    async fn find_profile(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        self.list_documents(
            &self.collections.profiles,
            vec![query_equal("user_id", user_id)],
        )
        .await?
        .into_iter()
        .next()
        .map(decode)
        .transpose()
    }

    async fn upsert_profile(&self, user_id: &str, data: &ProfileData) -> Result<Profile, StoreError> {
        let profile = Profile {
            id: String::new(),
            user_id: user_id.to_string(),
            data: data.clone(),
        };
        let payload = encode(&profile)?;

        if let Some(existing) = self.find_profile(user_id).await? {
            let updated = self
                .update_document(&self.collections.profiles, &existing.id, payload)
                .await?
                .ok_or_else(|| {
                    StoreError::ApiError(format!("Profile {} disappeared during update", existing.id))
                })?;
            return decode(updated);
        }

        let doc = self
            .create_document(&self.collections.profiles, payload)
            .await?;
        decode(doc)
    }
}
