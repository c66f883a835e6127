// Service exports
pub mod appwrite;
pub mod catalog;
pub mod memory;
pub mod seed;
pub mod store;
pub mod uploads;

pub use appwrite::{AppwriteClient, AppwriteCollections};
pub use catalog::Catalog;
pub use memory::MemoryStore;
pub use seed::{malta_places, seed_if_empty};
pub use store::{validate_document_id, PlaceStore, StoreError, UserStore};
pub use uploads::{sanitize_filename, ImageStore, UploadError};

use std::sync::Arc;

use crate::config::{Settings, StoreBackend};

/// Store handles shared by every worker
#[derive(Clone)]
pub struct Stores {
    pub places: Arc<dyn PlaceStore>,
    pub users: Arc<dyn UserStore>,
}

impl Stores {
    /// Both collections backed by one in-memory store
    pub fn in_memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            places: store.clone(),
            users: store,
        }
    }
}

/// Build the configured document store
pub fn build_stores(settings: &Settings) -> Result<Stores, StoreError> {
    match settings.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on restart");
            Ok(Stores::in_memory(MemoryStore::new()))
        }
        StoreBackend::Appwrite => {
            let appwrite = settings.appwrite.as_ref().ok_or_else(|| {
                StoreError::Misconfigured("missing [appwrite] section".to_string())
            })?;

            let client = Arc::new(AppwriteClient::new(
                appwrite.endpoint.clone(),
                appwrite.api_key.clone(),
                appwrite.project_id.clone(),
                appwrite.database_id.clone(),
                AppwriteCollections {
                    places: settings.collection.places.clone(),
                    users: settings.collection.users.clone(),
                    profiles: settings.collection.profiles.clone(),
                },
            )?);

            tracing::info!("Appwrite client initialized ({})", appwrite.endpoint);

            Ok(Stores {
                places: client.clone(),
                users: client,
            })
        }
    }
}
