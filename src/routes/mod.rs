// Route exports
pub mod admin;
pub mod auth;
pub mod health;
pub mod places;
pub mod profile;
pub mod recommendations;
pub mod users;

use actix_web::web;
use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::{RecommendationSettings, Settings};
use crate::core::Recommender;
use crate::error::{handle_json_payload_error, handle_path_error, handle_query_payload_error};
use crate::services::{Catalog, ImageStore, Stores, UserStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub users: Arc<dyn UserStore>,
    pub tokens: TokenService,
    pub recommender: Recommender,
    pub images: ImageStore,
    pub limits: RecommendationSettings,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn from_settings(settings: &Settings, stores: Stores) -> Self {
        Self {
            catalog: Arc::new(Catalog::new(
                stores.places,
                settings.cache.ttl_secs,
                settings.cache.max_entries,
            )),
            users: stores.users,
            tokens: TokenService::new(&settings.auth.jwt_secret, settings.auth.token_ttl_minutes),
            recommender: Recommender::new(settings.scoring_weights()),
            images: ImageStore::new(
                &settings.uploads.dir,
                &settings.uploads.url_prefix,
                settings.uploads.max_bytes,
            ),
            limits: settings.recommendations.clone(),
            bcrypt_cost: settings.auth.bcrypt_cost,
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
        .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
        .app_data(web::PathConfig::default().error_handler(handle_path_error))
        .configure(health::configure)
        .configure(auth::configure)
        .configure(users::configure)
        .configure(profile::configure)
        .configure(places::configure)
        .configure(recommendations::configure)
        .configure(admin::configure);
}
