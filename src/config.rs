use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub store: StoreSettings,
    pub appwrite: Option<AppwriteSettings>,
    #[serde(default)]
    pub collection: CollectionSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub recommendations: RecommendationSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub uploads: UploadSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Which document store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Appwrite,
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppwriteSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    #[serde(default = "default_places_collection")]
    pub places: String,
    #[serde(default = "default_users_collection")]
    pub users: String,
    #[serde(default = "default_profiles_collection")]
    pub profiles: String,
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            places: default_places_collection(),
            users: default_users_collection(),
            profiles: default_profiles_collection(),
        }
    }
}

fn default_places_collection() -> String { "places".to_string() }
fn default_users_collection() -> String { "users".to_string() }
fn default_profiles_collection() -> String { "profiles".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

fn default_token_ttl_minutes() -> i64 { 1440 }
fn default_bcrypt_cost() -> u32 { bcrypt::DEFAULT_COST }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl_secs(),
            max_entries: default_cache_max_entries(),
        }
    }
}

fn default_cache_ttl_secs() -> u64 { 60 }
fn default_cache_max_entries() -> u64 { 16 }

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSettings {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> usize { 5 }
fn default_max_limit() -> usize { 20 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_tag_match_weight")]
    pub tag_match: f64,
    #[serde(default = "default_description_match_weight")]
    pub description_match: f64,
    #[serde(default = "default_category_match_weight")]
    pub category_match: f64,
    #[serde(default = "default_budget_exact_weight")]
    pub budget_exact: f64,
    #[serde(default = "default_budget_adjacent_weight")]
    pub budget_adjacent: f64,
    #[serde(default = "default_style_tag_weight")]
    pub style_tag: f64,
    #[serde(default = "default_style_category_weight")]
    pub style_category: f64,
    #[serde(default = "default_rating_max_weight")]
    pub rating_max: f64,
    #[serde(default = "default_jitter_max")]
    pub jitter_max: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            tag_match: default_tag_match_weight(),
            description_match: default_description_match_weight(),
            category_match: default_category_match_weight(),
            budget_exact: default_budget_exact_weight(),
            budget_adjacent: default_budget_adjacent_weight(),
            style_tag: default_style_tag_weight(),
            style_category: default_style_category_weight(),
            rating_max: default_rating_max_weight(),
            jitter_max: default_jitter_max(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            tag_match: config.tag_match,
            description_match: config.description_match,
            category_match: config.category_match,
            budget_exact: config.budget_exact,
            budget_adjacent: config.budget_adjacent,
            style_tag: config.style_tag,
            style_category: config.style_category,
            rating_max: config.rating_max,
            jitter_max: if config.jitter_max.is_finite() {
                config.jitter_max.max(0.0)
            } else {
                0.0
            },
        }
    }
}

fn default_tag_match_weight() -> f64 { 3.0 }
fn default_description_match_weight() -> f64 { 1.0 }
fn default_category_match_weight() -> f64 { 3.0 }
fn default_budget_exact_weight() -> f64 { 4.0 }
fn default_budget_adjacent_weight() -> f64 { 2.0 }
fn default_style_tag_weight() -> f64 { 2.0 }
fn default_style_category_weight() -> f64 { 2.0 }
fn default_rating_max_weight() -> f64 { 2.0 }
fn default_jitter_max() -> f64 { 0.3 }

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    #[serde(default = "default_upload_dir")]
    pub dir: String,
    #[serde(default = "default_upload_url_prefix")]
    pub url_prefix: String,
    #[serde(default = "default_upload_max_bytes")]
    pub max_bytes: usize,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            url_prefix: default_upload_url_prefix(),
            max_bytes: default_upload_max_bytes(),
        }
    }
}

fn default_upload_dir() -> String { "static/places".to_string() }
fn default_upload_url_prefix() -> String { "/static/places".to_string() }
fn default_upload_max_bytes() -> usize { 5 * 1024 * 1024 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    #[serde(default)]
    pub seed_on_start: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with TRIP__)
    /// 5. JWT_SECRET, APPWRITE_API_KEY and APPWRITE_ENDPOINT
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., TRIP__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("TRIP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_plain_env_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("TRIP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_plain_env_overrides(settings)?.try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}

/// Apply the unprefixed variables commonly set by deployment tooling
fn apply_plain_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let overrides = [
        ("JWT_SECRET", "auth.jwt_secret"),
        ("APPWRITE_API_KEY", "appwrite.api_key"),
        ("APPWRITE_ENDPOINT", "appwrite.endpoint"),
    ];

    let mut builder = Config::builder().add_source(settings);
    for (var, key) in overrides {
        if let Ok(value) = env::var(var) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_weights() {
        let weights = ScoringWeights::from(&WeightsConfig::default());
        assert_eq!(weights, ScoringWeights::default());
    }

    #[test]
    fn test_negative_jitter_clamped() {
        let config = WeightsConfig {
            jitter_max: -1.0,
            ..WeightsConfig::default()
        };
        assert_eq!(ScoringWeights::from(&config).jitter_max, 0.0);
    }

    #[test]
    fn test_non_finite_jitter_disabled() {
        for jitter_max in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let config = WeightsConfig {
                jitter_max,
                ..WeightsConfig::default()
            };
            assert_eq!(ScoringWeights::from(&config).jitter_max, 0.0);
        }
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "compact");
    }

    #[test]
    fn test_load_from_minimal_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
host = "127.0.0.1"
port = 8000

[store]
backend = "memory"

[auth]
jwt_secret = "file-secret"

[recommendations]
max_limit = 10
"#
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();

        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.store.backend, StoreBackend::Memory);
        assert!(settings.appwrite.is_none());
        assert_eq!(settings.auth.token_ttl_minutes, 1440);
        assert_eq!(settings.recommendations.default_limit, 5);
        assert_eq!(settings.recommendations.max_limit, 10);
        assert_eq!(settings.collection.places, "places");
        assert_eq!(settings.uploads.url_prefix, "/static/places");
        assert_eq!(settings.cache.ttl_secs, 60);
    }
}
