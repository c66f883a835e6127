use actix_cors::Cors;
use actix_files::Files;
use actix_web::{middleware, web, App, HttpServer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use trip_buddy::config::{LoggingSettings, Settings};
use trip_buddy::routes::{self, AppState};
use trip_buddy::services::{build_stores, seed_if_empty};

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging);

    info!("Starting Trip Buddy API...");
    info!("Configuration loaded successfully");

    let stores = build_stores(&settings)
        .map_err(|e| startup_error("Failed to initialize document store", e))?;

    if settings.catalog.seed_on_start {
        match seed_if_empty(stores.places.as_ref()).await {
            Ok(0) => {}
            Ok(count) => info!("Seeded catalog with {} places", count),
            Err(e) => return Err(startup_error("Failed to seed catalog", e)),
        }
    }

    let app_state = AppState::from_settings(&settings, stores);

    app_state
        .images
        .ensure_dir()
        .map_err(|e| startup_error("Failed to create upload directory", e))?;

    info!(
        "Recommender initialized with weights: {:?}",
        app_state.recommender.weights()
    );

    let upload_dir = app_state.images.dir().to_path_buf();
    let upload_prefix = app_state.images.url_prefix().to_string();

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(middleware::NormalizePath::trim())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .service(Files::new(&upload_prefix, upload_dir.clone()))
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
