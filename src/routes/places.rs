use actix_web::{web, HttpResponse};

use crate::error::{AppError, AppResult};
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/places")
            .route("", web::get().to(list_places))
            .route("/{id}", web::get().to(get_place)),
    );
}

async fn list_places(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let places = state.catalog.all_places().await?;
    tracing::debug!("Listing {} places", places.len());

    Ok(HttpResponse::Ok().json(places.as_slice()))
}

async fn get_place(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let place = state
        .catalog
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Place not found".to_string()))?;

    Ok(HttpResponse::Ok().json(place))
}
