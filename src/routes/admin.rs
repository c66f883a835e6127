use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures::TryStreamExt;
use validator::Validate;

use crate::auth::AdminUser;
use crate::error::{AppError, AppResult};
use crate::models::{ImageUploadResponse, PlaceRequest, UserSummary};
use crate::routes::AppState;
use crate::services::{sanitize_filename, UploadError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/places", web::get().to(list_places))
            .route("/places", web::post().to(create_place))
            .route("/places/upload-image", web::post().to(upload_image))
            .route("/places/{id}", web::put().to(update_place))
            .route("/places/{id}", web::delete().to(delete_place))
            .route("/users", web::get().to(list_users)),
    );
}

fn place_not_found() -> AppError {
    AppError::NotFound("Place not found".to_string())
}

async fn list_places(state: web::Data<AppState>, _admin: AdminUser) -> AppResult<HttpResponse> {
    let places = state.catalog.all_places().await?;
    Ok(HttpResponse::Ok().json(places.as_slice()))
}

async fn create_place(
    state: web::Data<AppState>,
    AdminUser(admin): AdminUser,
    req: web::Json<PlaceRequest>,
) -> AppResult<HttpResponse> {
    req.validate()?;

    let created = state.catalog.create(req.into_inner().into_place()).await?;
    tracing::info!("Admin {} created place {} ({})", admin.id, created.id, created.name);

    Ok(HttpResponse::Created().json(created))
}

/// Update a place; optional fields missing from the body keep their stored value
async fn update_place(
    state: web::Data<AppState>,
    AdminUser(admin): AdminUser,
    path: web::Path<String>,
    req: web::Json<PlaceRequest>,
) -> AppResult<HttpResponse> {
    req.validate()?;
    let id = path.into_inner();

    let mut place = state.catalog.get(&id).await?.ok_or_else(place_not_found)?;
    req.into_inner().apply_to(&mut place);

    let updated = state
        .catalog
        .update(&id, place)
        .await?
        .ok_or_else(place_not_found)?;
    tracing::info!("Admin {} updated place {}", admin.id, updated.id);

    Ok(HttpResponse::Ok().json(updated))
}

async fn delete_place(
    state: web::Data<AppState>,
    AdminUser(admin): AdminUser,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    if !state.catalog.delete(&id).await? {
        return Err(place_not_found());
    }
    tracing::info!("Admin {} deleted place {}", admin.id, id);

    Ok(HttpResponse::NoContent().finish())
}

/// Store an uploaded place image
///
/// POST /admin/places/upload-image (multipart, field `file`)
///
/// The returned path is meant to be saved as the place's `image`.
async fn upload_image(
    state: web::Data<AppState>,
    _admin: AdminUser,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    let max_bytes = state.images.max_bytes();

    while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
        let disposition = field.content_disposition();
        let is_file = disposition.and_then(|cd| cd.get_name()) == Some("file");
        let filename = disposition
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        if !is_file {
            // skip unrelated form fields
            while field.try_next().await.map_err(multipart_error)?.is_some() {}
            continue;
        }

        let filename = filename.ok_or(UploadError::MissingFilename)?;
        sanitize_filename(&filename)?;

        let mut contents = web::BytesMut::new();
        while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
            if contents.len() + chunk.len() > max_bytes {
                return Err(UploadError::TooLarge(max_bytes).into());
            }
            contents.extend_from_slice(&chunk);
        }

        let image = state.images.save(&filename, &contents).await?;
        return Ok(HttpResponse::Ok().json(ImageUploadResponse { image }));
    }

    Err(UploadError::MissingFile.into())
}

fn multipart_error(err: actix_multipart::MultipartError) -> AppError {
    UploadError::Multipart(err.to_string()).into()
}

async fn list_users(state: web::Data<AppState>, _admin: AdminUser) -> AppResult<HttpResponse> {
    let users: Vec<UserSummary> = state
        .users
        .list_users()
        .await?
        .into_iter()
        .map(UserSummary::from)
        .collect();

    Ok(HttpResponse::Ok().json(users))
}
