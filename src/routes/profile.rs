use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::error::{AppError, AppResult};
use crate::models::{ProfileData, ProfileRequest};
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profile")
            .route("/me", web::get().to(get_profile))
            .route("/me", web::put().to(upsert_profile)),
    );
}

async fn get_profile(
    state: web::Data<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let profile = state
        .users
        .find_profile(&user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    Ok(HttpResponse::Ok().json(profile))
}

/// Create or update the current user's profile
///
/// A non-empty travel style is copied onto the user so recommendations pick
/// it up. That copy is best effort; the profile write still succeeds.
async fn upsert_profile(
    state: web::Data<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    req: web::Json<ProfileRequest>,
) -> AppResult<HttpResponse> {
    req.validate()?;
    let data = ProfileData::from(req.into_inner());

    let profile = state.users.upsert_profile(&user.id, &data).await?;
    tracing::info!("Saved profile {} for user {}", profile.id, user.id);

    if let Some(style) = data.travel_style.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        if let Err(e) = state.users.set_travel_style(&user.id, style).await {
            tracing::warn!("Failed to sync travel style onto user {}: {}", user.id, e);
        }
    }

    Ok(HttpResponse::Ok().json(profile))
}
