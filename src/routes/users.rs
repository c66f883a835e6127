use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::auth::{AuthError, AuthenticatedUser};
use crate::error::AppResult;
use crate::models::{PreferencesRequest, UserResponse};
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("/me", web::get().to(me))
            .route("/me/preferences", web::put().to(update_preferences)),
    );
}

async fn me(AuthenticatedUser(user): AuthenticatedUser) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// Replace the current user's travel preferences
///
/// PUT /users/me/preferences
///
/// Request body:
/// ```json
/// { "interests": ["beach"], "budget": "low", "travel_style": "relaxed" }
/// ```
async fn update_preferences(
    state: web::Data<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    req: web::Json<PreferencesRequest>,
) -> AppResult<HttpResponse> {
    req.validate()?;
    let preferences = req.into_inner().into_preferences();

    let updated = state
        .users
        .update_preferences(&user.id, &preferences)
        .await?
        .ok_or(AuthError::UnknownUser)?;

    tracing::info!(
        "Updated preferences for user {} ({} interests, budget {})",
        updated.id,
        updated.preferences.interests.len(),
        updated.preferences.budget
    );

    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}
