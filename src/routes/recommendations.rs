use actix_web::{web, HttpResponse};

use crate::auth::AuthenticatedUser;
use crate::error::{AppError, AppResult};
use crate::models::{RecommendationsQuery, RecommendationsResponse};
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/recommendations", web::get().to(recommend_places));
}

/// Rank the catalog for the current user
///
/// GET /recommendations?limit=5
async fn recommend_places(
    state: web::Data<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    query: web::Query<RecommendationsQuery>,
) -> AppResult<HttpResponse> {
    let max_limit = state.limits.max_limit;
    let limit = query.limit.unwrap_or(state.limits.default_limit);

    if limit == 0 || limit > max_limit {
        return Err(AppError::BadRequest(format!(
            "limit must be between 1 and {}",
            max_limit
        )));
    }

    let places = state.catalog.all_places().await?;
    let recommendations = state
        .recommender
        .rank(&places, &user.preferences, limit)?;

    tracing::debug!(
        "Recommended {} of {} places for user {}",
        recommendations.len(),
        places.len(),
        user.id
    );

    Ok(HttpResponse::Ok().json(RecommendationsResponse { recommendations }))
}
