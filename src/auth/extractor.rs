use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;

use super::jwt::AuthError;
use crate::error::AppError;
use crate::models::User;
use crate::routes::AppState;
use crate::services::StoreError;

/// The user resolved from a valid bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// An authenticated user holding the admin role
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

/// Token from an `Authorization: Bearer <token>` header
pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token)
}

async fn authenticate(req: &HttpRequest) -> Result<User, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::Internal("application state not configured".to_string()))?;

    let token = bearer_token(req).ok_or(AuthError::MissingToken)?;
    let claims = state.tokens.verify(token).map_err(|e| {
        tracing::debug!("Rejected bearer token: {}", e);
        e
    })?;

    match state.users.find_by_id(&claims.sub).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) | Err(StoreError::InvalidId(_)) => Err(AuthError::UnknownUser.into()),
        Err(e) => Err(e.into()),
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { authenticate(&req).await.map(AuthenticatedUser) })
    }
}

impl FromRequest for AdminUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let user = authenticate(&req).await?;
            if !user.is_admin() {
                tracing::info!("Non-admin user {} denied on {}", user.id, req.path());
                return Err(AuthError::Forbidden.into());
            }
            Ok(AdminUser(user))
        })
    }
}
