use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::auth::{hash_password, verify_password, AuthError};
use crate::error::{AppError, AppResult};
use crate::models::{
    LoginRequest, RegisterRequest, RegisterResponse, Role, TokenResponse, User, UserPreferences,
};
use crate::routes::AppState;
use crate::services::StoreError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login)),
    );
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Register a new account
///
/// POST /auth/register
///
/// Request body:
/// ```json
/// { "name": "string", "email": "string", "password": "string" }
/// ```
async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let mut req = req.into_inner();
    req.email = normalize_email(&req.email);
    req.validate()?;

    let cost = state.bcrypt_cost;
    let password = req.password;
    let password_hash = web::block(move || hash_password(&password, cost)).await??;

    let user = User {
        id: String::new(),
        name: Some(req.name.trim().to_string()),
        email: req.email,
        password_hash,
        role: Role::User,
        created_at: Some(chrono::Utc::now()),
        preferences: UserPreferences::default(),
    };

    let created = match state.users.insert_user(user).await {
        Ok(created) => created,
        Err(StoreError::Conflict(_)) => {
            tracing::info!("Registration rejected, email already in use");
            return Err(AppError::BadRequest("User already exists".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!("Registered user {}", created.id);

    Ok(HttpResponse::Created().json(RegisterResponse {
        status: "success".to_string(),
        user_id: created.id,
    }))
}

/// Exchange credentials for a bearer token
///
/// POST /auth/login
async fn login(state: web::Data<AppState>, req: web::Json<LoginRequest>) -> AppResult<HttpResponse> {
    let req = req.into_inner();

    let Some(user) = state.users.find_by_email(&normalize_email(&req.email)).await? else {
        return Err(AuthError::InvalidCredentials.into());
    };

    let password = req.password;
    let stored_hash = user.password_hash.clone();
    let matches = web::block(move || verify_password(&password, &stored_hash)).await?;

    if !matches {
        tracing::info!("Failed login for user {}", user.id);
        return Err(AuthError::InvalidCredentials.into());
    }

    let access_token = state.tokens.issue(&user.id)?;
    tracing::info!("User {} logged in", user.id);

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
