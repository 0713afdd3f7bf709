use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::infrastructure::auth::{Claims, create_jwt, hash_password, verify_password};
use crate::utils::patch::non_blank;

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

fn invalid_credentials() -> axum::response::Response {
    DomainError::Unauthorized("Identifiants invalides".into()).into_response()
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    responses(
        (status = 200, description = "Session token issued"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    tracing::info!("Login attempt for: {}", payload.email);

    let user = match state.user_repo.find_by_email(payload.email.trim()).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            tracing::warn!("Unknown account: {}", payload.email);
            return invalid_credentials();
        }
        Err(e) => return e.into_response(),
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => match create_jwt(&user.email, &user.role) {
            Ok(token) => (
                StatusCode::OK,
                Json(json!({ "token": token, "user": user })),
            )
                .into_response(),
            Err(e) => DomainError::Database(e).into_response(),
        },
        _ => {
            tracing::warn!("Password verification failed for: {}", user.email);
            invalid_credentials()
        }
    }
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
    role: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    responses(
        (status = 201, description = "Account created"),
        (status = 400, description = "Missing field or email already used")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    let Some(email) = non_blank(Some(payload.email)) else {
        return DomainError::validation("email est requis").into_response();
    };
    if payload.password.is_empty() {
        return DomainError::validation("password est requis").into_response();
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(hash) => hash,
        Err(e) => return DomainError::Database(e).into_response(),
    };
    let role = non_blank(payload.role).unwrap_or_else(|| "staff".to_string());

    match state.user_repo.create(email, password_hash, role).await {
        Ok(user) => (StatusCode::CREATED, Json(json!({ "user": user }))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn me(State(state): State<AppState>, claims: Claims) -> impl IntoResponse {
    match state.user_repo.find_by_email(&claims.sub).await {
        Ok(Some(user)) => Json(json!({ "user": user })).into_response(),
        Ok(None) => DomainError::NotFound.into_response(),
        Err(e) => e.into_response(),
    }
}
