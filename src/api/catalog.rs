//! Service catalog API handlers (`/services`)

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::models::service::{CreateService, UpdateService};

pub async fn list_services(State(state): State<AppState>) -> impl IntoResponse {
    match state.service_repo.find_all().await {
        Ok(services) => Json(services).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.service_repo.find_by_id(id).await {
        Ok(Some(service)) => Json(service).into_response(),
        Ok(None) => DomainError::NotFound.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create_service(
    State(state): State<AppState>,
    Json(payload): Json<CreateService>,
) -> impl IntoResponse {
    match state.service_repo.create(payload).await {
        Ok(service) => (StatusCode::CREATED, Json(service)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateService>,
) -> impl IntoResponse {
    match state.service_repo.update(id, payload).await {
        Ok(service) => Json(service).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.service_repo.delete(id).await {
        Ok(()) => Json(json!({"message": "Service supprimé"})).into_response(),
        Err(e) => e.into_response(),
    }
}
