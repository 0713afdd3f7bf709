//! Standalone treatment (soin) API handlers

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
use crate::models::soin::{CreateSoin, UpdateSoin};

pub async fn list_soins(State(state): State<AppState>) -> impl IntoResponse {
    match state.soin_repo.find_all().await {
        Ok(soins) => Json(soins).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn list_soins_by_client(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.soin_repo.find_by_client(client_id).await {
        Ok(soins) => Json(soins).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_soin(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match state.soin_repo.find_by_id(id).await {
        Ok(Some(soin)) => Json(soin).into_response(),
        Ok(None) => DomainError::NotFound.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create_soin(
    State(state): State<AppState>,
    Json(payload): Json<CreateSoin>,
) -> impl IntoResponse {
    match state.soin_repo.create(payload).await {
        Ok(soin) => (StatusCode::CREATED, Json(soin)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_soin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSoin>,
) -> impl IntoResponse {
    match state.soin_repo.update(id, payload).await {
        Ok(soin) => Json(soin).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_soin(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match state.soin_repo.delete(id).await {
        Ok(()) => Json(json!({"message": "Soin supprimé"})).into_response(),
        Err(e) => e.into_response(),
    }
}
