//! Prestation (multi-service visit) API handlers

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
use crate::models::prestation::{CreatePrestation, UpdatePrestation};

#[utoipa::path(
    get,
    path = "/api/prestations",
    responses((status = 200, description = "Prestations with client and line items"))
)]
pub async fn list_prestations(State(state): State<AppState>) -> impl IntoResponse {
    match state.prestation_repo.find_all().await {
        Ok(prestations) => Json(prestations).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_prestation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.prestation_repo.find_by_id(id).await {
        Ok(Some(prestation)) => Json(prestation).into_response(),
        Ok(None) => DomainError::NotFound.into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/prestations",
    responses(
        (status = 201, description = "Prestation recorded with its computed total"),
        (status = 400, description = "No line item, missing client or total mismatch")
    )
)]
pub async fn create_prestation(
    State(state): State<AppState>,
    Json(payload): Json<CreatePrestation>,
) -> impl IntoResponse {
    match state.prestation_repo.create(payload).await {
        Ok(prestation) => (StatusCode::CREATED, Json(prestation)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_prestation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePrestation>,
) -> impl IntoResponse {
    match state.prestation_repo.update(id, payload).await {
        Ok(prestation) => Json(prestation).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_prestation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.prestation_repo.delete(id).await {
        Ok(()) => Json(json!({"message": "Prestation supprimée"})).into_response(),
        Err(e) => e.into_response(),
    }
}
