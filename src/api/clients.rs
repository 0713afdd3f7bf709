//! Client API handlers

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
use crate::models::client::{CreateClient, UpdateClient};

#[utoipa::path(
    get,
    path = "/api/clients",
    responses((status = 200, description = "Clients, most recent first"))
)]
pub async fn list_clients(State(state): State<AppState>) -> impl IntoResponse {
    match state.client_repo.find_all().await {
        Ok(clients) => Json(clients).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    params(("id" = Uuid, Path, description = "Client id")),
    responses(
        (status = 200, description = "Client found"),
        (status = 404, description = "Client not found")
    )
)]
pub async fn get_client(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match state.client_repo.find_by_id(id).await {
        Ok(Some(client)) => Json(client).into_response(),
        Ok(None) => DomainError::NotFound.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create_client(
    State(state): State<AppState>,
    Json(payload): Json<CreateClient>,
) -> impl IntoResponse {
    match state.client_repo.create(payload).await {
        Ok(client) => (StatusCode::CREATED, Json(client)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClient>,
) -> impl IntoResponse {
    match state.client_repo.update(id, payload).await {
        Ok(client) => Json(client).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.client_repo.delete(id).await {
        Ok(()) => Json(json!({"message": "Client supprimé"})).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Visit history shown on the client page
pub async fn list_client_prestations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.client_repo.find_by_id(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return DomainError::NotFound.into_response(),
        Err(e) => return e.into_response(),
    }

    match state.prestation_repo.find_by_client(id).await {
        Ok(prestations) => Json(prestations).into_response(),
        Err(e) => e.into_response(),
    }
}
