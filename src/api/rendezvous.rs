//! Appointment API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::{DomainError, Quand, RendezvousFilter};
use crate::infrastructure::AppState;
use crate::models::rendezvous::{CreateRendezvous, RendezvousDto, UpdateRendezvous};

#[derive(Debug, Default, Deserialize)]
pub struct RendezvousQuery {
    pub quand: Option<Quand>,
}

pub async fn list_rendezvous(
    State(state): State<AppState>,
    Query(params): Query<RendezvousQuery>,
) -> impl IntoResponse {
    let filter = RendezvousFilter {
        quand: params.quand.unwrap_or_default(),
        today: Local::now().date_naive(),
    };

    match state.rendezvous_repo.find_all(filter).await {
        Ok(rows) => {
            let dtos: Vec<RendezvousDto> = rows.into_iter().map(RendezvousDto::from).collect();
            Json(dtos).into_response()
        }
        Err(e) => e.into_response(),
    }
}

pub async fn get_rendezvous(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.rendezvous_repo.find_by_id(id).await {
        Ok(Some(rdv)) => Json(RendezvousDto::from(rdv)).into_response(),
        Ok(None) => DomainError::NotFound.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create_rendezvous(
    State(state): State<AppState>,
    Json(payload): Json<CreateRendezvous>,
) -> impl IntoResponse {
    match state.rendezvous_repo.create(payload).await {
        Ok(rdv) => (StatusCode::CREATED, Json(RendezvousDto::from(rdv))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_rendezvous(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRendezvous>,
) -> impl IntoResponse {
    match state.rendezvous_repo.update(id, payload).await {
        Ok(rdv) => Json(RendezvousDto::from(rdv)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_rendezvous(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.rendezvous_repo.delete(id).await {
        Ok(()) => Json(json!({"message": "Rendez-vous supprimé"})).into_response(),
        Err(e) => e.into_response(),
    }
}
