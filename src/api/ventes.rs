//! Sales API handlers: raw vente rows, checkout and grouped transactions

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::models::vente::{CreateVente, UpdateVente};
use crate::services::reporting::Periode;
use crate::services::sale_service::{self, CheckoutRequest};

pub async fn list_ventes(State(state): State<AppState>) -> impl IntoResponse {
    match state.vente_repo.find_all_with_details().await {
        Ok(ventes) => Json(ventes).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_vente(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match state.vente_repo.find_by_id(id).await {
        Ok(Some(vente)) => Json(vente).into_response(),
        Ok(None) => DomainError::NotFound.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Records a bare row; stock is only touched by the checkout route
pub async fn create_vente(
    State(state): State<AppState>,
    Json(payload): Json<CreateVente>,
) -> impl IntoResponse {
    match state.vente_repo.create(payload).await {
        Ok(vente) => (StatusCode::CREATED, Json(vente)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_vente(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVente>,
) -> impl IntoResponse {
    match state.vente_repo.update(id, payload).await {
        Ok(vente) => Json(vente).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_vente(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match state.vente_repo.delete(id).await {
        Ok(()) => Json(json!({"message": "Vente supprimée"})).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/ventes/checkout",
    responses(
        (status = 201, description = "One vente per cart line, stock decremented"),
        (status = 400, description = "Empty cart, missing client identity or insufficient stock"),
        (status = 404, description = "Unknown product or client")
    )
)]
pub async fn checkout(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> impl IntoResponse {
    match sale_service::checkout(&state, payload).await {
        Ok(result) => (StatusCode::CREATED, Json(result)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionsQuery {
    pub periode: Option<Periode>,
}

#[utoipa::path(
    get,
    path = "/api/ventes/transactions",
    params(("periode" = Option<String>, Query, description = "tous, aujourdhui, semaine or mois")),
    responses((status = 200, description = "Grouped transactions, most recent first"))
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(params): Query<TransactionsQuery>,
) -> impl IntoResponse {
    match sale_service::list_transactions(&state, params.periode.unwrap_or_default()).await {
        Ok(transactions) => Json(transactions).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/ventes/transactions/{id}",
    params(("id" = Uuid, Path, description = "Transaction id or any member vente id")),
    responses(
        (status = 200, description = "Stock restored and rows deleted"),
        (status = 404, description = "No such transaction")
    )
)]
pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match sale_service::delete_transaction_by_id(&state, id).await {
        Ok(deletion) => Json(deletion).into_response(),
        Err(e) => e.into_response(),
    }
}
