//! Product inventory API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::{DomainError, ProduitFilter, ProduitOrder, StockFilter};
use crate::infrastructure::AppState;
use crate::models::produit::{CreateProduit, ProduitDto, UpdateProduit};

#[derive(Debug, Default, Deserialize)]
pub struct ProduitsQuery {
    pub order: Option<ProduitOrder>,
    pub stock: Option<StockFilter>,
    pub q: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/produits",
    params(
        ("order" = Option<String>, Query, description = "recent (default) or nom"),
        ("stock" = Option<String>, Query, description = "alerte or disponible"),
        ("q" = Option<String>, Query, description = "Search in nom, sku and description")
    ),
    responses((status = 200, description = "Products with their alert flag"))
)]
pub async fn list_produits(
    State(state): State<AppState>,
    Query(params): Query<ProduitsQuery>,
) -> impl IntoResponse {
    let filter = ProduitFilter {
        order: params.order.unwrap_or_default(),
        stock: params.stock,
        query: params.q,
    };

    match state.produit_repo.find_all(filter).await {
        Ok(produits) => {
            let dtos: Vec<ProduitDto> = produits.into_iter().map(ProduitDto::from).collect();
            Json(dtos).into_response()
        }
        Err(e) => e.into_response(),
    }
}

pub async fn get_produit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.produit_repo.find_by_id(id).await {
        Ok(Some(produit)) => Json(ProduitDto::from(produit)).into_response(),
        Ok(None) => DomainError::NotFound.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create_produit(
    State(state): State<AppState>,
    Json(payload): Json<CreateProduit>,
) -> impl IntoResponse {
    match state.produit_repo.create(payload).await {
        Ok(produit) => (StatusCode::CREATED, Json(ProduitDto::from(produit))).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_produit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProduit>,
) -> impl IntoResponse {
    match state.produit_repo.update(id, payload).await {
        Ok(produit) => Json(ProduitDto::from(produit)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_produit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.produit_repo.delete(id).await {
        Ok(()) => Json(json!({"message": "Produit supprimé"})).into_response(),
        Err(e) => e.into_response(),
    }
}
