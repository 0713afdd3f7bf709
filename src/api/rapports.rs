//! Monthly reports (`/rapports`) and the reporting dashboard (`/reporting`)

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::infrastructure::AppState;
use crate::services::reporting::Periode;
use crate::services::reporting_service;

#[utoipa::path(
    get,
    path = "/api/rapports",
    responses((status = 200, description = "Monthly figures, most recent month first"))
)]
pub async fn list_rapports(State(state): State<AppState>) -> impl IntoResponse {
    match reporting_service::rapports(&state).await {
        Ok(rapports) => Json(rapports).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/rapports/{month}",
    params(("month" = String, Path, description = "YYYY-MM or YYYY-MM-01")),
    responses(
        (status = 200, description = "Figures for the month"),
        (status = 400, description = "Malformed month"),
        (status = 404, description = "No activity that month")
    )
)]
pub async fn get_rapport(
    State(state): State<AppState>,
    Path(month): Path<String>,
) -> impl IntoResponse {
    match reporting_service::rapport(&state, &month).await {
        Ok(rapport) => Json(rapport).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/reporting/overview",
    responses((status = 200, description = "Revenue and counters for today, week, month and all time"))
)]
pub async fn overview(State(state): State<AppState>) -> impl IntoResponse {
    match reporting_service::overview(&state).await {
        Ok(overview) => Json(overview).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/reporting/mensuel",
    responses((status = 200, description = "Trailing six months, oldest first"))
)]
pub async fn mensuel(State(state): State<AppState>) -> impl IntoResponse {
    match reporting_service::mensuel(&state).await {
        Ok(tendance) => Json(tendance).into_response(),
        Err(e) => e.into_response(),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ClassementQuery {
    pub periode: Option<Periode>,
}

pub async fn top_services(
    State(state): State<AppState>,
    Query(params): Query<ClassementQuery>,
) -> impl IntoResponse {
    match reporting_service::top_services(&state, params.periode.unwrap_or_default()).await {
        Ok(top) => Json(top).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn top_produits(
    State(state): State<AppState>,
    Query(params): Query<ClassementQuery>,
) -> impl IntoResponse {
    match reporting_service::top_produits(&state, params.periode.unwrap_or_default()).await {
        Ok(top) => Json(top).into_response(),
        Err(e) => e.into_response(),
    }
}
