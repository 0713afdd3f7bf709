//! Reporting Service - reads the row sets and feeds the pure aggregations

use std::collections::{BTreeMap, HashSet};

use chrono::{Local, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{DateRange, DomainError};
use crate::infrastructure::AppState;
use crate::models::rapport_mensuel::RapportMensuel;
use crate::services::reporting::{
    self, Classement, Periode, PeriodeStats, TOP_N, TRAILING_MONTHS,
};

#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub aujourdhui: PeriodeStats,
    pub semaine: PeriodeStats,
    pub mois: PeriodeStats,
    pub tous: PeriodeStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TendanceMensuelle {
    pub mois: NaiveDate,
    pub ca_services: f64,
    pub ca_produits: f64,
    pub ca_total: f64,
}

/// Figures for every bucket, each computed from the full row sets
pub async fn overview(state: &AppState) -> Result<Overview, DomainError> {
    let prestations = state.prestation_repo.find_in_range(DateRange::default()).await?;
    let ventes = state.vente_repo.find_all().await?;
    let lignes: Vec<_> = state
        .prestation_repo
        .find_all_lignes()
        .await?
        .into_iter()
        .map(|(ligne, _)| ligne)
        .collect();

    let now = Local::now();
    let stats = |periode: Periode| {
        reporting::periode_stats(&periode.range(&now), &prestations, &lignes, &ventes)
    };

    Ok(Overview {
        aujourdhui: stats(Periode::Aujourdhui),
        semaine: stats(Periode::Semaine),
        mois: stats(Periode::Mois),
        tous: stats(Periode::Tous),
    })
}

/// Trailing six months, oldest first, one query pair per month
pub async fn mensuel(state: &AppState) -> Result<Vec<TendanceMensuelle>, DomainError> {
    let today = Local::now().date_naive();
    let mut tendance = Vec::new();

    for mois in reporting::trailing_months(today, TRAILING_MONTHS) {
        let range = reporting::month_range(&Local, mois);
        let prestations = state.prestation_repo.find_in_range(range).await?;
        let ventes = state.vente_repo.find_in_range(range).await?;

        let ca_services = reporting::ca_services(&prestations);
        let ca_produits = reporting::ca_produits(&ventes);
        tendance.push(TendanceMensuelle {
            mois,
            ca_services,
            ca_produits,
            ca_total: ca_services + ca_produits,
        });
    }

    Ok(tendance)
}

pub async fn top_services(
    state: &AppState,
    periode: Periode,
) -> Result<Vec<Classement>, DomainError> {
    let mut lignes = state.prestation_repo.find_all_lignes().await?;

    if periode != Periode::Tous {
        let range = periode.range(&Local::now());
        let visibles: HashSet<Uuid> = state
            .prestation_repo
            .find_in_range(range)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();
        lignes.retain(|(ligne, _)| visibles.contains(&ligne.prestation_id));
    }

    Ok(reporting::top_services(&lignes, TOP_N))
}

pub async fn top_produits(
    state: &AppState,
    periode: Periode,
) -> Result<Vec<Classement>, DomainError> {
    let range = periode.range(&Local::now());
    let ventes: Vec<_> = state
        .vente_repo
        .find_all_with_details()
        .await?
        .into_iter()
        .filter(|row| range.contains(&row.vente.date))
        .collect();

    Ok(reporting::top_produits(&ventes, TOP_N))
}

fn local_month(date: &chrono::DateTime<chrono::Utc>) -> NaiveDate {
    reporting::month_start(date.with_timezone(&Local).date_naive())
}

/// Every month holding at least one prestation or vente, most recent first
pub async fn rapports(state: &AppState) -> Result<Vec<RapportMensuel>, DomainError> {
    let prestations = state.prestation_repo.find_in_range(DateRange::default()).await?;
    let ventes = state.vente_repo.find_all().await?;

    let mut months: BTreeMap<NaiveDate, RapportMensuel> = BTreeMap::new();
    let empty = |month| RapportMensuel {
        month,
        ca_services: 0.0,
        ca_produits: 0.0,
        ca_total: 0.0,
        nombre_prestations: 0,
        nombre_ventes: 0,
    };

    for p in &prestations {
        let month = local_month(&p.date);
        let rapport = months.entry(month).or_insert_with(|| empty(month));
        rapport.ca_services += p.total;
        rapport.nombre_prestations += 1;
    }
    for v in &ventes {
        let month = local_month(&v.date);
        let rapport = months.entry(month).or_insert_with(|| empty(month));
        rapport.ca_produits += v.montant;
        rapport.nombre_ventes += 1;
    }

    Ok(months
        .into_values()
        .rev()
        .map(|mut r| {
            r.ca_total = r.ca_services + r.ca_produits;
            r
        })
        .collect())
}

/// Figures for one month given as `YYYY-MM` or `YYYY-MM-01`
pub async fn rapport(state: &AppState, raw_month: &str) -> Result<RapportMensuel, DomainError> {
    let month = reporting::parse_month(raw_month)
        .ok_or_else(|| DomainError::Validation(format!("Mois invalide: {}", raw_month)))?;
    let range = reporting::month_range(&Local, month);

    let prestations = state.prestation_repo.find_in_range(range).await?;
    let ventes = state.vente_repo.find_in_range(range).await?;
    if prestations.is_empty() && ventes.is_empty() {
        return Err(DomainError::NotFound);
    }

    let ca_services = reporting::ca_services(&prestations);
    let ca_produits = reporting::ca_produits(&ventes);
    Ok(RapportMensuel {
        month,
        ca_services,
        ca_produits,
        ca_total: ca_services + ca_produits,
        nombre_prestations: prestations.len(),
        nombre_ventes: ventes.len(),
    })
}
