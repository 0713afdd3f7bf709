//! Pure reporting arithmetic: period ranges, month windows, sums and rankings

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DateRange;
use crate::models::prestation;
use crate::models::prestation_service::{self, SERVICE_SUPPRIME};
use crate::models::service;
use crate::models::produit::PRODUIT_SUPPRIME;
use crate::models::vente::{self, VenteType, VenteWithDetails};

pub const TOP_N: usize = 5;
pub const TRAILING_MONTHS: u32 = 6;

/// Reporting bucket, named as the query string spells it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Periode {
    Aujourdhui,
    Semaine,
    Mois,
    #[default]
    Tous,
}

impl Periode {
    pub const ALL: [Periode; 4] = [
        Periode::Aujourdhui,
        Periode::Semaine,
        Periode::Mois,
        Periode::Tous,
    ];

    /// Range covered by the bucket at `now`, in the caller's time zone
    pub fn range<Tz: TimeZone>(self, now: &DateTime<Tz>) -> DateRange {
        let tz = now.timezone();
        match self {
            Periode::Aujourdhui => DateRange::since(start_of_day(&tz, now.date_naive())),
            Periode::Semaine => DateRange::since(now.with_timezone(&Utc) - Duration::days(7)),
            Periode::Mois => DateRange::since(start_of_day(&tz, month_start(now.date_naive()))),
            Periode::Tous => DateRange::default(),
        }
    }
}

/// Local midnight of `day` as a UTC instant
pub fn start_of_day<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> DateTime<Utc> {
    let midnight = day.and_time(chrono::NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}

pub fn month_start(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

pub fn next_month(month: NaiveDate) -> NaiveDate {
    let (year, m) = if month.month() == 12 {
        (month.year() + 1, 1)
    } else {
        (month.year(), month.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, m, 1).unwrap_or(month)
}

/// `[start(M), start(M+1))` for the month starting at `month`
pub fn month_range<Tz: TimeZone>(tz: &Tz, month: NaiveDate) -> DateRange {
    let month = month_start(month);
    DateRange::between(start_of_day(tz, month), start_of_day(tz, next_month(month)))
}

/// First days of the `count` months ending with the month of `today`, oldest first
pub fn trailing_months(today: NaiveDate, count: u32) -> Vec<NaiveDate> {
    let mut months = Vec::with_capacity(count as usize);
    let mut month = month_start(today);
    for _ in 0..count {
        months.push(month);
        month = match month.pred_opt() {
            Some(last_day_before) => month_start(last_day_before),
            None => break,
        };
    }
    months.reverse();
    months
}

/// Parses `YYYY-MM` or `YYYY-MM-DD` into the first day of that month
pub fn parse_month(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d"))
        .ok()
        .map(month_start)
}

pub fn ca_services(prestations: &[prestation::Model]) -> f64 {
    prestations.iter().map(|p| p.total).sum()
}

pub fn ca_produits(ventes: &[vente::Model]) -> f64 {
    ventes.iter().map(|v| v.montant).sum()
}

fn is_produit(vente: &vente::Model) -> bool {
    vente.r#type == VenteType::Produit.as_str()
}

/// Figures for one bucket
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PeriodeStats {
    pub ca_services: f64,
    pub ca_produits: f64,
    pub ca_total: f64,
    pub nombre_prestations: usize,
    pub nombre_ventes: usize,
    /// Σ line-item quantities of the bucket's prestations
    pub soins_realises: i64,
    /// Σ quantities of product ventes
    pub produits_vendus: i64,
}

/// Re-filters the full row sets for one bucket
pub fn periode_stats(
    range: &DateRange,
    prestations: &[prestation::Model],
    lignes: &[prestation_service::Model],
    ventes: &[vente::Model],
) -> PeriodeStats {
    let prestations: Vec<prestation::Model> = prestations
        .iter()
        .filter(|p| range.contains(&p.date))
        .cloned()
        .collect();
    let ventes: Vec<vente::Model> = ventes
        .iter()
        .filter(|v| range.contains(&v.date))
        .cloned()
        .collect();

    let soins_realises = lignes
        .iter()
        .filter(|l| prestations.iter().any(|p| p.id == l.prestation_id))
        .map(|l| i64::from(l.quantite))
        .sum();
    let produits_vendus = ventes
        .iter()
        .filter(|v| is_produit(v))
        .map(|v| i64::from(v.quantite))
        .sum();

    let ca_services = ca_services(&prestations);
    let ca_produits = ca_produits(&ventes);

    PeriodeStats {
        ca_services,
        ca_produits,
        ca_total: ca_services + ca_produits,
        nombre_prestations: prestations.len(),
        nombre_ventes: ventes.len(),
        soins_realises,
        produits_vendus,
    }
}

/// One entry of a top-N ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classement {
    pub nom: String,
    pub quantite: i64,
    pub chiffre_affaires: f64,
}

/// Groups by display name, keeping first-encounter order
fn group_by_nom(items: impl IntoIterator<Item = (String, i64, f64)>) -> Vec<Classement> {
    let mut groups: Vec<Classement> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (nom, quantite, chiffre_affaires) in items {
        match index.get(&nom) {
            Some(&i) => {
                groups[i].quantite += quantite;
                groups[i].chiffre_affaires += chiffre_affaires;
            }
            None => {
                index.insert(nom.clone(), groups.len());
                groups.push(Classement {
                    nom,
                    quantite,
                    chiffre_affaires,
                });
            }
        }
    }
    groups
}

/// Services ranked by quantity, ties kept in encounter order
pub fn top_services(
    lignes: &[(prestation_service::Model, Option<service::Model>)],
    limit: usize,
) -> Vec<Classement> {
    let mut ranked = group_by_nom(lignes.iter().map(|(ligne, service)| {
        let nom = service
            .as_ref()
            .map(|s| s.nom.clone())
            .unwrap_or_else(|| SERVICE_SUPPRIME.to_string());
        (nom, i64::from(ligne.quantite), ligne.sous_total())
    }));
    ranked.sort_by(|a, b| b.quantite.cmp(&a.quantite));
    ranked.truncate(limit);
    ranked
}

/// Products ranked by revenue, ties kept in encounter order
pub fn top_produits(ventes: &[VenteWithDetails], limit: usize) -> Vec<Classement> {
    let mut ranked = group_by_nom(
        ventes
            .iter()
            .filter(|row| row.vente.produit_id.is_some())
            .map(|row| {
                let nom = row
                    .produit
                    .as_ref()
                    .map(|p| p.nom.clone())
                    .unwrap_or_else(|| PRODUIT_SUPPRIME.to_string());
                (nom, i64::from(row.vente.quantite), row.vente.montant)
            }),
    );
    ranked.sort_by(|a, b| b.chiffre_affaires.total_cmp(&a.chiffre_affaires));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use uuid::Uuid;

    fn ligne(
        nom: Option<&str>,
        quantite: i32,
        prix: f64,
    ) -> (prestation_service::Model, Option<service::Model>) {
        let now = Utc::now();
        let service_id = Uuid::new_v4();
        (
            prestation_service::Model {
                id: Uuid::new_v4(),
                prestation_id: Uuid::new_v4(),
                service_id,
                prix,
                quantite,
                created_at: now,
            },
            nom.map(|n| service::Model {
                id: service_id,
                nom: n.to_string(),
                prix,
                description: None,
                created_at: now,
            }),
        )
    }

    #[test]
    fn test_top_services_stable_by_quantity() {
        let lignes = vec![
            ligne(Some("A"), 3, 1000.0),
            ligne(Some("B"), 5, 1000.0),
            ligne(Some("C"), 1, 1000.0),
            ligne(Some("D"), 5, 1000.0),
            ligne(Some("E"), 2, 1000.0),
            ligne(Some("F"), 4, 1000.0),
        ];

        let top = top_services(&lignes, TOP_N);
        let noms: Vec<&str> = top.iter().map(|c| c.nom.as_str()).collect();
        assert_eq!(noms, vec!["B", "D", "F", "A", "E"]);
        assert_eq!(top[0].chiffre_affaires, 5000.0);
    }

    #[test]
    fn test_top_services_merges_names_and_deleted_entries() {
        let lignes = vec![
            ligne(Some("Manucure"), 1, 5000.0),
            ligne(None, 2, 3000.0),
            ligne(Some("Manucure"), 2, 5000.0),
            ligne(None, 1, 3000.0),
        ];

        let top = top_services(&lignes, TOP_N);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].nom, "Manucure");
        assert_eq!(top[0].quantite, 3);
        assert_eq!(top[1].nom, SERVICE_SUPPRIME);
        assert_eq!(top[1].chiffre_affaires, 9000.0);
    }

    #[test]
    fn test_trailing_months_cross_year() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 17).unwrap();
        let months = trailing_months(today, TRAILING_MONTHS);
        let expected: Vec<NaiveDate> = [
            (2025, 9),
            (2025, 10),
            (2025, 11),
            (2025, 12),
            (2026, 1),
            (2026, 2),
        ]
        .iter()
        .map(|&(y, m)| NaiveDate::from_ymd_opt(y, m, 1).unwrap())
        .collect();
        assert_eq!(months, expected);
    }

    #[test]
    fn test_consecutive_month_ranges_tile() {
        let tz = FixedOffset::east_opt(3600).unwrap();
        let months = trailing_months(NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(), 6);
        for pair in months.windows(2) {
            let a = month_range(&tz, pair[0]);
            let b = month_range(&tz, pair[1]);
            assert_eq!(a.end, b.start);
        }
    }

    #[test]
    fn test_periode_ranges() {
        let tz = FixedOffset::east_opt(0).unwrap();
        let now = tz.with_ymd_and_hms(2026, 5, 20, 15, 30, 0).unwrap();

        let today = Periode::Aujourdhui.range(&now);
        assert_eq!(
            today.start,
            Some(Utc.with_ymd_and_hms(2026, 5, 20, 0, 0, 0).unwrap())
        );

        let semaine = Periode::Semaine.range(&now);
        assert_eq!(
            semaine.start,
            Some(Utc.with_ymd_and_hms(2026, 5, 13, 15, 30, 0).unwrap())
        );

        let mois = Periode::Mois.range(&now);
        assert_eq!(
            mois.start,
            Some(Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap())
        );

        assert_eq!(Periode::Tous.range(&now), DateRange::default());
    }

    #[test]
    fn test_parse_month() {
        let may = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        assert_eq!(parse_month("2026-05"), Some(may));
        assert_eq!(parse_month("2026-05-01"), Some(may));
        assert_eq!(parse_month("2026-13"), None);
        assert_eq!(parse_month("mai"), None);
    }
}
