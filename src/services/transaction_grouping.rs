//! Reconstructs checkout transactions from flat `ventes` rows
//!
//! There is no order entity: rows of one checkout share the client identity
//! and a timestamp. Grouping clusters rows around a seed row within a fixed
//! window. Two real checkouts by one client inside the window merge into one
//! transaction; this is a known limitation of the heuristic.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::client::ClientSummary;
use crate::models::produit::PRODUIT_SUPPRIME;
use crate::models::vente::{self, VenteWithDetails};

/// Members differ from their seed by strictly less than this
pub const GROUPING_WINDOW_MS: i64 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq)]
enum ClientKey<'a> {
    Id(Uuid),
    Nom(&'a str),
}

fn client_key(vente: &vente::Model) -> Option<ClientKey<'_>> {
    match (&vente.client_id, vente.client_nom.as_deref()) {
        (Some(id), _) => Some(ClientKey::Id(*id)),
        (None, Some(nom)) if !nom.trim().is_empty() => Some(ClientKey::Nom(nom)),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionLine {
    pub vente_id: Uuid,
    pub produit_id: Option<Uuid>,
    pub produit_nom: String,
    pub prix_unitaire: f64,
    pub quantite: i32,
    pub montant: f64,
}

/// One reconstructed checkout. `id` is the id of its seed row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleTransaction {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub client_id: Option<Uuid>,
    pub client_nom: Option<String>,
    pub client_telephone: Option<String>,
    pub client: Option<ClientSummary>,
    pub prestation_id: Option<Uuid>,
    pub remarque: Option<String>,
    pub lignes: Vec<TransactionLine>,
    pub montant_total: f64,
    pub vente_ids: Vec<Uuid>,
}

impl SaleTransaction {
    pub fn contains(&self, vente_id: Uuid) -> bool {
        self.vente_ids.contains(&vente_id)
    }
}

fn most_recent_first(a: &VenteWithDetails, b: &VenteWithDetails) -> Ordering {
    b.vente
        .date
        .cmp(&a.vente.date)
        .then_with(|| b.vente.id.cmp(&a.vente.id))
}

fn line(row: &VenteWithDetails) -> TransactionLine {
    let vente = &row.vente;
    let produit_nom = match (&row.produit, vente.produit_id) {
        (Some(produit), _) => produit.nom.clone(),
        (None, Some(_)) => PRODUIT_SUPPRIME.to_string(),
        (None, None) => vente.r#type.clone(),
    };
    // Current catalog price; 0 once the product is gone
    let prix_unitaire = row.produit.as_ref().map_or(0.0, |p| p.prix);

    TransactionLine {
        vente_id: vente.id,
        produit_id: vente.produit_id,
        produit_nom,
        prix_unitaire,
        quantite: vente.quantite,
        montant: vente.montant,
    }
}

fn build(members: &[&VenteWithDetails]) -> SaleTransaction {
    let seed = members[0];
    let lignes: Vec<TransactionLine> = members.iter().map(|row| line(row)).collect();

    SaleTransaction {
        id: seed.vente.id,
        date: seed.vente.date,
        client_id: seed.vente.client_id,
        client_nom: seed.vente.client_nom.clone(),
        client_telephone: seed.vente.client_telephone.clone(),
        client: seed.client.clone(),
        prestation_id: members.iter().find_map(|row| row.vente.prestation_id),
        remarque: members.iter().find_map(|row| row.vente.remarque.clone()),
        montant_total: lignes.iter().map(|l| l.montant).sum(),
        vente_ids: lignes.iter().map(|l| l.vente_id).collect(),
        lignes,
    }
}

/// Groups rows into transactions, most recent first.
///
/// Seeds are taken most recent first (ties by id) and collect older rows, so
/// membership does not depend on the order of `rows`. A row without client
/// identity is always a transaction of its own.
pub fn group_transactions(rows: &[VenteWithDetails]) -> Vec<SaleTransaction> {
    let mut sorted: Vec<&VenteWithDetails> = rows.iter().collect();
    sorted.sort_by(|a, b| most_recent_first(a, b));

    let mut processed = vec![false; sorted.len()];
    let mut transactions = Vec::new();

    for i in 0..sorted.len() {
        if processed[i] {
            continue;
        }
        processed[i] = true;
        let seed = sorted[i];
        let mut members = vec![seed];

        if let Some(key) = client_key(&seed.vente) {
            for j in (i + 1)..sorted.len() {
                let gap = (seed.vente.date - sorted[j].vente.date).num_milliseconds();
                if gap >= GROUPING_WINDOW_MS {
                    break;
                }
                if !processed[j] && client_key(&sorted[j].vente).as_ref() == Some(&key) {
                    processed[j] = true;
                    members.push(sorted[j]);
                }
            }
        }

        transactions.push(build(&members));
    }

    transactions.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    transactions
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn row(
        client_id: Option<Uuid>,
        client_nom: Option<&str>,
        date: DateTime<Utc>,
    ) -> VenteWithDetails {
        VenteWithDetails {
            vente: vente::Model {
                id: Uuid::new_v4(),
                r#type: "produit".to_string(),
                produit_id: Some(Uuid::new_v4()),
                soin_id: None,
                client_id,
                client_nom: client_nom.map(str::to_string),
                client_telephone: None,
                prestation_id: None,
                quantite: 2,
                montant: 3000.0,
                remarque: None,
                date,
                created_at: date,
            },
            produit: None,
            client: None,
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 10, 14, 0, 0).unwrap()
    }

    fn membership(transactions: &[SaleTransaction]) -> Vec<Vec<Uuid>> {
        let mut groups: Vec<Vec<Uuid>> = transactions
            .iter()
            .map(|t| {
                let mut ids = t.vente_ids.clone();
                ids.sort();
                ids
            })
            .collect();
        groups.sort();
        groups
    }

    #[test]
    fn test_rows_59_seconds_apart_form_one_transaction() {
        let client = Some(Uuid::new_v4());
        let rows = vec![
            row(client, None, t0()),
            row(client, None, t0() + Duration::seconds(59)),
        ];

        let transactions = group_transactions(&rows);
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].vente_ids.len(), 2);
        assert_eq!(transactions[0].montant_total, 6000.0);
        assert_eq!(transactions[0].id, rows[1].vente.id);
        assert_eq!(transactions[0].date, rows[1].vente.date);
    }

    #[test]
    fn test_rows_61_seconds_apart_are_two_transactions() {
        let client = Some(Uuid::new_v4());
        let rows = vec![
            row(client, None, t0()),
            row(client, None, t0() + Duration::seconds(61)),
        ];

        let transactions = group_transactions(&rows);
        assert_eq!(transactions.len(), 2);
        // Most recent first
        assert_eq!(transactions[0].id, rows[1].vente.id);
    }

    #[test]
    fn test_exactly_sixty_seconds_is_outside_the_window() {
        let client = Some(Uuid::new_v4());
        let rows = vec![
            row(client, None, t0()),
            row(client, None, t0() + Duration::milliseconds(GROUPING_WINDOW_MS)),
        ];

        assert_eq!(group_transactions(&rows).len(), 2);
    }

    #[test]
    fn test_walk_in_rows_group_by_name() {
        let rows = vec![
            row(None, Some("Awa"), t0()),
            row(None, Some("Awa"), t0() + Duration::seconds(2)),
            row(None, Some("Mariam"), t0() + Duration::seconds(3)),
        ];

        let transactions = group_transactions(&rows);
        assert_eq!(transactions.len(), 2);
    }

    #[test]
    fn test_rows_without_client_identity_stay_alone() {
        let rows = vec![
            row(None, None, t0()),
            row(None, Some("  "), t0() + Duration::seconds(1)),
        ];

        assert_eq!(group_transactions(&rows).len(), 2);
    }

    #[test]
    fn test_client_id_takes_precedence_over_name() {
        let rows = vec![
            row(Some(Uuid::new_v4()), Some("Awa"), t0()),
            row(None, Some("Awa"), t0() + Duration::seconds(1)),
        ];

        assert_eq!(group_transactions(&rows).len(), 2);
    }

    #[test]
    fn test_grouping_ignores_input_order() {
        let a = Some(Uuid::new_v4());
        let b = Some(Uuid::new_v4());
        let rows = vec![
            row(a, None, t0()),
            row(a, None, t0() + Duration::seconds(40)),
            row(a, None, t0() + Duration::seconds(80)),
            row(b, None, t0() + Duration::seconds(10)),
            row(b, None, t0() + Duration::seconds(65)),
            row(a, None, t0() + Duration::seconds(100)),
        ];
        let expected = membership(&group_transactions(&rows));

        let mut reversed = rows.clone();
        reversed.reverse();
        assert_eq!(membership(&group_transactions(&reversed)), expected);

        let mut rotated = rows.clone();
        rotated.rotate_left(2);
        assert_eq!(membership(&group_transactions(&rotated)), expected);

        // a: {100s, 80s} then {40s, 0s}; b: {65s, 10s}
        assert_eq!(expected.len(), 3);
    }

    #[test]
    fn test_chain_is_seeded_from_the_most_recent_row() {
        let client = Some(Uuid::new_v4());
        let rows = vec![
            row(client, None, t0()),
            row(client, None, t0() + Duration::seconds(40)),
            row(client, None, t0() + Duration::seconds(80)),
        ];

        let transactions = group_transactions(&rows);
        assert_eq!(transactions.len(), 2);

        let mut recent = transactions[0].vente_ids.clone();
        recent.sort();
        let mut expected = vec![rows[1].vente.id, rows[2].vente.id];
        expected.sort();
        assert_eq!(transactions[0].id, rows[2].vente.id);
        assert_eq!(recent, expected);
        assert_eq!(transactions[1].vente_ids, vec![rows[0].vente.id]);
    }

    #[test]
    fn test_deleted_product_uses_placeholder() {
        let rows = vec![row(None, None, t0())];
        let transactions = group_transactions(&rows);
        assert_eq!(transactions[0].lignes[0].produit_nom, PRODUIT_SUPPRIME);
        assert_eq!(transactions[0].lignes[0].prix_unitaire, 0.0);
        assert_eq!(transactions[0].lignes[0].montant, 3000.0);
    }
}
