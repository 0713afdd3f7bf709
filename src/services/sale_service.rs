//! Sale Service - checkout, transaction listing and transaction deletion
//!
//! A checkout writes one `ventes` row per cart line. Each line is a stock
//! decrement followed by a row insert, two independent statements: a failure
//! on a later line leaves the earlier lines recorded.

use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::models::vente::{self, CreateVente, VenteType};
use crate::services::inventory_service::{self, Cart};
use crate::services::reporting::Periode;
use crate::services::transaction_grouping::{SaleTransaction, group_transactions};
use crate::utils::patch::non_blank;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutLine {
    pub produit_id: Uuid,
    #[serde(default = "default_quantite")]
    pub quantite: i32,
}

fn default_quantite() -> i32 {
    1
}

/// A registered client (`client_id`) or a walk-in (`client_nom` + `client_telephone`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub client_id: Option<Uuid>,
    pub client_nom: Option<String>,
    pub client_telephone: Option<String>,
    pub prestation_id: Option<Uuid>,
    pub remarque: Option<String>,
    #[serde(default)]
    pub lignes: Vec<CheckoutLine>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResult {
    pub ventes: Vec<vente::Model>,
    pub montant_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionDeletion {
    pub ventes_supprimees: u64,
    pub produits_restockes: usize,
}

struct ClientIdentity {
    client_id: Option<Uuid>,
    nom: Option<String>,
    telephone: Option<String>,
}

async fn resolve_client(
    state: &AppState,
    request: &CheckoutRequest,
) -> Result<ClientIdentity, DomainError> {
    if let Some(client_id) = request.client_id {
        let client = state
            .client_repo
            .find_by_id(client_id)
            .await?
            .ok_or(DomainError::NotFound)?;
        let nom = match &client.prenom {
            Some(prenom) => format!("{} {}", prenom, client.nom),
            None => client.nom.clone(),
        };
        return Ok(ClientIdentity {
            client_id: Some(client_id),
            nom: Some(nom),
            telephone: client.telephone,
        });
    }

    match (
        non_blank(request.client_nom.clone()),
        non_blank(request.client_telephone.clone()),
    ) {
        (Some(nom), Some(telephone)) => Ok(ClientIdentity {
            client_id: None,
            nom: Some(nom),
            telephone: Some(telephone),
        }),
        _ => Err(DomainError::validation(
            "Veuillez renseigner le nom et le téléphone du client",
        )),
    }
}

/// Builds the cart from current stock. Nothing is written when any line fails.
async fn build_cart(state: &AppState, lignes: &[CheckoutLine]) -> Result<Cart, DomainError> {
    if lignes.is_empty() {
        return Err(DomainError::validation("Le panier est vide"));
    }

    let mut cart = Cart::new();
    for ligne in lignes {
        let produit = state
            .produit_repo
            .find_by_id(ligne.produit_id)
            .await?
            .ok_or(DomainError::NotFound)?;
        cart.add(produit, ligne.quantite)?;
    }
    Ok(cart)
}

/// Records a checkout: one stock decrement and one vente per cart line
pub async fn checkout(
    state: &AppState,
    request: CheckoutRequest,
) -> Result<CheckoutResult, DomainError> {
    let client = resolve_client(state, &request).await?;
    let cart = build_cart(state, &request.lignes).await?;

    // Every line carries the same timestamp so the rows group together
    let date = chrono::Utc::now();
    let remarque = non_blank(request.remarque);
    let mut ventes = Vec::with_capacity(cart.lines().len());

    for line in cart.lines() {
        inventory_service::decrement_stock(
            state.produit_repo.as_ref(),
            line.produit.id,
            line.quantite,
        )
        .await?;

        let created = state
            .vente_repo
            .create(CreateVente {
                r#type: Some(VenteType::Produit),
                produit_id: Some(line.produit.id),
                soin_id: None,
                client_id: client.client_id,
                client_nom: client.nom.clone(),
                client_telephone: client.telephone.clone(),
                prestation_id: request.prestation_id,
                quantite: Some(line.quantite),
                montant: Some(line.sous_total()),
                remarque: remarque.clone(),
                date: Some(date),
            })
            .await;

        match created {
            Ok(vente) => ventes.push(vente),
            Err(e) => {
                tracing::error!(
                    produit_id = %line.produit.id,
                    quantite = line.quantite,
                    "stock decremented but vente insert failed: {}",
                    e
                );
                return Err(e);
            }
        }
    }

    tracing::info!(
        lignes = ventes.len(),
        montant_total = cart.total(),
        "checkout recorded"
    );

    Ok(CheckoutResult {
        montant_total: ventes.iter().map(|v| v.montant).sum(),
        ventes,
    })
}

/// Grouped transactions whose date falls in `periode`, most recent first
pub async fn list_transactions(
    state: &AppState,
    periode: Periode,
) -> Result<Vec<SaleTransaction>, DomainError> {
    let rows = state.vente_repo.find_all_with_details().await?;
    let range = periode.range(&Local::now());

    Ok(group_transactions(&rows)
        .into_iter()
        .filter(|t| range.contains(&t.date))
        .collect())
}

/// Restocks every product line, one write per line, then deletes the rows
pub async fn delete_transaction(
    state: &AppState,
    vente_ids: Vec<Uuid>,
) -> Result<TransactionDeletion, DomainError> {
    let ventes = state.vente_repo.find_by_ids(vente_ids).await?;
    if ventes.is_empty() {
        return Err(DomainError::NotFound);
    }

    let mut produits_restockes = 0;
    for vente in &ventes {
        if let Some(produit_id) = vente.produit_id {
            if inventory_service::restock(state.produit_repo.as_ref(), produit_id, vente.quantite)
                .await?
            {
                produits_restockes += 1;
            }
        }
    }

    let ids: Vec<Uuid> = ventes.iter().map(|v| v.id).collect();
    let ventes_supprimees = state.vente_repo.delete_many(ids).await?;

    tracing::info!(ventes_supprimees, produits_restockes, "transaction deleted");
    Ok(TransactionDeletion {
        ventes_supprimees,
        produits_restockes,
    })
}

/// Deletes the transaction identified by its seed id (or any member id)
pub async fn delete_transaction_by_id(
    state: &AppState,
    id: Uuid,
) -> Result<TransactionDeletion, DomainError> {
    let rows = state.vente_repo.find_all_with_details().await?;
    let transaction = group_transactions(&rows)
        .into_iter()
        .find(|t| t.id == id || t.contains(id))
        .ok_or(DomainError::NotFound)?;

    delete_transaction(state, transaction.vente_ids).await
}
