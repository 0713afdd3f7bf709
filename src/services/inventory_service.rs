//! Inventory adjustment: the checkout basket and the stock writes
//!
//! Stock leaves the shelf through one conditional statement per line
//! (`quantite = quantite - n WHERE quantite >= n`), so two concurrent sales can
//! never push a product below zero. Restocking is one increment per line.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::{DomainError, ProduitRepository};
use crate::models::produit;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub produit: produit::Model,
    pub quantite: i32,
}

impl CartLine {
    pub fn sous_total(&self) -> f64 {
        self.produit.prix * f64::from(self.quantite)
    }
}

fn insufficient(produit: &produit::Model, demande: i32) -> DomainError {
    DomainError::InsufficientStock {
        produit: produit.nom.clone(),
        disponible: produit.quantite,
        demande,
    }
}

/// Checkout basket checked against the stock seen when lines were added
#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds `quantite` units, merging into an existing line for the same product
    pub fn add(&mut self, produit: produit::Model, quantite: i32) -> Result<(), DomainError> {
        if quantite <= 0 {
            return Err(DomainError::validation("La quantité doit être positive"));
        }
        if produit.en_rupture() {
            return Err(insufficient(&produit, quantite));
        }

        match self.lines.iter_mut().find(|l| l.produit.id == produit.id) {
            Some(line) => {
                let wanted = line.quantite.checked_add(quantite).ok_or_else(|| {
                    DomainError::validation("La quantité demandée est trop grande")
                })?;
                if wanted > produit.quantite {
                    return Err(insufficient(&produit, wanted));
                }
                line.quantite = wanted;
                line.produit = produit;
            }
            None => {
                if quantite > produit.quantite {
                    return Err(insufficient(&produit, quantite));
                }
                self.lines.push(CartLine { produit, quantite });
            }
        }
        Ok(())
    }

    /// Sets a line's quantity; zero or less removes the line
    pub fn set_quantite(&mut self, produit_id: Uuid, quantite: i32) -> Result<(), DomainError> {
        if quantite <= 0 {
            self.remove(produit_id);
            return Ok(());
        }

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.produit.id == produit_id)
            .ok_or(DomainError::NotFound)?;
        if quantite > line.produit.quantite {
            return Err(insufficient(&line.produit, quantite));
        }
        line.quantite = quantite;
        Ok(())
    }

    pub fn remove(&mut self, produit_id: Uuid) {
        self.lines.retain(|l| l.produit.id != produit_id);
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::sous_total).sum()
    }
}

/// Takes `n` units off the shelf, or explains why it could not
pub async fn decrement_stock(
    repo: &dyn ProduitRepository,
    produit_id: Uuid,
    n: i32,
) -> Result<(), DomainError> {
    if n <= 0 {
        return Err(DomainError::validation("La quantité doit être positive"));
    }
    if repo.decrement_stock(produit_id, n).await? > 0 {
        tracing::debug!(%produit_id, n, "stock decremented");
        return Ok(());
    }

    match repo.find_by_id(produit_id).await? {
        None => Err(DomainError::NotFound),
        Some(produit) => Err(insufficient(&produit, n)),
    }
}

/// Puts `n` units back. Returns false when the product no longer exists.
pub async fn restock(
    repo: &dyn ProduitRepository,
    produit_id: Uuid,
    n: i32,
) -> Result<bool, DomainError> {
    if n <= 0 {
        return Err(DomainError::Validation(format!(
            "Quantité de réassort invalide: {}",
            n
        )));
    }
    let restocked = repo.restock(produit_id, n).await? > 0;
    if restocked {
        tracing::debug!(%produit_id, n, "stock restored");
    } else {
        tracing::warn!(%produit_id, n, "restock skipped, product no longer exists");
    }
    Ok(restocked)
}
