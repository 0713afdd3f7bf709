//! Repository trait definitions
//!
//! These traits define the contract for data access against the Row Store.
//! Implementations live in the infrastructure layer. Every method is a single
//! statement (or a read followed by joined reads); none of them opens a
//! multi-statement transaction.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::DomainError;
use crate::models::client::{self, CreateClient, UpdateClient};
use crate::models::prestation::{self, CreatePrestation, PrestationWithDetails, UpdatePrestation};
use crate::models::prestation_service;
use crate::models::produit::{self, CreateProduit, UpdateProduit};
use crate::models::rendezvous::{self, CreateRendezvous, UpdateRendezvous};
use crate::models::service::{self, CreateService, UpdateService};
use crate::models::soin::{self, CreateSoin, SoinWithClient, UpdateSoin};
use crate::models::user;
use crate::models::vente::{self, CreateVente, UpdateVente, VenteWithDetails};

/// Half-open time range `[start, end)`; `None` leaves that side open
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn since(start: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn contains(&self, t: &DateTime<Utc>) -> bool {
        self.start.is_none_or(|s| *t >= s) && self.end.is_none_or(|e| *t < e)
    }
}

/// Sort order for product listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProduitOrder {
    #[default]
    Recent,
    Nom,
}

/// Stock status filter for product listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockFilter {
    /// `quantite <= seuil_alerte`
    Alerte,
    /// `quantite > seuil_alerte`
    Disponible,
}

/// Filter criteria for product queries
#[derive(Debug, Default, Clone)]
pub struct ProduitFilter {
    pub order: ProduitOrder,
    pub stock: Option<StockFilter>,
    /// Case-insensitive match on nom, sku or description
    pub query: Option<String>,
}

/// Which appointments to list, relative to a reference day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quand {
    AVenir,
    Passes,
    #[default]
    Tous,
}

#[derive(Debug, Clone)]
pub struct RendezvousFilter {
    pub quand: Quand,
    pub today: NaiveDate,
}

/// Repository trait for Client entity
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Find all clients, most recent first
    async fn find_all(&self) -> Result<Vec<client::Model>, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<client::Model>, DomainError>;

    /// Batch lookup used to resolve client identities of joined rows
    async fn find_by_ids(&self, ids: Vec<Uuid>) -> Result<Vec<client::Model>, DomainError>;

    async fn create(&self, input: CreateClient) -> Result<client::Model, DomainError>;

    async fn update(&self, id: Uuid, input: UpdateClient) -> Result<client::Model, DomainError>;

    /// Delete a client. Dependent rows are left in place.
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

/// Repository trait for Produit entity
#[async_trait]
pub trait ProduitRepository: Send + Sync {
    async fn find_all(&self, filter: ProduitFilter) -> Result<Vec<produit::Model>, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<produit::Model>, DomainError>;

    async fn create(&self, input: CreateProduit) -> Result<produit::Model, DomainError>;

    async fn update(&self, id: Uuid, input: UpdateProduit)
    -> Result<produit::Model, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;

    /// `quantite = quantite - n WHERE id = ? AND quantite >= n`.
    /// Returns the number of rows touched (0 or 1).
    async fn decrement_stock(&self, id: Uuid, n: i32) -> Result<u64, DomainError>;

    /// `quantite = quantite + n WHERE id = ?`.
    /// Returns the number of rows touched (0 when the product is gone).
    async fn restock(&self, id: Uuid, n: i32) -> Result<u64, DomainError>;
}

/// Repository trait for the Service catalog
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<service::Model>, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<service::Model>, DomainError>;

    async fn create(&self, input: CreateService) -> Result<service::Model, DomainError>;

    async fn update(&self, id: Uuid, input: UpdateService)
    -> Result<service::Model, DomainError>;

    /// Delete a catalog entry. Line items keep their dangling reference.
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

/// Repository trait for Soin entity
#[async_trait]
pub trait SoinRepository: Send + Sync {
    /// All soins with the client's identity, most recent first
    async fn find_all(&self) -> Result<Vec<SoinWithClient>, DomainError>;

    async fn find_by_client(&self, client_id: Uuid) -> Result<Vec<soin::Model>, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<soin::Model>, DomainError>;

    async fn create(&self, input: CreateSoin) -> Result<soin::Model, DomainError>;

    async fn update(&self, id: Uuid, input: UpdateSoin) -> Result<soin::Model, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

/// Repository trait for Prestation entity and its owned line items
#[async_trait]
pub trait PrestationRepository: Send + Sync {
    /// All prestations with client and line items, most recent first
    async fn find_all(&self) -> Result<Vec<PrestationWithDetails>, DomainError>;

    async fn find_by_client(
        &self,
        client_id: Uuid,
    ) -> Result<Vec<PrestationWithDetails>, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PrestationWithDetails>, DomainError>;

    /// Bare prestation rows whose date falls in `range`
    async fn find_in_range(&self, range: DateRange)
    -> Result<Vec<prestation::Model>, DomainError>;

    /// Every line item with its catalog entry, if it still exists
    async fn find_all_lignes(
        &self,
    ) -> Result<Vec<(prestation_service::Model, Option<service::Model>)>, DomainError>;

    async fn create(&self, input: CreatePrestation) -> Result<PrestationWithDetails, DomainError>;

    async fn update(
        &self,
        id: Uuid,
        input: UpdatePrestation,
    ) -> Result<PrestationWithDetails, DomainError>;

    /// Delete a prestation and its line items
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

/// Repository trait for Vente rows
#[async_trait]
pub trait VenteRepository: Send + Sync {
    /// All rows, most recent first
    async fn find_all(&self) -> Result<Vec<vente::Model>, DomainError>;

    /// All rows joined with product and client, most recent first
    async fn find_all_with_details(&self) -> Result<Vec<VenteWithDetails>, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<vente::Model>, DomainError>;

    async fn find_by_ids(&self, ids: Vec<Uuid>) -> Result<Vec<vente::Model>, DomainError>;

    /// Bare rows whose date falls in `range`
    async fn find_in_range(&self, range: DateRange) -> Result<Vec<vente::Model>, DomainError>;

    async fn create(&self, input: CreateVente) -> Result<vente::Model, DomainError>;

    async fn update(&self, id: Uuid, input: UpdateVente) -> Result<vente::Model, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;

    /// Single `DELETE ... WHERE id IN (..)`; returns rows removed
    async fn delete_many(&self, ids: Vec<Uuid>) -> Result<u64, DomainError>;
}

/// Repository trait for Rendezvous entity
#[async_trait]
pub trait RendezvousRepository: Send + Sync {
    /// Appointments ordered by day then time
    async fn find_all(
        &self,
        filter: RendezvousFilter,
    ) -> Result<Vec<rendezvous::Model>, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<rendezvous::Model>, DomainError>;

    async fn create(&self, input: CreateRendezvous) -> Result<rendezvous::Model, DomainError>;

    async fn update(
        &self,
        id: Uuid,
        input: UpdateRendezvous,
    ) -> Result<rendezvous::Model, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

/// Repository trait for login accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, DomainError>;

    async fn create(
        &self,
        email: String,
        password_hash: String,
        role: String,
    ) -> Result<user::Model, DomainError>;
}
