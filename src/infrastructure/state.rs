//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{
    ClientRepository, PrestationRepository, ProduitRepository, RendezvousRepository,
    ServiceRepository, SoinRepository, UserRepository, VenteRepository,
};
use crate::infrastructure::{
    SeaOrmClientRepository, SeaOrmPrestationRepository, SeaOrmProduitRepository,
    SeaOrmRendezvousRepository, SeaOrmServiceRepository, SeaOrmSoinRepository,
    SeaOrmUserRepository, SeaOrmVenteRepository,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    pub client_repo: Arc<dyn ClientRepository>,
    pub produit_repo: Arc<dyn ProduitRepository>,
    pub service_repo: Arc<dyn ServiceRepository>,
    pub soin_repo: Arc<dyn SoinRepository>,
    pub prestation_repo: Arc<dyn PrestationRepository>,
    pub vente_repo: Arc<dyn VenteRepository>,
    pub rendezvous_repo: Arc<dyn RendezvousRepository>,
    pub user_repo: Arc<dyn UserRepository>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            client_repo: Arc::new(SeaOrmClientRepository::new(db.clone())),
            produit_repo: Arc::new(SeaOrmProduitRepository::new(db.clone())),
            service_repo: Arc::new(SeaOrmServiceRepository::new(db.clone())),
            soin_repo: Arc::new(SeaOrmSoinRepository::new(db.clone())),
            prestation_repo: Arc::new(SeaOrmPrestationRepository::new(db.clone())),
            vente_repo: Arc::new(SeaOrmVenteRepository::new(db.clone())),
            rendezvous_repo: Arc::new(SeaOrmRendezvousRepository::new(db.clone())),
            user_repo: Arc::new(SeaOrmUserRepository::new(db.clone())),
            db,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
