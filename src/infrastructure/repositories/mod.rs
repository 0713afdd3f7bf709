//! Repository implementations using SeaORM

pub mod client_repository;
pub mod prestation_repository;
pub mod produit_repository;
pub mod rendezvous_repository;
pub mod service_repository;
pub mod soin_repository;
pub mod user_repository;
pub mod vente_repository;

pub use client_repository::SeaOrmClientRepository;
pub use prestation_repository::SeaOrmPrestationRepository;
pub use produit_repository::SeaOrmProduitRepository;
pub use rendezvous_repository::SeaOrmRendezvousRepository;
pub use service_repository::SeaOrmServiceRepository;
pub use soin_repository::SeaOrmSoinRepository;
pub use user_repository::SeaOrmUserRepository;
pub use vente_repository::SeaOrmVenteRepository;
