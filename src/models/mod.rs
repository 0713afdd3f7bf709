pub mod client;
pub mod prestation;
pub mod prestation_service;
pub mod produit;
pub mod rapport_mensuel;
pub mod rendezvous;
pub mod service;
pub mod soin;
pub mod user;
pub mod vente;
