pub mod auth;
pub mod catalog;
pub mod clients;
pub mod error;
pub mod health;
pub mod prestations;
pub mod produits;
pub mod rapports;
pub mod rendezvous;
pub mod soins;
pub mod ventes;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::infrastructure::AppState;
use crate::infrastructure::auth::require_bearer;

/// Data routes. Mounted behind the bearer guard when `require_auth` is set.
fn data_router() -> Router<AppState> {
    Router::new()
        // Clients
        .route(
            "/clients",
            get(clients::list_clients).post(clients::create_client),
        )
        .route(
            "/clients/:id",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        .route(
            "/clients/:id/prestations",
            get(clients::list_client_prestations),
        )
        // Inventory
        .route(
            "/produits",
            get(produits::list_produits).post(produits::create_produit),
        )
        .route(
            "/produits/:id",
            get(produits::get_produit)
                .put(produits::update_produit)
                .delete(produits::delete_produit),
        )
        // Service catalog
        .route(
            "/services",
            get(catalog::list_services).post(catalog::create_service),
        )
        .route(
            "/services/:id",
            get(catalog::get_service)
                .put(catalog::update_service)
                .delete(catalog::delete_service),
        )
        // Soins
        .route("/soins", get(soins::list_soins).post(soins::create_soin))
        .route(
            "/soins/:id",
            get(soins::get_soin)
                .put(soins::update_soin)
                .delete(soins::delete_soin),
        )
        .route("/soins/client/:client_id", get(soins::list_soins_by_client))
        // Prestations
        .route(
            "/prestations",
            get(prestations::list_prestations).post(prestations::create_prestation),
        )
        .route(
            "/prestations/:id",
            get(prestations::get_prestation)
                .put(prestations::update_prestation)
                .delete(prestations::delete_prestation),
        )
        // Sales
        .route("/ventes", get(ventes::list_ventes).post(ventes::create_vente))
        .route("/ventes/checkout", post(ventes::checkout))
        .route("/ventes/transactions", get(ventes::list_transactions))
        .route(
            "/ventes/transactions/:id",
            axum::routing::delete(ventes::delete_transaction),
        )
        .route(
            "/ventes/:id",
            get(ventes::get_vente)
                .put(ventes::update_vente)
                .delete(ventes::delete_vente),
        )
        // Appointments
        .route(
            "/rendezvous",
            get(rendezvous::list_rendezvous).post(rendezvous::create_rendezvous),
        )
        .route(
            "/rendezvous/:id",
            get(rendezvous::get_rendezvous)
                .put(rendezvous::update_rendezvous)
                .delete(rendezvous::delete_rendezvous),
        )
        // Reports
        .route("/rapports", get(rapports::list_rapports))
        .route("/rapports/:month", get(rapports::get_rapport))
        .route("/reporting/overview", get(rapports::overview))
        .route("/reporting/mensuel", get(rapports::mensuel))
        .route("/reporting/top-services", get(rapports::top_services))
        .route("/reporting/top-produits", get(rapports::top_produits))
}

pub fn api_router(state: AppState, require_auth: bool) -> Router {
    let mut data = data_router();
    if require_auth {
        tracing::info!("Bearer token required on data routes");
        data = data.route_layer(middleware::from_fn(require_bearer));
    }

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/auth/me", get(auth::me))
        .merge(data)
        .with_state(state)
}
