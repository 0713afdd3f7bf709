use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::auth::login,
        api::auth::register,
        api::clients::list_clients,
        api::clients::get_client,
        api::produits::list_produits,
        api::prestations::list_prestations,
        api::prestations::create_prestation,
        api::ventes::checkout,
        api::ventes::list_transactions,
        api::ventes::delete_transaction,
        api::rapports::list_rapports,
        api::rapports::get_rapport,
        api::rapports::overview,
        api::rapports::mensuel,
    ),
    tags(
        (name = "salon", description = "Salon management API")
    )
)]
pub struct ApiDoc;
