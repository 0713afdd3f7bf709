use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use salon::api;
use salon::db;
use salon::infrastructure::AppState;
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`
use uuid::Uuid;

// Helper to create a test app
async fn setup_app() -> Router {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    api::api_router(AppState::new(db), false)
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().uri(uri).method(method);
    let req = match body {
        Some(payload) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&payload).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let app = setup_app().await;
    let id = Uuid::new_v4();

    for uri in [
        format!("/clients/{}", id),
        format!("/produits/{}", id),
        format!("/services/{}", id),
        format!("/soins/{}", id),
        format!("/prestations/{}", id),
        format!("/ventes/{}", id),
        format!("/rendezvous/{}", id),
    ] {
        let (status, body) = call(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {}", uri);
        assert!(body["error"].is_string());

        let (status, _) = call(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "DELETE {}", uri);
    }

    let (status, _) = call(
        &app,
        "PUT",
        &format!("/produits/{}", id),
        Some(json!({"prix": 10.0})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, "DELETE", &format!("/ventes/transactions/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_required_fields_are_validated() {
    let app = setup_app().await;

    let cases = [
        ("/clients", json!({"prenom": "Awa"})),
        ("/produits", json!({"nom": "Crème"})),
        ("/produits", json!({"nom": "Crème", "prix": 0.0})),
        ("/ventes", json!({"montant": 1000.0})),
        ("/ventes", json!({"type": "produit"})),
        ("/soins", json!({"service_name": "Gommage", "prix": 5000.0})),
        ("/prestations", json!({"client_id": Uuid::new_v4(), "services": []})),
        (
            "/rendezvous",
            json!({"nom_client": "Awa", "numero_client": "07", "date_rdv": "2030-01-01", "heure": "10:00:00"}),
        ),
    ];

    for (uri, payload) in cases {
        let (status, body) = call(&app, "POST", uri, Some(payload.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "POST {} {}", uri, payload);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_prestation_total_mismatch_is_rejected() {
    let app = setup_app().await;

    let (status, body) = call(
        &app,
        "POST",
        "/prestations",
        Some(json!({
            "client_id": Uuid::new_v4(),
            "total": 9000.0,
            "services": [{"service_id": Uuid::new_v4(), "prix": 5000.0, "quantite": 2}]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("total"));
}

#[tokio::test]
async fn test_checkout_requires_client_identity_and_lines() {
    let app = setup_app().await;

    let (_, produit) = call(
        &app,
        "POST",
        "/produits",
        Some(json!({"nom": "Crème", "prix": 7500.0, "quantite": 5})),
    )
    .await;

    let (status, _) = call(
        &app,
        "POST",
        "/ventes/checkout",
        Some(json!({"client_nom": "Awa", "lignes": [{"produit_id": produit["id"]}]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &app,
        "POST",
        "/ventes/checkout",
        Some(json!({"client_nom": "Awa", "client_telephone": "07", "lignes": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &app,
        "POST",
        "/ventes/checkout",
        Some(json!({"client_id": Uuid::new_v4(), "lignes": [{"produit_id": produit["id"]}]})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(
        &app,
        "POST",
        "/ventes/checkout",
        Some(json!({
            "client_nom": "Awa",
            "client_telephone": "07",
            "lignes": [{"produit_id": produit["id"], "quantite": 6}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Stock insuffisant"));
}

#[tokio::test]
async fn test_rapport_month_errors() {
    let app = setup_app().await;

    let (status, _) = call(&app, "GET", "/rapports/juin", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, "GET", "/rapports/2026-13", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, "GET", "/rapports/2020-01", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_without_changes_returns_row() {
    let app = setup_app().await;

    let (_, client) = call(&app, "POST", "/clients", Some(json!({"nom": "Bamba"}))).await;
    let id = client["id"].as_str().unwrap();

    let (status, body) = call(&app, "PUT", &format!("/clients/{}", id), Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nom"], "Bamba");
}
