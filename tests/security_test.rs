use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use salon::api;
use salon::auth::{create_jwt, decode_jwt, hash_password, verify_password};
use salon::db;
use salon::infrastructure::AppState;
use tower::util::ServiceExt; // for `oneshot`

// Helper to create a test state
async fn setup_test_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::new(db)
}

fn json_request(uri: &str, payload: serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_password_hashing() {
    let password = "super_secret_password";
    let hash = hash_password(password).expect("Failed to hash password");

    assert_ne!(password, hash);
    assert!(verify_password(password, &hash).unwrap());
    assert!(!verify_password("wrong_password", &hash).unwrap());
}

#[tokio::test]
async fn test_jwt_creation_and_verification() {
    let token = create_jwt("gerante@salon.test", "admin").expect("Failed to create JWT");
    assert!(!token.is_empty());

    let claims = decode_jwt(&token).expect("Failed to verify JWT");
    assert_eq!(claims.sub, "gerante@salon.test");
    assert_eq!(claims.role, "admin");
}

#[tokio::test]
async fn test_login_flow() {
    let state = setup_test_state().await;
    state
        .user_repo
        .create(
            "admin@salon.test".to_string(),
            hash_password("admin_password").unwrap(),
            "admin".to_string(),
        )
        .await
        .expect("Failed to create user");

    let app = api::api_router(state, false);

    let response = app
        .clone()
        .oneshot(json_request(
            "/auth/login",
            serde_json::json!({"email": "admin@salon.test", "password": "admin_password"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let token = body["token"].as_str().unwrap().to_string();
    assert!(body["user"].get("password_hash").is_none());

    let response_bad = app
        .clone()
        .oneshot(json_request(
            "/auth/login",
            serde_json::json!({"email": "admin@salon.test", "password": "wrong_password"}),
        ))
        .await
        .unwrap();
    assert_eq!(response_bad.status(), StatusCode::UNAUTHORIZED);

    let response_none = app
        .clone()
        .oneshot(json_request(
            "/auth/login",
            serde_json::json!({"email": "nobody@salon.test", "password": "password"}),
        ))
        .await
        .unwrap();
    assert_eq!(response_none.status(), StatusCode::UNAUTHORIZED);

    let me = Request::builder()
        .uri("/auth/me")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response_me = app.oneshot(me).await.unwrap();
    assert_eq!(response_me.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let app = api::api_router(setup_test_state().await, false);
    let payload = serde_json::json!({"email": "staff@salon.test", "password": "pw"});

    let first = app
        .clone()
        .oneshot(json_request("/auth/register", payload.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_request("/auth/register", payload))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_data_routes_open_by_default() {
    let app: Router = api::api_router(setup_test_state().await, false);
    let req = Request::builder()
        .uri("/clients")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_guard_requires_bearer_token() {
    let app: Router = api::api_router(setup_test_state().await, true);

    let anonymous = Request::builder()
        .uri("/clients")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(anonymous).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let forged = Request::builder()
        .uri("/clients")
        .header(header::AUTHORIZATION, "Bearer not-a-token")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(forged).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = create_jwt("staff@salon.test", "staff").unwrap();
    let authorized = Request::builder()
        .uri("/clients")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(authorized).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Health stays reachable for probes
    let health = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(health).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
