//! Router-level tests that run without a live Postgres or bucket: the pool
//! is lazy (never connected by these paths) and covers live in memory.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;

use eventia_server::routes::create_routes;
use eventia_server::state::AppState;
use eventia_server::storage::MemoryCoverStore;

fn test_server() -> (TestServer, Arc<MemoryCoverStore>) {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/eventia_test")
        .expect("lazy pool");
    let covers = Arc::new(MemoryCoverStore::new());
    let state = AppState::new(pool, covers.clone());
    let server = TestServer::new(create_routes(state)).expect("test server");
    (server, covers)
}

#[tokio::test]
async fn health_check_reports_ok() {
    let (server, _) = test_server();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "eventia-api");
}

#[tokio::test]
async fn create_without_credentials_is_unauthorized_with_no_side_effects() {
    let (server, covers) = test_server();

    let response = server.post("/api/event/create").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["error"], "Unauthorized");

    // Rejection happens before the workflow body: nothing was stored.
    assert_eq!(covers.object_count(), 0);
}

#[tokio::test]
async fn create_with_malformed_bearer_scheme_is_unauthorized() {
    let (server, covers) = test_server();

    let response = server
        .post("/api/event/create")
        .add_header(
            "authorization".parse().unwrap(),
            "Token not-a-bearer".parse().unwrap(),
        )
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(covers.object_count(), 0);
}
