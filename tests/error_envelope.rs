use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode},
    middleware,
};
use sea_orm::{DatabaseBackend, MockDatabase};
use tower::ServiceExt;
use uuid::Uuid;

use shoplist_server::{
    config::Environment,
    db::entities::user,
    middleware::{catch_panic_layer, json_error_middleware},
    routes::{API_PREFIX, router},
    test_helpers::{bearer, test_state},
};

fn layered(db: sea_orm::DatabaseConnection) -> (Router, String) {
    let state = test_state(db, Environment::Test);
    let auth = bearer(&state, &Uuid::nil());
    let app = Router::new()
        .merge(router(state))
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer());
    (app, auth)
}

fn active_user() -> user::Model {
    let now = chrono::Utc::now().fixed_offset();
    user::Model {
        id: Uuid::nil(),
        created_at: now,
        updated_at: now,
        email: "ada@example.com".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        password_hash: "hash".to_string(),
        roles: vec!["user".to_string()],
        is_active: true,
        last_updated_by: None,
    }
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn malformed_json_body_is_wrapped() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[active_user()]])
        .into_connection();
    let (app, auth) = layered(db);

    let (status, json) = send(
        app,
        Request::builder()
            .method("POST")
            .uri(format!("{API_PREFIX}/items"))
            .header("authorization", auth)
            .header("content-type", "application/json")
            .body(Body::from("{\"name\":"))
            .unwrap(),
    )
    .await;

    assert!(status.is_client_error());
    assert_eq!(json["status"], status.as_u16());
    assert!(json["data"].is_null());
}

#[tokio::test]
async fn invalid_path_uuid_is_wrapped() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[active_user()]])
        .into_connection();
    let (app, auth) = layered(db);

    let (status, json) = send(
        app,
        Request::builder()
            .uri(format!("{API_PREFIX}/lists/not-a-uuid"))
            .header("authorization", auth)
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
    assert!(json["message"].as_str().is_some());
}

#[tokio::test]
async fn wrong_method_keeps_405() {
    let (app, _) = layered(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

    let (status, json) = send(
        app,
        Request::builder()
            .method("DELETE")
            .uri(format!("{API_PREFIX}/health"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json["status"], 405);
}
