use std::time::Duration;

use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode},
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use shoplist_server::{
    auth::Role,
    config::{AppConfig, Environment},
    routes::{API_PREFIX, router},
    services::{ServiceContext, user_service::SignupInput},
    test_helpers::test_state,
};

async fn connect() -> DatabaseConnection {
    let cfg = AppConfig::from_env().expect("load app config");
    let db_cfg = cfg
        .database
        .as_ref()
        .expect("database config should be present in integration tests");
    let mut opt = ConnectOptions::new(db_cfg.url.clone());
    opt.max_connections(db_cfg.max_connections)
        .min_connections(db_cfg.min_idle)
        .connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let db = Database::connect(opt).await.expect("connect to database");
    db.get_schema_registry("shoplist_server::db::entities::*")
        .sync(&db)
        .await
        .expect("sync schema");
    db
}

async fn app() -> Router {
    router(test_state(connect().await, Environment::Test))
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, json) = call(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");
    format!("Bearer {}", json["data"]["token"].as_str().unwrap())
}

async fn call(
    app: &Router,
    method: &str,
    path: &str,
    auth: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(format!("{API_PREFIX}{path}"));
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
#[ignore = "requires Postgres database"]
async fn signup_then_build_a_list() {
    let app = app().await;
    let email = format!("shopper-{}@example.com", Uuid::new_v4());

    let (status, json) = call(
        &app,
        "POST",
        "/auth/signup",
        None,
        Some(json!({
            "email": email,
            "first_name": "Shop",
            "last_name": "Per",
            "password": "groceries1",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let auth = format!("Bearer {}", json["data"]["token"].as_str().unwrap());

    let (status, item) = call(
        &app,
        "POST",
        "/items",
        Some(&auth),
        Some(json!({ "name": "Oat milk", "quantity": 1.5, "quantity_units": "l" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let item_id = item["data"]["id"].as_str().unwrap().to_string();

    let (_, list) = call(&app, "POST", "/lists", Some(&auth), Some(json!({ "name": "Week" }))).await;
    let list_id = list["data"]["id"].as_str().unwrap().to_string();

    let (status, entry) = call(
        &app,
        "POST",
        "/list-items",
        Some(&auth),
        Some(json!({ "list_id": list_id, "item_id": item_id, "quantity": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry["data"]["item"]["name"], "Oat milk");

    let (status, entries) = call(
        &app,
        "GET",
        &format!("/lists/{list_id}/items?search=OAT"),
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entries["data"].as_array().unwrap().len(), 1);

    let (_, count) = call(&app, "GET", &format!("/lists/{list_id}/items/count"), Some(&auth), None).await;
    assert_eq!(count["data"]["count"], 1);

    let (status, removed) = call(&app, "DELETE", &format!("/items/{item_id}"), Some(&auth), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["data"]["name"], "Oat milk");

    let (_, count) = call(&app, "GET", &format!("/lists/{list_id}/items/count"), Some(&auth), None).await;
    assert_eq!(count["data"]["count"], 0);
}

#[tokio::test]
#[ignore = "requires Postgres database"]
async fn role_filter_returns_only_matching_users() {
    let db = connect().await;
    let app = router(test_state(db.clone(), Environment::Test));
    let tag = Uuid::new_v4().simple().to_string();
    let admin_email = format!("admin-{tag}@example.com");

    let users = ServiceContext::new(&db).user();
    for (email, roles) in [
        (admin_email.clone(), vec![Role::Admin]),
        (format!("plain-{tag}@example.com"), vec![Role::User]),
    ] {
        users
            .create(
                SignupInput {
                    email,
                    first_name: "Role".to_string(),
                    last_name: "Filter".to_string(),
                    password: "filter-pass1".to_string(),
                },
                &roles,
            )
            .await
            .expect("create user");
    }
    let auth = login(&app, &admin_email, "filter-pass1").await;

    let (status, json) = call(
        &app,
        "GET",
        &format!("/users?roles=admin&search={tag}"),
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");
    let found = json["data"].as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["email"], admin_email.as_str());

    let (status, json) = call(
        &app,
        "GET",
        "/users?roles=admin,superadmin&limit=100",
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");
    for user in json["data"].as_array().unwrap() {
        let roles = user["roles"].as_array().unwrap();
        assert!(
            roles.iter().any(|role| role == "admin" || role == "superadmin"),
            "{user}"
        );
    }
}

#[tokio::test]
#[ignore = "requires Postgres database"]
async fn offsets_beyond_bigint_return_empty_pages() {
    let app = app().await;
    let email = format!("offset-{}@example.com", Uuid::new_v4());
    let (status, json) = call(
        &app,
        "POST",
        "/auth/signup",
        None,
        Some(json!({
            "email": email,
            "first_name": "Off",
            "last_name": "Set",
            "password": "offset-pass1",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let auth = format!("Bearer {}", json["data"]["token"].as_str().unwrap());
    call(&app, "POST", "/items", Some(&auth), Some(json!({ "name": "Rice" }))).await;

    for offset in ["9223372036854775807", "9223372036854775808", "18446744073709551615"] {
        let (status, json) = call(
            &app,
            "GET",
            &format!("/items?offset={offset}"),
            Some(&auth),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK, "offset {offset}: {json}");
        assert_eq!(json["data"], json!([]), "offset {offset}");
    }
}
