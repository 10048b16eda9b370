use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    auth::{TokenService, jwt::JwtKeys},
    config::{AppConfig, AuthConfig, Environment},
    routes::router,
    state::AppState,
};

pub const TEST_SECRET: &str = "test-secret-test-secret-test-secret";

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: TEST_SECRET.to_string(),
        token_ttl_secs: 3600,
        admin_email: None,
        admin_password: None,
    }
}

/// State over an arbitrary connection, usually a `MockDatabase`.
pub fn test_state(db: DatabaseConnection, environment: Environment) -> Arc<AppState> {
    let mut cfg = AppConfig::default();
    cfg.general.environment = environment;
    cfg.auth = Some(test_auth_config());
    let tokens = TokenService::new(JwtKeys::from_secret(TEST_SECRET.as_bytes()), 3600);
    AppState::new(cfg, db, tokens)
}

pub fn test_router(db: DatabaseConnection) -> Router {
    router(test_state(db, Environment::Test))
}

pub fn bearer(state: &AppState, user_id: &Uuid) -> String {
    let token = state
        .tokens
        .issue(user_id)
        .expect("token should be issued");
    format!("Bearer {token}")
}
