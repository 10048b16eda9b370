use std::sync::Arc;

use axum::Router;

use crate::{error::AppError, state::AppState};

use super::api;

pub const API_PREFIX: &str = "/api/v1";

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest(API_PREFIX, api::router(state))
        .fallback(not_found)
}

async fn not_found() -> AppError {
    AppError::not_found("Route not found")
}
