use std::sync::Arc;

use axum::{Router, routing::get};
use serde::Serialize;

use crate::{
    response::{ApiResult, JsonApiResponse},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

async fn health() -> ApiResult<HealthResponse> {
    JsonApiResponse::ok(HealthResponse { status: "ok" })
}
