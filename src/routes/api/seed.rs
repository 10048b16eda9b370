use std::sync::Arc;

use axum::{Router, extract::State, routing::post};

use crate::{
    response::{ApiResult, JsonApiResponse},
    services::ServiceContext,
    state::AppState,
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/seed", post(execute_seed))
}

async fn execute_seed(State(state): State<Arc<AppState>>) -> ApiResult<bool> {
    let seeded = ServiceContext::from_state(&state)
        .seed(state.config.general.environment)
        .execute_seed()
        .await?;
    JsonApiResponse::ok(seeded)
}
