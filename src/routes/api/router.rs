use std::sync::Arc;

use axum::{Router, middleware};

use crate::{middleware::require_auth, state::AppState};

use super::{auth, health, items, list_items, lists, seed, users};

pub fn router(state: Arc<AppState>) -> Router {
    let auth_layer = middleware::from_fn_with_state(state.clone(), require_auth);

    // route_layer keeps unknown paths at 404 instead of 401.
    let protected = Router::new()
        .merge(auth::protected_router())
        .merge(items::router())
        .merge(lists::router())
        .merge(list_items::router())
        .merge(users::router())
        .route_layer(auth_layer);

    Router::new()
        .merge(health::router())
        .merge(auth::public_router())
        .merge(seed::router())
        .merge(protected)
        .with_state(state)
}
