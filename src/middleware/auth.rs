use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, services::ServiceContext, state::AppState};

/// Resolves `Authorization: Bearer <token>` to an active user and stores the
/// principal in the request extensions. Nothing is cached between requests.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::unauthorized("Missing/invalid Authorization header"))?;

    let principal = ServiceContext::from_state(&state)
        .auth(&state.tokens)
        .authenticate(token)
        .await?;

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}
