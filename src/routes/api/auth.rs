use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;

use crate::{
    auth::AdminRoles,
    middleware::CurrentUser,
    response::{ApiResult, JsonApiResponse},
    routes::api::dto::AuthResponseBody,
    services::{ServiceContext, user_service::SignupInput},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub fn public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

pub fn protected_router() -> Router<Arc<AppState>> {
    Router::new().route("/auth/revalidate", get(revalidate))
}

async fn signup(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignupRequest>,
) -> ApiResult<AuthResponseBody> {
    let services = ServiceContext::from_state(state.as_ref());
    let response = services.auth(&state.tokens).signup(body.into()).await?;
    JsonApiResponse::with_status(StatusCode::CREATED, "created", response.into())
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<AuthResponseBody> {
    let services = ServiceContext::from_state(state.as_ref());
    let response = services
        .auth(&state.tokens)
        .login(&body.email, &body.password)
        .await?;
    JsonApiResponse::ok(response.into())
}

async fn revalidate(
    State(state): State<Arc<AppState>>,
    current: CurrentUser<AdminRoles>,
) -> ApiResult<AuthResponseBody> {
    let services = ServiceContext::from_state(state.as_ref());
    let response = services.auth(&state.tokens).revalidate(&current.user)?;
    JsonApiResponse::ok(response.into())
}

impl From<SignupRequest> for SignupInput {
    fn from(body: SignupRequest) -> Self {
        Self {
            email: body.email,
            first_name: body.first_name,
            last_name: body.last_name,
            password: body.password,
        }
    }
}
