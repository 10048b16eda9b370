use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::{AdminRoles, Role, SuperadminRole},
    middleware::CurrentUser,
    response::{ApiResult, JsonApiResponse},
    routes::api::{
        dto::{CountResponse, ItemResponse, ListResponse, UserResponse, collect},
        query::{PageQuery, UsersQuery},
    },
    services::{ServiceContext, user_service::UpdateUserInput},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
    pub roles: Option<Vec<Role>>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user).patch(update_user))
        .route("/users/{id}/block", post(block_user))
        .route("/users/{id}/items", get(user_items))
        .route("/users/{id}/items/count", get(count_user_items))
        .route("/users/{id}/lists", get(user_lists))
        .route("/users/{id}/lists/count", get(count_user_lists))
}

async fn list_users(
    State(state): State<Arc<AppState>>,
    _admin: CurrentUser<AdminRoles>,
    Query(query): Query<UsersQuery>,
) -> ApiResult<Vec<UserResponse>> {
    let roles = query.roles()?;
    let page = query.page();
    let users = ServiceContext::from_state(&state)
        .user()
        .find_all(&roles, page.page(), page.search())
        .await?;
    JsonApiResponse::ok(collect(users))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    _admin: CurrentUser<AdminRoles>,
    Path(id): Path<Uuid>,
) -> ApiResult<UserResponse> {
    let user = ServiceContext::from_state(&state)
        .user()
        .find_one_by_id(&id)
        .await?;
    JsonApiResponse::ok(user.into())
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    current: CurrentUser<SuperadminRole>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    let user = ServiceContext::from_state(&state)
        .user()
        .update(&id, body.into(), &current.id())
        .await?;
    JsonApiResponse::ok(user.into())
}

async fn block_user(
    State(state): State<Arc<AppState>>,
    current: CurrentUser<SuperadminRole>,
    Path(id): Path<Uuid>,
) -> ApiResult<UserResponse> {
    let user = ServiceContext::from_state(&state)
        .user()
        .block(&id, &current.id())
        .await?;
    JsonApiResponse::ok(user.into())
}

async fn user_items(
    State(state): State<Arc<AppState>>,
    _admin: CurrentUser<AdminRoles>,
    Path(id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Vec<ItemResponse>> {
    let services = ServiceContext::from_state(&state);
    let user = services.user().find_one_by_id(&id).await?;
    let items = services
        .item()
        .find_all(&user.id, query.page(), query.search())
        .await?;
    JsonApiResponse::ok(collect(items))
}

async fn count_user_items(
    State(state): State<Arc<AppState>>,
    _admin: CurrentUser<AdminRoles>,
    Path(id): Path<Uuid>,
) -> ApiResult<CountResponse> {
    let services = ServiceContext::from_state(&state);
    let user = services.user().find_one_by_id(&id).await?;
    let count = services.item().count(&user.id).await?;
    JsonApiResponse::ok(CountResponse { count })
}

async fn user_lists(
    State(state): State<Arc<AppState>>,
    _admin: CurrentUser<AdminRoles>,
    Path(id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Vec<ListResponse>> {
    let services = ServiceContext::from_state(&state);
    let user = services.user().find_one_by_id(&id).await?;
    let lists = services
        .list()
        .find_all(&user.id, query.page(), query.search())
        .await?;
    JsonApiResponse::ok(collect(lists))
}

async fn count_user_lists(
    State(state): State<Arc<AppState>>,
    _admin: CurrentUser<AdminRoles>,
    Path(id): Path<Uuid>,
) -> ApiResult<CountResponse> {
    let services = ServiceContext::from_state(&state);
    let user = services.user().find_one_by_id(&id).await?;
    let count = services.list().count(&user.id).await?;
    JsonApiResponse::ok(CountResponse { count })
}

impl From<UpdateUserRequest> for UpdateUserInput {
    fn from(body: UpdateUserRequest) -> Self {
        Self {
            email: body.email,
            first_name: body.first_name,
            last_name: body.last_name,
            password: body.password,
            roles: body.roles,
        }
    }
}
