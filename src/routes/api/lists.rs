use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    middleware::CurrentUser,
    response::{ApiResult, JsonApiResponse},
    routes::api::{
        dto::{CountResponse, ListItemResponse, ListResponse, collect},
        query::PageQuery,
    },
    services::{
        ServiceContext,
        list_service::{ListService, UpdateListInput},
    },
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateListRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateListRequest {
    pub name: Option<String>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/lists", get(list_lists).post(create_list))
        .route("/lists/count", get(count_lists))
        .route(
            "/lists/{id}",
            get(get_list).patch(update_list).delete(remove_list),
        )
        .route("/lists/{id}/items", get(list_entries))
        .route("/lists/{id}/items/count", get(count_entries))
}

fn list_service(state: &AppState) -> ListService {
    ServiceContext::from_state(state).list()
}

async fn create_list(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Json(body): Json<CreateListRequest>,
) -> ApiResult<ListResponse> {
    let list = list_service(&state).create(&body.name, &current.id()).await?;
    JsonApiResponse::with_status(StatusCode::CREATED, "created", list.into())
}

async fn list_lists(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Query(query): Query<PageQuery>,
) -> ApiResult<Vec<ListResponse>> {
    let lists = list_service(&state)
        .find_all(&current.id(), query.page(), query.search())
        .await?;
    JsonApiResponse::ok(collect(lists))
}

async fn count_lists(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
) -> ApiResult<CountResponse> {
    let count = list_service(&state).count(&current.id()).await?;
    JsonApiResponse::ok(CountResponse { count })
}

async fn get_list(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<ListResponse> {
    let list = list_service(&state).find_one(&id, &current.id()).await?;
    JsonApiResponse::ok(list.into())
}

async fn update_list(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateListRequest>,
) -> ApiResult<ListResponse> {
    let input = UpdateListInput { name: body.name };
    let list = list_service(&state)
        .update(&id, input, &current.id())
        .await?;
    JsonApiResponse::ok(list.into())
}

async fn remove_list(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<ListResponse> {
    let list = list_service(&state).remove(&id, &current.id()).await?;
    JsonApiResponse::with_status(StatusCode::OK, "deleted", list.into())
}

// list.items
async fn list_entries(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Vec<ListItemResponse>> {
    let entries = ServiceContext::from_state(&state)
        .list_item()
        .find_all(&id, &current.id(), query.page(), query.search())
        .await?;
    JsonApiResponse::ok(collect(entries))
}

// list.totalItems
async fn count_entries(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<CountResponse> {
    let count = ServiceContext::from_state(&state)
        .list_item()
        .count(&id, &current.id())
        .await?;
    JsonApiResponse::ok(CountResponse { count })
}
