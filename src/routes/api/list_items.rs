use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    middleware::CurrentUser,
    response::{ApiResult, JsonApiResponse},
    routes::api::dto::ListItemResponse,
    services::{
        ServiceContext,
        list_item_service::{CreateListItemInput, ListItemService, UpdateListItemInput},
    },
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateListItemRequest {
    pub list_id: Uuid,
    pub item_id: Uuid,
    pub quantity: Option<i32>,
    pub completed: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateListItemRequest {
    pub list_id: Option<Uuid>,
    pub item_id: Option<Uuid>,
    pub quantity: Option<i32>,
    pub completed: Option<bool>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list-items", post(create_entry))
        .route(
            "/list-items/{id}",
            get(get_entry).patch(update_entry).delete(remove_entry),
        )
}

fn list_item_service(state: &AppState) -> ListItemService {
    ServiceContext::from_state(state).list_item()
}

async fn create_entry(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Json(body): Json<CreateListItemRequest>,
) -> ApiResult<ListItemResponse> {
    let input = CreateListItemInput {
        list_id: body.list_id,
        item_id: body.item_id,
        quantity: body.quantity,
        completed: body.completed,
    };
    let entry = list_item_service(&state).create(input, &current.id()).await?;
    JsonApiResponse::with_status(StatusCode::CREATED, "created", entry.into())
}

async fn get_entry(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<ListItemResponse> {
    let entry = list_item_service(&state).find_one(&id, &current.id()).await?;
    JsonApiResponse::ok(entry.into())
}

async fn update_entry(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateListItemRequest>,
) -> ApiResult<ListItemResponse> {
    let input = UpdateListItemInput {
        list_id: body.list_id,
        item_id: body.item_id,
        quantity: body.quantity,
        completed: body.completed,
    };
    let entry = list_item_service(&state)
        .update(&id, input, &current.id())
        .await?;
    JsonApiResponse::ok(entry.into())
}

async fn remove_entry(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<ListItemResponse> {
    let entry = list_item_service(&state).remove(&id, &current.id()).await?;
    JsonApiResponse::with_status(StatusCode::OK, "deleted", entry.into())
}
