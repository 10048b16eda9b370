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
        dto::{CountResponse, ItemResponse, collect},
        query::{PageQuery, nullable},
    },
    services::{
        ServiceContext,
        item_service::{CreateItemInput, ItemService, UpdateItemInput},
    },
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub quantity: Option<f64>,
    pub quantity_units: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub quantity: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub quantity_units: Option<Option<String>>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/count", get(count_items))
        .route(
            "/items/{id}",
            get(get_item).patch(update_item).delete(remove_item),
        )
}

fn item_service(state: &AppState) -> ItemService {
    ServiceContext::from_state(state).item()
}

async fn create_item(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Json(body): Json<CreateItemRequest>,
) -> ApiResult<ItemResponse> {
    let item = item_service(&state).create(body.into(), &current.id()).await?;
    JsonApiResponse::with_status(StatusCode::CREATED, "created", item.into())
}

async fn list_items(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Query(query): Query<PageQuery>,
) -> ApiResult<Vec<ItemResponse>> {
    let items = item_service(&state)
        .find_all(&current.id(), query.page(), query.search())
        .await?;
    JsonApiResponse::ok(collect(items))
}

async fn count_items(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
) -> ApiResult<CountResponse> {
    let count = item_service(&state).count(&current.id()).await?;
    JsonApiResponse::ok(CountResponse { count })
}

async fn get_item(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<ItemResponse> {
    let item = item_service(&state).find_one(&id, &current.id()).await?;
    JsonApiResponse::ok(item.into())
}

async fn update_item(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateItemRequest>,
) -> ApiResult<ItemResponse> {
    let item = item_service(&state)
        .update(&id, body.into(), &current.id())
        .await?;
    JsonApiResponse::ok(item.into())
}

async fn remove_item(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<ItemResponse> {
    let item = item_service(&state).remove(&id, &current.id()).await?;
    JsonApiResponse::with_status(StatusCode::OK, "deleted", item.into())
}

impl From<CreateItemRequest> for CreateItemInput {
    fn from(body: CreateItemRequest) -> Self {
        Self {
            name: body.name,
            quantity: body.quantity,
            quantity_units: body.quantity_units,
        }
    }
}

impl From<UpdateItemRequest> for UpdateItemInput {
    fn from(body: UpdateItemRequest) -> Self {
        Self {
            name: body.name,
            quantity: body.quantity,
            quantity_units: body.quantity_units,
        }
    }
}
