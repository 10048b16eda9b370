use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    auth::Role,
    db::entities::{item, list, user},
    services::{auth_service::AuthResponse, list_item_service::ListItemDetail},
};

/// Public view of a user. The password hash never leaves the service layer.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: Vec<Role>,
    pub is_active: bool,
    pub last_updated_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Debug, Serialize)]
pub struct AuthResponseBody {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: Uuid,
    pub name: String,
    pub quantity: Option<f64>,
    pub quantity_units: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub id: Uuid,
    pub name: String,
    pub user_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Debug, Serialize)]
pub struct ListItemResponse {
    pub id: Uuid,
    pub quantity: i32,
    pub completed: bool,
    pub list_id: Uuid,
    pub item: ItemResponse,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: u64,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            roles: Role::from_tags(&model.roles),
            id: model.id,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            is_active: model.is_active,
            last_updated_by: model.last_updated_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<AuthResponse> for AuthResponseBody {
    fn from(response: AuthResponse) -> Self {
        Self {
            token: response.token,
            user: response.user.into(),
        }
    }
}

impl From<item::Model> for ItemResponse {
    fn from(model: item::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            quantity: model.quantity,
            quantity_units: model.quantity_units,
            user_id: model.user_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<list::Model> for ListResponse {
    fn from(model: list::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            user_id: model.user_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ListItemDetail> for ListItemResponse {
    fn from(detail: ListItemDetail) -> Self {
        let ListItemDetail { entry, item } = detail;
        Self {
            id: entry.id,
            quantity: entry.quantity,
            completed: entry.completed,
            list_id: entry.list_id,
            item: item.into(),
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

pub fn collect<M, R: From<M>>(models: Vec<M>) -> Vec<R> {
    models.into_iter().map(R::from).collect()
}
