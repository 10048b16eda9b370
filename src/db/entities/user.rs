use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

#[base_entity(label = "User")]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(unique)]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub roles: Vec<String>,
    #[sea_orm(default_value = true)]
    pub is_active: bool,
    pub last_updated_by: Option<Uuid>,
    #[sea_orm(has_many)]
    pub items: HasMany<super::item::Entity>,
    #[sea_orm(has_many)]
    pub lists: HasMany<super::list::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
