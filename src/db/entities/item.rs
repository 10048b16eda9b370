use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

#[base_entity(label = "Item", owner = "user_id", search = "name")]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    pub name: String,
    pub quantity: Option<f64>,
    pub quantity_units: Option<String>,
    #[sea_orm(indexed)]
    pub user_id: Uuid,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,
    #[sea_orm(has_many)]
    pub list_items: HasMany<super::list_item::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
