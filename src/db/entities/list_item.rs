use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

// (list_id, item_id) is not unique: an item may appear in a list more than once.
#[base_entity(label = "List item")]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "list_items")]
pub struct Model {
    #[sea_orm(default_value = 0)]
    pub quantity: i32,
    #[sea_orm(default_value = false)]
    pub completed: bool,
    #[sea_orm(indexed)]
    pub list_id: Uuid,
    #[sea_orm(indexed)]
    pub item_id: Uuid,
    #[sea_orm(belongs_to, from = "list_id", to = "id")]
    pub list: HasOne<super::list::Entity>,
    #[sea_orm(belongs_to, from = "item_id", to = "id")]
    pub item: HasOne<super::item::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
