use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use super::{DaoBase, DaoResult};
use crate::db::entities::prelude::{Item, ListItem};
use crate::db::entities::{item, list_item};

#[derive(Clone)]
pub struct ItemDao {
    db: DatabaseConnection,
}

#[derive(Debug, Clone, Default)]
pub struct NewItem {
    pub name: String,
    pub quantity: Option<f64>,
    pub quantity_units: Option<String>,
}

impl DaoBase for ItemDao {
    type Entity = Item;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl ItemDao {
    pub async fn create_item(&self, owner: &Uuid, new_item: NewItem) -> DaoResult<item::Model> {
        let model = item::ActiveModel {
            name: Set(new_item.name),
            quantity: Set(new_item.quantity),
            quantity_units: Set(new_item.quantity_units),
            user_id: Set(*owner),
            ..Default::default()
        };
        self.create(model).await
    }

    pub async fn find_by_ids(&self, ids: Vec<Uuid>) -> DaoResult<Vec<item::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(Item::find()
            .filter(item::Column::Id.is_in(ids))
            .all(&self.db)
            .await?)
    }

    /// Deletes the item together with the list entries pointing at it and
    /// returns the item as it was before removal.
    pub async fn remove_owned(&self, id: &Uuid, owner: &Uuid) -> DaoResult<item::Model> {
        let model = self.find_owned(*id, *owner).await?;

        let txn = self.db.begin().await?;
        ListItem::delete_many()
            .filter(list_item::Column::ItemId.eq(*id))
            .exec(&txn)
            .await?;
        Item::delete_by_id(*id).exec(&txn).await?;
        txn.commit().await?;

        Ok(model)
    }

    pub async fn delete_all(&self) -> DaoResult<u64> {
        let result = Item::delete_many().exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}
