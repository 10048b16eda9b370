use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use super::{DaoBase, DaoResult};
use crate::db::entities::prelude::{List, ListItem};
use crate::db::entities::{list, list_item};

#[derive(Clone)]
pub struct ListDao {
    db: DatabaseConnection,
}

impl DaoBase for ListDao {
    type Entity = List;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl ListDao {
    pub async fn create_list(&self, owner: &Uuid, name: &str) -> DaoResult<list::Model> {
        let model = list::ActiveModel {
            name: Set(name.to_string()),
            user_id: Set(*owner),
            ..Default::default()
        };
        self.create(model).await
    }

    pub async fn rename_owned(
        &self,
        id: &Uuid,
        owner: &Uuid,
        name: &str,
    ) -> DaoResult<list::Model> {
        let name = name.to_string();
        self.update_owned(*id, *owner, move |active| {
            active.name = Set(name);
        })
        .await
    }

    /// Lists own their entries, so removal clears `list_items` first.
    pub async fn remove_owned(&self, id: &Uuid, owner: &Uuid) -> DaoResult<list::Model> {
        let model = self.find_owned(*id, *owner).await?;

        let txn = self.db.begin().await?;
        ListItem::delete_many()
            .filter(list_item::Column::ListId.eq(*id))
            .exec(&txn)
            .await?;
        List::delete_by_id(*id).exec(&txn).await?;
        txn.commit().await?;

        Ok(model)
    }

    pub async fn delete_all(&self) -> DaoResult<u64> {
        let result = List::delete_many().exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}
