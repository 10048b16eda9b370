use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect, QueryTrait, Set,
};
use uuid::Uuid;

use super::base::{Pagination, contains_ci, search_term};
use super::{DaoBase, DaoLayerError, DaoResult};
use crate::db::entities::prelude::{Item, List, ListItem};
use crate::db::entities::{item, list, list_item};

#[derive(Clone)]
pub struct ListItemDao {
    db: DatabaseConnection,
}

#[derive(Debug, Clone)]
pub struct NewListItem {
    pub list_id: Uuid,
    pub item_id: Uuid,
    pub quantity: i32,
    pub completed: bool,
}

impl DaoBase for ListItemDao {
    type Entity = ListItem;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

// List entries have no owner column; ownership is the owner of the parent list.
fn lists_owned_by(owner: Uuid) -> sea_orm::sea_query::SelectStatement {
    List::find()
        .select_only()
        .column(list::Column::Id)
        .filter(list::Column::UserId.eq(owner))
        .into_query()
}

fn items_named_like(term: &str) -> sea_orm::sea_query::SelectStatement {
    Item::find()
        .select_only()
        .column(item::Column::Id)
        .filter(contains_ci(item::Column::Name, term))
        .into_query()
}

impl ListItemDao {
    pub async fn create_entry(&self, entry: NewListItem) -> DaoResult<list_item::Model> {
        let model = list_item::ActiveModel {
            list_id: Set(entry.list_id),
            item_id: Set(entry.item_id),
            quantity: Set(entry.quantity),
            completed: Set(entry.completed),
            ..Default::default()
        };
        self.create(model).await
    }

    pub async fn find_owned_entry(&self, id: &Uuid, owner: &Uuid) -> DaoResult<list_item::Model> {
        let (id, owner) = (*id, *owner);
        self.find_first(move |query| {
            query
                .filter(list_item::Column::Id.eq(id))
                .filter(list_item::Column::ListId.in_subquery(lists_owned_by(owner)))
        })
        .await?
        .ok_or(DaoLayerError::NotFound {
            entity: "List item",
            id,
        })
    }

    /// Entries of one list; `search` matches the linked item's name.
    pub async fn find_by_list(
        &self,
        list_id: &Uuid,
        page: Pagination,
        search: Option<&str>,
    ) -> DaoResult<Vec<list_item::Model>> {
        let list_id = *list_id;
        let term = search_term(search);
        self.find(page, move |query| {
            let query = query.filter(list_item::Column::ListId.eq(list_id));
            match term {
                Some(term) => {
                    query.filter(list_item::Column::ItemId.in_subquery(items_named_like(&term)))
                }
                None => query,
            }
        })
        .await
    }

    pub async fn count_by_list(&self, list_id: &Uuid) -> DaoResult<u64> {
        let list_id = *list_id;
        self.count(move |query| query.filter(list_item::Column::ListId.eq(list_id)))
            .await
    }

    pub async fn update_entry<F>(
        &self,
        entry: list_item::Model,
        apply: F,
    ) -> DaoResult<list_item::Model>
    where
        F: for<'a> FnOnce(&'a mut list_item::ActiveModel) + Send,
    {
        self.save_changes(entry, apply).await
    }

    pub async fn remove_owned_entry(&self, id: &Uuid, owner: &Uuid) -> DaoResult<list_item::Model> {
        let entry = self.find_owned_entry(id, owner).await?;
        self.delete(entry.id).await?;
        Ok(entry)
    }

    pub async fn delete_all(&self) -> DaoResult<u64> {
        let result = ListItem::delete_many().exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{FixedOffset, TimeZone};
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use uuid::Uuid;

    use crate::db::entities::list_item;

    use super::ListItemDao;
    use crate::db::dao::{DaoBase, DaoLayerError, Pagination};

    fn ts() -> chrono::DateTime<chrono::FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp should be valid")
    }

    fn entry_model(id: Uuid, list_id: Uuid, item_id: Uuid) -> list_item::Model {
        let now = ts();
        list_item::Model {
            id,
            created_at: now,
            updated_at: now,
            quantity: 3,
            completed: false,
            list_id,
            item_id,
        }
    }

    #[tokio::test]
    async fn find_owned_entry_scopes_through_parent_list() {
        let entry_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<list_item::Model>::new()])
            .into_connection();
        let dao = ListItemDao::new(&db);

        let err = dao
            .find_owned_entry(&entry_id, &Uuid::new_v4())
            .await
            .expect_err("foreign entry should be hidden");
        assert!(matches!(err, DaoLayerError::NotFound { id, .. } if id == entry_id));

        let log = db.into_transaction_log();
        let sql = &log[0].statements()[0].sql;
        assert!(sql.contains(r#""list_id" IN (SELECT"#), "sql: {sql}");
        assert!(sql.contains(r#""lists""#), "sql: {sql}");
    }

    #[tokio::test]
    async fn find_by_list_searches_item_names() {
        let list_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[entry_model(Uuid::new_v4(), list_id, Uuid::new_v4())]])
            .into_connection();
        let dao = ListItemDao::new(&db);

        let entries = dao
            .find_by_list(&list_id, Pagination::default(), Some("milk"))
            .await
            .expect("query should succeed");
        assert_eq!(entries.len(), 1);

        let log = db.into_transaction_log();
        let sql = &log[0].statements()[0].sql;
        assert!(sql.contains(r#""item_id" IN (SELECT"#), "sql: {sql}");
        assert!(sql.contains(r#""items""#), "sql: {sql}");
    }

    #[tokio::test]
    async fn count_by_list_reads_count_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[BTreeMap::from([(
                "num_items",
                Value::BigInt(Some(4)),
            )])]])
            .into_connection();
        let dao = ListItemDao::new(&db);

        let count = dao
            .count_by_list(&Uuid::new_v4())
            .await
            .expect("count should succeed");
        assert_eq!(count, 4);
    }
}
