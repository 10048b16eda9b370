use uuid::Uuid;

use crate::{
    db::dao::{DaoBase, ListDao, Pagination},
    db::entities::list,
    error::AppError,
    services::item_service::normalize_name,
};

#[derive(Debug, Clone, Default)]
pub struct UpdateListInput {
    pub name: Option<String>,
}

#[derive(Clone)]
pub struct ListService {
    list_dao: ListDao,
}

impl ListService {
    pub fn new(list_dao: ListDao) -> Self {
        Self { list_dao }
    }

    pub async fn create(&self, name: &str, owner: &Uuid) -> Result<list::Model, AppError> {
        let name = normalize_name(name)?;
        Ok(self.list_dao.create_list(owner, &name).await?)
    }

    pub async fn find_all(
        &self,
        owner: &Uuid,
        page: Pagination,
        search: Option<&str>,
    ) -> Result<Vec<list::Model>, AppError> {
        Ok(self.list_dao.find_all_owned(*owner, page, search).await?)
    }

    pub async fn find_one(&self, id: &Uuid, owner: &Uuid) -> Result<list::Model, AppError> {
        Ok(self.list_dao.find_owned(*id, *owner).await?)
    }

    pub async fn update(
        &self,
        id: &Uuid,
        input: UpdateListInput,
        owner: &Uuid,
    ) -> Result<list::Model, AppError> {
        match input.name.as_deref() {
            Some(name) => {
                let name = normalize_name(name)?;
                Ok(self.list_dao.rename_owned(id, owner, &name).await?)
            }
            // Nothing to merge; still resolve the list so foreign ids stay hidden.
            None => self.find_one(id, owner).await,
        }
    }

    /// Removes the list and its entries, returning the list as it was.
    pub async fn remove(&self, id: &Uuid, owner: &Uuid) -> Result<list::Model, AppError> {
        Ok(self.list_dao.remove_owned(id, owner).await?)
    }

    pub async fn count(&self, owner: &Uuid) -> Result<u64, AppError> {
        Ok(self.list_dao.count_owned(*owner).await?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use uuid::Uuid;

    use super::{ListService, UpdateListInput};
    use crate::{
        db::{dao::DaoContext, entities::list},
        error::AppError,
    };

    fn list_model(id: Uuid, owner: Uuid, name: &str) -> list::Model {
        let now = FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp should be valid");
        list::Model {
            id,
            created_at: now,
            updated_at: now,
            name: name.to_string(),
            user_id: owner,
        }
    }

    fn service(db: &sea_orm::DatabaseConnection) -> ListService {
        ListService::new(DaoContext::new(db).list())
    }

    #[tokio::test]
    async fn empty_update_returns_current_list_without_writing() {
        let owner = Uuid::new_v4();
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[list_model(id, owner, "Groceries")]])
            .into_connection();

        let list = service(&db)
            .update(&id, UpdateListInput::default(), &owner)
            .await
            .expect("update should succeed");
        assert_eq!(list.name, "Groceries");
        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn remove_returns_prior_representation() {
        let owner = Uuid::new_v4();
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[list_model(id, owner, "Party")]])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 3,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        let removed = service(&db).remove(&id, &owner).await.expect("remove");
        assert_eq!(removed.id, id);
        assert_eq!(removed.name, "Party");
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let err = service(&db)
            .create("  ", &Uuid::new_v4())
            .await
            .expect_err("blank name");
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
