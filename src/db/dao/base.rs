use chrono::Utc;
use sea_orm::sea_query::{Expr, ExprTrait, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult,
    IntoActiveModel, PaginatorTrait, PrimaryKeyTrait, QueryFilter, QueryOrder, QuerySelect,
    Select,
};
use serde::Deserialize;
use uuid::Uuid;

use super::base_traits::{HasBaseColumns, HasIdActiveModel, OwnedEntity, TimestampedActiveModel};
use super::error::{DaoLayerError, DaoResult};

const LIKE_ESCAPE: char = '\\';

/// Limit/offset window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
}

impl Pagination {
    pub const DEFAULT_LIMIT: u64 = 10;
    /// Postgres binds offsets as BIGINT.
    pub const MAX_OFFSET: u64 = i64::MAX as u64;

    pub fn new(limit: u64, offset: u64) -> Self {
        Self { limit, offset }
    }

    /// Offsets past `MAX_OFFSET` are clamped; they already lie beyond any
    /// result set, so the page comes back empty.
    pub fn bounded_offset(&self) -> u64 {
        Ord::min(self.offset, Self::MAX_OFFSET)
    }

    fn check(&self, max: u64) -> DaoResult<()> {
        if self.limit == 0 || self.limit > max {
            return Err(DaoLayerError::InvalidPagination {
                limit: self.limit,
                offset: self.offset,
                max,
            });
        }
        Ok(())
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT, 0)
    }
}

/// Trimmed search term, or `None` when there is nothing to match on.
pub fn search_term(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
}

pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

/// `LOWER(column) LIKE '%term%'`
pub fn contains_ci<C: ColumnTrait>(column: C, term: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
    Condition::all().add(
        Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)),
    )
}

#[async_trait::async_trait]
pub trait DaoBase: Clone + Send + Sync + Sized
where
    <Self::Entity as EntityTrait>::Model:
        FromQueryResult + IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel> + Send + Sync,
    <Self::Entity as EntityTrait>::ActiveModel:
        ActiveModelTrait<Entity = Self::Entity> + HasIdActiveModel + TimestampedActiveModel + Send,
    <<Self::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType:
        From<Uuid> + Send + Sync,
    Self::Entity: HasBaseColumns,
{
    type Entity: EntityTrait + Send + Sync;
    const MAX_LIMIT: u64 = 100;

    fn new(db: &DatabaseConnection) -> Self;

    fn db(&self) -> &DatabaseConnection;

    async fn create(
        &self,
        data: impl IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel> + Send,
    ) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        let now = Utc::now().fixed_offset();
        let mut active = data.into_active_model();
        active.set_id(Uuid::new_v4());
        active.set_created_at(now);
        active.set_updated_at(now);
        active.insert(self.db()).await.map_err(DaoLayerError::Db)
    }

    async fn find_by_id(&self, id: Uuid) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        Self::Entity::find_by_id(id)
            .one(self.db())
            .await
            .map_err(DaoLayerError::Db)?
            .ok_or(DaoLayerError::NotFound {
                entity: <Self::Entity as HasBaseColumns>::LABEL,
                id,
            })
    }

    async fn find_first(
        &self,
        apply: impl FnOnce(Select<Self::Entity>) -> Select<Self::Entity> + Send,
    ) -> DaoResult<Option<<Self::Entity as EntityTrait>::Model>> {
        apply(Self::Entity::find())
            .one(self.db())
            .await
            .map_err(DaoLayerError::Db)
    }

    /// One page ordered by creation time, ties broken by id.
    async fn find(
        &self,
        page: Pagination,
        apply: impl FnOnce(Select<Self::Entity>) -> Select<Self::Entity> + Send,
    ) -> DaoResult<Vec<<Self::Entity as EntityTrait>::Model>> {
        page.check(Self::MAX_LIMIT)?;

        apply(Self::Entity::find())
            .order_by_asc(<Self::Entity as HasBaseColumns>::created_at_column())
            .order_by_asc(<Self::Entity as HasBaseColumns>::id_column())
            .limit(page.limit)
            .offset(page.bounded_offset())
            .all(self.db())
            .await
            .map_err(DaoLayerError::Db)
    }

    async fn count(
        &self,
        apply: impl FnOnce(Select<Self::Entity>) -> Select<Self::Entity> + Send,
    ) -> DaoResult<u64> {
        apply(Self::Entity::find())
            .count(self.db())
            .await
            .map_err(DaoLayerError::Db)
    }

    async fn update<F>(&self, id: Uuid, apply: F) -> DaoResult<<Self::Entity as EntityTrait>::Model>
    where
        F: for<'a> FnOnce(&'a mut <Self::Entity as EntityTrait>::ActiveModel) + Send,
    {
        let model = self.find_by_id(id).await?;
        self.save_changes(model, apply).await
    }

    async fn save_changes<F>(
        &self,
        model: <Self::Entity as EntityTrait>::Model,
        apply: F,
    ) -> DaoResult<<Self::Entity as EntityTrait>::Model>
    where
        F: for<'a> FnOnce(&'a mut <Self::Entity as EntityTrait>::ActiveModel) + Send,
    {
        let mut active = model.into_active_model();
        apply(&mut active);
        active.set_updated_at(Utc::now().fixed_offset());

        active.update(self.db()).await.map_err(DaoLayerError::Db)
    }

    async fn delete(&self, id: Uuid) -> DaoResult<Uuid> {
        let result = Self::Entity::delete_by_id(id)
            .exec(self.db())
            .await
            .map_err(DaoLayerError::Db)?;

        if result.rows_affected == 0 {
            return Err(DaoLayerError::NotFound {
                entity: <Self::Entity as HasBaseColumns>::LABEL,
                id,
            });
        }

        Ok(id)
    }

    /// Looks a record up by id inside the owner's scope. Records of other
    /// owners are reported exactly like missing ones.
    async fn find_owned(
        &self,
        id: Uuid,
        owner: Uuid,
    ) -> DaoResult<<Self::Entity as EntityTrait>::Model>
    where
        Self::Entity: OwnedEntity,
    {
        self.find_first(move |query| {
            query
                .filter(<Self::Entity as HasBaseColumns>::id_column().eq(id))
                .filter(<Self::Entity as OwnedEntity>::owner_column().eq(owner))
        })
        .await?
        .ok_or(DaoLayerError::NotFound {
            entity: <Self::Entity as HasBaseColumns>::LABEL,
            id,
        })
    }

    async fn find_all_owned(
        &self,
        owner: Uuid,
        page: Pagination,
        search: Option<&str>,
    ) -> DaoResult<Vec<<Self::Entity as EntityTrait>::Model>>
    where
        Self::Entity: OwnedEntity,
    {
        let term = search_term(search);
        self.find(page, move |query| {
            let query = query.filter(<Self::Entity as OwnedEntity>::owner_column().eq(owner));
            match term {
                Some(term) => query.filter(contains_ci(
                    <Self::Entity as OwnedEntity>::search_column(),
                    &term,
                )),
                None => query,
            }
        })
        .await
    }

    async fn count_owned(&self, owner: Uuid) -> DaoResult<u64>
    where
        Self::Entity: OwnedEntity,
    {
        self.count(move |query| {
            query.filter(<Self::Entity as OwnedEntity>::owner_column().eq(owner))
        })
        .await
    }

    async fn update_owned<F>(
        &self,
        id: Uuid,
        owner: Uuid,
        apply: F,
    ) -> DaoResult<<Self::Entity as EntityTrait>::Model>
    where
        Self::Entity: OwnedEntity,
        F: for<'a> FnOnce(&'a mut <Self::Entity as EntityTrait>::ActiveModel) + Send,
    {
        let model = self.find_owned(id, owner).await?;
        self.save_changes(model, apply).await
    }
}
