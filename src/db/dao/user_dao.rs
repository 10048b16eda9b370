use sea_orm::sea_query::extension::postgres::PgBinOper;
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::base::{Pagination, contains_ci, search_term};
use super::{DaoBase, DaoResult};
use crate::db::entities::{prelude::User, user};

const ROLES_COLUMN_TYPE: &str = "varchar[]";

#[derive(Clone)]
pub struct UserDao {
    db: DatabaseConnection,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub roles: Vec<String>,
}

impl DaoBase for UserDao {
    type Entity = User;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl UserDao {
    pub async fn find_by_email(&self, email: &str) -> DaoResult<Option<user::Model>> {
        let email = email.to_string();
        self.find_first(move |query| query.filter(user::Column::Email.eq(email)))
            .await
    }

    pub async fn create_user(&self, new_user: NewUser) -> DaoResult<user::Model> {
        let model = user::ActiveModel {
            email: Set(new_user.email),
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            password_hash: Set(new_user.password_hash),
            roles: Set(new_user.roles),
            is_active: Set(true),
            last_updated_by: Set(None),
            ..Default::default()
        };
        self.create(model).await
    }

    /// Users whose role array overlaps `roles` (all users when empty),
    /// optionally narrowed by a search over email and names.
    pub async fn list_users(
        &self,
        roles: &[String],
        page: Pagination,
        search: Option<&str>,
    ) -> DaoResult<Vec<user::Model>> {
        let roles = roles.to_vec();
        let term = search_term(search);
        self.find(page, move |mut query| {
            if !roles.is_empty() {
                // `roles` is varchar[]; an uncast array binds as text[].
                let wanted = Expr::val(roles).cast_as(ROLES_COLUMN_TYPE);
                query = query
                    .filter(Expr::col(user::Column::Roles).binary(PgBinOper::Overlap, wanted));
            }
            if let Some(term) = term {
                query = query.filter(
                    Condition::any()
                        .add(contains_ci(user::Column::Email, &term))
                        .add(contains_ci(user::Column::FirstName, &term))
                        .add(contains_ci(user::Column::LastName, &term)),
                );
            }
            query
        })
        .await
    }

    pub async fn block(&self, id: &Uuid, blocked_by: &Uuid) -> DaoResult<user::Model> {
        let blocked_by = *blocked_by;
        self.update(*id, move |active| {
            active.is_active = Set(false);
            active.last_updated_by = Set(Some(blocked_by));
        })
        .await
    }

    pub async fn delete_all(&self) -> DaoResult<u64> {
        let result = User::delete_many().exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}
