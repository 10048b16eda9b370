use sea_orm::{DbErr, Set, SqlErr};
use uuid::Uuid;

use crate::{
    auth::{
        Role,
        password::{MIN_PASSWORD_LEN, hash_password},
    },
    db::dao::{DaoBase, DaoLayerError, NewUser, Pagination, UserDao},
    db::entities::user,
    error::AppError,
};

#[derive(Debug, Clone)]
pub struct SignupInput {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
    pub roles: Option<Vec<Role>>,
}

#[derive(Clone)]
pub struct UserService {
    user_dao: UserDao,
}

pub fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid || email.chars().any(char::is_whitespace) {
        return Err(AppError::bad_request("email must be a valid email address"));
    }
    Ok(email)
}

fn normalize_name(field: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::bad_request(format!("{field} must not be empty")));
    }
    Ok(value.to_string())
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn duplicate_email(email: &str) -> AppError {
    AppError::conflict(format!("User with email {email} already exists"))
}

impl UserService {
    pub fn new(user_dao: UserDao) -> Self {
        Self { user_dao }
    }

    /// Classifies store failures: a unique violation is a duplicate email,
    /// anything else is logged and reported opaquely.
    fn map_store_error(err: DaoLayerError, email: &str) -> AppError {
        match err {
            DaoLayerError::Db(db_err) if is_unique_violation(&db_err) => duplicate_email(email),
            other => other.into(),
        }
    }

    pub async fn create(&self, input: SignupInput, roles: &[Role]) -> Result<user::Model, AppError> {
        let email = normalize_email(&input.email)?;
        let first_name = normalize_name("first_name", &input.first_name)?;
        let last_name = normalize_name("last_name", &input.last_name)?;
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::bad_request(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if roles.is_empty() {
            return Err(AppError::bad_request("roles must not be empty"));
        }

        if self.user_dao.find_by_email(&email).await?.is_some() {
            return Err(duplicate_email(&email));
        }

        let password_hash = hash_password(&input.password)?;
        let user = self
            .user_dao
            .create_user(NewUser {
                email: email.clone(),
                first_name,
                last_name,
                password_hash,
                roles: Role::to_tags(roles),
            })
            .await
            .map_err(|err| Self::map_store_error(err, &email))?;

        tracing::info!(user_id = %user.id, "user created");
        Ok(user)
    }

    pub async fn find_all(
        &self,
        roles: &[Role],
        page: Pagination,
        search: Option<&str>,
    ) -> Result<Vec<user::Model>, AppError> {
        Ok(self
            .user_dao
            .list_users(&Role::to_tags(roles), page, search)
            .await?)
    }

    pub async fn find_one_by_email(&self, email: &str) -> Result<user::Model, AppError> {
        let email = email.trim().to_lowercase();
        self.user_dao
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with email {email} not found")))
    }

    pub async fn find_one_by_id(&self, id: &Uuid) -> Result<user::Model, AppError> {
        Ok(self.user_dao.find_by_id(*id).await?)
    }

    /// Merges the provided fields onto the stored user and stamps
    /// `last_updated_by` in the same statement.
    pub async fn update(
        &self,
        id: &Uuid,
        input: UpdateUserInput,
        updated_by: &Uuid,
    ) -> Result<user::Model, AppError> {
        let email = input.email.as_deref().map(normalize_email).transpose()?;
        let first_name = input
            .first_name
            .as_deref()
            .map(|value| normalize_name("first_name", value))
            .transpose()?;
        let last_name = input
            .last_name
            .as_deref()
            .map(|value| normalize_name("last_name", value))
            .transpose()?;
        if matches!(input.roles.as_deref(), Some([])) {
            return Err(AppError::bad_request("roles must not be empty"));
        }
        let password_hash = input.password.as_deref().map(hash_password).transpose()?;
        let roles = input.roles.as_deref().map(Role::to_tags);

        let updated_by = *updated_by;
        let conflict_email = email.clone().unwrap_or_default();
        let user = self
            .user_dao
            .update(*id, move |active| {
                if let Some(email) = email {
                    active.email = Set(email);
                }
                if let Some(first_name) = first_name {
                    active.first_name = Set(first_name);
                }
                if let Some(last_name) = last_name {
                    active.last_name = Set(last_name);
                }
                if let Some(password_hash) = password_hash {
                    active.password_hash = Set(password_hash);
                }
                if let Some(roles) = roles {
                    active.roles = Set(roles);
                }
                active.last_updated_by = Set(Some(updated_by));
            })
            .await
            .map_err(|err| Self::map_store_error(err, &conflict_email))?;

        tracing::info!(user_id = %user.id, updated_by = %updated_by, "user updated");
        Ok(user)
    }

    /// Deactivates the account. There is no way back through the API.
    pub async fn block(&self, id: &Uuid, blocked_by: &Uuid) -> Result<user::Model, AppError> {
        let user = self.user_dao.block(id, blocked_by).await?;
        tracing::info!(user_id = %user.id, blocked_by = %blocked_by, "user blocked");
        Ok(user)
    }
}
