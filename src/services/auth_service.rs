use uuid::Uuid;

use crate::{
    auth::{AuthUser, Role, TokenService, jwt::INVALID_TOKEN, password::verify_password},
    db::entities::user,
    error::AppError,
    services::user_service::{SignupInput, UserService},
};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const INACTIVE_USER: &str = "User is inactive, please contact admin";

#[derive(Debug, Clone)]
pub struct AuthResponse {
    pub token: String,
    pub user: user::Model,
}

#[derive(Clone)]
pub struct AuthService<'a> {
    users: UserService,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    pub fn new(users: UserService, tokens: &'a TokenService) -> Self {
        Self { users, tokens }
    }

    fn respond(&self, user: user::Model) -> Result<AuthResponse, AppError> {
        let token = self.tokens.issue(&user.id)?;
        Ok(AuthResponse { token, user })
    }

    /// New accounts always start with the `user` role.
    pub async fn signup(&self, input: SignupInput) -> Result<AuthResponse, AppError> {
        let user = self.users.create(input, &[Role::User]).await?;
        self.respond(user)
    }

    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let user = match self.users.find_one_by_email(email).await {
            Ok(user) => user,
            Err(AppError::NotFound(_)) => return Err(AppError::unauthorized(INVALID_CREDENTIALS)),
            Err(err) => return Err(err),
        };

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }
        if !user.is_active {
            return Err(AppError::unauthorized(INACTIVE_USER));
        }

        tracing::info!(user_id = %user.id, "login succeeded");
        self.respond(user)
    }

    pub fn revalidate(&self, current: &AuthUser) -> Result<AuthResponse, AppError> {
        self.respond(current.user.clone())
    }

    /// Resolves a verified token subject to a live principal.
    pub async fn validate_user(&self, user_id: &Uuid) -> Result<AuthUser, AppError> {
        let user = match self.users.find_one_by_id(user_id).await {
            Ok(user) => user,
            Err(AppError::NotFound(_)) => return Err(AppError::unauthorized(INVALID_TOKEN)),
            Err(err) => return Err(err),
        };
        if !user.is_active {
            return Err(AppError::unauthorized(INACTIVE_USER));
        }
        Ok(AuthUser::from(user))
    }

    pub async fn authenticate(&self, token: &str) -> Result<AuthUser, AppError> {
        let user_id = self.tokens.verify_subject(token)?;
        self.validate_user(&user_id).await
    }
}
