use std::marker::PhantomData;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    auth::{AnyRole, AuthUser, RequiredRoles, Role},
    error::AppError,
};

/// Role check for an already authenticated principal.
///
/// An empty `required` set admits any principal. A missing principal means
/// the authentication layer did not run, which is a server fault.
pub fn authorize(principal: Option<&AuthUser>, required: &[Role]) -> Result<AuthUser, AppError> {
    let principal = principal.ok_or_else(|| {
        AppError::internal_with_source(
            "Authenticated user not found in request",
            "role check ran without require_auth",
        )
    })?;

    if required.is_empty() || principal.has_any(required) {
        return Ok(principal.clone());
    }

    let allowed = required
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    Err(AppError::forbidden(format!(
        "You do not have permission to access this resource. Only users with the following roles are allowed: {allowed}"
    )))
}

/// Extractor yielding the current user once it passes the role set of `R`.
pub struct CurrentUser<R: RequiredRoles = AnyRole> {
    pub user: AuthUser,
    _marker: PhantomData<R>,
}

impl<R: RequiredRoles> CurrentUser<R> {
    pub fn id(&self) -> uuid::Uuid {
        self.user.id()
    }
}

impl<S, R> FromRequestParts<S> for CurrentUser<R>
where
    S: Send + Sync,
    R: RequiredRoles,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authorize(parts.extensions.get::<AuthUser>(), R::required())?;
        Ok(Self {
            user,
            _marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use uuid::Uuid;

    use super::authorize;
    use crate::{
        auth::{AdminRoles, AuthUser, RequiredRoles, Role, SuperadminRole},
        db::entities::user,
        error::AppError,
    };

    fn principal(roles: &[&str]) -> AuthUser {
        let now = FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp should be valid");
        AuthUser::from(user::Model {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            email: "alice@example.com".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Doe".to_string(),
            password_hash: "hash".to_string(),
            roles: roles.iter().map(|role| role.to_string()).collect(),
            is_active: true,
            last_updated_by: None,
        })
    }

    #[test]
    fn empty_role_set_admits_any_user() {
        let user = principal(&["user"]);
        let admitted = authorize(Some(&user), &[]).expect("any user passes");
        assert_eq!(admitted.id(), user.id());
    }

    #[test]
    fn intersecting_role_admits_user() {
        let user = principal(&["user", "superadmin"]);
        assert!(authorize(Some(&user), AdminRoles::required()).is_ok());
        assert!(authorize(Some(&user), SuperadminRole::required()).is_ok());
    }

    #[test]
    fn denial_lists_accepted_roles() {
        let user = principal(&["user"]);
        let err = authorize(Some(&user), &[Role::Admin]).expect_err("user is not admin");
        assert!(matches!(err, AppError::Forbidden(ref m) if m.ends_with("allowed: admin")));

        let err = authorize(Some(&user), AdminRoles::required()).expect_err("denied");
        assert_eq!(
            err.message(),
            "You do not have permission to access this resource. Only users with the following roles are allowed: admin, superadmin"
        );
    }

    #[test]
    fn missing_principal_is_internal() {
        let err = authorize(None, &[]).expect_err("no principal");
        assert!(matches!(err, AppError::Internal(_)));
    }
}
