use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::entities::user;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
    Superadmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Superadmin => "superadmin",
        }
    }

    /// Stored role tags to roles. Unknown tags are dropped.
    pub fn from_tags(tags: &[String]) -> Vec<Role> {
        tags.iter()
            .filter_map(|tag| Role::try_from(tag.as_str()).ok())
            .collect()
    }

    pub fn to_tags(roles: &[Role]) -> Vec<String> {
        roles.iter().map(|role| role.as_str().to_string()).collect()
    }
}

impl TryFrom<&str> for Role {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            "superadmin" => Ok(Role::Superadmin),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role set an operation accepts. An empty set admits any authenticated user.
pub trait RequiredRoles {
    fn required() -> &'static [Role];
}

pub struct AnyRole;

impl RequiredRoles for AnyRole {
    fn required() -> &'static [Role] {
        &[]
    }
}

pub struct AdminRoles;

impl RequiredRoles for AdminRoles {
    fn required() -> &'static [Role] {
        &[Role::Admin, Role::Superadmin]
    }
}

pub struct SuperadminRole;

impl RequiredRoles for SuperadminRole {
    fn required() -> &'static [Role] {
        &[Role::Superadmin]
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user id
    pub iat: usize,
    pub exp: usize,
}

/// Principal attached to a request once the bearer token resolved to an
/// active user.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: user::Model,
    pub roles: Vec<Role>,
}

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.user.id
    }

    pub fn has_any(&self, roles: &[Role]) -> bool {
        self.roles.iter().any(|role| roles.contains(role))
    }
}

impl From<user::Model> for AuthUser {
    fn from(user: user::Model) -> Self {
        let roles = Role::from_tags(&user.roles);
        Self { user, roles }
    }
}
