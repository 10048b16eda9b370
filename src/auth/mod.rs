pub mod bootstrap;
pub mod jwt;
pub mod password;
mod types;

pub use jwt::TokenService;
pub use types::{AdminRoles, AnyRole, AuthUser, Claims, RequiredRoles, Role, SuperadminRole};
