mod auth;
mod guards;
mod json_error;
mod panic;

pub use auth::require_auth;
pub use guards::{CurrentUser, authorize};
pub use json_error::json_error_middleware;
pub use panic::catch_panic_layer;
