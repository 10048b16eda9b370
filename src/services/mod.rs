pub mod auth_service;
pub mod context;
pub mod item_service;
pub mod list_item_service;
pub mod list_service;
pub mod seed_data;
pub mod seed_service;
pub mod user_service;

pub use context::ServiceContext;
