pub mod auth;
pub mod dto;
pub mod health;
pub mod items;
pub mod list_items;
pub mod lists;
pub mod query;
mod router;
pub mod seed;
pub mod users;

pub use router::router;
