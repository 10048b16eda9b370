pub mod base;
pub mod base_traits;
mod context;
pub mod error;
pub mod item_dao;
pub mod list_dao;
pub mod list_item_dao;
pub mod user_dao;

pub use base::{DaoBase, Pagination, contains_ci, search_term};
pub use base_traits::{HasBaseColumns, HasIdActiveModel, OwnedEntity, TimestampedActiveModel};
pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use item_dao::{ItemDao, NewItem};
pub use list_dao::ListDao;
pub use list_item_dao::{ListItemDao, NewListItem};
pub use user_dao::{NewUser, UserDao};
