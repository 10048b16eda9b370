#[allow(unused_imports)]
pub mod prelude {
    pub use super::item::Entity as Item;
    pub use super::list::Entity as List;
    pub use super::list_item::Entity as ListItem;
    pub use super::user::Entity as User;
}

pub mod item;
pub mod list;
pub mod list_item;
pub mod user;
