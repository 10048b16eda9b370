use sea_orm::DatabaseConnection;

use super::{DaoBase, ItemDao, ListDao, ListItemDao, UserDao};

#[derive(Clone)]
pub struct DaoContext {
    db: DatabaseConnection,
}

impl DaoContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub fn user(&self) -> UserDao {
        DaoBase::new(&self.db)
    }

    pub fn item(&self) -> ItemDao {
        DaoBase::new(&self.db)
    }

    pub fn list(&self) -> ListDao {
        DaoBase::new(&self.db)
    }

    pub fn list_item(&self) -> ListItemDao {
        DaoBase::new(&self.db)
    }
}
