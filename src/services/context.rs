use sea_orm::DatabaseConnection;

use crate::{
    auth::TokenService,
    config::Environment,
    db::dao::DaoContext,
    services::{
        auth_service::AuthService, item_service::ItemService,
        list_item_service::ListItemService, list_service::ListService,
        seed_service::SeedService, user_service::UserService,
    },
    state::AppState,
};

#[derive(Clone)]
pub struct ServiceContext {
    daos: DaoContext,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            daos: DaoContext::new(db),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(&state.db)
    }

    pub fn user(&self) -> UserService {
        UserService::new(self.daos.user())
    }

    pub fn item(&self) -> ItemService {
        ItemService::new(self.daos.item())
    }

    pub fn list(&self) -> ListService {
        ListService::new(self.daos.list())
    }

    pub fn list_item(&self) -> ListItemService {
        ListItemService::new(self.daos.list(), self.daos.item(), self.daos.list_item())
    }

    pub fn auth<'a>(&self, tokens: &'a TokenService) -> AuthService<'a> {
        AuthService::new(self.user(), tokens)
    }

    pub fn seed(&self, environment: Environment) -> SeedService {
        SeedService::new(environment, self.clone(), self.daos.clone())
    }
}
