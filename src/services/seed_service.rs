use futures_util::future::try_join_all;
use rand::Rng;

use crate::{
    config::Environment,
    db::dao::{DaoContext, NewListItem, Pagination},
    db::entities::{item, list, user},
    error::AppError,
    services::{
        ServiceContext,
        item_service::CreateItemInput,
        seed_data::{SEED_ITEMS, SEED_LIST_ENTRIES, SEED_LISTS, SEED_USERS},
        user_service::SignupInput,
    },
};

pub const SEED_FORBIDDEN: &str = "Seeding is not allowed in production";

/// Wipes every table and reloads the fixtures.
#[derive(Clone)]
pub struct SeedService {
    environment: Environment,
    services: ServiceContext,
    daos: DaoContext,
}

fn random_entry_states(count: usize) -> Vec<(i32, bool)> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| (rng.gen_range(0..=10), rng.gen_bool(0.5)))
        .collect()
}

impl SeedService {
    pub fn new(environment: Environment, services: ServiceContext, daos: DaoContext) -> Self {
        Self {
            environment,
            services,
            daos,
        }
    }

    pub async fn execute_seed(&self) -> Result<bool, AppError> {
        if self.environment.is_production() {
            tracing::warn!("seed requested in production, refusing");
            return Err(AppError::forbidden(SEED_FORBIDDEN));
        }

        self.delete_database().await?;
        let owner = self.load_users().await?;
        self.load_items(&owner).await?;
        let list = self.load_lists(&owner).await?;
        let items = self
            .services
            .item()
            .find_all(&owner.id, Pagination::new(SEED_LIST_ENTRIES, 0), None)
            .await?;
        self.load_list_items(&list, &items).await?;

        tracing::info!(
            users = SEED_USERS.len(),
            items = SEED_ITEMS.len(),
            lists = SEED_LISTS.len(),
            list_items = items.len(),
            "database seeded"
        );
        Ok(true)
    }

    // Children before parents so foreign keys never dangle.
    async fn delete_database(&self) -> Result<(), AppError> {
        self.daos.list_item().delete_all().await?;
        self.daos.list().delete_all().await?;
        self.daos.item().delete_all().await?;
        self.daos.user().delete_all().await?;
        Ok(())
    }

    async fn load_users(&self) -> Result<user::Model, AppError> {
        let users = self.services.user();
        let mut created = Vec::with_capacity(SEED_USERS.len());
        for seed in SEED_USERS {
            let input = SignupInput {
                email: seed.email.to_string(),
                first_name: seed.first_name.to_string(),
                last_name: seed.last_name.to_string(),
                password: seed.password.to_string(),
            };
            created.push(users.create(input, seed.roles).await?);
        }
        created
            .into_iter()
            .next()
            .ok_or_else(|| AppError::internal("seed fixtures define no users"))
    }

    async fn load_items(&self, owner: &user::Model) -> Result<Vec<item::Model>, AppError> {
        let items = self.services.item();
        try_join_all(SEED_ITEMS.iter().map(|seed| {
            items.create(
                CreateItemInput {
                    name: seed.name.to_string(),
                    quantity: seed.quantity,
                    quantity_units: seed.quantity_units.map(str::to_string),
                },
                &owner.id,
            )
        }))
        .await
    }

    async fn load_lists(&self, owner: &user::Model) -> Result<list::Model, AppError> {
        let lists = self.services.list();
        let mut created = Vec::with_capacity(SEED_LISTS.len());
        for name in SEED_LISTS {
            created.push(lists.create(name, &owner.id).await?);
        }
        created
            .into_iter()
            .next()
            .ok_or_else(|| AppError::internal("seed fixtures define no lists"))
    }

    async fn load_list_items(&self, list: &list::Model, items: &[item::Model]) -> Result<(), AppError> {
        let dao = self.daos.list_item();
        let states = random_entry_states(items.len());
        for (item, (quantity, completed)) in items.iter().zip(states) {
            dao.create_entry(NewListItem {
                list_id: list.id,
                item_id: item.id,
                quantity,
                completed,
            })
            .await?;
        }
        Ok(())
    }
}
