use sea_orm::Set;
use uuid::Uuid;

use crate::{
    db::dao::{DaoBase, ItemDao, NewItem, Pagination},
    db::entities::item,
    error::AppError,
};

#[derive(Debug, Clone)]
pub struct CreateItemInput {
    pub name: String,
    pub quantity: Option<f64>,
    pub quantity_units: Option<String>,
}

/// `None` keeps the stored value; `Some(None)` clears a nullable field.
#[derive(Debug, Clone, Default)]
pub struct UpdateItemInput {
    pub name: Option<String>,
    pub quantity: Option<Option<f64>>,
    pub quantity_units: Option<Option<String>>,
}

#[derive(Clone)]
pub struct ItemService {
    item_dao: ItemDao,
}

pub(crate) fn normalize_name(value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::bad_request("name must not be empty"));
    }
    Ok(value.to_string())
}

fn check_quantity(quantity: Option<f64>) -> Result<Option<f64>, AppError> {
    match quantity {
        Some(value) if !value.is_finite() || value < 0.0 => Err(AppError::bad_request(
            "quantity must be a non-negative number",
        )),
        other => Ok(other),
    }
}

fn normalize_units(units: Option<String>) -> Option<String> {
    units
        .map(|units| units.trim().to_string())
        .filter(|units| !units.is_empty())
}

impl ItemService {
    pub fn new(item_dao: ItemDao) -> Self {
        Self { item_dao }
    }

    pub async fn create(&self, input: CreateItemInput, owner: &Uuid) -> Result<item::Model, AppError> {
        let new_item = NewItem {
            name: normalize_name(&input.name)?,
            quantity: check_quantity(input.quantity)?,
            quantity_units: normalize_units(input.quantity_units),
        };
        Ok(self.item_dao.create_item(owner, new_item).await?)
    }

    pub async fn find_all(
        &self,
        owner: &Uuid,
        page: Pagination,
        search: Option<&str>,
    ) -> Result<Vec<item::Model>, AppError> {
        Ok(self.item_dao.find_all_owned(*owner, page, search).await?)
    }

    pub async fn find_one(&self, id: &Uuid, owner: &Uuid) -> Result<item::Model, AppError> {
        Ok(self.item_dao.find_owned(*id, *owner).await?)
    }

    pub async fn update(
        &self,
        id: &Uuid,
        input: UpdateItemInput,
        owner: &Uuid,
    ) -> Result<item::Model, AppError> {
        let name = input.name.as_deref().map(normalize_name).transpose()?;
        let quantity = input.quantity.map(check_quantity).transpose()?;
        let quantity_units = input.quantity_units.map(normalize_units);

        Ok(self
            .item_dao
            .update_owned(*id, *owner, move |active| {
                if let Some(name) = name {
                    active.name = Set(name);
                }
                if let Some(quantity) = quantity {
                    active.quantity = Set(quantity);
                }
                if let Some(quantity_units) = quantity_units {
                    active.quantity_units = Set(quantity_units);
                }
            })
            .await?)
    }

    pub async fn remove(&self, id: &Uuid, owner: &Uuid) -> Result<item::Model, AppError> {
        Ok(self.item_dao.remove_owned(id, owner).await?)
    }

    pub async fn count(&self, owner: &Uuid) -> Result<u64, AppError> {
        Ok(self.item_dao.count_owned(*owner).await?)
    }
}
