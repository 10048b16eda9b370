use std::collections::HashMap;

use sea_orm::Set;
use uuid::Uuid;

use crate::{
    db::dao::{DaoBase, ItemDao, ListDao, ListItemDao, NewListItem, Pagination},
    db::entities::{item, list_item},
    error::AppError,
};

#[derive(Debug, Clone)]
pub struct CreateListItemInput {
    pub list_id: Uuid,
    pub item_id: Uuid,
    pub quantity: Option<i32>,
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateListItemInput {
    pub list_id: Option<Uuid>,
    pub item_id: Option<Uuid>,
    pub quantity: Option<i32>,
    pub completed: Option<bool>,
}

/// A list entry together with the item it points at.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItemDetail {
    pub entry: list_item::Model,
    pub item: item::Model,
}

#[derive(Clone)]
pub struct ListItemService {
    list_dao: ListDao,
    item_dao: ItemDao,
    list_item_dao: ListItemDao,
}

fn check_quantity(quantity: i32) -> Result<i32, AppError> {
    if quantity < 0 {
        return Err(AppError::bad_request("quantity must not be negative"));
    }
    Ok(quantity)
}

impl ListItemService {
    pub fn new(list_dao: ListDao, item_dao: ItemDao, list_item_dao: ListItemDao) -> Self {
        Self {
            list_dao,
            item_dao,
            list_item_dao,
        }
    }

    /// The list and the item must both belong to `owner`.
    pub async fn create(
        &self,
        input: CreateListItemInput,
        owner: &Uuid,
    ) -> Result<ListItemDetail, AppError> {
        let quantity = check_quantity(input.quantity.unwrap_or(0))?;
        self.list_dao.find_owned(input.list_id, *owner).await?;
        let item = self.item_dao.find_owned(input.item_id, *owner).await?;

        let entry = self
            .list_item_dao
            .create_entry(NewListItem {
                list_id: input.list_id,
                item_id: input.item_id,
                quantity,
                completed: input.completed.unwrap_or(false),
            })
            .await?;
        Ok(ListItemDetail { entry, item })
    }

    pub async fn find_all(
        &self,
        list_id: &Uuid,
        owner: &Uuid,
        page: Pagination,
        search: Option<&str>,
    ) -> Result<Vec<ListItemDetail>, AppError> {
        self.list_dao.find_owned(*list_id, *owner).await?;
        let entries = self.list_item_dao.find_by_list(list_id, page, search).await?;
        self.attach_items(entries).await
    }

    pub async fn find_one(&self, id: &Uuid, owner: &Uuid) -> Result<ListItemDetail, AppError> {
        let entry = self.list_item_dao.find_owned_entry(id, owner).await?;
        let item = self.item_dao.find_by_id(entry.item_id).await?;
        Ok(ListItemDetail { entry, item })
    }

    /// Reassigning the list or item checks that the target exists and
    /// belongs to `owner` before anything is written.
    pub async fn update(
        &self,
        id: &Uuid,
        input: UpdateListItemInput,
        owner: &Uuid,
    ) -> Result<ListItemDetail, AppError> {
        let quantity = input.quantity.map(check_quantity).transpose()?;
        let entry = self.list_item_dao.find_owned_entry(id, owner).await?;

        if let Some(list_id) = input.list_id {
            self.list_dao.find_owned(list_id, *owner).await?;
        }
        let item = match input.item_id {
            Some(item_id) => Some(self.item_dao.find_owned(item_id, *owner).await?),
            None => None,
        };

        let (list_id, item_id, completed) = (input.list_id, input.item_id, input.completed);
        let entry = self
            .list_item_dao
            .update_entry(entry, move |active| {
                if let Some(list_id) = list_id {
                    active.list_id = Set(list_id);
                }
                if let Some(item_id) = item_id {
                    active.item_id = Set(item_id);
                }
                if let Some(quantity) = quantity {
                    active.quantity = Set(quantity);
                }
                if let Some(completed) = completed {
                    active.completed = Set(completed);
                }
            })
            .await?;

        let item = match item {
            Some(item) => item,
            None => self.item_dao.find_by_id(entry.item_id).await?,
        };
        Ok(ListItemDetail { entry, item })
    }

    pub async fn remove(&self, id: &Uuid, owner: &Uuid) -> Result<ListItemDetail, AppError> {
        let entry = self.list_item_dao.remove_owned_entry(id, owner).await?;
        let item = self.item_dao.find_by_id(entry.item_id).await?;
        Ok(ListItemDetail { entry, item })
    }

    pub async fn count(&self, list_id: &Uuid, owner: &Uuid) -> Result<u64, AppError> {
        self.list_dao.find_owned(*list_id, *owner).await?;
        Ok(self.list_item_dao.count_by_list(list_id).await?)
    }

    // One secondary query for the whole page.
    async fn attach_items(
        &self,
        entries: Vec<list_item::Model>,
    ) -> Result<Vec<ListItemDetail>, AppError> {
        let mut ids: Vec<Uuid> = entries.iter().map(|entry| entry.item_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let items: HashMap<Uuid, item::Model> = self
            .item_dao
            .find_by_ids(ids)
            .await?
            .into_iter()
            .map(|item| (item.id, item))
            .collect();

        entries
            .into_iter()
            .map(|entry| match items.get(&entry.item_id) {
                Some(item) => Ok(ListItemDetail {
                    item: item.clone(),
                    entry,
                }),
                None => Err(AppError::opaque(format!(
                    "list item {} references missing item {}",
                    entry.id, entry.item_id
                ))),
            })
            .collect()
    }
}
