use sea_orm::entity::prelude::DateTimeWithTimeZone;

/// Columns every entity gets from `#[base_entity]`.
pub trait HasBaseColumns: sea_orm::EntityTrait {
    const LABEL: &'static str;

    fn id_column() -> Self::Column;
    fn created_at_column() -> Self::Column;
}

/// Entities owned by a single user and searchable by one text column.
pub trait OwnedEntity: HasBaseColumns {
    fn owner_column() -> Self::Column;
    fn search_column() -> Self::Column;
}

pub trait HasIdActiveModel {
    fn set_id(&mut self, id: uuid::Uuid);
}

pub trait TimestampedActiveModel {
    fn set_created_at(&mut self, ts: DateTimeWithTimeZone);
    fn set_updated_at(&mut self, ts: DateTimeWithTimeZone);
}
