use sea_orm::DbErr;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum DaoLayerError {
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: Uuid },
    #[error("Invalid pagination: limit={limit} offset={offset} (limit must be 1..={max})")]
    InvalidPagination { limit: u64, offset: u64, max: u64 },
}

pub type DaoResult<T> = Result<T, DaoLayerError>;
