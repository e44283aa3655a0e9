use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),
    #[error("cannot encode row: {0}")]
    Encode(#[from] serde_json::Error),
}
