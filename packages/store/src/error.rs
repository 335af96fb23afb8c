//! Store error type shared by every backend.

use thiserror::Error;

use crate::models::FruitId;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Fruit {0} not found")]
    NotFound(FruitId),

    #[error("Username {0} is already taken")]
    Conflict(String),

    #[error("Store failure: {0}")]
    Backend(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wrap any backend error (database driver, pool, ...).
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}
