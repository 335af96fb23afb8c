//! # Store traits — the persistence seam of the application
//!
//! Handlers never talk to a database directly. They hold an `Arc<dyn FruitStore>`
//! and an `Arc<dyn UserStore>` and call the operations below, so the same handler
//! code runs against [`crate::MemoryStore`] in tests and the Postgres stores in
//! the `api` crate in production.
//!
//! ## [`FruitStore`]
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`create`](FruitStore::create) | Inserts every record, assigning fresh ids. Returns the stored records in input order. |
//! | [`find`](FruitStore::find) | Every record matching a [`FruitFilter`]. Order is unspecified. |
//! | [`find_by_id`](FruitStore::find_by_id) | One record, or [`StoreError::NotFound`]. |
//! | [`update_by_id`](FruitStore::update_by_id) | Applies a [`FruitPatch`] and returns the updated record, or [`StoreError::NotFound`]. |
//! | [`delete_many`](FruitStore::delete_many) | Removes every record matching the filter and returns how many went. |
//! | [`delete_by_id`](FruitStore::delete_by_id) | Removes one record and returns it, or [`StoreError::NotFound`]. |
//!
//! Every operation is atomic for a single record. Nothing here spans records in a
//! transaction except `create`, which backends may make all-or-nothing.
//!
//! ## [`UserStore`]
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`create_user`](UserStore::create_user) | Stores a new account, or [`StoreError::Conflict`] when the username exists. |
//! | [`find_by_username`](UserStore::find_by_username) | The account with that username, if any. |

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{Fruit, FruitFilter, FruitId, FruitPatch, NewFruit, User};

#[async_trait]
pub trait FruitStore: Send + Sync {
    async fn create(&self, fruits: Vec<NewFruit>) -> Result<Vec<Fruit>, StoreError>;

    async fn find(&self, filter: &FruitFilter) -> Result<Vec<Fruit>, StoreError>;

    async fn find_by_id(&self, id: FruitId) -> Result<Fruit, StoreError>;

    async fn update_by_id(&self, id: FruitId, patch: FruitPatch) -> Result<Fruit, StoreError>;

    async fn delete_many(&self, filter: &FruitFilter) -> Result<u64, StoreError>;

    async fn delete_by_id(&self, id: FruitId) -> Result<Fruit, StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}
