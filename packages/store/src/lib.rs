pub mod error;
pub mod models;
pub mod repo;

mod memory;
pub use memory::MemoryStore;

pub use error::StoreError;
pub use models::{Fruit, FruitFilter, FruitId, FruitPatch, NewFruit, User};
pub use repo::{FruitStore, UserStore};
