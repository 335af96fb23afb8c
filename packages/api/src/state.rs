use std::sync::Arc;

use store::{FruitStore, MemoryStore, UserStore};

use crate::views::Views;

/// Shared handles passed to every handler through axum state.
#[derive(Clone)]
pub struct AppState {
    pub fruits: Arc<dyn FruitStore>,
    pub users: Arc<dyn UserStore>,
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(
        fruits: Arc<dyn FruitStore>,
        users: Arc<dyn UserStore>,
    ) -> Result<Self, minijinja::Error> {
        Ok(Self {
            fruits,
            users,
            views: Arc::new(Views::new()?),
        })
    }

    /// State backed by a single [`MemoryStore`] for both fruits and users.
    pub fn in_memory(store: MemoryStore) -> Result<Self, minijinja::Error> {
        Self::new(Arc::new(store.clone()), Arc::new(store))
    }
}
