use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Fruit, FruitFilter, FruitId, FruitPatch, NewFruit, User};
use crate::repo::{FruitStore, UserStore};

/// In-memory FruitStore and UserStore for testing and local runs.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    // Insertion order is kept so listings read naturally.
    fruits: Arc<Mutex<Vec<Fruit>>>,
    users: Arc<Mutex<HashMap<String, User>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FruitStore for MemoryStore {
    async fn create(&self, fruits: Vec<NewFruit>) -> Result<Vec<Fruit>, StoreError> {
        let created: Vec<Fruit> = fruits
            .into_iter()
            .map(|f| f.into_fruit(FruitId::new()))
            .collect();
        self.fruits.lock().unwrap().extend(created.iter().cloned());
        Ok(created)
    }

    async fn find(&self, filter: &FruitFilter) -> Result<Vec<Fruit>, StoreError> {
        Ok(self
            .fruits
            .lock()
            .unwrap()
            .iter()
            .filter(|f| filter.matches(f))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: FruitId) -> Result<Fruit, StoreError> {
        self.fruits
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn update_by_id(&self, id: FruitId, patch: FruitPatch) -> Result<Fruit, StoreError> {
        let mut fruits = self.fruits.lock().unwrap();
        let fruit = fruits
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(StoreError::NotFound(id))?;
        patch.apply(fruit);
        Ok(fruit.clone())
    }

    async fn delete_many(&self, filter: &FruitFilter) -> Result<u64, StoreError> {
        let mut fruits = self.fruits.lock().unwrap();
        let before = fruits.len();
        fruits.retain(|f| !filter.matches(f));
        Ok((before - fruits.len()) as u64)
    }

    async fn delete_by_id(&self, id: FruitId) -> Result<Fruit, StoreError> {
        let mut fruits = self.fruits.lock().unwrap();
        let index = fruits
            .iter()
            .position(|f| f.id == id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(fruits.remove(index))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(username) {
            return Err(StoreError::Conflict(username.to_string()));
        }
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.insert(username.to_string(), user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.lock().unwrap().get(username).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded(store: &MemoryStore) -> Vec<Fruit> {
        store
            .create(vec![
                NewFruit::new("Apple", "red", "alice"),
                NewFruit::new("Pear", "green", "bob").ready_to_eat(true),
                NewFruit::new("Plum", "purple", "alice"),
            ])
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let store = MemoryStore::new();

        // Initially empty
        assert!(store.find(&FruitFilter::All).await.unwrap().is_empty());

        let created = seeded(&store).await;
        assert_eq!(created.len(), 3);
        assert_ne!(created[0].id, created[1].id);
        assert_ne!(created[1].id, created[2].id);
        assert_eq!(created[1].name, "Pear");
        assert!(created[1].ready_to_eat);
    }

    #[tokio::test]
    async fn test_find_filters_by_owner() {
        let store = MemoryStore::new();
        seeded(&store).await;

        let alice = store.find(&FruitFilter::owned_by("alice")).await.unwrap();
        assert_eq!(alice.len(), 2);
        assert!(alice.iter().all(|f| f.owner == "alice"));

        assert_eq!(store.find(&FruitFilter::All).await.unwrap().len(), 3);
        assert!(store
            .find(&FruitFilter::owned_by("carol"))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let store = MemoryStore::new();
        let created = seeded(&store).await;

        let plum = store.find_by_id(created[2].id).await.unwrap();
        assert_eq!(plum, created[2]);

        let missing = FruitId::new();
        assert!(matches!(
            store.find_by_id(missing).await,
            Err(StoreError::NotFound(id)) if id == missing
        ));
    }

    #[tokio::test]
    async fn test_update_preserves_id_and_owner() {
        let store = MemoryStore::new();
        let created = seeded(&store).await;
        let apple = &created[0];

        let updated = store
            .update_by_id(
                apple.id,
                FruitPatch {
                    name: None,
                    color: Some("green".to_string()),
                    ready_to_eat: Some(true),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, apple.id);
        assert_eq!(updated.owner, "alice");
        assert_eq!(updated.name, "Apple");
        assert_eq!(updated.color, "green");
        assert!(updated.ready_to_eat);

        // The change is visible to later reads
        assert_eq!(store.find_by_id(apple.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = MemoryStore::new();
        let result = store.update_by_id(FruitId::new(), FruitPatch::default()).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let store = MemoryStore::new();
        let created = seeded(&store).await;

        let removed = store.delete_by_id(created[1].id).await.unwrap();
        assert_eq!(removed.name, "Pear");
        assert_eq!(store.find(&FruitFilter::All).await.unwrap().len(), 2);

        // Second delete of the same id is NotFound, not a crash
        assert!(matches!(
            store.delete_by_id(created[1].id).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_many() {
        let store = MemoryStore::new();
        seeded(&store).await;

        assert_eq!(
            store.delete_many(&FruitFilter::owned_by("alice")).await.unwrap(),
            2
        );
        assert_eq!(store.delete_many(&FruitFilter::All).await.unwrap(), 1);
        assert_eq!(store.delete_many(&FruitFilter::All).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_users() {
        let store = MemoryStore::new();

        assert!(store.find_by_username("alice").await.unwrap().is_none());

        let user = store.create_user("alice", "$argon2id$hash").await.unwrap();
        assert_eq!(user.username, "alice");

        let found = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.password_hash, "$argon2id$hash");

        assert!(matches!(
            store.create_user("alice", "other").await,
            Err(StoreError::Conflict(name)) if name == "alice"
        ));
    }
}
