//! # Domain models for fruits and users
//!
//! Defines the records that the [`crate::FruitStore`] and [`crate::UserStore`]
//! implementations hand back to the handlers, plus the input shapes the handlers
//! pass in. Records are `Serialize + Deserialize` so the seed route can return
//! them as JSON and the views can render them directly.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`FruitId`] | Store-generated, immutable identifier of a fruit (UUID v4). Parses from a path segment. |
//! | [`Fruit`] | A stored fruit record. `owner` is the username of the creating session and never changes. |
//! | [`NewFruit`] | Input to [`crate::FruitStore::create`]. Carries the owner explicitly. |
//! | [`FruitPatch`] | Input to [`crate::FruitStore::update_by_id`]. `None` fields are left untouched; there is no way to name `id` or `owner`. |
//! | [`FruitFilter`] | Selects either every record or the records of one owner. |
//! | [`User`] | A stored account, including its Argon2 password hash. Never leaves the server. |

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a fruit record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FruitId(Uuid);

impl FruitId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for FruitId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for FruitId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for FruitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for FruitId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A fruit as stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fruit {
    pub id: FruitId,
    pub name: String,
    pub color: String,
    pub ready_to_eat: bool,
    /// Username of the session that created the record.
    pub owner: String,
}

/// A fruit that has not been stored yet.
#[derive(Clone, Debug, PartialEq)]
pub struct NewFruit {
    pub name: String,
    pub color: String,
    pub ready_to_eat: bool,
    pub owner: String,
}

impl NewFruit {
    pub fn new(name: impl Into<String>, color: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            ready_to_eat: false,
            owner: owner.into(),
        }
    }

    /// Builder method to set the ready-to-eat flag.
    pub fn ready_to_eat(mut self, ready: bool) -> Self {
        self.ready_to_eat = ready;
        self
    }

    pub(crate) fn into_fruit(self, id: FruitId) -> Fruit {
        Fruit {
            id,
            name: self.name,
            color: self.color,
            ready_to_eat: self.ready_to_eat,
            owner: self.owner,
        }
    }
}

/// Replacement values for the mutable fields of a fruit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FruitPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub ready_to_eat: Option<bool>,
}

impl FruitPatch {
    /// Apply the patch in place. `id` and `owner` are never touched.
    pub fn apply(self, fruit: &mut Fruit) {
        if let Some(name) = self.name {
            fruit.name = name;
        }
        if let Some(color) = self.color {
            fruit.color = color;
        }
        if let Some(ready) = self.ready_to_eat {
            fruit.ready_to_eat = ready;
        }
    }
}

/// Which records a bulk read or delete applies to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FruitFilter {
    #[default]
    All,
    Owner(String),
}

impl FruitFilter {
    pub fn owned_by(owner: impl Into<String>) -> Self {
        Self::Owner(owner.into())
    }

    pub fn matches(&self, fruit: &Fruit) -> bool {
        match self {
            Self::All => true,
            Self::Owner(owner) => fruit.owner == *owner,
        }
    }

    /// The owner to filter on, or `None` when every record matches.
    pub fn owner(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Owner(owner) => Some(owner),
        }
    }
}

/// Full account record.
#[derive(Clone, Debug)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kiwi() -> Fruit {
        NewFruit::new("Kiwi", "green", "alice").into_fruit(FruitId::new())
    }

    #[test]
    fn test_patch_keeps_id_and_owner() {
        let mut fruit = kiwi();
        let id = fruit.id;

        FruitPatch {
            name: Some("Gold Kiwi".to_string()),
            color: None,
            ready_to_eat: Some(true),
        }
        .apply(&mut fruit);

        assert_eq!(fruit.id, id);
        assert_eq!(fruit.owner, "alice");
        assert_eq!(fruit.name, "Gold Kiwi");
        assert_eq!(fruit.color, "green");
        assert!(fruit.ready_to_eat);
    }

    #[test]
    fn test_filter_matches_owner() {
        let fruit = kiwi();
        assert!(FruitFilter::All.matches(&fruit));
        assert!(FruitFilter::owned_by("alice").matches(&fruit));
        assert!(!FruitFilter::owned_by("bob").matches(&fruit));
        assert_eq!(FruitFilter::All.owner(), None);
        assert_eq!(FruitFilter::owned_by("bob").owner(), Some("bob"));
    }

    #[test]
    fn test_fruit_id_parse() {
        let id = FruitId::new();
        assert_eq!(id.to_string().parse::<FruitId>().unwrap(), id);
        assert!("not-an-id".parse::<FruitId>().is_err());
    }

    #[test]
    fn test_fruit_json_field_names() {
        let json = serde_json::to_value(kiwi()).unwrap();
        assert_eq!(json["readyToEat"], false);
        assert_eq!(json["owner"], "alice");
        assert!(json.get("ready_to_eat").is_none());
    }
}
