use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use store::{Fruit, FruitFilter, FruitId, FruitPatch, FruitStore, NewFruit, StoreError};
use uuid::Uuid;

/// Full fruit row from the database.
#[derive(Debug, FromRow)]
struct FruitRow {
    id: Uuid,
    name: String,
    color: String,
    ready_to_eat: bool,
    owner: String,
}

impl From<FruitRow> for Fruit {
    fn from(row: FruitRow) -> Self {
        Fruit {
            id: row.id.into(),
            name: row.name,
            color: row.color,
            ready_to_eat: row.ready_to_eat,
            owner: row.owner,
        }
    }
}

/// [`FruitStore`] over the `fruits` table.
#[derive(Clone, Debug)]
pub struct PgFruitStore {
    pool: PgPool,
}

impl PgFruitStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FruitStore for PgFruitStore {
    async fn create(&self, fruits: Vec<NewFruit>) -> Result<Vec<Fruit>, StoreError> {
        let mut tx = self.pool.begin().await.map_err(StoreError::backend)?;
        let mut created = Vec::with_capacity(fruits.len());

        for fruit in fruits {
            let row: FruitRow = sqlx::query_as(
                r#"
                INSERT INTO fruits (id, name, color, ready_to_eat, owner)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, name, color, ready_to_eat, owner
                "#,
            )
            .bind(*FruitId::new().as_uuid())
            .bind(&fruit.name)
            .bind(&fruit.color)
            .bind(fruit.ready_to_eat)
            .bind(&fruit.owner)
            .fetch_one(&mut *tx)
            .await
            .map_err(StoreError::backend)?;
            created.push(row.into());
        }

        tx.commit().await.map_err(StoreError::backend)?;
        Ok(created)
    }

    async fn find(&self, filter: &FruitFilter) -> Result<Vec<Fruit>, StoreError> {
        let rows: Vec<FruitRow> = sqlx::query_as(
            r#"
            SELECT id, name, color, ready_to_eat, owner FROM fruits
            WHERE $1::TEXT IS NULL OR owner = $1
            ORDER BY inserted_at
            "#,
        )
        .bind(filter.owner())
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(rows.into_iter().map(Fruit::from).collect())
    }

    async fn find_by_id(&self, id: FruitId) -> Result<Fruit, StoreError> {
        let row: Option<FruitRow> = sqlx::query_as(
            "SELECT id, name, color, ready_to_eat, owner FROM fruits WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        row.map(Fruit::from).ok_or(StoreError::NotFound(id))
    }

    async fn update_by_id(&self, id: FruitId, patch: FruitPatch) -> Result<Fruit, StoreError> {
        // id and owner are not in the SET list.
        let row: Option<FruitRow> = sqlx::query_as(
            r#"
            UPDATE fruits SET
                name = COALESCE($2, name),
                color = COALESCE($3, color),
                ready_to_eat = COALESCE($4, ready_to_eat)
            WHERE id = $1
            RETURNING id, name, color, ready_to_eat, owner
            "#,
        )
        .bind(id.as_uuid())
        .bind(&patch.name)
        .bind(&patch.color)
        .bind(patch.ready_to_eat)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        row.map(Fruit::from).ok_or(StoreError::NotFound(id))
    }

    async fn delete_many(&self, filter: &FruitFilter) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM fruits WHERE $1::TEXT IS NULL OR owner = $1")
            .bind(filter.owner())
            .execute(&self.pool)
            .await
            .map_err(StoreError::backend)?;

        Ok(result.rows_affected())
    }

    async fn delete_by_id(&self, id: FruitId) -> Result<Fruit, StoreError> {
        let row: Option<FruitRow> = sqlx::query_as(
            "DELETE FROM fruits WHERE id = $1 RETURNING id, name, color, ready_to_eat, owner",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::backend)?;

        row.map(Fruit::from).ok_or(StoreError::NotFound(id))
    }
}
