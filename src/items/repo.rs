use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Item record. `owner_id` is set at creation and never reassigned; update
/// statements must not touch it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: i64,
    pub content: String,
    pub category: String,
    pub done: bool,
    pub owner_id: i64,
    pub created_at: OffsetDateTime,
}

impl Item {
    pub async fn create(
        db: &PgPool,
        owner_id: i64,
        content: &str,
        category: &str,
        done: bool,
    ) -> anyhow::Result<Item> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (content, category, done, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, content, category, done, owner_id, created_at
            "#,
        )
        .bind(content)
        .bind(category)
        .bind(done)
        .bind(owner_id)
        .fetch_one(db)
        .await?;
        Ok(item)
    }

    pub async fn list_by_owner(db: &PgPool, owner_id: i64) -> anyhow::Result<Vec<Item>> {
        let rows = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, content, category, done, owner_id, created_at
            FROM items
            WHERE owner_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> anyhow::Result<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, content, category, done, owner_id, created_at
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(item)
    }

    /// Update the mutable fields, returning the updated row if it still
    /// exists.
    pub async fn update(
        db: &PgPool,
        id: i64,
        content: &str,
        category: &str,
        done: bool,
    ) -> anyhow::Result<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET content = $2, category = $3, done = $4
            WHERE id = $1
            RETURNING id, content, category, done, owner_id, created_at
            "#,
        )
        .bind(id)
        .bind(content)
        .bind(category)
        .bind(done)
        .fetch_optional(db)
        .await?;
        Ok(item)
    }

    /// True if a row was deleted.
    pub async fn delete(db: &PgPool, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query(r#"DELETE FROM items WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
