use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use uuid::Uuid;

use super::DocumentStore;
use crate::document::{Document, FieldUpdate, Fields};
use crate::error::{Result, StorageError};

/// Document store backed by a single PostgreSQL `documents` table
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open a connection pool to `database_url`
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create the `documents` table if needed
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn get_all(&self, collection: &str) -> Result<Vec<Document>> {
        let rows: Vec<(String, Json<Fields>)> = sqlx::query_as(
            r#"
            SELECT id, fields
            FROM documents
            WHERE collection = $1
            ORDER BY seq
            "#,
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, Json(fields))| Document::new(id, fields))
            .collect())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let row: Option<(String, Json<Fields>)> = sqlx::query_as(
            r#"
            SELECT id, fields
            FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id, Json(fields))| Document::new(id, fields)))
    }

    async fn add(&self, collection: &str, fields: Fields) -> Result<String> {
        let id = Uuid::new_v4().simple().to_string();

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, fields)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(collection)
        .bind(&id)
        .bind(Json(fields))
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, fields)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id) DO UPDATE SET fields = EXCLUDED.fields
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(fields))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET fields = fields || $3
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(fields))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::not_found(collection, id));
        }

        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn batch_update(&self, collection: &str, updates: Vec<FieldUpdate>) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for update in updates {
            let result = sqlx::query(
                r#"
                UPDATE documents
                SET fields = fields || $3
                WHERE collection = $1 AND id = $2
                "#,
            )
            .bind(collection)
            .bind(&update.id)
            .bind(Json(update.fields))
            .execute(&mut *tx)
            .await?;

            // Dropping the transaction rolls back the updates applied so far
            if result.rows_affected() == 0 {
                return Err(StorageError::not_found(collection, &update.id));
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
