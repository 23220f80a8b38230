//! Repository for the `dishes` table.

use dishnote_core::dish::DishInfo;
use dishnote_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::dish::DishRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, price, description, composition, author, photo_url, created_at, updated_at";

/// Provides CRUD operations for dishes.
pub struct DishRepo;

impl DishRepo {
    /// Whether a dish with `id` exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM dishes WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Find a dish by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DishRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dishes WHERE id = $1");
        sqlx::query_as::<_, DishRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a dish with a caller-allocated ID and timestamps.
    pub async fn create(
        pool: &PgPool,
        id: DbId,
        info: &DishInfo,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        let query = format!(
            "INSERT INTO dishes ({COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"
        );
        sqlx::query(&query)
            .bind(id)
            .bind(&info.name)
            .bind(info.price)
            .bind(&info.description)
            .bind(&info.composition)
            .bind(info.author)
            .bind(&info.photo_url)
            .bind(created_at)
            .bind(updated_at)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Overwrite every field of a dish. Returns `true` if a row was updated.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        info: &DishInfo,
        updated_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE dishes SET
                name = $2,
                price = $3,
                description = $4,
                composition = $5,
                author = $6,
                photo_url = $7,
                updated_at = $8
             WHERE id = $1",
        )
        .bind(id)
        .bind(&info.name)
        .bind(info.price)
        .bind(&info.description)
        .bind(&info.composition)
        .bind(info.author)
        .bind(&info.photo_url)
        .bind(updated_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a dish by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dishes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List dishes, optionally only those written by `author`.
    pub async fn list(pool: &PgPool, author: Option<DbId>) -> Result<Vec<DishRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM dishes WHERE ($1::BIGINT IS NULL OR author = $1) ORDER BY id"
        );
        sqlx::query_as::<_, DishRow>(&query)
            .bind(author)
            .fetch_all(pool)
            .await
    }
}
