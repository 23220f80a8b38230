//! Repository for the `notes` table.

use dishnote_core::note::NoteInfo;
use dishnote_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::note::NoteRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, content, author, deadline, status, created_at, updated_at";

/// Provides CRUD operations for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Whether a note with `id` exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM notes WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Find a note by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<NoteRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1");
        sqlx::query_as::<_, NoteRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a note with a caller-allocated ID and timestamps.
    pub async fn create(
        pool: &PgPool,
        id: DbId,
        info: &NoteInfo,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO notes (id, title, content, author, deadline, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(id)
        .bind(&info.title)
        .bind(&info.content)
        .bind(info.author)
        .bind(info.deadline)
        .bind(info.status)
        .bind(created_at)
        .bind(updated_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Overwrite every field of a note. Returns `true` if a row was updated.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        info: &NoteInfo,
        updated_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notes SET
                title = $2,
                content = $3,
                author = $4,
                deadline = $5,
                status = $6,
                updated_at = $7
             WHERE id = $1",
        )
        .bind(id)
        .bind(&info.title)
        .bind(&info.content)
        .bind(info.author)
        .bind(info.deadline)
        .bind(info.status)
        .bind(updated_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a note by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List notes, optionally only those written by `author`.
    pub async fn list(pool: &PgPool, author: Option<DbId>) -> Result<Vec<NoteRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes WHERE ($1::BIGINT IS NULL OR author = $1) ORDER BY id"
        );
        sqlx::query_as::<_, NoteRow>(&query)
            .bind(author)
            .fetch_all(pool)
            .await
    }
}
