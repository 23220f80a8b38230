//! Repository for the `persons` table.

use dishnote_core::person::Person;
use dishnote_core::types::DbId;
use sqlx::PgPool;

use crate::models::person::PersonRow;

const COLUMNS: &str = "id, login, password, position";

pub struct PersonRepo;

impl PersonRepo {
    /// Whether a person with `id` exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM persons WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Find a person by exact (case-sensitive) login.
    pub async fn find_by_login(
        pool: &PgPool,
        login: &str,
    ) -> Result<Option<PersonRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM persons WHERE login = $1");
        sqlx::query_as::<_, PersonRow>(&query)
            .bind(login)
            .fetch_optional(pool)
            .await
    }

    /// Insert a person with a caller-allocated ID.
    pub async fn create(pool: &PgPool, person: &Person) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO persons (id, login, password, position) VALUES ($1, $2, $3, $4)")
            .bind(person.id)
            .bind(&person.login)
            .bind(&person.password)
            .bind(&person.position)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Overwrite a person's position. Returns `true` if a row was updated.
    pub async fn update_position(
        pool: &PgPool,
        id: DbId,
        position: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE persons SET position = $2 WHERE id = $1")
            .bind(id)
            .bind(position)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
