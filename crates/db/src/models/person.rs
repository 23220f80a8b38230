use dishnote_core::person::Person;
use dishnote_core::types::DbId;
use sqlx::FromRow;

/// A row from the `persons` table.
#[derive(Debug, Clone, FromRow)]
pub struct PersonRow {
    pub id: DbId,
    pub login: String,
    pub password: String,
    pub position: String,
}

impl From<PersonRow> for Person {
    fn from(row: PersonRow) -> Self {
        Person {
            id: row.id,
            login: row.login,
            password: row.password,
            position: row.position,
        }
    }
}
