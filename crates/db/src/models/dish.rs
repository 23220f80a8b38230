//! Row model for the `dishes` table.

use dishnote_core::dish::DishInfo;
use dishnote_core::record::Record;
use dishnote_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `dishes` table.
#[derive(Debug, Clone, FromRow)]
pub struct DishRow {
    pub id: DbId,
    pub name: String,
    pub price: i64,
    pub description: String,
    pub composition: String,
    pub author: DbId,
    pub photo_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<DishRow> for Record<DishInfo> {
    fn from(row: DishRow) -> Self {
        Record {
            id: row.id,
            info: DishInfo {
                name: row.name,
                price: row.price,
                description: row.description,
                composition: row.composition,
                author: row.author,
                photo_url: row.photo_url,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
