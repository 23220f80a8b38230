//! Row model for the `notes` table.

use dishnote_core::note::NoteInfo;
use dishnote_core::record::Record;
use dishnote_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `notes` table.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub author: DbId,
    pub deadline: Timestamp,
    pub status: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<NoteRow> for Record<NoteInfo> {
    fn from(row: NoteRow) -> Self {
        Record {
            id: row.id,
            info: NoteInfo {
                title: row.title,
                content: row.content,
                author: row.author,
                deadline: row.deadline,
                status: row.status,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
