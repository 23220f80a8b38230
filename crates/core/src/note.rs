//! Note records: a titled piece of text with a deadline and a done flag.

use serde::{Deserialize, Serialize};

use crate::record::RecordKind;
use crate::types::{DbId, Timestamp};

/// Record-kind descriptor for notes.
#[derive(Debug, Clone, Copy)]
pub struct Note;

/// Info block of a note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteInfo {
    pub title: String,
    pub content: String,
    pub author: DbId,
    pub deadline: Timestamp,
    pub status: bool,
}

/// Partial update for a note. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<DbId>,
    pub deadline: Option<Timestamp>,
    pub status: Option<bool>,
}

impl RecordKind for Note {
    const ENTITY: &'static str = "Note";

    type Info = NoteInfo;
    type Patch = NotePatch;

    fn author(info: &NoteInfo) -> DbId {
        info.author
    }

    fn patch_author(patch: &NotePatch) -> Option<DbId> {
        patch.author
    }

    fn merge(current: NoteInfo, patch: NotePatch) -> NoteInfo {
        NoteInfo {
            title: patch.title.unwrap_or(current.title),
            content: patch.content.unwrap_or(current.content),
            author: patch.author.unwrap_or(current.author),
            deadline: patch.deadline.unwrap_or(current.deadline),
            status: patch.status.unwrap_or(current.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn stored() -> NoteInfo {
        NoteInfo {
            title: "Groceries".into(),
            content: "milk, eggs".into(),
            author: 3,
            deadline: chrono::Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap(),
            status: false,
        }
    }

    #[test]
    fn empty_patch_keeps_everything() {
        let merged = Note::merge(stored(), NotePatch::default());
        assert_eq!(merged, stored());
    }

    #[test]
    fn present_fields_overwrite_only_themselves() {
        let patch = NotePatch {
            status: Some(true),
            content: Some(String::new()),
            ..Default::default()
        };
        let merged = Note::merge(stored(), patch);

        assert!(merged.status);
        assert_eq!(merged.content, "");
        assert_eq!(merged.title, "Groceries");
        assert_eq!(merged.author, 3);
    }

    #[test]
    fn patch_deserializes_missing_and_null_as_absent() {
        let patch: NotePatch =
            serde_json::from_str(r#"{"title": "", "content": null}"#).unwrap();
        assert_eq!(patch.title.as_deref(), Some(""));
        assert!(patch.content.is_none());
        assert!(patch.deadline.is_none());
    }
}
