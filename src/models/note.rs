use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::NoteFields;

/// A short text note.
///
/// The store assigns `id` on insert and owns the record from then on;
/// handlers only hold transient copies for the duration of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Free-form status text such as `PENDING` or `DONE`.
    pub status: String,
    /// Server time at creation. Never accepted from the caller.
    pub created_at: DateTime<Utc>,
}

/// A note waiting to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl NewNote {
    /// Build a note from validated fields, stamped with the current time.
    pub fn from_fields(fields: NoteFields) -> Self {
        Self::from_fields_at(fields, Utc::now())
    }

    pub fn from_fields_at(fields: NoteFields, created_at: DateTime<Utc>) -> Self {
        Self {
            title: fields.title,
            content: fields.content,
            status: fields.status,
            created_at,
        }
    }

    /// Attach the id the store assigned.
    pub fn with_id(self, id: i64) -> Note {
        Note {
            id,
            title: self.title,
            content: self.content,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

impl Note {
    /// Replace the text fields, keeping the id. `created_at` is set to the given time.
    pub fn overwritten(&self, fields: NoteFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id: self.id,
            title: fields.title,
            content: fields.content,
            status: fields.status,
            created_at,
        }
    }
}
