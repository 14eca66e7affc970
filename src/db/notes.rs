use anyhow::Result;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row};

use crate::models::{NewNote, Note};

const NOTE_COLUMNS: &str = "id, title, content, status, created_at";

/// Data-access component for notes.
///
/// Borrowed from a unit of work (see [`crate::db::Database::unit_of_work`]);
/// every call runs inside that unit's transaction. "Not found" is reported
/// through `Option`/`bool`, never as an error. Store failures propagate.
pub struct NoteDao<'a> {
    conn: &'a Connection,
}

impl<'a> NoteDao<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a note; the store assigns its id.
    pub fn save_note(&self, note: &NewNote) -> Result<Note> {
        let created_at = note.created_at.trunc_subsecs(6);

        self.conn.execute(
            "INSERT INTO notes (title, content, status, created_at) VALUES (?, ?, ?, ?)",
            (
                &note.title,
                &note.content,
                &note.status,
                format_datetime(&created_at),
            ),
        )?;

        let id = self.conn.last_insert_rowid();
        tracing::debug!(note_id = id, "Saved note");

        Ok(Note {
            id,
            title: note.title.clone(),
            content: note.content.clone(),
            status: note.status.clone(),
            created_at,
        })
    }

    /// Every note, most recently created first.
    pub fn get_all_notes(&self) -> Result<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes ORDER BY created_at DESC, id DESC"
        ))?;

        let notes = stmt
            .query_map([], note_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(notes)
    }

    pub fn get_note_by_id(&self, id: i64) -> Result<Option<Note>> {
        let note = self
            .conn
            .query_row(
                &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?"),
                [id],
                note_from_row,
            )
            .optional()?;

        Ok(note)
    }

    /// Remove a note. Returns `false` when no note has this id.
    pub fn delete_note(&self, id: i64) -> Result<bool> {
        let rows = self.conn.execute("DELETE FROM notes WHERE id = ?", [id])?;
        Ok(rows > 0)
    }

    /// Overwrite every field except the id. Returns `false`, and creates
    /// nothing, when no note has `note.id`.
    pub fn update_note(&self, note: &Note) -> Result<bool> {
        let rows = self.conn.execute(
            "UPDATE notes SET title = ?, content = ?, status = ?, created_at = ? WHERE id = ?",
            (
                &note.title,
                &note.content,
                &note.status,
                format_datetime(&note.created_at.trunc_subsecs(6)),
                note.id,
            ),
        )?;
        Ok(rows > 0)
    }

    pub fn count_notes(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(usize::try_from(count)?)
    }
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        status: row.get(3)?,
        created_at: parse_datetime(4, row.get::<_, String>(4)?)?,
    })
}

// Fixed-width so that ordering the text column orders by time.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_datetime(idx: usize, s: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
