//! suggestions table queries.

use rusqlite::{params, Connection, OptionalExtension, Row};

use facrev_core::{ModerationStatus, NewFacultySuggestion, StorageError};

use super::{parse_status, parse_ts};
use crate::sqe;

const SELECT: &str =
    "SELECT id, user_id, faculty_name, department, title, notes, date, status FROM suggestions";

struct RawSuggestion {
    id: String,
    user_id: String,
    faculty_name: String,
    department: String,
    title: Option<String>,
    notes: Option<String>,
    date: String,
    status: String,
}

fn map_suggestion(row: &Row<'_>) -> rusqlite::Result<RawSuggestion> {
    Ok(RawSuggestion {
        id: row.get(0)?,
        user_id: row.get(1)?,
        faculty_name: row.get(2)?,
        department: row.get(3)?,
        title: row.get(4)?,
        notes: row.get(5)?,
        date: row.get(6)?,
        status: row.get(7)?,
    })
}

fn finish_suggestion(raw: RawSuggestion) -> Result<NewFacultySuggestion, StorageError> {
    Ok(NewFacultySuggestion {
        date: parse_ts(&raw.date)?,
        status: parse_status(&raw.status)?,
        id: raw.id,
        user_id: raw.user_id,
        faculty_name: raw.faculty_name,
        department: raw.department,
        title: raw.title,
        notes: raw.notes,
    })
}

pub fn insert_suggestion(
    conn: &Connection,
    suggestion: &NewFacultySuggestion,
) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO suggestions
             (id, user_id, faculty_name, department, title, notes, date, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .map_err(sqe)?;
    stmt.execute(params![
        suggestion.id,
        suggestion.user_id,
        suggestion.faculty_name,
        suggestion.department,
        suggestion.title,
        suggestion.notes,
        suggestion.date.to_rfc3339(),
        suggestion.status.as_str(),
    ])
    .map_err(sqe)?;
    Ok(())
}

pub fn get_suggestion(
    conn: &Connection,
    id: &str,
) -> Result<Option<NewFacultySuggestion>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("{SELECT} WHERE id = ?1"))
        .map_err(sqe)?;
    let raw = stmt
        .query_row(params![id], map_suggestion)
        .optional()
        .map_err(sqe)?;
    raw.map(finish_suggestion).transpose()
}

pub fn list_by_status(
    conn: &Connection,
    status: ModerationStatus,
) -> Result<Vec<NewFacultySuggestion>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("{SELECT} WHERE status = ?1 ORDER BY date DESC"))
        .map_err(sqe)?;
    let rows = stmt
        .query_map(params![status.as_str()], map_suggestion)
        .map_err(sqe)?;
    rows.map(|r| r.map_err(sqe).and_then(finish_suggestion))
        .collect()
}

pub fn set_status(
    conn: &Connection,
    id: &str,
    status: ModerationStatus,
) -> Result<(), StorageError> {
    let changed = conn
        .prepare_cached("UPDATE suggestions SET status = ?2 WHERE id = ?1")
        .map_err(sqe)?
        .execute(params![id, status.as_str()])
        .map_err(sqe)?;
    if changed == 0 {
        return Err(StorageError::NotFound {
            collection: "suggestions",
            id: id.to_string(),
        });
    }
    Ok(())
}
