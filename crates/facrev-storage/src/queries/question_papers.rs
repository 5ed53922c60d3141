//! question_papers table queries.

use rusqlite::{params, Connection, OptionalExtension, Row};

use facrev_core::{ModerationStatus, QuestionPaper, StorageError};

use super::{parse_status, parse_ts};
use crate::sqe;

const SELECT: &str = "SELECT id, user_id, user_email, course_name, slot, image_url, status, date \
                      FROM question_papers";

struct RawPaper {
    id: String,
    user_id: String,
    user_email: String,
    course_name: String,
    slot: String,
    image_url: String,
    status: String,
    date: String,
}

fn map_paper(row: &Row<'_>) -> rusqlite::Result<RawPaper> {
    Ok(RawPaper {
        id: row.get(0)?,
        user_id: row.get(1)?,
        user_email: row.get(2)?,
        course_name: row.get(3)?,
        slot: row.get(4)?,
        image_url: row.get(5)?,
        status: row.get(6)?,
        date: row.get(7)?,
    })
}

fn finish_paper(raw: RawPaper) -> Result<QuestionPaper, StorageError> {
    Ok(QuestionPaper {
        status: parse_status(&raw.status)?,
        date: parse_ts(&raw.date)?,
        id: raw.id,
        user_id: raw.user_id,
        user_email: raw.user_email,
        course_name: raw.course_name,
        slot: raw.slot,
        image_url: raw.image_url,
    })
}

pub fn insert_paper(conn: &Connection, paper: &QuestionPaper) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO question_papers
             (id, user_id, user_email, course_name, slot, image_url, status, date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .map_err(sqe)?;
    stmt.execute(params![
        paper.id,
        paper.user_id,
        paper.user_email,
        paper.course_name,
        paper.slot,
        paper.image_url,
        paper.status.as_str(),
        paper.date.to_rfc3339(),
    ])
    .map_err(sqe)?;
    Ok(())
}

pub fn get_paper(conn: &Connection, id: &str) -> Result<Option<QuestionPaper>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("{SELECT} WHERE id = ?1"))
        .map_err(sqe)?;
    let raw = stmt
        .query_row(params![id], map_paper)
        .optional()
        .map_err(sqe)?;
    raw.map(finish_paper).transpose()
}

pub fn list_by_status(
    conn: &Connection,
    status: ModerationStatus,
) -> Result<Vec<QuestionPaper>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("{SELECT} WHERE status = ?1 ORDER BY date DESC"))
        .map_err(sqe)?;
    let rows = stmt
        .query_map(params![status.as_str()], map_paper)
        .map_err(sqe)?;
    rows.map(|r| r.map_err(sqe).and_then(finish_paper)).collect()
}

pub fn set_status(
    conn: &Connection,
    id: &str,
    status: ModerationStatus,
) -> Result<(), StorageError> {
    let changed = conn
        .prepare_cached("UPDATE question_papers SET status = ?2 WHERE id = ?1")
        .map_err(sqe)?
        .execute(params![id, status.as_str()])
        .map_err(sqe)?;
    if changed == 0 {
        return Err(StorageError::NotFound {
            collection: "question_papers",
            id: id.to_string(),
        });
    }
    Ok(())
}
