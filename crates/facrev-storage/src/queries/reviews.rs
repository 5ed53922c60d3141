//! reviews table queries.

use rusqlite::{params, Connection, OptionalExtension, Row};

use facrev_core::{ModerationStatus, Review, StorageError};

use super::{parse_status, parse_ts};
use crate::sqe;

const SELECT: &str = "SELECT id, user_id, faculty_id, rating, comment, date, status FROM reviews";

struct RawReview {
    id: String,
    user_id: String,
    faculty_id: String,
    rating: i64,
    comment: String,
    date: String,
    status: String,
}

fn map_review(row: &Row<'_>) -> rusqlite::Result<RawReview> {
    Ok(RawReview {
        id: row.get(0)?,
        user_id: row.get(1)?,
        faculty_id: row.get(2)?,
        rating: row.get(3)?,
        comment: row.get(4)?,
        date: row.get(5)?,
        status: row.get(6)?,
    })
}

fn finish_review(raw: RawReview) -> Result<Review, StorageError> {
    Ok(Review {
        date: parse_ts(&raw.date)?,
        status: parse_status(&raw.status)?,
        id: raw.id,
        user_id: raw.user_id,
        faculty_id: raw.faculty_id,
        rating: raw.rating,
        comment: raw.comment,
    })
}

pub fn insert_review(conn: &Connection, review: &Review) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO reviews (id, user_id, faculty_id, rating, comment, date, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .map_err(sqe)?;
    stmt.execute(params![
        review.id,
        review.user_id,
        review.faculty_id,
        review.rating,
        review.comment,
        review.date.to_rfc3339(),
        review.status.as_str(),
    ])
    .map_err(sqe)?;
    Ok(())
}

pub fn get_review(conn: &Connection, id: &str) -> Result<Option<Review>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("{SELECT} WHERE id = ?1"))
        .map_err(sqe)?;
    let raw = stmt
        .query_row(params![id], map_review)
        .optional()
        .map_err(sqe)?;
    raw.map(finish_review).transpose()
}

pub fn list_by_status(
    conn: &Connection,
    status: ModerationStatus,
) -> Result<Vec<Review>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("{SELECT} WHERE status = ?1 ORDER BY date DESC"))
        .map_err(sqe)?;
    let rows = stmt
        .query_map(params![status.as_str()], map_review)
        .map_err(sqe)?;
    rows.map(|r| r.map_err(sqe).and_then(finish_review)).collect()
}

pub fn list_for_faculty(
    conn: &Connection,
    faculty_id: &str,
    status: ModerationStatus,
) -> Result<Vec<Review>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "{SELECT} WHERE faculty_id = ?1 AND status = ?2 ORDER BY date DESC"
        ))
        .map_err(sqe)?;
    let rows = stmt
        .query_map(params![faculty_id, status.as_str()], map_review)
        .map_err(sqe)?;
    rows.map(|r| r.map_err(sqe).and_then(finish_review)).collect()
}

pub fn get_pending_for_user(
    conn: &Connection,
    user_id: &str,
    faculty_id: &str,
) -> Result<Option<Review>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "{SELECT} WHERE user_id = ?1 AND faculty_id = ?2 AND status = 'pending'"
        ))
        .map_err(sqe)?;
    let raw = stmt
        .query_row(params![user_id, faculty_id], map_review)
        .optional()
        .map_err(sqe)?;
    raw.map(finish_review).transpose()
}

pub fn update_content(
    conn: &Connection,
    id: &str,
    rating: i64,
    comment: &str,
) -> Result<(), StorageError> {
    let changed = conn
        .prepare_cached("UPDATE reviews SET rating = ?2, comment = ?3 WHERE id = ?1")
        .map_err(sqe)?
        .execute(params![id, rating, comment])
        .map_err(sqe)?;
    if changed == 0 {
        return Err(StorageError::NotFound {
            collection: "reviews",
            id: id.to_string(),
        });
    }
    Ok(())
}

pub fn set_status(
    conn: &Connection,
    id: &str,
    status: ModerationStatus,
) -> Result<(), StorageError> {
    let changed = conn
        .prepare_cached("UPDATE reviews SET status = ?2 WHERE id = ?1")
        .map_err(sqe)?
        .execute(params![id, status.as_str()])
        .map_err(sqe)?;
    if changed == 0 {
        return Err(StorageError::NotFound {
            collection: "reviews",
            id: id.to_string(),
        });
    }
    Ok(())
}

pub fn count_by_status(
    conn: &Connection,
    status: ModerationStatus,
) -> Result<i64, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM reviews WHERE status = ?1",
        params![status.as_str()],
        |row| row.get(0),
    )
    .map_err(sqe)
}
