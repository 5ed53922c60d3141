//! faculty table queries.

use rusqlite::{params, Connection, OptionalExtension, Row};

use facrev_core::{Faculty, FacultyUpdate, StorageError};

use crate::sqe;

const SELECT: &str = "SELECT id, name, department, title, bio, avatar_url, rating, \
                      review_count, tags, likes, dislikes FROM faculty";

struct RawFaculty {
    faculty: Faculty,
    tags_json: String,
}

fn map_faculty(row: &Row<'_>) -> rusqlite::Result<RawFaculty> {
    Ok(RawFaculty {
        faculty: Faculty {
            id: row.get(0)?,
            name: row.get(1)?,
            department: row.get(2)?,
            title: row.get(3)?,
            bio: row.get(4)?,
            avatar_url: row.get(5)?,
            rating: row.get(6)?,
            review_count: row.get(7)?,
            tags: Vec::new(),
            likes: row.get(9)?,
            dislikes: row.get(10)?,
        },
        tags_json: row.get(8)?,
    })
}

fn finish_faculty(raw: RawFaculty) -> Result<Faculty, StorageError> {
    let mut faculty = raw.faculty;
    faculty.tags = serde_json::from_str(&raw.tags_json).map_err(|e| StorageError::Sqlite {
        message: format!("bad tags column: {e}"),
    })?;
    Ok(faculty)
}

pub fn insert_faculty(conn: &Connection, faculty: &Faculty) -> Result<(), StorageError> {
    let tags_json = serde_json::to_string(&faculty.tags).map_err(sqe)?;
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO faculty
             (id, name, department, title, bio, avatar_url, rating, review_count, tags, likes, dislikes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )
        .map_err(sqe)?;
    stmt.execute(params![
        faculty.id,
        faculty.name,
        faculty.department,
        faculty.title,
        faculty.bio,
        faculty.avatar_url,
        faculty.rating,
        faculty.review_count,
        tags_json,
        faculty.likes,
        faculty.dislikes,
    ])
    .map_err(sqe)?;
    Ok(())
}

pub fn get_faculty(conn: &Connection, id: &str) -> Result<Option<Faculty>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("{SELECT} WHERE id = ?1"))
        .map_err(sqe)?;
    let raw = stmt
        .query_row(params![id], map_faculty)
        .optional()
        .map_err(sqe)?;
    raw.map(finish_faculty).transpose()
}

pub fn list_faculty(conn: &Connection) -> Result<Vec<Faculty>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("{SELECT} ORDER BY name"))
        .map_err(sqe)?;
    let rows = stmt.query_map([], map_faculty).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe).and_then(finish_faculty))
        .collect()
}

pub fn count_faculty(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM faculty", [], |row| row.get(0))
        .map_err(sqe)
}

pub fn update_faculty(
    conn: &Connection,
    id: &str,
    update: &FacultyUpdate,
) -> Result<(), StorageError> {
    let changed = conn
        .prepare_cached(
            "UPDATE faculty SET
                 name       = COALESCE(?2, name),
                 department = COALESCE(?3, department),
                 title      = COALESCE(?4, title),
                 bio        = COALESCE(?5, bio),
                 avatar_url = COALESCE(?6, avatar_url)
             WHERE id = ?1",
        )
        .map_err(sqe)?
        .execute(params![
            id,
            update.name,
            update.department,
            update.title,
            update.bio,
            update.avatar_url,
        ])
        .map_err(sqe)?;
    if changed == 0 {
        return Err(StorageError::NotFound {
            collection: "faculty",
            id: id.to_string(),
        });
    }
    Ok(())
}

pub fn delete_faculty(conn: &Connection, id: &str) -> Result<(), StorageError> {
    let changed = conn
        .prepare_cached("DELETE FROM faculty WHERE id = ?1")
        .map_err(sqe)?
        .execute(params![id])
        .map_err(sqe)?;
    if changed == 0 {
        return Err(StorageError::NotFound {
            collection: "faculty",
            id: id.to_string(),
        });
    }
    Ok(())
}

pub fn set_aggregate(
    conn: &Connection,
    id: &str,
    rating: f64,
    review_count: i64,
) -> Result<(), StorageError> {
    let changed = conn
        .prepare_cached("UPDATE faculty SET rating = ?2, review_count = ?3 WHERE id = ?1")
        .map_err(sqe)?
        .execute(params![id, rating, review_count])
        .map_err(sqe)?;
    if changed == 0 {
        return Err(StorageError::NotFound {
            collection: "faculty",
            id: id.to_string(),
        });
    }
    Ok(())
}
