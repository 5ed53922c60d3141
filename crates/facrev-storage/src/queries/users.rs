//! users table queries.

use rusqlite::{params, Connection, OptionalExtension, Row};

use facrev_core::{Role, StorageError, User};

use crate::sqe;

struct RawUser {
    id: String,
    email: String,
    username: Option<String>,
    role: String,
    is_active: bool,
    logout_pending: bool,
    force_logout: bool,
}

fn map_user(row: &Row<'_>) -> rusqlite::Result<RawUser> {
    Ok(RawUser {
        id: row.get(0)?,
        email: row.get(1)?,
        username: row.get(2)?,
        role: row.get(3)?,
        is_active: row.get::<_, i64>(4)? != 0,
        logout_pending: row.get::<_, i64>(5)? != 0,
        force_logout: row.get::<_, i64>(6)? != 0,
    })
}

fn finish_user(raw: RawUser) -> Result<User, StorageError> {
    let role = Role::parse(&raw.role).ok_or_else(|| StorageError::Sqlite {
        message: format!("bad role value {:?}", raw.role),
    })?;
    Ok(User {
        id: raw.id,
        email: raw.email,
        username: raw.username,
        role,
        is_active: raw.is_active,
        logout_pending: raw.logout_pending,
        force_logout: raw.force_logout,
    })
}

const SELECT: &str =
    "SELECT id, email, username, role, is_active, logout_pending, force_logout FROM users";

pub fn insert_user(conn: &Connection, user: &User) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO users (id, email, username, role, is_active, logout_pending, force_logout)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .map_err(sqe)?;
    stmt.execute(params![
        user.id,
        user.email,
        user.username,
        user.role.as_str(),
        user.is_active as i64,
        user.logout_pending as i64,
        user.force_logout as i64,
    ])
    .map_err(sqe)?;
    Ok(())
}

pub fn get_user(conn: &Connection, id: &str) -> Result<Option<User>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("{SELECT} WHERE id = ?1"))
        .map_err(sqe)?;
    let pair = stmt
        .query_row(params![id], map_user)
        .optional()
        .map_err(sqe)?;
    pair.map(finish_user).transpose()
}

pub fn get_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("{SELECT} WHERE email = ?1 COLLATE NOCASE"))
        .map_err(sqe)?;
    let pair = stmt
        .query_row(params![email], map_user)
        .optional()
        .map_err(sqe)?;
    pair.map(finish_user).transpose()
}

pub fn list_students(conn: &Connection) -> Result<Vec<User>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("{SELECT} WHERE role = 'student' ORDER BY email"))
        .map_err(sqe)?;
    let rows = stmt.query_map([], map_user).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe).and_then(finish_user)).collect()
}

pub fn count_students(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM users WHERE role = 'student'",
        [],
        |row| row.get(0),
    )
    .map_err(sqe)
}

pub fn set_active(conn: &Connection, id: &str, is_active: bool) -> Result<(), StorageError> {
    let changed = conn
        .prepare_cached("UPDATE users SET is_active = ?2 WHERE id = ?1")
        .map_err(sqe)?
        .execute(params![id, is_active as i64])
        .map_err(sqe)?;
    if changed == 0 {
        return Err(StorageError::NotFound {
            collection: "users",
            id: id.to_string(),
        });
    }
    Ok(())
}

pub fn set_logout_flags(
    conn: &Connection,
    id: &str,
    logout_pending: bool,
    force_logout: bool,
) -> Result<(), StorageError> {
    let changed = conn
        .prepare_cached("UPDATE users SET logout_pending = ?2, force_logout = ?3 WHERE id = ?1")
        .map_err(sqe)?
        .execute(params![id, logout_pending as i64, force_logout as i64])
        .map_err(sqe)?;
    if changed == 0 {
        return Err(StorageError::NotFound {
            collection: "users",
            id: id.to_string(),
        });
    }
    Ok(())
}
