//! chat_messages table queries. Append-only.

use rusqlite::{params, Connection, Row};

use facrev_core::{ChatMessage, StorageError};

use super::parse_ts;
use crate::sqe;

struct RawMessage {
    id: String,
    user_id: String,
    user_email: String,
    text: String,
    timestamp: String,
}

fn map_message(row: &Row<'_>) -> rusqlite::Result<RawMessage> {
    Ok(RawMessage {
        id: row.get(0)?,
        user_id: row.get(1)?,
        user_email: row.get(2)?,
        text: row.get(3)?,
        timestamp: row.get(4)?,
    })
}

fn finish_message(raw: RawMessage) -> Result<ChatMessage, StorageError> {
    Ok(ChatMessage {
        timestamp: parse_ts(&raw.timestamp)?,
        id: raw.id,
        user_id: raw.user_id,
        user_email: raw.user_email,
        text: raw.text,
    })
}

pub fn insert_message(conn: &Connection, message: &ChatMessage) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO chat_messages (id, user_id, user_email, text, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .map_err(sqe)?;
    stmt.execute(params![
        message.id,
        message.user_id,
        message.user_email,
        message.text,
        message.timestamp.to_rfc3339(),
    ])
    .map_err(sqe)?;
    Ok(())
}

pub fn list_messages(conn: &Connection) -> Result<Vec<ChatMessage>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, user_id, user_email, text, timestamp
             FROM chat_messages ORDER BY timestamp ASC",
        )
        .map_err(sqe)?;
    let rows = stmt.query_map([], map_message).map_err(sqe)?;
    rows.map(|r| r.map_err(sqe).and_then(finish_message))
        .collect()
}
