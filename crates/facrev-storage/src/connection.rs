//! `DatabaseManager` — single serialized connection with WAL pragmas.
//!
//! Writes are serialized per document; at this system's scale (low
//! hundreds of records) one connection behind a mutex is the whole
//! concurrency story. No code outside this crate should touch a raw
//! `&Connection`.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::Connection;

use facrev_core::StorageError;

use crate::sqe;

/// Owner of the SQLite connection. File-backed databases run in WAL mode;
/// in-memory databases (tests) skip the journal pragma.
pub struct DatabaseManager {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open a file-backed database and apply pragmas.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(sqe)?;
        apply_pragmas(&conn, true)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(sqe)?;
        apply_pragmas(&conn, false)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run a read-only closure against the connection.
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let conn = self.conn.lock().map_err(|_| StorageError::Busy)?;
        f(&conn)
    }

    /// Run a mutating closure against the connection.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let conn = self.conn.lock().map_err(|_| StorageError::Busy)?;
        f(&conn)
    }
}

fn apply_pragmas(conn: &Connection, file_backed: bool) -> Result<(), StorageError> {
    if file_backed {
        conn.pragma_update(None, "journal_mode", "WAL").map_err(sqe)?;
        conn.pragma_update(None, "synchronous", "NORMAL")
            .map_err(sqe)?;
    }
    conn.pragma_update(None, "foreign_keys", "ON").map_err(sqe)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))
        .map_err(sqe)?;
    Ok(())
}
