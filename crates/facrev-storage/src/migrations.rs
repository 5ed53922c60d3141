//! Versioned schema migrations, tracked via `PRAGMA user_version`.

use rusqlite::Connection;

use facrev_core::StorageError;

use crate::sqe;

/// Ordered migrations. Append only; never edit a shipped entry.
const MIGRATIONS: &[(u32, &str)] = &[(1, V1_SCHEMA)];

const V1_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id              TEXT PRIMARY KEY,
    email           TEXT NOT NULL UNIQUE,
    username        TEXT,
    role            TEXT NOT NULL CHECK (role IN ('student', 'admin')),
    is_active       INTEGER NOT NULL DEFAULT 1,
    logout_pending  INTEGER NOT NULL DEFAULT 0,
    force_logout    INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS faculty (
    id            TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    department    TEXT NOT NULL,
    title         TEXT NOT NULL,
    bio           TEXT NOT NULL DEFAULT '',
    avatar_url    TEXT NOT NULL DEFAULT '',
    rating        REAL NOT NULL DEFAULT 0,
    review_count  INTEGER NOT NULL DEFAULT 0,
    tags          TEXT NOT NULL DEFAULT '[]',
    likes         INTEGER NOT NULL DEFAULT 0,
    dislikes      INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS reviews (
    id          TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL,
    faculty_id  TEXT NOT NULL,
    rating      INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
    comment     TEXT NOT NULL,
    date        TEXT NOT NULL,
    status      TEXT NOT NULL DEFAULT 'pending'
                CHECK (status IN ('pending', 'approved', 'rejected'))
);

CREATE INDEX IF NOT EXISTS idx_reviews_status ON reviews(status);
CREATE INDEX IF NOT EXISTS idx_reviews_faculty ON reviews(faculty_id, status);

-- Backs the one-pending-review-per-(user, faculty) invariant at the
-- storage layer; the moderation service checks it first and reports a
-- friendlier error.
CREATE UNIQUE INDEX IF NOT EXISTS idx_reviews_one_pending
    ON reviews(user_id, faculty_id) WHERE status = 'pending';

CREATE TABLE IF NOT EXISTS suggestions (
    id            TEXT PRIMARY KEY,
    user_id       TEXT NOT NULL,
    faculty_name  TEXT NOT NULL,
    department    TEXT NOT NULL,
    title         TEXT,
    notes         TEXT,
    date          TEXT NOT NULL,
    status        TEXT NOT NULL DEFAULT 'pending'
                  CHECK (status IN ('pending', 'approved', 'rejected'))
);

CREATE INDEX IF NOT EXISTS idx_suggestions_status ON suggestions(status);

CREATE TABLE IF NOT EXISTS question_papers (
    id           TEXT PRIMARY KEY,
    user_id      TEXT NOT NULL,
    user_email   TEXT NOT NULL,
    course_name  TEXT NOT NULL,
    slot         TEXT NOT NULL,
    image_url    TEXT NOT NULL,
    status       TEXT NOT NULL DEFAULT 'pending'
                 CHECK (status IN ('pending', 'approved', 'rejected')),
    date         TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_question_papers_status ON question_papers(status);

CREATE TABLE IF NOT EXISTS chat_messages (
    id          TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL,
    user_email  TEXT NOT NULL,
    text        TEXT NOT NULL,
    timestamp   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS site_settings (
    id                     INTEGER PRIMARY KEY CHECK (id = 1),
    is_chat_enabled        INTEGER NOT NULL DEFAULT 1,
    is_about_page_enabled  INTEGER NOT NULL DEFAULT 1
);

INSERT OR IGNORE INTO site_settings (id, is_chat_enabled, is_about_page_enabled)
VALUES (1, 1, 1);
"#;

/// Current schema version.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map(|(v, _)| *v).unwrap_or(0)
}

/// Read the applied schema version.
pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(sqe)
}

/// Apply all pending migrations, each in its own transaction.
pub fn apply(conn: &Connection) -> Result<(), StorageError> {
    let mut version = current_version(conn)?;

    for (target, sql) in MIGRATIONS {
        if *target <= version {
            continue;
        }
        tracing::info!(version = target, "applying schema migration");

        conn.execute_batch(&format!("BEGIN; {sql} COMMIT;"))
            .map_err(|e| StorageError::MigrationFailed {
                version: *target,
                message: e.to_string(),
            })?;
        conn.pragma_update(None, "user_version", target)
            .map_err(|e| StorageError::MigrationFailed {
                version: *target,
                message: e.to_string(),
            })?;
        version = *target;
    }
    Ok(())
}
