//! site_settings singleton queries.

use rusqlite::{params, Connection};

use facrev_core::{SiteSettings, SiteSettingsUpdate, StorageError};

use crate::sqe;

pub fn get_settings(conn: &Connection) -> Result<SiteSettings, StorageError> {
    conn.query_row(
        "SELECT is_chat_enabled, is_about_page_enabled FROM site_settings WHERE id = 1",
        [],
        |row| {
            Ok(SiteSettings {
                is_chat_enabled: row.get::<_, i64>(0)? != 0,
                is_about_page_enabled: row.get::<_, i64>(1)? != 0,
            })
        },
    )
    .map_err(sqe)
}

/// Apply a partial update and return the resulting settings.
pub fn update_settings(
    conn: &Connection,
    update: &SiteSettingsUpdate,
) -> Result<SiteSettings, StorageError> {
    conn.prepare_cached(
        "UPDATE site_settings SET
             is_chat_enabled       = COALESCE(?1, is_chat_enabled),
             is_about_page_enabled = COALESCE(?2, is_about_page_enabled)
         WHERE id = 1",
    )
    .map_err(sqe)?
    .execute(params![
        update.is_chat_enabled.map(|b| b as i64),
        update.is_about_page_enabled.map(|b| b as i64),
    ])
    .map_err(sqe)?;
    get_settings(conn)
}
