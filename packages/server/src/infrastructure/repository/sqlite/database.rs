//! Shared SQLite connection.

use std::{path::Path, sync::Mutex};

use rusqlite::Connection;
use tracing::info;

use super::migrations;
use crate::domain::RepositoryError;

/// SQLite database holding the participant registry and the message log
pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Open (or create) the database file and bring the schema up to date
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(unavailable)?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(unavailable)?;
        migrations::run(&conn).map_err(unavailable)?;
        info!("Opened database at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Private database that disappears with the value
    pub fn open_in_memory() -> Result<Self, RepositoryError> {
        let conn = Connection::open_in_memory().map_err(unavailable)?;
        migrations::run(&conn).map_err(unavailable)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub(super) fn with_conn<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| RepositoryError::Unavailable("database lock poisoned".to_string()))?;
        f(&mut conn)
    }
}

pub(super) fn unavailable(err: rusqlite::Error) -> RepositoryError {
    RepositoryError::Unavailable(err.to_string())
}

/// A stored value that no longer decodes into a domain value
pub(super) fn corrupted(what: &str, detail: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Unavailable(format!("corrupted {}: {}", what, detail))
}
