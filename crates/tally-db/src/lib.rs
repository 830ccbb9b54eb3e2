//! # tally-db
//!
//! libSQL persistence for normalized messages and the per-category
//! sentiment aggregate that drives the chart.
//!
//! The store holds a single table, `streamed_messages`. It is deleted and
//! recreated at every start ([`remove_store_files`] then
//! [`MessageStore::open_local`]), appended to once per valid line, and read
//! back in full by [`MessageStore::compute_averages`] after each append.
//!
//! Uses the `libsql` crate (C `SQLite` fork) in local-only mode.

mod aggregate;
pub mod error;
mod messages;
mod migrations;

use std::io;
use std::path::{Path, PathBuf};

use error::DatabaseError;
use libsql::Builder;

/// Handle on the message store.
///
/// Holds one connection for the life of the process. All access goes
/// through the single tail loop, so there is exactly one writer.
pub struct MessageStore {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl MessageStore {
    /// Open (creating if needed) a local store and ensure the schema exists.
    ///
    /// Pass `":memory:"` for a throwaway store in tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or the
    /// schema cannot be created.
    pub async fn open_local(path: impl AsRef<Path>) -> Result<Self, DatabaseError> {
        let path = path.as_ref();
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Open {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        let conn = db.connect()?;

        let store = Self { db, conn };
        store.run_migrations().await?;
        tracing::debug!(path = %path.display(), "message store ready");
        Ok(store)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}

/// Delete a store file and any `SQLite` sidecar files next to it.
///
/// Returns whether the main store file existed. Missing files are not an error.
///
/// # Errors
///
/// Returns the first I/O error other than `NotFound`.
pub fn remove_store_files(path: &Path) -> io::Result<bool> {
    let existed = remove_if_present(path)?;
    for suffix in ["-wal", "-shm", "-journal"] {
        let mut sidecar = path.as_os_str().to_os_string();
        sidecar.push(suffix);
        remove_if_present(&PathBuf::from(sidecar))?;
    }
    Ok(existed)
}

fn remove_if_present(path: &Path) -> io::Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
