use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::db::SCHEMA_SQL;
use crate::errors::{CleanerError, Result};

#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens the file and hands a mutable connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = Connection::open(&self.path)
            .map_err(|e| CleanerError::Db(format!("Open DB failed: {e}")))?;
        f(&mut conn)
    }

    /// Apply the bundled listings schema. Safe to run on an existing file.
    pub fn init(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute_batch(SCHEMA_SQL)
                .map_err(|e| CleanerError::Db(format!("Failed to apply schema: {e}")))?;
            Ok(())
        })?;
        tracing::debug!("Database initialized at {}", self.path.display());
        Ok(())
    }
}
