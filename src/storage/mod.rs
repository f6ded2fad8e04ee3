//! SQLite storage module.
//!
//! Owns the database connection and exposes one repository per table:
//! - words: the root entity, one row per unique (lowercased) word
//! - definitions: at most one per word
//! - sentences: any number per word, exactly one primary while any exist

pub mod definitions;
pub mod migrations;
pub mod models;
pub mod sentences;
pub mod words;

pub use definitions::DefinitionRepository;
pub use migrations::run_migrations;
pub use models::*;
pub use sentences::SentenceRepository;
pub use words::WordRepository;

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use thiserror::Error;

/// Storage module error type.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("migration error: {0}")]
    Migration(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("lock poisoned: {0}")]
    LockError(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Row counts across the three tables, used by the clear-all confirmation
/// and the status line after destructive operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub words: i64,
    pub definitions: i64,
    pub sentences: i64,
}

impl TableCounts {
    pub fn is_empty(&self) -> bool {
        self.words == 0 && self.definitions == 0 && self.sentences == 0
    }
}

/// Database connection manager.
///
/// Opens the database with WAL and foreign keys enabled and runs migrations
/// before handing out repositories. The connection is shared behind
/// `Arc<Mutex<..>>`; each repository clones the handle.
pub struct Storage {
    conn: Arc<Mutex<Connection>>,
    db_path: String,
}

impl Storage {
    /// Open (or create) a database file and bring its schema up to date.
    pub fn open<P: AsRef<Path>>(db_path: P) -> StorageResult<Self> {
        let path_str = db_path.as_ref().to_string_lossy().to_string();
        if let Some(parent) = db_path.as_ref().parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let connection = Connection::open(&db_path)?;
        connection.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA synchronous=NORMAL;
             PRAGMA foreign_keys=ON;",
        )?;

        Self::from_connection(connection, path_str)
    }

    /// In-memory database for tests.
    pub fn in_memory() -> StorageResult<Self> {
        let connection = Connection::open_in_memory()?;
        connection.execute_batch("PRAGMA foreign_keys=ON;")?;
        Self::from_connection(connection, ":memory:".to_string())
    }

    fn from_connection(connection: Connection, db_path: String) -> StorageResult<Self> {
        migrations::run_migrations(&connection)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(connection)),
            db_path,
        })
    }

    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    pub fn words(&self) -> WordRepository {
        WordRepository::new(Arc::clone(&self.conn))
    }

    pub fn definitions(&self) -> DefinitionRepository {
        DefinitionRepository::new(Arc::clone(&self.conn))
    }

    pub fn sentences(&self) -> SentenceRepository {
        SentenceRepository::new(Arc::clone(&self.conn))
    }

    /// Run a closure inside a single transaction.
    pub fn transaction<F, T>(&self, f: F) -> StorageResult<T>
    where
        F: FnOnce(&Connection) -> StorageResult<T>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| StorageError::LockError(e.to_string()))?;

        let tx = conn.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;

        Ok(result)
    }

    /// Row counts for all three tables.
    pub fn counts(&self) -> StorageResult<TableCounts> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StorageError::LockError(e.to_string()))?;

        let count = |table: &str| -> StorageResult<i64> {
            Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })?)
        };

        Ok(TableCounts {
            words: count("words")?,
            definitions: count("definitions")?,
            sentences: count("sentences")?,
        })
    }

    /// Delete every row of every table, children first. Irreversible.
    pub fn clear_all(&self) -> StorageResult<()> {
        self.transaction(|conn| {
            conn.execute("DELETE FROM sentences", [])?;
            conn.execute("DELETE FROM definitions", [])?;
            conn.execute("DELETE FROM words", [])?;
            Ok(())
        })
    }
}
