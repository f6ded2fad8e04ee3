//! Database migrations.
//!
//! Versioned, forward-only migrations recorded in a `schema_migrations`
//! table. Each migration runs in its own transaction and is skipped once
//! applied, so startup is idempotent.

use rusqlite::Connection;

use crate::storage::{StorageError, StorageResult};

/// Current schema version.
pub const CURRENT_SCHEMA_VERSION: i32 = 2;

/// Initial schema SQL (V1).
const INIT_SCHEMA: &str = include_str!("schema.sql");

/// A single migration step.
#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i32,
    pub name: String,
    pub sql: String,
}

impl Migration {
    pub fn new(version: i32, name: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            version,
            name: name.into(),
            sql: sql.into(),
        }
    }
}

/// All migrations, ordered by version.
pub fn get_migrations() -> Vec<Migration> {
    vec![
        Migration::new(1, "initial schema", INIT_SCHEMA),
        // The partial unique index makes "at most one primary sentence per
        // word" a store-level guarantee; the promote/remove paths must clear
        // the old flag before setting a new one.
        Migration::new(
            2,
            "enforce single primary sentence",
            r#"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_sentences_one_primary
                ON sentences(word_id) WHERE is_primary = 1;
            "#,
        ),
    ]
}

fn ensure_migrations_table(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at INTEGER NOT NULL
        );
        "#,
    )
    .map_err(|e| StorageError::Migration(format!("cannot create migrations table: {e}")))?;

    Ok(())
}

/// Highest applied version, 0 when no migration has run yet.
pub fn get_current_version(conn: &Connection) -> i32 {
    if ensure_migrations_table(conn).is_err() {
        return 0;
    }

    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )
    .unwrap_or(0)
}

fn get_applied_versions(conn: &Connection) -> StorageResult<Vec<i32>> {
    ensure_migrations_table(conn)?;

    let mut stmt = conn.prepare("SELECT version FROM schema_migrations ORDER BY version")?;
    let versions = stmt
        .query_map([], |row| row.get(0))?
        .filter_map(|r| r.ok())
        .collect();

    Ok(versions)
}

fn record_migration(conn: &Connection, migration: &Migration) -> StorageResult<()> {
    conn.execute(
        "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?1, ?2, ?3)",
        rusqlite::params![
            migration.version,
            migration.name,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs() as i64
        ],
    )?;

    Ok(())
}

/// Run all pending migrations. Returns the final schema version.
pub fn run_migrations(conn: &Connection) -> Result<i32, StorageError> {
    ensure_migrations_table(conn)?;

    let applied_versions = get_applied_versions(conn)?;
    let migrations = get_migrations();
    let mut final_version = get_current_version(conn);

    for migration in migrations {
        if applied_versions.contains(&migration.version) {
            continue;
        }

        tracing::info!(version = migration.version, name = %migration.name, "running migration");

        match execute_migration_in_transaction(conn, &migration) {
            Ok(()) => {
                final_version = migration.version;
            }
            Err(e) => {
                tracing::error!(version = migration.version, error = %e, "migration failed");
                return Err(e);
            }
        }
    }

    Ok(final_version)
}

fn execute_migration_in_transaction(conn: &Connection, migration: &Migration) -> StorageResult<()> {
    conn.execute("BEGIN IMMEDIATE", [])?;

    match conn.execute_batch(&migration.sql) {
        Ok(()) => {
            if let Err(e) = record_migration(conn, migration) {
                conn.execute("ROLLBACK", []).ok();
                return Err(e);
            }

            conn.execute("COMMIT", [])?;
            Ok(())
        }
        Err(e) => {
            conn.execute("ROLLBACK", []).ok();
            Err(StorageError::Migration(format!(
                "migration v{} failed: {e}",
                migration.version
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_db() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn test_get_migrations_ordered() {
        let migrations = get_migrations();
        assert_eq!(migrations.len(), 2);
        assert_eq!(migrations[0].version, 1);
        assert_eq!(migrations[1].version, 2);
    }

    #[test]
    fn test_initial_migration() {
        let conn = setup_test_db();

        let version = run_migrations(&conn).expect("migration should succeed");
        assert_eq!(version, CURRENT_SCHEMA_VERSION);
        assert_eq!(get_current_version(&conn), CURRENT_SCHEMA_VERSION);

        for table in ["words", "definitions", "sentences"] {
            let exists: bool = conn
                .query_row(
                    "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert!(exists, "table {table} should exist");
        }
    }

    #[test]
    fn test_idempotent_migration() {
        let conn = setup_test_db();

        run_migrations(&conn).expect("first run");
        run_migrations(&conn).expect("second run");

        assert_eq!(get_current_version(&conn), CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn test_single_primary_index_enforced() {
        let conn = setup_test_db();
        run_migrations(&conn).unwrap();

        conn.execute(
            "INSERT INTO words (word, created_at) VALUES ('apple', '2025-01-01 00:00:00')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO sentences (word_id, sentence, is_primary, created_at)
             VALUES (1, 'first', 1, '2025-01-01 00:00:00')",
            [],
        )
        .unwrap();

        let second_primary = conn.execute(
            "INSERT INTO sentences (word_id, sentence, is_primary, created_at)
             VALUES (1, 'second', 1, '2025-01-01 00:00:00')",
            [],
        );
        assert!(second_primary.is_err());
    }
}
