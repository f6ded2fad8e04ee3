//! Definition table operations.

use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection, OptionalExtension};

use crate::storage::models::Definition;
use crate::storage::{StorageError, StorageResult};

/// Repository for the `definitions` table.
pub struct DefinitionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DefinitionRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> StorageResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StorageError::LockError(e.to_string()))
    }

    pub fn get(&self, word_id: i64) -> StorageResult<Option<Definition>> {
        let conn = self.get_conn()?;
        let definition = conn
            .query_row(
                "SELECT word_id, definition FROM definitions WHERE word_id = ?1",
                params![word_id],
                Definition::from_row,
            )
            .optional()?;
        Ok(definition)
    }

    pub fn exists(&self, word_id: i64) -> StorageResult<bool> {
        let conn = self.get_conn()?;
        let exists = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM definitions WHERE word_id = ?1)",
            params![word_id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Insert or overwrite the word's definition. Empty text is accepted.
    pub fn upsert(&self, word_id: i64, definition: &str) -> StorageResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO definitions (word_id, definition) VALUES (?1, ?2)
            ON CONFLICT(word_id) DO UPDATE SET definition = excluded.definition
            "#,
            params![word_id, definition],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::Storage;

    #[test]
    fn test_upsert_inserts_then_overwrites() {
        let storage = Storage::in_memory().unwrap();
        let (id, _) = storage.words().insert_if_absent("sanguine").unwrap();
        let repo = storage.definitions();

        assert!(!repo.exists(id).unwrap());

        repo.upsert(id, "cheerfully optimistic").unwrap();
        assert!(repo.exists(id).unwrap());
        assert_eq!(
            repo.get(id).unwrap().unwrap().definition,
            "cheerfully optimistic"
        );

        repo.upsert(id, "hopeful about the future").unwrap();
        assert_eq!(
            repo.get(id).unwrap().unwrap().definition,
            "hopeful about the future"
        );

        assert_eq!(storage.counts().unwrap().definitions, 1);
    }

    #[test]
    fn test_empty_definition_is_accepted() {
        let storage = Storage::in_memory().unwrap();
        let (id, _) = storage.words().insert_if_absent("dour").unwrap();

        storage.definitions().upsert(id, "").unwrap();
        assert_eq!(storage.definitions().get(id).unwrap().unwrap().definition, "");
    }

    #[test]
    fn test_get_missing_returns_none() {
        let storage = Storage::in_memory().unwrap();
        assert!(storage.definitions().get(42).unwrap().is_none());
    }
}
