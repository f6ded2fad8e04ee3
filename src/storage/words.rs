//! Word table operations.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::storage::models::{format_datetime, Word, WordSummary};
use crate::storage::{StorageError, StorageResult};

/// Repository for the `words` table.
pub struct WordRepository {
    conn: Arc<Mutex<Connection>>,
}

impl WordRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> StorageResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StorageError::LockError(e.to_string()))
    }

    /// Insert a word unless it already exists. Returns the word's id and
    /// whether this call created the row. Duplicates are not an error.
    pub fn insert_if_absent(&self, word: &str) -> StorageResult<(i64, bool)> {
        let conn = self.get_conn()?;

        let changed = conn.execute(
            "INSERT OR IGNORE INTO words (word, created_at) VALUES (?1, ?2)",
            params![word, format_datetime(Utc::now())],
        )?;

        let id: i64 = conn.query_row(
            "SELECT id FROM words WHERE word = ?1",
            params![word],
            |row| row.get(0),
        )?;

        Ok((id, changed > 0))
    }

    pub fn get(&self, id: i64) -> StorageResult<Option<Word>> {
        let conn = self.get_conn()?;
        let word = conn
            .query_row(
                "SELECT id, word, created_at FROM words WHERE id = ?1",
                params![id],
                Word::from_row,
            )
            .optional()?;
        Ok(word)
    }

    pub fn get_by_text(&self, word: &str) -> StorageResult<Option<Word>> {
        let conn = self.get_conn()?;
        let word = conn
            .query_row(
                "SELECT id, word, created_at FROM words WHERE word = ?1",
                params![word],
                Word::from_row,
            )
            .optional()?;
        Ok(word)
    }

    /// All words in insertion order.
    pub fn list(&self) -> StorageResult<Vec<Word>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT id, word, created_at FROM words ORDER BY id")?;
        let words = stmt
            .query_map([], Word::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(words)
    }

    /// Every stored word text except the given id. Distractor pool for the
    /// whole-vocabulary quiz policy.
    pub fn other_texts(&self, excluding_id: i64) -> StorageResult<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT word FROM words WHERE id != ?1 ORDER BY id")?;
        let words = stmt
            .query_map(params![excluding_id], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(words)
    }

    /// The review listing: each word joined with its definition and primary
    /// sentence, either of which may still be missing.
    pub fn summaries(&self) -> StorageResult<Vec<WordSummary>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT w.id, w.word, d.definition, s.sentence
            FROM words w
            LEFT JOIN definitions d ON d.word_id = w.id
            LEFT JOIN sentences s ON s.word_id = w.id AND s.is_primary = 1
            ORDER BY w.word
            "#,
        )?;

        let summaries = stmt
            .query_map([], |row| {
                Ok(WordSummary {
                    id: row.get(0)?,
                    word: row.get(1)?,
                    definition: row.get(2)?,
                    primary_sentence: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(summaries)
    }

    pub fn count(&self) -> StorageResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM words", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::Storage;

    #[test]
    fn test_insert_if_absent_is_idempotent() {
        let storage = Storage::in_memory().unwrap();
        let repo = storage.words();

        let (first_id, inserted) = repo.insert_if_absent("sanguine").unwrap();
        assert!(inserted);

        let (second_id, inserted) = repo.insert_if_absent("sanguine").unwrap();
        assert!(!inserted);
        assert_eq!(first_id, second_id);

        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_get_by_text() {
        let storage = Storage::in_memory().unwrap();
        let repo = storage.words();

        let (id, _) = repo.insert_if_absent("dour").unwrap();
        let found = repo.get_by_text("dour").unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.word, "dour");

        assert!(repo.get_by_text("missing").unwrap().is_none());
    }

    #[test]
    fn test_list_in_insertion_order() {
        let storage = Storage::in_memory().unwrap();
        let repo = storage.words();

        repo.insert_if_absent("zealous").unwrap();
        repo.insert_if_absent("austere").unwrap();

        let words: Vec<String> = repo.list().unwrap().into_iter().map(|w| w.word).collect();
        assert_eq!(words, vec!["zealous", "austere"]);
    }

    #[test]
    fn test_other_texts_excludes_given_word() {
        let storage = Storage::in_memory().unwrap();
        let repo = storage.words();

        let (id, _) = repo.insert_if_absent("sanguine").unwrap();
        repo.insert_if_absent("dour").unwrap();
        repo.insert_if_absent("placid").unwrap();

        let others = repo.other_texts(id).unwrap();
        assert_eq!(others, vec!["dour", "placid"]);
    }

    #[test]
    fn test_summaries_tolerate_missing_children() {
        let storage = Storage::in_memory().unwrap();
        let (id, _) = storage.words().insert_if_absent("sanguine").unwrap();

        let summaries = storage.words().summaries().unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, id);
        assert!(summaries[0].definition.is_none());
        assert!(summaries[0].primary_sentence.is_none());

        storage.definitions().upsert(id, "optimistic").unwrap();
        storage.sentences().add(id, "A sanguine outlook.").unwrap();

        let summaries = storage.words().summaries().unwrap();
        assert_eq!(summaries[0].definition.as_deref(), Some("optimistic"));
        assert_eq!(
            summaries[0].primary_sentence.as_deref(),
            Some("A sanguine outlook.")
        );
    }
}
