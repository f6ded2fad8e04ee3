//! Example-sentence table operations.
//!
//! Invariant: while a word has any sentences, exactly one of them carries
//! `is_primary`. Every mutation here preserves that transactionally; a
//! partial unique index (migration V2) backstops it.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Transaction};

use crate::storage::models::{format_datetime, ExampleSentence, Flashcard, PrimaryPair};
use crate::storage::{StorageError, StorageResult};

/// Repository for the `sentences` table.
pub struct SentenceRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SentenceRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> StorageResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StorageError::LockError(e.to_string()))
    }

    /// Insert a sentence for a word. The word's first sentence becomes
    /// primary; later ones do not.
    pub fn add(&self, word_id: i64, sentence: &str) -> StorageResult<ExampleSentence> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let existing: i64 = tx.query_row(
            "SELECT COUNT(*) FROM sentences WHERE word_id = ?1",
            params![word_id],
            |row| row.get(0),
        )?;

        tx.execute(
            "INSERT INTO sentences (word_id, sentence, is_primary, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                word_id,
                sentence,
                (existing == 0) as i32,
                format_datetime(Utc::now())
            ],
        )?;

        let inserted = Self::get_tx(&tx, tx.last_insert_rowid())?.ok_or_else(|| {
            StorageError::NotFound("sentence vanished during insert".to_string())
        })?;

        tx.commit()?;
        Ok(inserted)
    }

    pub fn get(&self, id: i64) -> StorageResult<Option<ExampleSentence>> {
        let conn = self.get_conn()?;
        let sentence = conn
            .query_row(
                "SELECT id, word_id, sentence, is_primary, created_at
                 FROM sentences WHERE id = ?1",
                params![id],
                ExampleSentence::from_row,
            )
            .optional()?;
        Ok(sentence)
    }

    fn get_tx(tx: &Transaction, id: i64) -> StorageResult<Option<ExampleSentence>> {
        let sentence = tx
            .query_row(
                "SELECT id, word_id, sentence, is_primary, created_at
                 FROM sentences WHERE id = ?1",
                params![id],
                ExampleSentence::from_row,
            )
            .optional()?;
        Ok(sentence)
    }

    /// All sentences for a word, oldest first.
    pub fn list_for_word(&self, word_id: i64) -> StorageResult<Vec<ExampleSentence>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, word_id, sentence, is_primary, created_at
             FROM sentences WHERE word_id = ?1 ORDER BY id",
        )?;
        let sentences = stmt
            .query_map(params![word_id], ExampleSentence::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(sentences)
    }

    pub fn primary_for_word(&self, word_id: i64) -> StorageResult<Option<ExampleSentence>> {
        let conn = self.get_conn()?;
        let sentence = conn
            .query_row(
                "SELECT id, word_id, sentence, is_primary, created_at
                 FROM sentences WHERE word_id = ?1 AND is_primary = 1",
                params![word_id],
                ExampleSentence::from_row,
            )
            .optional()?;
        Ok(sentence)
    }

    /// Make the given sentence its word's primary. Clears the flag on
    /// siblings first so exactly one primary results.
    pub fn promote(&self, id: i64) -> StorageResult<ExampleSentence> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let target = Self::get_tx(&tx, id)?
            .ok_or_else(|| StorageError::NotFound(format!("sentence {id}")))?;

        tx.execute(
            "UPDATE sentences SET is_primary = 0 WHERE word_id = ?1 AND is_primary = 1",
            params![target.word_id],
        )?;
        tx.execute(
            "UPDATE sentences SET is_primary = 1 WHERE id = ?1",
            params![id],
        )?;

        let promoted = Self::get_tx(&tx, id)?
            .ok_or_else(|| StorageError::NotFound(format!("sentence {id}")))?;

        tx.commit()?;
        Ok(promoted)
    }

    /// Delete a sentence. Removing the primary promotes the oldest
    /// remaining sentence so the word never ends up with sentences but no
    /// primary.
    pub fn remove(&self, id: i64) -> StorageResult<()> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let target = Self::get_tx(&tx, id)?
            .ok_or_else(|| StorageError::NotFound(format!("sentence {id}")))?;

        tx.execute("DELETE FROM sentences WHERE id = ?1", params![id])?;

        if target.is_primary {
            let oldest: Option<i64> = tx
                .query_row(
                    "SELECT MIN(id) FROM sentences WHERE word_id = ?1",
                    params![target.word_id],
                    |row| row.get(0),
                )
                .optional()?
                .flatten();

            if let Some(oldest_id) = oldest {
                tx.execute(
                    "UPDATE sentences SET is_primary = 1 WHERE id = ?1",
                    params![oldest_id],
                )?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Draw up to `limit` random (word, primary sentence) pairs, without
    /// replacement across the draw.
    pub fn draw_primary_pairs(&self, limit: usize) -> StorageResult<Vec<PrimaryPair>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT w.id, w.word, s.sentence
            FROM words w
            JOIN sentences s ON w.id = s.word_id
            WHERE s.is_primary = 1
            ORDER BY RANDOM()
            LIMIT ?1
            "#,
        )?;

        let pairs = stmt
            .query_map(params![limit as i64], |row| {
                Ok(PrimaryPair {
                    word_id: row.get(0)?,
                    word: row.get(1)?,
                    sentence: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(pairs)
    }

    /// One random fully-joined study card, if any word has both a
    /// definition and a primary sentence.
    pub fn random_card(&self) -> StorageResult<Option<Flashcard>> {
        let conn = self.get_conn()?;
        let card = conn
            .query_row(
                r#"
                SELECT w.word, d.definition, s.sentence
                FROM words w
                JOIN definitions d ON d.word_id = w.id
                JOIN sentences s ON s.word_id = w.id AND s.is_primary = 1
                ORDER BY RANDOM()
                LIMIT 1
                "#,
                [],
                |row| {
                    Ok(Flashcard {
                        word: row.get(0)?,
                        definition: row.get(1)?,
                        sentence: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(card)
    }
}
