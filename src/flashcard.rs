//! Flashcard review: one random study card per draw.

use crate::storage::{Flashcard, Storage, StorageResult};

/// Draw one random (word, definition, primary sentence) card, or `None`
/// when no word has a complete triple yet.
pub fn draw(storage: &Storage) -> StorageResult<Option<Flashcard>> {
    storage.sentences().random_card()
}
