//! Multiple-choice quiz generation and grading.
//!
//! Generation draws random (word, primary sentence) pairs from the store,
//! builds per-item distractor sets, and blanks the answer word out of its
//! sentence. Grading is a pure function over the generated items and the
//! user's selections, so there is no ambient quiz state.

use std::collections::HashMap;

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::storage::{PrimaryPair, Storage, StorageResult};

/// Placeholder substituted for the quizzed word.
pub const BLANK: &str = "_____";

/// Where distractor options come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistractorPool {
    /// Only words drawn into this quiz. Keeps the options thematically
    /// close, but a 1-2 item quiz has few distractors to offer.
    DrawnItems,
    /// Any other word in the store.
    WholeVocabulary,
}

/// Quiz generation parameters.
#[derive(Debug, Clone, Copy)]
pub struct QuizConfig {
    /// Number of items to draw.
    pub size: usize,
    /// Distractors per item (capped by the pool size).
    pub distractors: usize,
    pub pool: DistractorPool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            size: 5,
            distractors: 3,
            pool: DistractorPool::DrawnItems,
        }
    }
}

/// One quiz item. `sentence` is the original text; the blanked form is
/// derived on demand so blanking and restoring stay symmetric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizItem {
    pub word: String,
    pub sentence: String,
    pub options: Vec<String>,
}

impl QuizItem {
    /// The sentence as shown to the user, answer word blanked out. If the
    /// word does not occur as a whole word the sentence is shown as-is.
    pub fn prompt(&self) -> String {
        blank_word(&self.sentence, &self.word)
    }
}

/// Per-item grading result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradedItem {
    pub index: usize,
    pub selection: Option<String>,
    pub correct: String,
    /// The sentence with the blank substituted back.
    pub sentence: String,
    pub is_correct: bool,
}

/// Overall grading result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizReport {
    pub score: usize,
    pub total: usize,
    pub items: Vec<GradedItem>,
}

/// Replace whole-word occurrences of `word` in `sentence` with the blank.
/// Zero matches leave the sentence unchanged; multiple matches are all
/// blanked.
pub fn blank_word(sentence: &str, word: &str) -> String {
    match word_pattern(word) {
        Some(re) => re.replace_all(sentence, BLANK).into_owned(),
        None => sentence.to_string(),
    }
}

/// Put the word back into a blanked sentence. Inverse of [`blank_word`]
/// for sentences that contained the word as a whole word.
pub fn restore_blanks(text: &str, word: &str) -> String {
    text.replace(BLANK, word)
}

fn word_pattern(word: &str) -> Option<Regex> {
    // The pattern is built from an escaped literal; compilation only fails
    // on a pathological word, in which case the sentence stays unblanked.
    Regex::new(&format!(r"\b{}\b", regex::escape(word))).ok()
}

/// Draw a quiz from the store.
pub fn generate(
    storage: &Storage,
    config: &QuizConfig,
    rng: &mut impl Rng,
) -> StorageResult<Vec<QuizItem>> {
    let pairs = storage.sentences().draw_primary_pairs(config.size)?;

    let mut items = Vec::with_capacity(pairs.len());
    for (index, pair) in pairs.iter().enumerate() {
        let candidates: Vec<String> = match config.pool {
            DistractorPool::DrawnItems => pairs
                .iter()
                .enumerate()
                .filter(|(other, _)| *other != index)
                .map(|(_, p)| p.word.clone())
                .collect(),
            DistractorPool::WholeVocabulary => storage.words().other_texts(pair.word_id)?,
        };

        items.push(build_item(pair, &candidates, config.distractors, rng));
    }

    Ok(items)
}

fn build_item(
    pair: &PrimaryPair,
    candidates: &[String],
    distractors: usize,
    rng: &mut impl Rng,
) -> QuizItem {
    let wanted = distractors.min(candidates.len());
    let mut options: Vec<String> = candidates
        .choose_multiple(rng, wanted)
        .cloned()
        .collect();
    options.push(pair.word.clone());
    options.shuffle(rng);

    QuizItem {
        word: pair.word.clone(),
        sentence: pair.sentence.clone(),
        options,
    }
}

/// Grade submitted answers: one point per exact match, missing selections
/// count as wrong.
pub fn grade(items: &[QuizItem], answers: &HashMap<usize, String>) -> QuizReport {
    let mut graded = Vec::with_capacity(items.len());
    let mut score = 0;

    for (index, item) in items.iter().enumerate() {
        let selection = answers.get(&index).cloned();
        let is_correct = selection.as_deref() == Some(item.word.as_str());
        if is_correct {
            score += 1;
        }

        graded.push(GradedItem {
            index,
            selection,
            correct: item.word.clone(),
            sentence: restore_blanks(&item.prompt(), &item.word),
            is_correct,
        });
    }

    QuizReport {
        score,
        total: items.len(),
        items: graded,
    }
}
