//! wordweek — a personal vocabulary-study tool.
//!
//! Words go in (with a fetched definition and a synthesized example
//! sentence); flashcards and fill-in-the-blank quizzes come out.

pub mod config;
pub mod dictionary;
pub mod flashcard;
pub mod quiz;
pub mod storage;
pub mod synthesizer;
pub mod vocab;
