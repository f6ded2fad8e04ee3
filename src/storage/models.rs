//! Data model definitions.
//!
//! Row structs for the three tables plus the joined shapes the review,
//! quiz and flashcard paths read.

use chrono::{DateTime, Utc};
use rusqlite::{Result as SqliteResult, Row};
use serde::{Deserialize, Serialize};

/// A stored vocabulary word. The text is unique, trimmed and lowercase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    pub id: i64,
    pub word: String,
    pub created_at: DateTime<Utc>,
}

impl Word {
    pub fn from_row(row: &Row) -> SqliteResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            word: row.get("word")?,
            created_at: parse_datetime(row.get::<_, String>("created_at")?),
        })
    }
}

/// A word's definition; at most one per word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Definition {
    pub word_id: i64,
    pub definition: String,
}

impl Definition {
    pub fn from_row(row: &Row) -> SqliteResult<Self> {
        Ok(Self {
            word_id: row.get("word_id")?,
            definition: row.get("definition")?,
        })
    }
}

/// An example sentence; at most one per word carries the primary flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExampleSentence {
    pub id: i64,
    pub word_id: i64,
    pub sentence: String,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

impl ExampleSentence {
    pub fn from_row(row: &Row) -> SqliteResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            word_id: row.get("word_id")?,
            sentence: row.get("sentence")?,
            is_primary: row.get::<_, i32>("is_primary")? != 0,
            created_at: parse_datetime(row.get::<_, String>("created_at")?),
        })
    }
}

/// One row of the review listing: word plus whatever definition and primary
/// sentence it currently has.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordSummary {
    pub id: i64,
    pub word: String,
    pub definition: Option<String>,
    pub primary_sentence: Option<String>,
}

/// A (word, primary sentence) pair drawn for quiz generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryPair {
    pub word_id: i64,
    pub word: String,
    pub sentence: String,
}

/// One fully joined study card: word, definition, primary sentence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashcard {
    pub word: String,
    pub definition: String,
    pub sentence: String,
}

/// Format a timestamp the way it is stored in the database.
pub(crate) fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Parse a stored timestamp, tolerating RFC 3339 from older data.
pub(crate) fn parse_datetime(s: String) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
        return dt.with_timezone(&Utc);
    }

    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S") {
        return DateTime::from_naive_utc_and_offset(dt, Utc);
    }

    Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datetime_round_trip() {
        let formatted = "2025-03-04 05:06:07".to_string();
        let parsed = parse_datetime(formatted.clone());
        assert_eq!(format_datetime(parsed), formatted);
    }

    #[test]
    fn test_parse_datetime_rfc3339() {
        let parsed = parse_datetime("2025-03-04T05:06:07Z".to_string());
        assert_eq!(format_datetime(parsed), "2025-03-04 05:06:07");
    }
}
