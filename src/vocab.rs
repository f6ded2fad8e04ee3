//! Vocabulary manager: ingestion and edit operations over the store.

use crate::dictionary::DefinitionFetcher;
use crate::storage::{
    Definition, ExampleSentence, Storage, StorageError, StorageResult, Word,
};
use crate::synthesizer;

/// Outcome of one ingestion batch.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    /// Words newly inserted by this batch.
    pub added: Vec<String>,
    /// Words that already existed and were skipped.
    pub skipped: Vec<String>,
    /// Words whose definition lookup degraded to the fallback text.
    pub degraded: Vec<String>,
}

/// A word with everything stored about it.
#[derive(Debug, Clone)]
pub struct WordDetail {
    pub word: Word,
    pub definition: Option<Definition>,
    pub sentences: Vec<ExampleSentence>,
}

/// Orchestrates ingestion and editing on top of the repositories and the
/// definition fetcher.
pub struct VocabService<'a> {
    storage: &'a Storage,
    fetcher: &'a DefinitionFetcher,
}

impl<'a> VocabService<'a> {
    pub fn new(storage: &'a Storage, fetcher: &'a DefinitionFetcher) -> Self {
        Self { storage, fetcher }
    }

    /// Ingest a multi-line word list: one candidate per line, trimmed and
    /// lowercased; blank lines and duplicates are skipped. Words missing a
    /// definition get one fetched (or the fallback); words missing a
    /// primary sentence get one synthesized. A failed lookup never aborts
    /// the batch.
    pub async fn ingest(&self, input: &str) -> StorageResult<IngestReport> {
        let mut report = IngestReport::default();

        for line in input.lines() {
            let word = line.trim().to_lowercase();
            if word.is_empty() {
                continue;
            }

            let (word_id, inserted) = self.storage.words().insert_if_absent(&word)?;
            if inserted {
                report.added.push(word.clone());
            } else {
                report.skipped.push(word.clone());
            }

            if !self.storage.definitions().exists(word_id)? {
                let lookup = self.fetcher.lookup(&word).await;
                if lookup.is_degraded() {
                    report.degraded.push(word.clone());
                }
                self.storage
                    .definitions()
                    .upsert(word_id, &lookup.into_text())?;
            }

            if self.storage.sentences().primary_for_word(word_id)?.is_none() {
                let sentence = synthesizer::synthesize(&word, &mut rand::rng());
                self.storage.sentences().add(word_id, &sentence)?;
            }
        }

        Ok(report)
    }

    /// Everything stored about a word, or `None` if it is unknown.
    pub fn word_detail(&self, word: &str) -> StorageResult<Option<WordDetail>> {
        let normalized = word.trim().to_lowercase();
        let Some(word) = self.storage.words().get_by_text(&normalized)? else {
            return Ok(None);
        };

        let definition = self.storage.definitions().get(word.id)?;
        let sentences = self.storage.sentences().list_for_word(word.id)?;

        Ok(Some(WordDetail {
            word,
            definition,
            sentences,
        }))
    }

    /// Overwrite a word's definition. Empty text is accepted.
    pub fn update_definition(&self, word: &str, text: &str) -> StorageResult<()> {
        let word = self.resolve_word(word)?;
        self.storage.definitions().upsert(word.id, text.trim())
    }

    /// Record an extra example sentence; the word's first sentence becomes
    /// the primary.
    pub fn add_sentence(&self, word: &str, text: &str) -> StorageResult<ExampleSentence> {
        let word = self.resolve_word(word)?;
        self.storage.sentences().add(word.id, text.trim())
    }

    pub fn promote_sentence(&self, sentence_id: i64) -> StorageResult<ExampleSentence> {
        self.storage.sentences().promote(sentence_id)
    }

    pub fn remove_sentence(&self, sentence_id: i64) -> StorageResult<()> {
        self.storage.sentences().remove(sentence_id)
    }

    /// Destroy every word, definition and sentence. The caller is expected
    /// to have confirmed first.
    pub fn clear_all(&self) -> StorageResult<()> {
        self.storage.clear_all()
    }

    fn resolve_word(&self, word: &str) -> StorageResult<Word> {
        let normalized = word.trim().to_lowercase();
        self.storage
            .words()
            .get_by_text(&normalized)?
            .ok_or_else(|| StorageError::NotFound(format!("word '{normalized}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{DefinitionFetcher, FALLBACK_DEFINITION};
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn offline_fetcher() -> DefinitionFetcher {
        DefinitionFetcher::with_endpoint("http://127.0.0.1:1", "key", Duration::from_millis(200))
    }

    async fn mock_dictionary(definition: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"text": definition}
            ])))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn ingest_creates_word_definition_and_primary_sentence() {
        let storage = Storage::in_memory().unwrap();
        let server = mock_dictionary("Cheerfully optimistic.").await;
        let fetcher =
            DefinitionFetcher::with_endpoint(&server.uri(), "key", Duration::from_secs(1));
        let service = VocabService::new(&storage, &fetcher);

        let report = service.ingest("Sanguine\n").await.unwrap();
        assert_eq!(report.added, vec!["sanguine"]);
        assert!(report.skipped.is_empty());
        assert!(report.degraded.is_empty());

        let detail = service.word_detail("sanguine").unwrap().unwrap();
        assert_eq!(
            detail.definition.unwrap().definition,
            "Cheerfully optimistic."
        );
        assert_eq!(detail.sentences.len(), 1);
        assert!(detail.sentences[0].is_primary);
        assert!(detail.sentences[0].sentence.contains("sanguine"));
    }

    #[tokio::test]
    async fn ingest_normalizes_and_skips_blank_lines() {
        let storage = Storage::in_memory().unwrap();
        let server = mock_dictionary("d").await;
        let fetcher =
            DefinitionFetcher::with_endpoint(&server.uri(), "key", Duration::from_secs(1));
        let service = VocabService::new(&storage, &fetcher);

        let report = service.ingest("  Sanguine  \n\n\tDOUR\n").await.unwrap();
        assert_eq!(report.added, vec!["sanguine", "dour"]);
        assert_eq!(storage.counts().unwrap().words, 2);
    }

    #[tokio::test]
    async fn ingest_twice_leaves_first_pass_untouched() {
        let storage = Storage::in_memory().unwrap();
        let server = mock_dictionary("From the first pass.").await;
        let fetcher =
            DefinitionFetcher::with_endpoint(&server.uri(), "key", Duration::from_secs(1));

        VocabService::new(&storage, &fetcher)
            .ingest("sanguine")
            .await
            .unwrap();
        let first = VocabService::new(&storage, &fetcher)
            .word_detail("sanguine")
            .unwrap()
            .unwrap();

        // Re-ingest through a fetcher that can only fail: if anything were
        // refetched, the definition would turn into the fallback.
        let offline = offline_fetcher();
        let service = VocabService::new(&storage, &offline);
        let report = service.ingest("sanguine").await.unwrap();

        assert!(report.added.is_empty());
        assert_eq!(report.skipped, vec!["sanguine"]);
        assert!(report.degraded.is_empty());

        let counts = storage.counts().unwrap();
        assert_eq!((counts.words, counts.definitions, counts.sentences), (1, 1, 1));

        let second = service.word_detail("sanguine").unwrap().unwrap();
        assert_eq!(
            second.definition.unwrap().definition,
            "From the first pass."
        );
        assert_eq!(second.sentences[0].sentence, first.sentences[0].sentence);
    }

    #[tokio::test]
    async fn ingest_stores_fallback_when_lookup_fails() {
        let storage = Storage::in_memory().unwrap();
        let fetcher = offline_fetcher();
        let service = VocabService::new(&storage, &fetcher);

        let report = service.ingest("sanguine\ndour").await.unwrap();
        assert_eq!(report.added.len(), 2);
        assert_eq!(report.degraded, vec!["sanguine", "dour"]);

        for word in ["sanguine", "dour"] {
            let detail = service.word_detail(word).unwrap().unwrap();
            assert_eq!(detail.definition.unwrap().definition, FALLBACK_DEFINITION);
            // The sentence is synthesized locally either way.
            assert_eq!(detail.sentences.len(), 1);
        }
    }

    #[tokio::test]
    async fn update_definition_overwrites_and_trims() {
        let storage = Storage::in_memory().unwrap();
        let fetcher = offline_fetcher();
        let service = VocabService::new(&storage, &fetcher);

        service.ingest("sanguine").await.unwrap();
        service
            .update_definition("sanguine", "  hopeful; confident  ")
            .unwrap();

        let detail = service.word_detail("sanguine").unwrap().unwrap();
        assert_eq!(detail.definition.unwrap().definition, "hopeful; confident");

        assert!(service.update_definition("missing", "x").is_err());
    }

    #[tokio::test]
    async fn sentence_edits_keep_one_primary() {
        let storage = Storage::in_memory().unwrap();
        let fetcher = offline_fetcher();
        let service = VocabService::new(&storage, &fetcher);

        service.ingest("sanguine").await.unwrap();
        let extra = service
            .add_sentence("sanguine", "A sanguine reply came back.")
            .unwrap();
        assert!(!extra.is_primary);

        let promoted = service.promote_sentence(extra.id).unwrap();
        assert!(promoted.is_primary);

        service.remove_sentence(extra.id).unwrap();
        let detail = service.word_detail("sanguine").unwrap().unwrap();
        assert_eq!(detail.sentences.len(), 1);
        assert!(detail.sentences[0].is_primary);
    }

    #[tokio::test]
    async fn clear_all_empties_the_store() {
        let storage = Storage::in_memory().unwrap();
        let fetcher = offline_fetcher();
        let service = VocabService::new(&storage, &fetcher);

        service.ingest("sanguine\ndour").await.unwrap();
        assert!(!storage.counts().unwrap().is_empty());

        service.clear_all().unwrap();
        assert!(storage.counts().unwrap().is_empty());
    }
}
