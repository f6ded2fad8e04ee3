//! The `wordweek define` command.

use anyhow::Result;

use wordweek::config::Config;
use wordweek::dictionary::DefinitionFetcher;
use wordweek::storage::Storage;
use wordweek::vocab::VocabService;

pub fn execute(config: &Config, word: &str, text: &[String]) -> Result<()> {
    let storage = Storage::open(&config.db_path)?;
    let fetcher = DefinitionFetcher::new(config);
    let service = VocabService::new(&storage, &fetcher);

    service.update_definition(word, &text.join(" "))?;
    println!("Updated definition for '{}'.", word.trim().to_lowercase());

    Ok(())
}
