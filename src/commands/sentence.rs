//! The `wordweek sentence` subcommands.

use anyhow::Result;

use wordweek::config::Config;
use wordweek::dictionary::DefinitionFetcher;
use wordweek::storage::Storage;
use wordweek::vocab::VocabService;

pub fn add(config: &Config, word: &str, text: &[String]) -> Result<()> {
    let storage = Storage::open(&config.db_path)?;
    let fetcher = DefinitionFetcher::new(config);
    let service = VocabService::new(&storage, &fetcher);

    let sentence = service.add_sentence(word, &text.join(" "))?;
    if sentence.is_primary {
        println!("Added sentence {} (now the primary).", sentence.id);
    } else {
        println!("Added sentence {}.", sentence.id);
    }

    Ok(())
}

pub fn promote(config: &Config, id: i64) -> Result<()> {
    let storage = Storage::open(&config.db_path)?;
    let fetcher = DefinitionFetcher::new(config);
    let service = VocabService::new(&storage, &fetcher);

    let sentence = service.promote_sentence(id)?;
    println!("Sentence {} is now the primary.", sentence.id);

    Ok(())
}

pub fn remove(config: &Config, id: i64) -> Result<()> {
    let storage = Storage::open(&config.db_path)?;
    let fetcher = DefinitionFetcher::new(config);
    let service = VocabService::new(&storage, &fetcher);

    service.remove_sentence(id)?;
    println!("Removed sentence {id}.");

    Ok(())
}
