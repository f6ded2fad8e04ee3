//! The `wordweek show` command.

use anyhow::Result;

use wordweek::config::Config;
use wordweek::dictionary::DefinitionFetcher;
use wordweek::storage::Storage;
use wordweek::vocab::VocabService;

pub fn execute(config: &Config, word: &str) -> Result<()> {
    let storage = Storage::open(&config.db_path)?;
    let fetcher = DefinitionFetcher::new(config);
    let service = VocabService::new(&storage, &fetcher);

    let Some(detail) = service.word_detail(word)? else {
        println!("Unknown word '{}'.", word.trim().to_lowercase());
        return Ok(());
    };

    println!("{}", detail.word.word);
    match detail.definition {
        Some(definition) => println!("  Definition: {}", definition.definition),
        None => println!("  Definition: -"),
    }

    if detail.sentences.is_empty() {
        println!("  Sentences: none");
    } else {
        println!("  Sentences:");
        for sentence in &detail.sentences {
            let marker = if sentence.is_primary { "*" } else { " " };
            println!("    [{:>3}]{marker} {}", sentence.id, sentence.sentence);
        }
        println!("  (* = primary; ids work with `wordweek sentence promote/remove`)");
    }

    Ok(())
}
