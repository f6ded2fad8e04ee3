//! The `wordweek clear` command. Destructive; asks first.

use anyhow::Result;

use wordweek::config::Config;
use wordweek::storage::Storage;

use super::prompt;

pub fn execute(config: &Config, yes: bool) -> Result<()> {
    let storage = Storage::open(&config.db_path)?;

    let counts = storage.counts()?;
    if counts.is_empty() {
        println!("The store is already empty.");
        return Ok(());
    }

    if !yes {
        println!(
            "This permanently deletes {} word(s), {} definition(s) and {} sentence(s).",
            counts.words, counts.definitions, counts.sentences
        );
        let confirmation = prompt("Type 'yes' to continue > ")?;
        if confirmation.as_deref() != Some("yes") {
            println!("Aborted; nothing was deleted.");
            return Ok(());
        }
    }

    storage.clear_all()?;
    println!("Cleared {} word(s).", counts.words);

    Ok(())
}
