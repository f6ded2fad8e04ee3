//! The `wordweek list` command.

use anyhow::Result;
use comfy_table::Table;

use wordweek::config::Config;
use wordweek::storage::Storage;

pub fn execute(config: &Config) -> Result<()> {
    let storage = Storage::open(&config.db_path)?;
    let summaries = storage.words().summaries()?;

    if summaries.is_empty() {
        println!("No words yet. Add some with `wordweek add <word>...`.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Word", "Definition", "Example"]);

    for summary in &summaries {
        table.add_row(vec![
            summary.word.clone(),
            summary.definition.clone().unwrap_or_else(|| "-".to_string()),
            summary
                .primary_sentence
                .clone()
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }

    println!("{table}");
    println!("{} word(s).", summaries.len());

    Ok(())
}
