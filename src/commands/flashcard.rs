//! The `wordweek flashcard` command: two-phase reveal, redraw on demand.

use anyhow::Result;

use wordweek::config::Config;
use wordweek::flashcard;
use wordweek::storage::Storage;

use super::prompt;

pub fn execute(config: &Config) -> Result<()> {
    let storage = Storage::open(&config.db_path)?;

    loop {
        let Some(card) = flashcard::draw(&storage)? else {
            println!("Nothing to review yet. Add some words first.");
            return Ok(());
        };

        println!();
        println!("  {}", card.word);

        match prompt("[Enter] reveal · q quit > ")? {
            None => return Ok(()),
            Some(answer) if answer.eq_ignore_ascii_case("q") => return Ok(()),
            Some(_) => {}
        }

        println!("  Definition: {}", card.definition);
        println!("  Example:    {}", card.sentence);

        match prompt("[Enter] next card · q quit > ")? {
            None => return Ok(()),
            Some(answer) if answer.eq_ignore_ascii_case("q") => return Ok(()),
            Some(_) => {}
        }
    }
}
