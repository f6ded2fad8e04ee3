//! The `wordweek add` command.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use wordweek::config::Config;
use wordweek::dictionary::DefinitionFetcher;
use wordweek::storage::Storage;
use wordweek::vocab::VocabService;

pub async fn execute(config: &Config, words: Vec<String>, file: Option<PathBuf>) -> Result<()> {
    let input = match file {
        Some(path) if path.as_os_str() == "-" => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading word list from stdin")?;
            buffer
        }
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading word list from {}", path.display()))?,
        None => words.join("\n"),
    };

    if input.trim().is_empty() {
        bail!("nothing to add; pass words or --file");
    }

    let storage = Storage::open(&config.db_path)?;
    let fetcher = DefinitionFetcher::new(config);
    let service = VocabService::new(&storage, &fetcher);

    let report = service.ingest(&input).await?;

    println!(
        "Added {} word(s), skipped {} already known.",
        report.added.len(),
        report.skipped.len()
    );
    if !report.degraded.is_empty() {
        println!(
            "No definition found for: {} (stored a placeholder; edit with `wordweek define`).",
            report.degraded.join(", ")
        );
    }

    Ok(())
}
