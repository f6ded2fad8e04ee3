//! wordweek CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use wordweek::config::Config;

mod commands;

#[derive(Parser)]
#[command(name = "wordweek", version, about = "Personal vocabulary study tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add words: fetches a definition and synthesizes an example sentence
    Add {
        /// Words to add
        words: Vec<String>,

        /// Read a word list (one per line) from a file, or "-" for stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// List every word with its definition and primary sentence
    List,

    /// Show everything stored about one word
    Show {
        /// The word to show
        word: String,
    },

    /// Overwrite a word's definition
    Define {
        /// The word to edit
        word: String,

        /// The new definition text
        text: Vec<String>,
    },

    /// Manage a word's example sentences
    Sentence {
        #[command(subcommand)]
        action: SentenceAction,
    },

    /// Review one random word as a flashcard
    Flashcard,

    /// Take a fill-in-the-blank multiple-choice quiz
    Quiz {
        /// Number of quiz items
        #[arg(long)]
        size: Option<usize>,

        /// Draw distractors from the whole vocabulary instead of only the
        /// quizzed words
        #[arg(long)]
        from_all_words: bool,
    },

    /// Delete every word, definition and sentence
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SentenceAction {
    /// Add an example sentence to a word
    Add {
        /// The word the sentence belongs to
        word: String,

        /// The sentence text
        text: Vec<String>,
    },

    /// Make a sentence its word's primary (see `show` for sentence ids)
    Promote {
        /// Sentence id
        id: i64,
    },

    /// Delete a sentence by id
    Remove {
        /// Sentence id
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wordweek=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let result = match cli.command {
        Commands::Add { words, file } => commands::add::execute(&config, words, file).await,
        Commands::List => commands::list::execute(&config),
        Commands::Show { word } => commands::show::execute(&config, &word),
        Commands::Define { word, text } => commands::define::execute(&config, &word, &text),
        Commands::Sentence { action } => match action {
            SentenceAction::Add { word, text } => {
                commands::sentence::add(&config, &word, &text)
            }
            SentenceAction::Promote { id } => commands::sentence::promote(&config, id),
            SentenceAction::Remove { id } => commands::sentence::remove(&config, id),
        },
        Commands::Flashcard => commands::flashcard::execute(&config),
        Commands::Quiz {
            size,
            from_all_words,
        } => commands::quiz::execute(&config, size, from_all_words),
        Commands::Clear { yes } => commands::clear::execute(&config, yes),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
