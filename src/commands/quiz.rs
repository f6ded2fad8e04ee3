//! The `wordweek quiz` command: draw, answer, grade.

use std::collections::HashMap;

use anyhow::Result;

use wordweek::config::Config;
use wordweek::quiz::{self, DistractorPool, QuizConfig};
use wordweek::storage::Storage;

use super::prompt;

pub fn execute(config: &Config, size: Option<usize>, from_all_words: bool) -> Result<()> {
    let storage = Storage::open(&config.db_path)?;

    let quiz_config = QuizConfig {
        size: size.unwrap_or(config.quiz_size),
        pool: if from_all_words {
            DistractorPool::WholeVocabulary
        } else {
            DistractorPool::DrawnItems
        },
        ..QuizConfig::default()
    };

    let items = quiz::generate(&storage, &quiz_config, &mut rand::rng())?;
    if items.is_empty() {
        println!("No words to quiz yet. Add some with `wordweek add <word>...`.");
        return Ok(());
    }

    let mut answers: HashMap<usize, String> = HashMap::new();

    for (index, item) in items.iter().enumerate() {
        println!();
        println!("{}. {}", index + 1, item.prompt());
        for (option_index, option) in item.options.iter().enumerate() {
            println!("   {}) {}", option_index + 1, option);
        }

        let line = prompt(&format!(
            "Answer 1-{} (Enter to skip) > ",
            item.options.len()
        ))?;

        match line {
            None => break,
            Some(answer) => {
                match answer.parse::<usize>() {
                    Ok(choice) if (1..=item.options.len()).contains(&choice) => {
                        answers.insert(index, item.options[choice - 1].clone());
                    }
                    _ => println!("   (skipped)"),
                }
            }
        }
    }

    let report = quiz::grade(&items, &answers);

    println!();
    println!("--- Results ---");
    for graded in &report.items {
        let selection = graded.selection.as_deref().unwrap_or("[none]");
        let verdict = if graded.is_correct { "correct" } else { "wrong" };
        println!(
            "{}. {} — your answer: {} ({verdict})",
            graded.index + 1,
            graded.correct,
            selection
        );
        println!("   {}", graded.sentence);
    }
    println!();
    println!("Score: {}/{}", report.score, report.total);

    Ok(())
}
