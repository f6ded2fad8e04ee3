//! Example-sentence synthesis.
//!
//! Each template uses the word as an adjective describing an argument,
//! claim or position, so the word appears exactly once and quiz blanking
//! has a whole-word occurrence to work with.

use rand::Rng;

const TEMPLATES: [&str; 6] = [
    "The author presents a {} argument that critics struggle to dismiss.",
    "Her {} claim surprised everyone at the seminar.",
    "He defended a {} position throughout the debate.",
    "The essay advances a {} thesis about modern life.",
    "Reviewers described the paper's central argument as {} at best.",
    "Their {} stance on the question drew mixed reactions.",
];

/// Build an example sentence for a word from a random template.
pub fn synthesize(word: &str, rng: &mut impl Rng) -> String {
    let template = TEMPLATES[rng.random_range(0..TEMPLATES.len())];
    template.replace("{}", word)
}
