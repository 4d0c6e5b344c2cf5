// WHY: Sentence-level structural variation; each operation takes sentences and returns new ones
// Randomness comes from the caller's run context so seeded runs reproduce exactly

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::RngExt;

/// Rewrites a sentence whose opening repeats an earlier one
pub trait RephraseStrategy: Send + Sync {
    /// `None` or empty output drops the sentence
    fn rephrase(&self, sentence: &str) -> Option<String>;
}

/// Leaves repeated sentences as they are
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityRephrase;

impl RephraseStrategy for IdentityRephrase {
    fn rephrase(&self, sentence: &str) -> Option<String> {
        Some(sentence.to_string())
    }
}

/// First `words` whitespace words, lowercased and space-joined
pub fn pattern_key(sentence: &str, words: usize) -> String {
    sentence
        .split_whitespace()
        .take(words)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Keep first-seen openings; route repeats through `strategy`
pub fn deduplicate(
    sentences: Vec<String>,
    seen: &mut HashSet<String>,
    pattern_words: usize,
    strategy: &dyn RephraseStrategy,
) -> Vec<String> {
    let mut result = Vec::with_capacity(sentences.len());
    for sentence in sentences {
        let key = pattern_key(&sentence, pattern_words);
        if seen.insert(key) {
            result.push(sentence);
        } else if let Some(rephrased) = strategy.rephrase(&sentence) {
            if !rephrased.trim().is_empty() {
                result.push(rephrased);
            }
        }
    }
    result
}

/// Halve every `every`-th sentence longer than `threshold_chars` characters
pub fn split_long_sentences(sentences: Vec<String>, every: usize, threshold_chars: usize) -> Vec<String> {
    let every = every.max(1);
    sentences
        .into_iter()
        .enumerate()
        .map(|(i, sentence)| {
            if i % every != 0 || sentence.chars().count() <= threshold_chars {
                return sentence;
            }
            // Halving a lone token would leave an empty first sentence (". word"), so it stays whole
            if sentence.split_whitespace().nth(1).is_none() {
                return sentence;
            }
            let words: Vec<&str> = sentence.split_whitespace().collect();
            let mid = words.len() / 2;
            format!("{}. {}", words[..mid].join(" "), words[mid..].join(" "))
        })
        .collect()
}

/// With probability `probability`, insert `filler,` inside sentences of more than 3 words
pub fn inject_fillers(
    sentences: Vec<String>,
    pool: &[String],
    probability: f64,
    rng: &mut StdRng,
) -> Vec<String> {
    if pool.is_empty() || probability <= 0.0 {
        return sentences;
    }
    let probability = probability.min(1.0);

    sentences
        .into_iter()
        .map(|sentence| {
            if !rng.random_bool(probability) {
                return sentence;
            }
            let token = format!("{},", pool[rng.random_range(0..pool.len())]);
            if sentence.split_whitespace().count() <= 3 {
                return sentence;
            }
            let mut words: Vec<&str> = sentence.split_whitespace().collect();
            let position = rng.random_range(1..words.len());
            words.insert(position, &token);
            words.join(" ")
        })
        .collect()
}
