// WHY: Deterministic frequency reduction; earliest occurrences win and untouched tokens keep their order

use std::collections::HashMap;

const TRAILING_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

/// Lowercased, trailing-punctuation-stripped form used to match throttled words
pub fn match_key(word: &str) -> String {
    word.to_lowercase()
        .trim_end_matches(TRAILING_PUNCTUATION)
        .to_string()
}

/// Drop throttled words beyond `floor(total * retention)` occurrences each
pub fn throttle<'a>(words: &[&'a str], overuse: &HashMap<String, f64>) -> Vec<&'a str> {
    let mut totals: HashMap<String, usize> = HashMap::new();
    for word in words {
        let key = match_key(word);
        if overuse.contains_key(&key) {
            *totals.entry(key).or_insert(0) += 1;
        }
    }

    let targets: HashMap<String, usize> = totals
        .into_iter()
        .map(|(key, total)| {
            let retention = overuse[&key].clamp(0.0, 1.0);
            let target = (total as f64 * retention).floor() as usize;
            (key, target)
        })
        .collect();

    let mut emitted: HashMap<String, usize> = HashMap::new();
    let mut result = Vec::with_capacity(words.len());
    for word in words {
        let key = match_key(word);
        match targets.get(&key) {
            Some(&target) => {
                let count = emitted.entry(key).or_insert(0);
                if *count < target {
                    *count += 1;
                    result.push(*word);
                }
            }
            None => result.push(*word),
        }
    }
    result
}

/// Text-level throttling: whitespace split, throttle, single-space join
pub fn throttle_text(text: &str, overuse: &HashMap<String, f64>) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    throttle(&words, overuse).join(" ")
}
