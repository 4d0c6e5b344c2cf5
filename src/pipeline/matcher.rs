// WHY: Case-insensitive whole-token substitution shared by the phrase and word passes
// Each table compiles its regexes once; substitution itself cannot fail

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::RngExt;
use regex::{Captures, NoExpand, Regex};

use crate::lexicon::LexiconEntry;

/// Compile `key` into a case-insensitive pattern bounded by word edges
pub fn whole_word_pattern(fragment: &str) -> Result<Regex> {
    Regex::new(&format!(r"(?i)\b{fragment}\b"))
        .with_context(|| format!("invalid lexicon pattern: {fragment}"))
}

struct CompiledEntry {
    pattern: Regex,
    entry: LexiconEntry,
}

/// An ordered substitution pass over one lexicon table
pub struct SubstitutionTable {
    entries: Vec<CompiledEntry>,
}

impl SubstitutionTable {
    pub fn compile(entries: &[LexiconEntry]) -> Result<Self> {
        let mut compiled = Vec::with_capacity(entries.len());
        for entry in entries {
            if entry.variants.is_empty() {
                continue;
            }
            compiled.push(CompiledEntry {
                pattern: whole_word_pattern(&regex::escape(&entry.key))?,
                entry: entry.clone(),
            });
        }
        Ok(Self { entries: compiled })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrite every entry in table order; `rng` is only drawn from for multi-variant entries
    pub fn substitute(&self, text: &str, rng: &mut StdRng) -> String {
        let mut result = text.to_string();
        for CompiledEntry { pattern, entry } in &self.entries {
            if !pattern.is_match(&result) {
                continue;
            }
            result = if entry.is_fixed() {
                pattern.replace_all(&result, NoExpand(&entry.variants[0])).into_owned()
            } else {
                let variants = &entry.variants;
                pattern
                    .replace_all(&result, |_: &Captures<'_>| {
                        variants[rng.random_range(0..variants.len())].clone()
                    })
                    .into_owned()
            };
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn entry(key: &str, variants: &[&str]) -> LexiconEntry {
        LexiconEntry {
            key: key.to_string(),
            variants: variants.iter().map(|v| v.to_string()).collect(),
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_case_insensitive_whole_word() {
        let table = SubstitutionTable::compile(&[entry("dapat", &["bisa"])]).unwrap();
        let out = table.substitute("Dapat dia DAPAT? Mendapatkan dapat.", &mut rng());
        assert_eq!(out, "bisa dia bisa? Mendapatkan bisa.");
    }

    #[test]
    fn test_hyphenated_key() {
        let table = SubstitutionTable::compile(&[entry("benar-benar", &["bener-bener"])]).unwrap();
        assert_eq!(
            table.substitute("Ini benar-benar bagus.", &mut rng()),
            "Ini bener-bener bagus."
        );
    }

    #[test]
    fn test_phrase_pass_shields_inner_words() {
        let phrases = SubstitutionTable::compile(&[entry("dapat ditarik kesimpulan", &["bisa disimpulin"])]).unwrap();
        let words = SubstitutionTable::compile(&[entry("dapat", &["mampu"])]).unwrap();

        let mut rng = rng();
        let after_phrases = phrases.substitute("Dapat ditarik kesimpulan bahwa kita dapat.", &mut rng);
        let out = words.substitute(&after_phrases, &mut rng);
        assert_eq!(out, "bisa disimpulin bahwa kita mampu.");
    }

    #[test]
    fn test_replacement_is_literal() {
        let table = SubstitutionTable::compile(&[entry("harga", &["$1 murah"])]).unwrap();
        assert_eq!(table.substitute("harga naik", &mut rng()), "$1 murah naik");
    }

    #[test]
    fn test_absent_key_is_noop() {
        let table = SubstitutionTable::compile(&[entry("sangat", &["banget"])]).unwrap();
        let text = "Tidak ada yang formal di sini.";
        assert_eq!(table.substitute(text, &mut rng()), text);
    }

    #[test]
    fn test_idempotent_for_non_key_values() {
        let table = SubstitutionTable::compile(&[
            entry("oleh karena itu", &["jadi"]),
            entry("sejak", &["dari"]),
        ])
        .unwrap();
        let mut rng = rng();
        let once = table.substitute("Oleh karena itu kami hadir sejak pagi.", &mut rng);
        let twice = table.substitute(&once, &mut rng);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_multi_variant_draws_from_candidates() {
        let table = SubstitutionTable::compile(&[entry("sangat", &["banget", "parah"])]).unwrap();
        let out = table.substitute("sangat sangat sangat sangat", &mut rng());
        assert!(out.split(' ').all(|w| w == "banget" || w == "parah"));
    }

    #[test]
    fn test_empty_variants_skipped() {
        let table = SubstitutionTable::compile(&[entry("kosong", &[])]).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.substitute("kosong", &mut rng()), "kosong");
    }
}
