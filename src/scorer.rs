// WHY: Heuristic humanness estimate computed independently for input and output text
// Pure function of the text; a Metrics value is never mutated after it is produced

use anyhow::Result;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

use crate::lexicon::Lexicon;
use crate::pipeline::matcher::whole_word_pattern;
use crate::segmenter::SentenceSegmenter;

/// Informal markers counted as contractions
const CONTRACTION_MARKERS: &str = "nggak|gak|itu|sih|dong|kan";

const BASE_SCORE: i32 = 50;

/// Surface statistics of a text and the composite score derived from them
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    /// Words per sentence
    pub avg_sentence_length: f64,
    /// Population variance of sentence lengths / 100, capped at 1
    pub sentence_variety: f64,
    pub formal_words_ratio: f64,
    pub filler_words_ratio: f64,
    pub contraction_count: usize,
    /// Composite score in [0, 100]
    pub humanness_score: u32,
}

pub struct HumannessScorer {
    segmenter: SentenceSegmenter,
    formal: Option<Regex>,
    fillers: HashSet<String>,
    contractions: Regex,
}

impl HumannessScorer {
    pub fn new(lexicon: &Lexicon) -> Result<Self> {
        let formal = if lexicon.formal_keys().is_empty() {
            None
        } else {
            let alternation = lexicon
                .formal_keys()
                .iter()
                .map(|key| regex::escape(key))
                .collect::<Vec<_>>()
                .join("|");
            Some(whole_word_pattern(&format!("(?:{alternation})"))?)
        };

        Ok(Self {
            segmenter: SentenceSegmenter::new()?,
            formal,
            fillers: lexicon.fillers().iter().map(|w| w.to_lowercase()).collect(),
            contractions: whole_word_pattern(&format!("(?:{CONTRACTION_MARKERS})"))?,
        })
    }

    pub fn score(&self, text: &str) -> Metrics {
        let lengths: Vec<usize> = self
            .segmenter
            .segment(text)
            .iter()
            .map(|s| s.word_count())
            .collect();
        let words: Vec<&str> = text.split_whitespace().collect();

        let avg_sentence_length = if lengths.is_empty() {
            0.0
        } else {
            words.len() as f64 / lengths.len() as f64
        };
        let sentence_variety = sentence_variety(&lengths);

        let formal_count = match &self.formal {
            Some(formal) => words.iter().filter(|w| formal.is_match(w)).count(),
            None => 0,
        };
        let filler_count = words
            .iter()
            .filter(|w| self.fillers.contains(&w.to_lowercase()))
            .count();
        let (formal_words_ratio, filler_words_ratio) = if words.is_empty() {
            (0.0, 0.0)
        } else {
            let total = words.len() as f64;
            (formal_count as f64 / total, filler_count as f64 / total)
        };

        let contraction_count = self.contractions.find_iter(text).count();

        Metrics {
            avg_sentence_length,
            sentence_variety,
            formal_words_ratio,
            filler_words_ratio,
            contraction_count,
            humanness_score: composite_score(
                avg_sentence_length,
                sentence_variety,
                formal_words_ratio,
                filler_words_ratio,
                words.len(),
            ),
        }
    }
}

/// Normalized population variance of sentence lengths; 0 below two sentences
pub fn sentence_variety(lengths: &[usize]) -> f64 {
    if lengths.len() < 2 {
        return 0.0;
    }
    let n = lengths.len() as f64;
    let mean = lengths.iter().sum::<usize>() as f64 / n;
    let variance = lengths
        .iter()
        .map(|&len| (len as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    (variance / 100.0).min(1.0)
}

/// Combine metrics into the bounded score
///
/// Ratio bands only apply when the text has words, so the empty text scores the base 50.
pub fn composite_score(
    avg_sentence_length: f64,
    sentence_variety: f64,
    formal_ratio: f64,
    filler_ratio: f64,
    word_count: usize,
) -> u32 {
    let mut score = BASE_SCORE;

    if (15.0..=25.0).contains(&avg_sentence_length) {
        score += 20;
    } else if (12.0..=30.0).contains(&avg_sentence_length) {
        score += 10;
    }

    score += (sentence_variety * 20.0).floor() as i32;

    if word_count > 0 {
        score += match formal_ratio {
            r if r < 0.05 => 15,
            r if r < 0.10 => 10,
            r if r < 0.15 => 5,
            _ => 0,
        };
        score += match filler_ratio {
            r if (0.01..=0.05).contains(&r) => 10,
            r if r < 0.01 => 5,
            _ => 0,
        };
    }

    score.clamp(0, 100) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::VariantPolicy;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scorer() -> HumannessScorer {
        let lexicon = Lexicon::reference(VariantPolicy::PerConstruction, &mut StdRng::seed_from_u64(0));
        HumannessScorer::new(&lexicon).unwrap()
    }

    #[test]
    fn test_empty_text_scores_base() {
        let metrics = scorer().score("");
        assert_eq!(metrics.avg_sentence_length, 0.0);
        assert_eq!(metrics.sentence_variety, 0.0);
        assert_eq!(metrics.formal_words_ratio, 0.0);
        assert_eq!(metrics.filler_words_ratio, 0.0);
        assert_eq!(metrics.contraction_count, 0);
        assert_eq!(metrics.humanness_score, 50);
    }

    #[test]
    fn test_twenty_word_sentence_gets_length_band() {
        let text = format!("{}.", vec!["rumah"; 20].join(" "));
        let metrics = scorer().score(&text);
        assert_eq!(metrics.avg_sentence_length, 20.0);
        // 50 base + 20 length + 15 formal + 5 filler
        assert_eq!(metrics.humanness_score, 90);
    }

    #[test]
    fn test_outer_length_band() {
        let text = format!("{}.", vec!["rumah"; 13].join(" "));
        assert_eq!(scorer().score(&text).humanness_score, 80);
    }

    #[test]
    fn test_formal_ratio_counts_whole_words_with_punctuation() {
        let metrics = scorer().score("Sangat, mendapatkan dapat. sejak");
        // "Sangat," "dapat." "sejak" match; "mendapatkan" does not
        assert_eq!(metrics.formal_words_ratio, 0.75);
    }

    #[test]
    fn test_filler_ratio_counts_bare_tokens_only() {
        let metrics = scorer().score("Ini SIH enak dong banget");
        assert_eq!(metrics.filler_words_ratio, 0.4);

        // Punctuated tokens are not fillers
        let metrics = scorer().score("Ini sih, enak dong.");
        assert_eq!(metrics.filler_words_ratio, 0.0);
    }

    #[test]
    fn test_punctuated_filler_keeps_low_filler_band() {
        let metrics = scorer().score("Kami sih, pergi ke pasar.");
        assert_eq!(metrics.filler_words_ratio, 0.0);
        // 50 base + 15 formal + 5 filler below 0.01
        assert_eq!(metrics.humanness_score, 70);
    }

    #[test]
    fn test_contraction_count_is_case_insensitive() {
        let metrics = scorer().score("Itu NGGAK bener kan? Gak sih. Kantor itu.");
        assert_eq!(metrics.contraction_count, 6);
    }

    #[test]
    fn test_sentence_variety() {
        assert_eq!(sentence_variety(&[]), 0.0);
        assert_eq!(sentence_variety(&[10]), 0.0);
        assert_eq!(sentence_variety(&[5, 15]), 0.25);
        assert_eq!(sentence_variety(&[1, 41]), 1.0);
    }

    #[test]
    fn test_variety_contributes_floor() {
        // variety 0.25 -> +5; avg 10 -> no band
        let text = format!(
            "{}. {}.",
            vec!["a"; 5].join(" "),
            vec!["b"; 15].join(" ")
        );
        let metrics = scorer().score(&text);
        assert_eq!(metrics.sentence_variety, 0.25);
        assert_eq!(metrics.humanness_score, 50 + 5 + 15 + 5);
    }

    #[test]
    fn test_composite_score_bands() {
        assert_eq!(composite_score(20.0, 0.0, 0.07, 0.03, 10), 50 + 20 + 10 + 10);
        assert_eq!(composite_score(30.0, 0.0, 0.12, 0.2, 10), 50 + 10 + 5);
        assert_eq!(composite_score(40.0, 0.0, 0.5, 0.06, 10), 50);
    }

    #[test]
    fn test_score_bounds() {
        assert_eq!(composite_score(20.0, 1.0, 0.0, 0.02, 10), 100);
        assert!(composite_score(0.0, 0.0, 1.0, 1.0, 10) <= 100);
        for text in ["", "a", "Sangat sangat sangat.", "x. y. z! w?"] {
            assert!(scorer().score(text).humanness_score <= 100);
        }
    }
}
