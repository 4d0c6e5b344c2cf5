// WHY: Orchestrates the fixed rewriting sequence over one input text
// Compiled tables are shared read-only; all mutable run state lives in RunContext

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

pub mod contractions;
pub mod matcher;
pub mod structure;
pub mod throttle;

pub use contractions::ContractionNormalizer;
pub use matcher::SubstitutionTable;
pub use structure::{IdentityRephrase, RephraseStrategy};

use crate::config::HumanizerConfig;
use crate::lexicon::Lexicon;
use crate::segmenter::SentenceSegmenter;

/// Pipeline stages in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Deduplicate,
    Substitute,
    Throttle,
    Contract,
    Split,
    InjectFillers,
}

impl Stage {
    /// The only order stages ever run in
    pub const ORDER: [Stage; 6] = [
        Stage::Deduplicate,
        Stage::Substitute,
        Stage::Throttle,
        Stage::Contract,
        Stage::Split,
        Stage::InjectFillers,
    ];

    pub fn describe(self) -> &'static str {
        match self {
            Stage::Deduplicate => "removing repetitive sentence patterns",
            Stage::Substitute => "replacing formal phrases and words",
            Stage::Throttle => "reducing overused words",
            Stage::Contract => "applying contractions",
            Stage::Split => "varying sentence structure",
            Stage::InjectFillers => "adding informal fillers",
        }
    }
}

/// State owned by a single `humanize` call
struct RunContext {
    seen_patterns: HashSet<String>,
    rng: StdRng,
}

/// Compiled rewriting pipeline; immutable and shareable across threads
pub struct Humanizer {
    config: HumanizerConfig,
    lexicon: Lexicon,
    segmenter: SentenceSegmenter,
    phrases: SubstitutionTable,
    words: SubstitutionTable,
    contractions: ContractionNormalizer,
    overuse: HashMap<String, f64>,
    injection_pool: Vec<String>,
    rephrase: Box<dyn RephraseStrategy>,
}

impl Humanizer {
    /// Resolve the reference lexicon and compile every table
    pub fn new(config: HumanizerConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = seeded_rng(config.seed);
        let lexicon = Lexicon::reference(config.variant_policy, &mut rng);
        Self::with_lexicon(config, lexicon)
    }

    /// Compile the pipeline around an already resolved lexicon
    pub fn with_lexicon(config: HumanizerConfig, lexicon: Lexicon) -> Result<Self> {
        config.validate()?;
        let phrases = SubstitutionTable::compile(lexicon.phrases())?;
        let words = SubstitutionTable::compile(lexicon.words())?;
        let contractions = ContractionNormalizer::compile(lexicon.contractions())?;
        let overuse = lexicon.overuse().iter().cloned().collect();
        let injection_pool = lexicon.injection_pool(config.include_transitions);

        info!(
            policy = ?lexicon.policy(),
            phrases = phrases.len(),
            words = words.len(),
            "Humanizer ready"
        );

        Ok(Self {
            config,
            lexicon,
            segmenter: SentenceSegmenter::new()?,
            phrases,
            words,
            contractions,
            overuse,
            injection_pool,
            rephrase: Box::new(IdentityRephrase),
        })
    }

    /// Replace the strategy used for sentences with a repeated opening
    pub fn with_rephrase_strategy(mut self, strategy: impl RephraseStrategy + 'static) -> Self {
        self.rephrase = Box::new(strategy);
        self
    }

    pub fn config(&self) -> &HumanizerConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Run every stage over `text` and return the rewritten text
    pub fn humanize(&self, text: &str) -> String {
        let mut ctx = RunContext {
            seen_patterns: HashSet::new(),
            // WHY: offset keeps the run stream distinct from the lexicon resolution stream
            rng: seeded_rng(self.config.seed.map(|seed| seed.wrapping_add(1))),
        };

        debug!("Humanizing {} characters", text.len());
        let mut current = text.to_string();
        for (step, stage) in Stage::ORDER.iter().enumerate() {
            debug!(stage = ?stage, "[{}] {}", step + 1, stage.describe());
            current = self.run_stage(*stage, &current, &mut ctx);
        }
        debug!(
            patterns = ctx.seen_patterns.len(),
            "Humanized into {} characters",
            current.len()
        );
        current
    }

    /// Run a single stage; sentence-level stages re-join with single spaces
    pub fn apply_stage(&self, stage: Stage, text: &str) -> String {
        let mut ctx = RunContext {
            seen_patterns: HashSet::new(),
            rng: seeded_rng(self.config.seed.map(|seed| seed.wrapping_add(1))),
        };
        self.run_stage(stage, text, &mut ctx)
    }

    fn run_stage(&self, stage: Stage, text: &str, ctx: &mut RunContext) -> String {
        match stage {
            Stage::Deduplicate => structure::deduplicate(
                self.segmenter.split(text),
                &mut ctx.seen_patterns,
                self.config.pattern_words,
                self.rephrase.as_ref(),
            )
            .join(" "),
            Stage::Substitute => {
                let text = self.phrases.substitute(text, &mut ctx.rng);
                self.words.substitute(&text, &mut ctx.rng)
            }
            Stage::Throttle => throttle::throttle_text(text, &self.overuse),
            Stage::Contract => self.contractions.normalize(text),
            Stage::Split => structure::split_long_sentences(
                self.segmenter.split(text),
                self.config.split_every,
                self.config.split_threshold_chars,
            )
            .join(" "),
            Stage::InjectFillers => structure::inject_fillers(
                self.segmenter.split(text),
                &self.injection_pool,
                self.config.filler_probability,
                &mut ctx.rng,
            )
            .join(" "),
        }
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    StdRng::seed_from_u64(seed.unwrap_or_else(rand::random))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::VariantPolicy;

    fn humanizer(seed: u64) -> Humanizer {
        Humanizer::new(HumanizerConfig {
            seed: Some(seed),
            ..Default::default()
        })
        .unwrap()
    }

    fn quiet(seed: u64) -> Humanizer {
        Humanizer::new(HumanizerConfig {
            seed: Some(seed),
            filler_probability: 0.0,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_stage_order_is_fixed() {
        assert_eq!(Stage::ORDER[0], Stage::Deduplicate);
        assert_eq!(Stage::ORDER[1], Stage::Substitute);
        assert_eq!(Stage::ORDER[2], Stage::Throttle);
        assert_eq!(Stage::ORDER[5], Stage::InjectFillers);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(humanizer(1).humanize(""), "");
        assert_eq!(humanizer(1).humanize("   \n "), "");
    }

    #[test]
    fn test_repeated_opening_kept_with_fixed_replacement() {
        let h = quiet(5);
        let chosen = h
            .lexicon()
            .phrases()
            .iter()
            .find(|e| e.key == "oleh karena itu")
            .map(|e| e.variants[0].clone())
            .unwrap();

        let out = h.humanize("Oleh karena itu, kita harus pergi. Oleh karena itu, kita harus pergi.");
        let sentence = format!("{chosen}, kita harus pergi.");
        assert_eq!(out, format!("{sentence} {sentence}"));
    }

    #[test]
    fn test_substitution_precedes_throttling() {
        // "dapat" becomes "bisa" before throttling could count it
        let out = quiet(2).apply_stage(Stage::Substitute, "dapat dapat dapat");
        assert_eq!(out, "bisa bisa bisa");
        assert_eq!(quiet(2).humanize("dapat dapat dapat."), "bisa bisa bisa.");
    }

    #[test]
    fn test_throttle_stage_uses_lexicon_table() {
        let out = quiet(3).apply_stage(Stage::Throttle, "yang a yang b yang c yang d yang");
        assert_eq!(out, "yang a yang b yang c d");
    }

    #[test]
    fn test_contraction_stage() {
        let out = quiet(3).apply_stage(Stage::Contract, "Saya adalah dokter dan tidak bisa datang.");
        assert_eq!(out, "saya itu dokter dan nggak bisa datang.");
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let text = "Penelitian ini sangat penting bagi masyarakat luas di seluruh negeri. \
                    Oleh karena itu kita harus mendukung pelaksanaannya dengan sungguh-sungguh. \
                    Hasil penelitian menunjukkan bahwa metode ini dapat diterapkan.";
        assert_eq!(humanizer(77).humanize(text), humanizer(77).humanize(text));
    }

    #[test]
    fn test_per_construction_policy_is_consistent_across_occurrences() {
        let h = Humanizer::new(HumanizerConfig {
            seed: Some(13),
            variant_policy: VariantPolicy::PerConstruction,
            ..Default::default()
        })
        .unwrap();
        let out = h.apply_stage(Stage::Substitute, &"sangat ".repeat(30));
        let distinct: HashSet<&str> = out.split_whitespace().collect();
        assert_eq!(distinct.len(), 1);
    }

    #[test]
    fn test_per_occurrence_policy_samples_each_match() {
        let h = Humanizer::new(HumanizerConfig {
            seed: Some(13),
            variant_policy: VariantPolicy::PerOccurrence,
            ..Default::default()
        })
        .unwrap();
        let out = h.apply_stage(Stage::Substitute, &"sangat ".repeat(60));
        let distinct: HashSet<&str> = out.split_whitespace().collect();
        assert!(distinct.len() > 1);
        assert!(distinct.iter().all(|w| ["banget", "sekali", "parah"].contains(w)));
    }

    struct Shout;

    impl RephraseStrategy for Shout {
        fn rephrase(&self, sentence: &str) -> Option<String> {
            Some(sentence.to_uppercase())
        }
    }

    #[test]
    fn test_custom_rephrase_strategy() {
        let h = quiet(4).with_rephrase_strategy(Shout);
        let out = h.apply_stage(Stage::Deduplicate, "Kita pergi ke pasar. Kita pergi ke sekolah.");
        assert_eq!(out, "Kita pergi ke pasar. KITA PERGI KE SEKOLAH.");
    }

    #[test]
    fn test_seen_patterns_reset_between_runs() {
        let h = quiet(4).with_rephrase_strategy(Shout);
        let first = h.humanize("Kita pergi ke pasar.");
        let second = h.humanize("Kita pergi ke pasar.");
        assert_eq!(first, second);
        assert_eq!(second, "Kita pergi ke pasar.");
    }

    #[test]
    fn test_humanizer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Humanizer>();
    }
}
