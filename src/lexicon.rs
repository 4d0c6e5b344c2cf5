// WHY: All rewriting vocabulary lives here so the stages stay table-driven
// Reference tables are const data; a Lexicon instance is the resolved, immutable view of them

use rand::rngs::StdRng;
use rand::RngExt;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Multi-word expressions rewritten before any single word is touched
const PHRASE_TABLE: &[(&str, &[&str])] = &[
    ("hal ini menunjukkan", &["ini menunjukkan kalau"]),
    ("oleh sebab itu", &["jadi"]),
    ("untuk alasan ini", &["karena itu"]),
    ("pada akhirnya", &["akhirnya"]),
    ("dalam hal ini", &["dalam hal ini"]),
    ("perlu diketahui bahwa", &["yang penting diketahui adalah"]),
    ("dapat ditarik kesimpulan", &["bisa disimpulin"]),
    ("hasil penelitian menunjukkan", &["hasilnya menunjukkin kalau"]),
    ("berdasarkan hasil analisis", &["berdasarkan analisisnya"]),
    ("diperoleh informasi bahwa", &["didapat info kalau"]),
];

/// Multi-word connectives that also count as formal vocabulary when scoring
const FORMAL_PHRASE_TABLE: &[(&str, &[&str])] = &[
    ("oleh karena itu", &["jadi", "makanya", "karena itu"]),
    ("dengan demikian", &["dengan begitu", "jadi", "dengan cara ini"]),
    ("namun demikian", &["tapi", "meskipun begitu", "tapi tetap saja"]),
    ("di antara", &["antara"]),
];

/// Single formal words. Repeated variants weight the draw.
const WORD_TABLE: &[(&str, &[&str])] = &[
    ("sebaliknya", &["malah", "justru", "sebaliknya"]),
    ("hendaknya", &["harusnya"]),
    ("sesungguhnya", &["sebenarnya"]),
    ("tidaklah", &["nggak"]),
    ("bukanlah", &["bukan"]),
    ("sungguh", &["banget"]),
    ("benar-benar", &["bener-bener"]),
    ("sangat", &["banget", "sekali", "parah"]),
    ("mungkin", &["kayaknya", "mungkin", "sepertinya"]),
    ("dapat", &["bisa"]),
    ("akan", &["bakal", "akan", "akan"]),
    ("sejak", &["dari"]),
    ("mengingat", &["karena"]),
    ("bilamana", &["kalau"]),
];

const FILLER_WORDS: &[&str] = &["sih", "lah", "kan", "dong", "nih", "loh", "tuh"];

const TRANSITION_WORDS: &[&str] = &[
    "sih", "loh", "nih", "kan", "deh", "dong", "tuh", "itu", "nah", "terus",
    "jadi", "jadi gini", "yang jelas", "yang penting", "pokoknya", "gampang",
    "gitu deh", "gimana ya", "kira-kira",
];

/// Ordered contraction rules as regex fragments; order is significant
const CONTRACTION_RULES: &[(&str, &str)] = &[
    (r"tidak\s+akan", "bakal nggak"),
    (r"tidak\s+bisa", "nggak bisa"),
    (r"tidak\s+ada", "nggak ada"),
    (r"kamu\s+adalah", "kamu itu"),
    (r"saya\s+adalah", "saya itu"),
    (r"dia\s+adalah", "dia itu"),
];

/// Words AI-generated prose leans on, with the fraction of occurrences to keep
const OVERUSE_TABLE: &[(&str, f64)] = &[
    ("adalah", 0.7),
    ("yang", 0.6),
    ("dapat", 0.7),
    ("dalam", 0.65),
    ("terdapat", 0.6),
    ("memiliki", 0.65),
];

/// How entries with several candidate replacements are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum VariantPolicy {
    /// Pick one variant when the lexicon is built and reuse it for every match
    #[default]
    PerConstruction,
    /// Draw a fresh variant for every match
    PerOccurrence,
}

/// A formal key and the informal text that may replace it
#[derive(Debug, Clone, PartialEq)]
pub struct LexiconEntry {
    pub key: String,
    pub variants: Vec<String>,
}

impl LexiconEntry {
    fn from_static(key: &str, variants: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            variants: variants.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Collapse the candidate set to a single randomly chosen variant
    fn resolve(mut self, rng: &mut StdRng) -> Self {
        if self.variants.len() > 1 {
            let chosen = self.variants.swap_remove(rng.random_range(0..self.variants.len()));
            self.variants = vec![chosen];
        }
        self
    }

    /// True when every match maps to the same text
    pub fn is_fixed(&self) -> bool {
        self.variants.len() == 1
    }
}

/// One ordered contraction rewrite
#[derive(Debug, Clone, PartialEq)]
pub struct ContractionRule {
    /// Regex fragment matched case-insensitively between word boundaries
    pub pattern: String,
    pub replacement: String,
}

/// Resolved rewriting vocabulary, immutable after construction
#[derive(Debug, Clone)]
pub struct Lexicon {
    policy: VariantPolicy,
    phrases: Vec<LexiconEntry>,
    words: Vec<LexiconEntry>,
    formal_keys: Vec<String>,
    fillers: Vec<String>,
    transitions: Vec<String>,
    contractions: Vec<ContractionRule>,
    overuse: Vec<(String, f64)>,
}

impl Lexicon {
    /// Build the reference Indonesian lexicon under the given variant policy
    pub fn reference(policy: VariantPolicy, rng: &mut StdRng) -> Self {
        let resolve = |entry: LexiconEntry, rng: &mut StdRng| match policy {
            VariantPolicy::PerConstruction => entry.resolve(rng),
            VariantPolicy::PerOccurrence => entry,
        };

        let mut phrases = Vec::with_capacity(PHRASE_TABLE.len() + FORMAL_PHRASE_TABLE.len());
        for (key, variants) in PHRASE_TABLE.iter().chain(FORMAL_PHRASE_TABLE) {
            phrases.push(resolve(LexiconEntry::from_static(key, variants), rng));
        }

        let mut words = Vec::with_capacity(WORD_TABLE.len());
        for (key, variants) in WORD_TABLE {
            words.push(resolve(LexiconEntry::from_static(key, variants), rng));
        }

        let formal_keys = FORMAL_PHRASE_TABLE
            .iter()
            .chain(WORD_TABLE)
            .map(|(key, _)| key.to_string())
            .collect();

        debug!(
            ?policy,
            phrases = phrases.len(),
            words = words.len(),
            "Resolved reference lexicon"
        );

        Self {
            policy,
            phrases,
            words,
            formal_keys,
            fillers: FILLER_WORDS.iter().map(|w| w.to_string()).collect(),
            transitions: TRANSITION_WORDS.iter().map(|w| w.to_string()).collect(),
            contractions: CONTRACTION_RULES
                .iter()
                .map(|(pattern, replacement)| ContractionRule {
                    pattern: pattern.to_string(),
                    replacement: replacement.to_string(),
                })
                .collect(),
            overuse: OVERUSE_TABLE
                .iter()
                .map(|(word, retention)| (word.to_string(), *retention))
                .collect(),
        }
    }

    pub fn policy(&self) -> VariantPolicy {
        self.policy
    }

    /// Phrase entries in application order
    pub fn phrases(&self) -> &[LexiconEntry] {
        &self.phrases
    }

    /// Single-word entries in application order
    pub fn words(&self) -> &[LexiconEntry] {
        &self.words
    }

    /// Keys whose presence marks a word as formal for scoring
    pub fn formal_keys(&self) -> &[String] {
        &self.formal_keys
    }

    pub fn fillers(&self) -> &[String] {
        &self.fillers
    }

    pub fn transitions(&self) -> &[String] {
        &self.transitions
    }

    pub fn contractions(&self) -> &[ContractionRule] {
        &self.contractions
    }

    /// Throttled words mapped to their retention fraction
    pub fn overuse(&self) -> &[(String, f64)] {
        &self.overuse
    }

    /// Tokens eligible for injection: fillers, optionally followed by transitions
    pub fn injection_pool(&self, include_transitions: bool) -> Vec<String> {
        let mut pool = self.fillers.clone();
        if include_transitions {
            for word in &self.transitions {
                if !pool.contains(word) {
                    pool.push(word.clone());
                }
            }
        }
        pool
    }
}
