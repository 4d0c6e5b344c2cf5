pub mod config;
pub mod lexicon;
pub mod menu;
pub mod output;
pub mod pipeline;
pub mod reader;
pub mod report;
pub mod scorer;
pub mod segmenter;

pub use config::HumanizerConfig;
pub use lexicon::{Lexicon, VariantPolicy};
pub use pipeline::{Humanizer, IdentityRephrase, RephraseStrategy, Stage};
pub use reader::InputError;
pub use report::ConversionReport;
pub use scorer::{HumannessScorer, Metrics};
pub use segmenter::{Sentence, SentenceSegmenter};

use anyhow::Result;

/// Pipeline plus a scorer built from the same lexicon
pub struct Converter {
    humanizer: Humanizer,
    scorer: HumannessScorer,
}

impl Converter {
    pub fn new(config: HumanizerConfig) -> Result<Self> {
        let humanizer = Humanizer::new(config)?;
        let scorer = HumannessScorer::new(humanizer.lexicon())?;
        Ok(Self { humanizer, scorer })
    }

    pub fn humanizer(&self) -> &Humanizer {
        &self.humanizer
    }

    pub fn score(&self, text: &str) -> Metrics {
        self.scorer.score(text)
    }

    /// Score the original, rewrite it, and score the result
    pub fn convert(&self, source: &str, text: &str) -> ConversionReport {
        let original = self.scorer.score(text);
        let converted_text = self.humanizer.humanize(text);
        let converted = self.scorer.score(&converted_text);
        ConversionReport::new(source, original, converted, converted_text)
    }
}
