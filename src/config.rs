use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::lexicon::VariantPolicy;

/// Tunables for one `Humanizer`; every field has a default matching the reference behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HumanizerConfig {
    /// How multi-variant lexicon entries are resolved
    pub variant_policy: VariantPolicy,
    /// Fixed seed for reproducible output; `None` draws a fresh seed
    pub seed: Option<u64>,
    /// Per-sentence chance of a filler being injected
    pub filler_probability: f64,
    /// Sentences longer than this many characters are split
    pub split_threshold_chars: usize,
    /// Only sentences whose index is a multiple of this are split
    pub split_every: usize,
    /// Words taken from a sentence opening to detect repeats
    pub pattern_words: usize,
    /// Also draw injected tokens from the transition words
    pub include_transitions: bool,
}

impl Default for HumanizerConfig {
    fn default() -> Self {
        Self {
            variant_policy: VariantPolicy::PerConstruction,
            seed: None,
            filler_probability: 0.2,
            split_threshold_chars: 50,
            split_every: 3,
            pattern_words: 3,
            include_transitions: false,
        }
    }
}

impl HumanizerConfig {
    /// Parse a TOML document; missing keys fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("invalid humanizer config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_toml_str(&content)?;
        debug!(?config, "Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.filler_probability) {
            bail!(
                "filler_probability must be within [0, 1], got {}",
                self.filler_probability
            );
        }
        if self.split_every == 0 {
            bail!("split_every must be at least 1");
        }
        if self.pattern_words == 0 {
            bail!("pattern_words must be at least 1");
        }
        Ok(())
    }
}
