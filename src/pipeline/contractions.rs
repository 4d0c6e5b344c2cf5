use anyhow::Result;
use regex::{NoExpand, Regex};

use super::matcher::whole_word_pattern;
use crate::lexicon::ContractionRule;

/// Applies contraction rules in order over the whole text
pub struct ContractionNormalizer {
    rules: Vec<(Regex, String)>,
}

impl ContractionNormalizer {
    pub fn compile(rules: &[ContractionRule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| Ok((whole_word_pattern(&rule.pattern)?, rule.replacement.clone())))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Each rule rewrites all of its matches before the next rule runs
    pub fn normalize(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (pattern, replacement) in &self.rules {
            result = pattern
                .replace_all(&result, NoExpand(replacement))
                .into_owned();
        }
        result
    }
}
