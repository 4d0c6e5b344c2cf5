// WHY: Single boundary rule shared by every sentence-level stage and the scorer
// A boundary sits right after end punctuation that is followed by whitespace

use anyhow::Result;
use regex_automata::meta::Regex;
use tracing::debug;

/// Characters that can terminate a sentence
pub const END_PUNCTUATION: [char; 3] = ['.', '!', '?'];

/// A sentence borrowed from its source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence<'a> {
    /// 0-based position in the segmented text
    pub index: usize,
    pub content: &'a str,
}

impl Sentence<'_> {
    /// Whitespace-delimited word count
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

/// Splits text into sentences using a compiled boundary pattern
#[derive(Debug, Clone)]
pub struct SentenceSegmenter {
    boundary: Regex,
}

impl SentenceSegmenter {
    pub fn new() -> Result<Self> {
        // WHY: hex escapes keep the punctuation literal inside the class
        let class: String = END_PUNCTUATION
            .iter()
            .map(|c| format!("\\x{{{:X}}}", *c as u32))
            .collect();
        let pattern = format!("[{class}]\\s+");
        let boundary = Regex::new(&pattern)?;

        debug!("Compiled sentence boundary pattern: {}", pattern);
        Ok(Self { boundary })
    }

    /// Split text into trimmed, non-empty sentences in source order
    pub fn segment<'a>(&self, text: &'a str) -> Vec<Sentence<'a>> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for boundary in self.boundary.find_iter(text) {
            // End punctuation is matched as one char; keep it with the sentence
            let punct_len = text[boundary.start()..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            push_trimmed(text, start, boundary.start() + punct_len, &mut sentences);
            start = boundary.end();
        }
        push_trimmed(text, start, text.len(), &mut sentences);

        sentences
    }

    /// Owned sentence contents, the shape the rewriting stages work on
    pub fn split(&self, text: &str) -> Vec<String> {
        self.segment(text)
            .into_iter()
            .map(|s| s.content.to_string())
            .collect()
    }
}

fn push_trimmed<'a>(text: &'a str, start: usize, end: usize, out: &mut Vec<Sentence<'a>>) {
    let content = text[start..end].trim();
    if content.is_empty() {
        return;
    }
    out.push(Sentence {
        index: out.len(),
        content,
    });
}
