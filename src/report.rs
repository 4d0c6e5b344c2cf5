// WHY: Human-readable and JSON renderings of metrics, kept apart from the scoring math

use serde::Serialize;
use std::fmt::Write;

use crate::scorer::Metrics;

/// Width of the `=` rules separating report sections
pub const RULE_WIDTH: usize = 60;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Indented metrics block under a label
pub fn render_metrics(metrics: &Metrics, label: &str) -> String {
    let mut out = String::new();
    // WHY: writing into a String cannot fail
    let _ = writeln!(out, "{label}:");
    let _ = writeln!(out, "  Humanness Score: {}/100", metrics.humanness_score);
    let _ = writeln!(
        out,
        "  Rata-rata panjang kalimat: {:.1} kata",
        metrics.avg_sentence_length
    );
    let _ = writeln!(out, "  Variasi kalimat: {:.2}", metrics.sentence_variety);
    let _ = writeln!(out, "  Rasio kata formal: {}", percent(metrics.formal_words_ratio));
    let _ = writeln!(out, "  Rasio kata pengisi: {}", percent(metrics.filler_words_ratio));
    let _ = write!(out, "  Jumlah kontraksi: {}", metrics.contraction_count);
    out
}

/// Score movement line shown after a conversion
pub fn render_improvement(before: &Metrics, after: &Metrics) -> String {
    format!(
        "Humanness Score: {} → {}",
        before.humanness_score, after.humanness_score
    )
}

fn percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// Everything produced by one conversion, in the shape emitted by `--json`
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub source: String,
    pub original: Metrics,
    pub converted: Metrics,
    pub converted_text: String,
    pub improvement: i64,
}

impl ConversionReport {
    pub fn new(source: impl Into<String>, original: Metrics, converted: Metrics, converted_text: String) -> Self {
        Self {
            source: source.into(),
            improvement: i64::from(converted.humanness_score) - i64::from(original.humanness_score),
            original,
            converted,
            converted_text,
        }
    }

    /// Full console rendering: both metric blocks, the rewritten text and the score delta
    pub fn render(&self) -> String {
        let rule = rule();
        format!(
            "{}\n\n{}\n\n{rule}\nHASIL KONVERSI\n{rule}\n{}\n\n[IMPROVEMENT]\n{}",
            render_metrics(&self.original, "Original"),
            render_metrics(&self.converted, "Converted"),
            self.converted_text,
            render_improvement(&self.original, &self.converted),
        )
    }

    /// Interactive session layout: analysis blocks, then the result
    ///
    /// With `original_text` (manual entry) both texts and the improvement line follow the
    /// result header; without it only the rewritten text is shown.
    pub fn render_session(&self, original_text: Option<&str>) -> String {
        let rule = rule();
        let mut out = format!(
            "{rule}\nPROSES KONVERSI\n{rule}\n\n[ANALISIS TEKS ORIGINAL]\n{}\n\n\
             [ANALISIS TEKS HASIL KONVERSI]\n{}\n\n{rule}\nHASIL KONVERSI\n{rule}\n",
            render_metrics(&self.original, "Original"),
            render_metrics(&self.converted, "Converted"),
        );
        match original_text {
            Some(original) => {
                let _ = write!(
                    out,
                    "\n[TEKS ORIGINAL]\n{original}\n\n[TEKS HASIL KONVERSI]\n{}\n\n[IMPROVEMENT]\n{}",
                    self.converted_text,
                    render_improvement(&self.original, &self.converted),
                );
            }
            None => out.push_str(&self.converted_text),
        }
        out
    }
}
