//! Sensationalist phrasing detector.
//!
//! Patterns, checked in order: the configured urgency markers (literal,
//! case-insensitive), runs of three or more `!`, and all-caps tokens of at
//! least three ASCII letters. Each match costs `MATCH_PENALTY`; each pattern
//! that fires adds one warning listing its matches. Exclamation marks beyond
//! `EXCLAMATION_ALLOWANCE` cost `EXCESS_PENALTY` apiece and add one warning.
//!
//! Word boundaries for caps tokens are ASCII, so an accented capital splits
//! a word: `INACREDITÁVEL` yields `INACREDIT` and `VEL`.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{Analyzer, Article, Dimension, Findings};
use crate::lexicon::Lexicon;

pub const MATCH_PENALTY: i64 = 10;
pub const EXCESS_PENALTY: i64 = 5;
pub const EXCLAMATION_ALLOWANCE: usize = 3;

pub const EXCESS_WARNING: &str = "Excessive use of exclamation marks";

static EXCLAMATION_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!{3,}").expect("exclamation run regex"));

static ASCII_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("ascii word regex"));

/// Maximal ASCII word runs made only of `A-Z`, three or longer.
fn caps_tokens(text: &str) -> Vec<&str> {
    ASCII_WORD
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|w| w.len() >= 3 && w.bytes().all(|b| b.is_ascii_uppercase()))
        .collect()
}

fn penalize(hits: &[&str], score: &mut i64, warnings: &mut Vec<String>) {
    if hits.is_empty() {
        return;
    }
    *score -= MATCH_PENALTY * hits.len() as i64;
    warnings.push(format!(
        "Sensationalist language detected: {}",
        hits.join(", ")
    ));
}

#[derive(Debug, Clone)]
pub struct LanguageAnalyzer {
    markers: Vec<Regex>,
}

impl LanguageAnalyzer {
    pub fn new(lexicon: &Lexicon) -> Result<Self> {
        let markers = lexicon
            .markers
            .iter()
            .map(|m| {
                Regex::new(&format!("(?i){}", regex::escape(m)))
                    .with_context(|| format!("marker `{m}`"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { markers })
    }

    /// Score a piece of text on its own, appending warnings to `warnings`.
    pub fn score_text(&self, text: &str, warnings: &mut Vec<String>) -> f64 {
        let mut score: i64 = 100;

        for re in self.markers.iter().chain([&*EXCLAMATION_RUN]) {
            let hits: Vec<&str> = re.find_iter(text).map(|m| m.as_str()).collect();
            penalize(&hits, &mut score, warnings);
        }
        penalize(&caps_tokens(text), &mut score, warnings);

        let bangs = text.chars().filter(|c| *c == '!').count();
        if bangs > EXCLAMATION_ALLOWANCE {
            score -= EXCESS_PENALTY * (bangs - EXCLAMATION_ALLOWANCE) as i64;
            warnings.push(EXCESS_WARNING.to_string());
        }

        score.max(0) as f64
    }
}

impl Analyzer for LanguageAnalyzer {
    fn name(&self) -> &'static str {
        "language"
    }

    fn dimension(&self) -> Dimension {
        Dimension::Language
    }

    fn analyze(&self, article: &Article<'_>, findings: &mut Findings) -> Result<f64> {
        Ok(self.score_text(&article.combined_text(), &mut findings.warnings))
    }
}
