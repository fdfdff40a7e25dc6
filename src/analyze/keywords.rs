//! Known fake-news trigger phrases.

use anyhow::Result;
use std::sync::Arc;

use super::{Analyzer, Article, Dimension, Findings};
use crate::lexicon::Lexicon;

pub const PHRASE_PENALTY: i64 = 15;

#[derive(Debug, Clone)]
pub struct KeywordAnalyzer {
    lexicon: Arc<Lexicon>,
}

impl KeywordAnalyzer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Phrases present in `text`, in lexicon order.
    pub fn matches<'a>(&'a self, text: &str) -> Vec<&'a str> {
        let lower = text.to_lowercase();
        self.lexicon
            .suspicious
            .iter()
            .filter(|p| lower.contains(p.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn score_text(&self, text: &str, warnings: &mut Vec<String>) -> f64 {
        let hits = self.matches(text);
        for p in &hits {
            warnings.push(format!("Suspicious keyword found: \"{p}\""));
        }
        (100 - PHRASE_PENALTY * hits.len() as i64).max(0) as f64
    }
}

impl Analyzer for KeywordAnalyzer {
    fn name(&self) -> &'static str {
        "keywords"
    }

    fn dimension(&self) -> Dimension {
        Dimension::Keywords
    }

    fn analyze(&self, article: &Article<'_>, findings: &mut Findings) -> Result<f64> {
        Ok(self.score_text(&article.combined_text(), &mut findings.warnings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> KeywordAnalyzer {
        KeywordAnalyzer::new(Arc::new(Lexicon::default_seed()))
    }

    #[test]
    fn phrase_match_is_case_insensitive() {
        let mut w = Vec::new();
        let s = analyzer().score_text("Isto é FAKE NEWS, pura e simples", &mut w);
        assert_eq!(s, 85.0);
        assert_eq!(w, vec!["Suspicious keyword found: \"fake news\"".to_string()]);
    }

    #[test]
    fn overlapping_phrases_stack() {
        let mut w = Vec::new();
        let s = analyzer().score_text("Mais uma teoria da conspiração", &mut w);
        // "conspiração" and "teoria da conspiração" both fire
        assert_eq!(s, 70.0);
        assert_eq!(w.len(), 2);
    }

    #[test]
    fn repeated_phrase_counts_once() {
        let mut w = Vec::new();
        let s = analyzer().score_text("fake news fake news fake news", &mut w);
        assert_eq!(s, 85.0);
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn clamps_at_zero() {
        let text = "descoberta revolucionária médicos odeiam governo esconde \
                    mídia não quer que você saiba método secreto teoria da conspiração \
                    fake news informação censurada verdade oculta";
        let mut w = Vec::new();
        assert_eq!(analyzer().score_text(text, &mut w), 0.0);
        assert_eq!(w.len(), 10);
    }
}
