//! Topical relevance against the blog's content categories.
//!
//! Relevance is established as soon as any single category collects
//! `MIN_HITS` distinct keyword hits. The threshold is deliberately coarse and
//! does not scale with category size or text length.

use anyhow::Result;
use std::sync::Arc;

use super::{Analyzer, Article, Dimension, Findings};
use crate::lexicon::{Category, Lexicon};

pub const MIN_HITS: usize = 2;
pub const RELEVANT_SCORE: f64 = 100.0;
pub const MISMATCH_SCORE: f64 = 70.0;
pub const MISMATCH_WARNING: &str = "Content may be miscategorized";

#[derive(Debug, Clone)]
pub struct CategoryAnalyzer {
    lexicon: Arc<Lexicon>,
}

impl CategoryAnalyzer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Keyword hits per category for `text`.
    pub fn hits(&self, text: &str) -> Vec<(Category, usize)> {
        let lower = text.to_lowercase();
        self.lexicon
            .categories
            .iter()
            .map(|(cat, words)| {
                let n = words.iter().filter(|w| lower.contains(w.as_str())).count();
                (*cat, n)
            })
            .collect()
    }

    /// First category (in declaration order) that reaches the threshold.
    pub fn relevant_category(&self, text: &str) -> Option<Category> {
        self.hits(text)
            .into_iter()
            .find(|(_, n)| *n >= MIN_HITS)
            .map(|(c, _)| c)
    }

    pub fn score_text(&self, text: &str, warnings: &mut Vec<String>) -> f64 {
        if self.relevant_category(text).is_some() {
            RELEVANT_SCORE
        } else {
            warnings.push(MISMATCH_WARNING.to_string());
            MISMATCH_SCORE
        }
    }
}

impl Analyzer for CategoryAnalyzer {
    fn name(&self) -> &'static str {
        "category"
    }

    fn dimension(&self) -> Dimension {
        Dimension::Category
    }

    fn analyze(&self, article: &Article<'_>, findings: &mut Findings) -> Result<f64> {
        Ok(self.score_text(&article.combined_text(), &mut findings.warnings))
    }
}
