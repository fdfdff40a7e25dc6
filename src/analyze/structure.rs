//! Body-text shape: length, paragraphing and technical density.

use anyhow::{Context, Result};
use regex::Regex;

use super::{Analyzer, Article, Dimension, Findings};
use crate::lexicon::Lexicon;

pub const MIN_CHARS: usize = 200;
pub const MIN_PARAGRAPHS: usize = 2;
pub const SHORT_PENALTY: i64 = 20;
pub const FLAT_PENALTY: i64 = 15;
pub const TECHNICAL_BONUS: i64 = 10;

pub const SHORT_WARNING: &str = "Content too short for adequate verification";
pub const FLAT_WARNING: &str = "Inadequate structure (too few paragraphs)";

#[derive(Debug, Clone)]
pub struct StructureAnalyzer {
    technical: Option<Regex>,
}

impl StructureAnalyzer {
    pub fn new(lexicon: &Lexicon) -> Result<Self> {
        let technical = if lexicon.technical_terms.is_empty() {
            None
        } else {
            let alternation = lexicon
                .technical_terms
                .iter()
                .map(|t| regex::escape(t))
                .collect::<Vec<_>>()
                .join("|");
            Some(
                Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))
                    .context("technical terms regex")?,
            )
        };
        Ok(Self { technical })
    }

    pub fn has_technical_terms(&self, content: &str) -> bool {
        self.technical.as_ref().is_some_and(|re| re.is_match(content))
    }

    pub fn score_text(&self, content: &str, warnings: &mut Vec<String>) -> f64 {
        let mut score: i64 = 100;

        if content.chars().count() < MIN_CHARS {
            score -= SHORT_PENALTY;
            warnings.push(SHORT_WARNING.to_string());
        }

        if paragraph_count(content) < MIN_PARAGRAPHS {
            score -= FLAT_PENALTY;
            warnings.push(FLAT_WARNING.to_string());
        }

        let has_digits = content.chars().any(|c| c.is_ascii_digit());
        if has_digits && self.has_technical_terms(content) {
            score += TECHNICAL_BONUS;
        }

        score.clamp(0, 100) as f64
    }
}

/// Non-blank lines.
pub fn paragraph_count(content: &str) -> usize {
    content.split('\n').filter(|p| !p.trim().is_empty()).count()
}

impl Analyzer for StructureAnalyzer {
    fn name(&self) -> &'static str {
        "structure"
    }

    fn dimension(&self) -> Dimension {
        Dimension::Structure
    }

    fn analyze(&self, article: &Article<'_>, findings: &mut Findings) -> Result<f64> {
        Ok(self.score_text(article.content, &mut findings.warnings))
    }
}
