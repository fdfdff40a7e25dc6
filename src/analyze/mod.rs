// src/analyze/mod.rs
//! Credibility pipeline entry: runs the five analyzers over one article and
//! blends their sub-scores into a `VerificationResult`.
//!
//! Order:
//! 1) language (title + content)
//! 2) sources
//! 3) keywords (title + content)
//! 4) structure (content)
//! 5) category relevance (title + content)
//!
//! Any analyzer error is absorbed here: the caller always gets a result, and
//! a failed run is routed to manual review.

pub mod category;
pub mod keywords;
pub mod language;
pub mod scoring;
pub mod sources;
pub mod structure;
pub mod weights;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::VerifierConfig;
use crate::logging::anon_hash;
use crate::verification::{VerificationResult, VerifiedSource};

// Re-export convenient types.
pub use crate::analyze::category::CategoryAnalyzer;
pub use crate::analyze::keywords::KeywordAnalyzer;
pub use crate::analyze::language::LanguageAnalyzer;
pub use crate::analyze::scoring::{SubScores, Thresholds};
pub use crate::analyze::sources::{extract_domain, SourceAnalyzer};
pub use crate::analyze::structure::StructureAnalyzer;
pub use crate::analyze::weights::Weights;

/// Process-wide verifier over the built-in lists, built on first use.
static DEFAULT_VERIFIER: Lazy<ContentVerifier> =
    Lazy::new(|| ContentVerifier::builtin().expect("built-in verifier rules"));

/// Score dimensions, one per analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Language,
    Sources,
    Keywords,
    Structure,
    Category,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Language,
        Dimension::Sources,
        Dimension::Keywords,
        Dimension::Structure,
        Dimension::Category,
    ];
}

/// Borrowed view of one submission.
#[derive(Debug, Clone)]
pub struct Article<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub sources: Vec<&'a str>,
}

impl<'a> Article<'a> {
    pub fn new<S: AsRef<str>>(title: &'a str, content: &'a str, sources: &'a [S]) -> Self {
        Self {
            title,
            content,
            sources: sources.iter().map(AsRef::as_ref).collect(),
        }
    }

    /// `title + " " + content`, the text most analyzers read.
    pub fn combined_text(&self) -> String {
        let mut s = String::with_capacity(self.title.len() + self.content.len() + 1);
        s.push_str(self.title);
        s.push(' ');
        s.push_str(self.content);
        s
    }
}

/// Output shared by all analyzers of one run.
#[derive(Debug, Clone, Default)]
pub struct Findings {
    pub warnings: Vec<String>,
    pub sources: Vec<VerifiedSource>,
}

/// One scoring stage. Implementations must be pure: same article, same output.
pub trait Analyzer: Send + Sync {
    fn name(&self) -> &'static str;
    fn dimension(&self) -> Dimension;
    /// Returns a sub-score in `0..=100`; may append to `findings`.
    fn analyze(&self, article: &Article<'_>, findings: &mut Findings) -> Result<f64>;
}

/// Stateless orchestrator. Cheap to clone and safe to share across threads.
#[derive(Clone)]
pub struct ContentVerifier {
    analyzers: Vec<Arc<dyn Analyzer>>,
    weights: Weights,
    thresholds: Thresholds,
}

impl fmt::Debug for ContentVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentVerifier")
            .field(
                "analyzers",
                &self.analyzers.iter().map(|a| a.name()).collect::<Vec<_>>(),
            )
            .field("weights", &self.weights)
            .field("thresholds", &self.thresholds)
            .finish()
    }
}

impl ContentVerifier {
    /// Verifier over the built-in lists, weights and thresholds.
    pub fn builtin() -> Result<Self> {
        Self::from_config(&VerifierConfig::default())
    }

    pub fn from_config(cfg: &VerifierConfig) -> Result<Self> {
        let registry = Arc::new(cfg.registry());
        let lexicon = Arc::new(cfg.lexicon()?);

        let analyzers: Vec<Arc<dyn Analyzer>> = vec![
            Arc::new(LanguageAnalyzer::new(&lexicon).context("language analyzer")?),
            Arc::new(SourceAnalyzer::new(registry)),
            Arc::new(KeywordAnalyzer::new(lexicon.clone())),
            Arc::new(StructureAnalyzer::new(&lexicon).context("structure analyzer")?),
            Arc::new(CategoryAnalyzer::new(lexicon)),
        ];

        Self::with_analyzers(analyzers, cfg.weights(), cfg.thresholds())
    }

    /// Assemble a verifier from arbitrary stages. Stages run in the given order.
    pub fn with_analyzers(
        analyzers: Vec<Arc<dyn Analyzer>>,
        weights: Weights,
        thresholds: Thresholds,
    ) -> Result<Self> {
        weights.validate()?;
        thresholds.validate()?;
        Ok(Self {
            analyzers,
            weights,
            thresholds,
        })
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Run every analyzer and return the raw sub-scores with their findings.
    /// Errors are not absorbed here; `verify` is the fail-safe entry.
    pub fn breakdown<S: AsRef<str>>(
        &self,
        title: &str,
        content: &str,
        sources: &[S],
    ) -> Result<(SubScores, Findings)> {
        let article = Article::new(title, content, sources);
        let mut findings = Findings::default();
        let subs = self.run(&article, &mut findings)?;
        Ok((subs, findings))
    }

    /// Score one article. Never fails: analyzer errors downgrade the outcome
    /// to a manual-review result.
    pub fn verify<S: AsRef<str>>(
        &self,
        title: &str,
        content: &str,
        sources: &[S],
    ) -> VerificationResult {
        let article = Article::new(title, content, sources);
        let mut findings = Findings::default();

        let result = match self.run(&article, &mut findings) {
            Ok(subs) => {
                let score = subs.combine(&self.weights);
                debug!(
                    target: "verifier",
                    language = subs.language,
                    sources = subs.sources,
                    keywords = subs.keywords,
                    structure = subs.structure,
                    category = subs.category,
                    "sub-scores"
                );
                VerificationResult::scored(
                    score,
                    self.thresholds.recommend(score),
                    findings.warnings,
                    findings.sources,
                )
            }
            Err(e) => {
                warn!(target: "verifier", error = %format!("{e:#}"), "analysis failed; routing to manual review");
                crate::metrics::record_fallback();
                VerificationResult::fallback(findings.warnings, findings.sources)
            }
        };

        // Never log raw text. Only hashed id + summary.
        debug!(
            target: "verifier",
            id = %anon_hash(title),
            score = result.score,
            recommendation = result.recommendation.as_str(),
            warnings = result.warnings.len(),
            sources = result.sources.len(),
            "verified"
        );
        crate::metrics::record_verification(&result);
        result
    }

    fn run(&self, article: &Article<'_>, findings: &mut Findings) -> Result<SubScores> {
        let mut subs = SubScores::default();
        for a in &self.analyzers {
            let v = a
                .analyze(article, findings)
                .with_context(|| format!("{} analyzer", a.name()))?;
            subs.set(a.dimension(), v);
        }
        Ok(subs)
    }
}

/// The shared verifier over the built-in rules.
pub fn default_verifier() -> &'static ContentVerifier {
    &DEFAULT_VERIFIER
}

/// Async entry for UI-style callers. Runs synchronously; there are no
/// suspension points inside.
pub async fn verify_content<S: AsRef<str>>(
    title: &str,
    content: &str,
    sources: &[S],
) -> VerificationResult {
    DEFAULT_VERIFIER.verify(title, content, sources)
}
