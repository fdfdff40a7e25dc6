//! Declared-source credibility.
//!
//! Every non-blank source string is reduced to a domain and scored against
//! the trusted registry, then the sub-score is the mean over all sources.
//! Credibility precedence (first match wins):
//!
//! | rule | score |
//! |---|---|
//! | academic list | 95 |
//! | government list | 90 |
//! | cybersecurity list | 85 |
//! | tech-news list | 80 |
//! | `.gov` / `.gov.br` suffix | 90 |
//! | `.edu` / `.org` suffix | 75 |
//! | anything else | 60 |
//!
//! A source with no recognisable host gets an empty domain and falls through
//! to the default; it is still recorded and never aborts the batch.

use anyhow::Result;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use super::{Analyzer, Article, Dimension, Findings};
use crate::registry::{TrustTier, TrustedSourceRegistry};
use crate::verification::{SourceType, VerifiedSource};

pub mod credibility {
    pub const ACADEMIC: u8 = 95;
    pub const GOVERNMENT: u8 = 90;
    pub const CYBERSECURITY: u8 = 85;
    pub const TECH_NEWS: u8 = 80;
    pub const GOV_SUFFIX: u8 = 90;
    pub const EDU_ORG_SUFFIX: u8 = 75;
    pub const DEFAULT: u8 = 60;
    /// Sources strictly below this get a warning.
    pub const LOW: u8 = 60;
}

/// Sub-score when nothing was cited: neutral risk, not proof of unreliability.
pub const NO_SOURCE_SCORE: f64 = 50.0;
pub const NO_SOURCE_WARNING: &str = "No source provided for verification";

#[derive(Debug, Clone)]
pub struct SourceAnalyzer {
    registry: Arc<TrustedSourceRegistry>,
}

impl SourceAnalyzer {
    pub fn new(registry: Arc<TrustedSourceRegistry>) -> Self {
        Self { registry }
    }

    pub fn credibility_for(&self, domain: &str) -> u8 {
        let r = &self.registry;
        if r.matches(TrustTier::Academic, domain) {
            credibility::ACADEMIC
        } else if r.matches(TrustTier::Government, domain) {
            credibility::GOVERNMENT
        } else if r.matches(TrustTier::Cybersecurity, domain) {
            credibility::CYBERSECURITY
        } else if r.matches(TrustTier::TechNews, domain) {
            credibility::TECH_NEWS
        } else if domain.ends_with(".gov") || domain.ends_with(".gov.br") {
            credibility::GOV_SUFFIX
        } else if domain.ends_with(".edu") || domain.ends_with(".org") {
            credibility::EDU_ORG_SUFFIX
        } else {
            credibility::DEFAULT
        }
    }

    pub fn classify(&self, domain: &str) -> SourceType {
        let r = &self.registry;
        if r.matches(TrustTier::Academic, domain) {
            SourceType::Academic
        } else if r.matches(TrustTier::Government, domain) {
            SourceType::Government
        } else if r.matches(TrustTier::TechNews, domain) {
            SourceType::News
        } else if r.matches(TrustTier::Cybersecurity, domain) {
            SourceType::Tech
        } else {
            SourceType::Unknown
        }
    }

    /// Score one source string. Warnings for this source go to `warnings`.
    pub fn verify_source(&self, raw: &str, warnings: &mut Vec<String>) -> VerifiedSource {
        let domain = extract_domain(raw);
        if domain.is_empty() {
            debug!(target: "verifier", source = raw, "source has no host");
        }
        let score = self.credibility_for(&domain);
        if score < credibility::LOW {
            warnings.push(format!("Low-credibility source: {domain}"));
        }
        VerifiedSource {
            url: raw.to_string(),
            source_type: self.classify(&domain),
            credibility_score: score,
            domain,
        }
    }
}

impl Analyzer for SourceAnalyzer {
    fn name(&self) -> &'static str {
        "sources"
    }

    fn dimension(&self) -> Dimension {
        Dimension::Sources
    }

    fn analyze(&self, article: &Article<'_>, findings: &mut Findings) -> Result<f64> {
        let declared: Vec<&str> = article
            .sources
            .iter()
            .copied()
            .filter(|s| !s.trim().is_empty())
            .collect();

        if declared.is_empty() {
            findings.warnings.push(NO_SOURCE_WARNING.to_string());
            return Ok(NO_SOURCE_SCORE);
        }

        let mut total: f64 = 0.0;
        for raw in &declared {
            let vs = self.verify_source(raw, &mut findings.warnings);
            total += f64::from(vs.credibility_score);
            findings.sources.push(vs);
        }
        Ok(total / declared.len() as f64)
    }
}

/// Lowercased host of `source` without a leading `www.`.
///
/// Absolute URLs go through the URL parser; anything else (bare domains,
/// scheme-less paths) falls back to stripping the protocol and `www.` and
/// keeping what precedes the first `/`. May return an empty string.
pub fn extract_domain(source: &str) -> String {
    let s = source.trim();

    let parsed_host = Url::parse(s)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
        .filter(|h| !h.is_empty());

    match parsed_host {
        Some(host) => strip_www(&host).to_string(),
        None => naive_domain(s),
    }
}

fn naive_domain(s: &str) -> String {
    let lower = s.to_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower);
    let rest = strip_www(rest);
    rest.split('/').next().unwrap_or_default().to_string()
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}
