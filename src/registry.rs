//! # Trusted Source Registry
//!
//! Static catalog of domain fragments considered authoritative, partitioned
//! into four tiers (academic, government, cybersecurity, tech news).
//!
//! - Loaded from the `[sources]` section of the verifier config, or from the
//!   built-in `default_seed()`.
//! - Entries are trimmed, lowercased and de-duplicated on load.
//! - Lookup is by substring: `"pubmed.ncbi.nlm.nih.gov"` matches any domain
//!   containing it, so subdomains inherit the tier.
//!
//! The registry is immutable after construction and shared freely.

use serde::{Deserialize, Serialize};

/// Trust tiers, in the order used for credibility precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustTier {
    Academic,
    Government,
    Cybersecurity,
    TechNews,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustedSourceRegistry {
    #[serde(default)]
    pub academic: Vec<String>,
    #[serde(default)]
    pub government: Vec<String>,
    #[serde(default)]
    pub tech_news: Vec<String>,
    #[serde(default)]
    pub cybersecurity: Vec<String>,
}

impl Default for TrustedSourceRegistry {
    fn default() -> Self {
        Self::default_seed()
    }
}

impl TrustedSourceRegistry {
    /// Build a registry from raw lists, normalizing every entry.
    pub fn new(
        academic: Vec<String>,
        government: Vec<String>,
        tech_news: Vec<String>,
        cybersecurity: Vec<String>,
    ) -> Self {
        Self {
            academic: clean_list(academic),
            government: clean_list(government),
            tech_news: clean_list(tech_news),
            cybersecurity: clean_list(cybersecurity),
        }
    }

    /// Entries for one tier.
    pub fn entries(&self, tier: TrustTier) -> &[String] {
        match tier {
            TrustTier::Academic => &self.academic,
            TrustTier::Government => &self.government,
            TrustTier::Cybersecurity => &self.cybersecurity,
            TrustTier::TechNews => &self.tech_news,
        }
    }

    /// True if `domain` contains any entry of `tier`.
    pub fn matches(&self, tier: TrustTier, domain: &str) -> bool {
        let d = domain.to_lowercase();
        self.entries(tier).iter().any(|t| d.contains(t.as_str()))
    }

    /// Re-normalize lists that came straight from a deserializer.
    pub(crate) fn normalized(self) -> Self {
        Self::new(
            self.academic,
            self.government,
            self.tech_news,
            self.cybersecurity,
        )
    }

    /// Built-in catalog used when no config overrides it.
    pub fn default_seed() -> Self {
        Self::new(
            to_strings(&[
                "scholar.google.com",
                "ieee.org",
                "acm.org",
                "scielo.org",
                "researchgate.net",
                "arxiv.org",
                "pubmed.ncbi.nlm.nih.gov",
                "jstor.org",
                "springer.com",
                "elsevier.com",
            ]),
            to_strings(&[
                "gov.br",
                "serpro.gov.br",
                "cert.br",
                "cgi.br",
                "anatel.gov.br",
                "mj.gov.br",
                "pf.gov.br",
                "dpf.gov.br",
            ]),
            to_strings(&[
                "tecnoblog.net",
                "olhardigital.com.br",
                "canaltech.com.br",
                "techtudo.com.br",
                "convergenciadigital.com.br",
                "securityreport.com.br",
                "hackernews.com",
                "arstechnica.com",
                "wired.com",
                "techcrunch.com",
            ]),
            to_strings(&[
                "kaspersky.com.br",
                "symantec.com",
                "mcafee.com",
                "trendmicro.com",
                "checkpoint.com",
                "fortinet.com",
                "paloaltonetworks.com",
                "crowdstrike.com",
                "fireeye.com",
                "sans.org",
            ]),
        )
    }
}

pub(crate) fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Trim, lowercase, drop blanks and duplicates; first occurrence keeps its position.
pub(crate) fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim().to_lowercase();
        if !t.is_empty() && !out.contains(&t) {
            out.push(t);
        }
    }
    out
}
