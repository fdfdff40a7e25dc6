// src/config.rs
//! Verifier configuration (TOML).
//!
//! Every section is optional; anything missing falls back to the built-in
//! lists, weights and thresholds. Lookup order for the file:
//! 1) `$VERIFIER_CONFIG_PATH` (must exist when set)
//! 2) `config/verifier.toml`
//! 3) built-in defaults
//!
//! `VERIFIER_APPROVE_THRESHOLD` / `VERIFIER_REVIEW_THRESHOLD` override the
//! band edges after the file is read.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::analyze::{Thresholds, Weights};
use crate::lexicon::{Category, Lexicon};
use crate::registry::TrustedSourceRegistry;

// --- env defaults & names ---
pub const DEFAULT_VERIFIER_CONFIG_PATH: &str = "config/verifier.toml";

pub const ENV_VERIFIER_CONFIG_PATH: &str = "VERIFIER_CONFIG_PATH";
pub const ENV_APPROVE_THRESHOLD: &str = "VERIFIER_APPROVE_THRESHOLD";
pub const ENV_REVIEW_THRESHOLD: &str = "VERIFIER_REVIEW_THRESHOLD";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifierConfig {
    #[serde(default)]
    pub scoring: ScoringSection,
    #[serde(default)]
    pub sources: SourcesSection,
    #[serde(default)]
    pub language: LanguageSection,
    #[serde(default)]
    pub keywords: KeywordsSection,
    #[serde(default)]
    pub structure: StructureSection,
    /// Category slug -> topic keywords.
    #[serde(default)]
    pub categories: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringSection {
    pub w_language: f64,
    pub w_sources: f64,
    pub w_keywords: f64,
    pub w_structure: f64,
    pub w_category: f64,
    pub approve_threshold: u8,
    pub review_threshold: u8,
}

impl Default for ScoringSection {
    fn default() -> Self {
        let w = Weights::default();
        let t = Thresholds::default();
        Self {
            w_language: w.w_language,
            w_sources: w.w_sources,
            w_keywords: w.w_keywords,
            w_structure: w.w_structure,
            w_category: w.w_category,
            approve_threshold: t.approve,
            review_threshold: t.review,
        }
    }
}

/// Per-tier overrides; an absent list keeps the built-in one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourcesSection {
    pub academic: Option<Vec<String>>,
    pub government: Option<Vec<String>>,
    pub tech_news: Option<Vec<String>>,
    pub cybersecurity: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguageSection {
    pub markers: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeywordsSection {
    pub suspicious: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StructureSection {
    pub technical_terms: Option<Vec<String>>,
}

impl VerifierConfig {
    /// Resolve the config file from env/defaults and load it.
    pub fn load() -> Result<Self> {
        let mut cfg = match std::env::var(ENV_VERIFIER_CONFIG_PATH) {
            Ok(p) => {
                let path = PathBuf::from(p);
                if !path.exists() {
                    return Err(anyhow!(
                        "{ENV_VERIFIER_CONFIG_PATH} points to non-existent path {}",
                        path.display()
                    ));
                }
                Self::from_path(&path)?
            }
            Err(_) => {
                let path = PathBuf::from(DEFAULT_VERIFIER_CONFIG_PATH);
                if path.exists() {
                    Self::from_path(&path)?
                } else {
                    info!(target: "verifier", "no verifier config found; using built-in rules");
                    Self::default()
                }
            }
        };

        cfg.apply_env_overrides();
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading verifier config from {}", path.display()))?;
        let cfg = Self::from_toml_str(&content)
            .with_context(|| format!("parsing verifier config {}", path.display()))?;
        info!(target: "verifier", path = %path.display(), "verifier config loaded");
        Ok(cfg)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(toml_str)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Some(t) = parse_threshold_env(std::env::var(ENV_APPROVE_THRESHOLD).ok()) {
            self.scoring.approve_threshold = t;
        }
        if let Some(t) = parse_threshold_env(std::env::var(ENV_REVIEW_THRESHOLD).ok()) {
            self.scoring.review_threshold = t;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.weights().validate()?;
        self.thresholds().validate()?;
        self.category_overrides()?;
        Ok(())
    }

    pub fn weights(&self) -> Weights {
        let s = &self.scoring;
        Weights {
            w_language: s.w_language,
            w_sources: s.w_sources,
            w_keywords: s.w_keywords,
            w_structure: s.w_structure,
            w_category: s.w_category,
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            approve: self.scoring.approve_threshold,
            review: self.scoring.review_threshold,
        }
    }

    pub fn registry(&self) -> TrustedSourceRegistry {
        let seed = TrustedSourceRegistry::default_seed();
        let s = self.sources.clone();
        TrustedSourceRegistry {
            academic: s.academic.unwrap_or(seed.academic),
            government: s.government.unwrap_or(seed.government),
            tech_news: s.tech_news.unwrap_or(seed.tech_news),
            cybersecurity: s.cybersecurity.unwrap_or(seed.cybersecurity),
        }
        .normalized()
    }

    pub fn lexicon(&self) -> Result<Lexicon> {
        Ok(Lexicon::default_seed().with_overrides(
            self.language.markers.clone(),
            self.keywords.suspicious.clone(),
            self.structure.technical_terms.clone(),
            self.category_overrides()?,
        ))
    }

    fn category_overrides(&self) -> Result<Option<BTreeMap<Category, Vec<String>>>> {
        let Some(raw) = &self.categories else {
            return Ok(None);
        };
        raw.iter()
            .map(|(slug, words)| {
                let cat = Category::from_slug(slug)
                    .ok_or_else(|| anyhow!("unknown category `{slug}` in [categories]"))?;
                Ok((cat, words.clone()))
            })
            .collect::<Result<BTreeMap<_, _>>>()
            .map(Some)
    }
}

// parse optional integer env and clamp to <0..=100>
fn parse_threshold_env(raw: Option<String>) -> Option<u8> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .map(|v| v.clamp(0, 100) as u8)
}
