//! Blend weights for the five analyzer dimensions.
//!
//! TOML shape (`[scoring]` section of the verifier config):
//! ```toml
//! [scoring]
//! w_language = 0.20
//! w_sources = 0.30
//! w_keywords = 0.20
//! w_structure = 0.15
//! w_category = 0.15
//! ```
//!
//! Weights are validated once at load time and never change afterwards.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::Dimension;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub w_language: f64,
    pub w_sources: f64,
    pub w_keywords: f64,
    pub w_structure: f64,
    pub w_category: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            w_language: 0.20,
            w_sources: 0.30,
            w_keywords: 0.20,
            w_structure: 0.15,
            w_category: 0.15,
        }
    }
}

impl Weights {
    pub fn for_dimension(&self, d: Dimension) -> f64 {
        match d {
            Dimension::Language => self.w_language,
            Dimension::Sources => self.w_sources,
            Dimension::Keywords => self.w_keywords,
            Dimension::Structure => self.w_structure,
            Dimension::Category => self.w_category,
        }
    }

    fn all(&self) -> [f64; 5] {
        [
            self.w_language,
            self.w_sources,
            self.w_keywords,
            self.w_structure,
            self.w_category,
        ]
    }

    /// Weights must be finite, non-negative and sum to 1.
    pub fn validate(&self) -> Result<()> {
        if self.all().iter().any(|w| !w.is_finite() || *w < 0.0) {
            bail!("scoring weights must be finite and non-negative: {self:?}");
        }
        let sum: f64 = self.all().iter().sum();
        if (sum - 1.0).abs() > 1e-6 {
            bail!("scoring weights must sum to 1.0 (got {sum:.4})");
        }
        Ok(())
    }
}
