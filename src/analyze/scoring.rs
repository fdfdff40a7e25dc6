//! Score blending and recommendation bands.
//!
//! `SubScores` holds one 0–100 value per analyzer dimension.
//! Aggregate = Σ weight(dim) · sub(dim), rounded half away from zero and
//! clamped to `0..=100`.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::{Dimension, Weights};
use crate::verification::Recommendation;

/// Per-dimension sub-scores. A dimension that was not run stays at 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SubScores {
    pub language: f64,
    pub sources: f64,
    pub keywords: f64,
    pub structure: f64,
    pub category: f64,
}

impl SubScores {
    pub fn set(&mut self, d: Dimension, value: f64) {
        let v = value.clamp(0.0, 100.0);
        match d {
            Dimension::Language => self.language = v,
            Dimension::Sources => self.sources = v,
            Dimension::Keywords => self.keywords = v,
            Dimension::Structure => self.structure = v,
            Dimension::Category => self.category = v,
        }
    }

    pub fn get(&self, d: Dimension) -> f64 {
        match d {
            Dimension::Language => self.language,
            Dimension::Sources => self.sources,
            Dimension::Keywords => self.keywords,
            Dimension::Structure => self.structure,
            Dimension::Category => self.category,
        }
    }

    /// Weighted aggregate as an integer in `0..=100`.
    pub fn combine(&self, w: &Weights) -> u8 {
        let raw: f64 = Dimension::ALL
            .iter()
            .map(|d| self.get(*d) * w.for_dimension(*d))
            .sum();
        raw.round().clamp(0.0, 100.0) as u8
    }
}

/// Band edges: `score >= approve` approves, `score >= review` goes to review.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub approve: u8,
    pub review: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            approve: 80,
            review: 60,
        }
    }
}

impl Thresholds {
    pub fn recommend(&self, score: u8) -> Recommendation {
        if score >= self.approve {
            Recommendation::Approve
        } else if score >= self.review {
            Recommendation::Review
        } else {
            Recommendation::Reject
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.approve > 100 || self.review > self.approve {
            bail!(
                "thresholds must satisfy review <= approve <= 100 (review {}, approve {})",
                self.review,
                self.approve
            );
        }
        Ok(())
    }
}
