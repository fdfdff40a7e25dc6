//! verification.rs: result shapes returned by the credibility scorer.
//!
//! The JSON shape is what the authoring UI and the moderation panel consume,
//! so field names are camelCase and the enums serialize in lowercase.

use serde::{Deserialize, Serialize};

/// Publish-gating verdict derived from the aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Approve,
    Review,
    Reject,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Approve => "approve",
            Recommendation::Review => "review",
            Recommendation::Reject => "reject",
        }
    }
}

/// Coarse classification of a cited source, taken from trusted-list membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Academic,
    Government,
    News,
    Tech,
    Unknown,
}

/// One submitted source after domain extraction and scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedSource {
    /// Source string exactly as submitted.
    pub url: String,
    /// Lowercased host with any leading `www.` removed. Empty when extraction failed.
    pub domain: String,
    pub credibility_score: u8,
    #[serde(rename = "type")]
    pub source_type: SourceType,
}

/// Outcome of one verification call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub is_verified: bool,
    /// Aggregate credibility in `0..=100`.
    pub score: u8,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub sources: Vec<VerifiedSource>,
    pub recommendation: Recommendation,
}

impl VerificationResult {
    /// Success path: the recommendation follows from the score alone.
    pub(crate) fn scored(
        score: u8,
        recommendation: Recommendation,
        warnings: Vec<String>,
        sources: Vec<VerifiedSource>,
    ) -> Self {
        Self {
            is_verified: recommendation == Recommendation::Approve,
            score,
            warnings,
            sources,
            recommendation,
        }
    }

    /// Fail-safe path: keep whatever was gathered and route to a human.
    pub(crate) fn fallback(mut warnings: Vec<String>, sources: Vec<VerifiedSource>) -> Self {
        warnings.push(FALLBACK_WARNING.to_string());
        Self {
            is_verified: false,
            score: 0,
            warnings,
            sources,
            recommendation: Recommendation::Review,
        }
    }

    pub fn is_publishable(&self) -> bool {
        self.recommendation != Recommendation::Reject
    }
}

pub const FALLBACK_WARNING: &str = "Verification error - manual review required";
