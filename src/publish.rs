//! Authoring helpers and the publication gate.
//!
//! A draft becomes a storable post only after it has been scored: `approve`
//! goes live immediately, `review` waits in the moderation queue and
//! `reject` is refused outright.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::analyze::ContentVerifier;
use crate::lexicon::Category;
use crate::logging::anon_hash;
use crate::store::{NewPost, Post, PostStatus, PostStore, StoreError};
use crate::verification::{Recommendation, VerificationResult};

pub const DEFAULT_IMAGE_URL: &str =
    "https://images.pexels.com/photos/1181671/pexels-photo-1181671.jpeg";
pub const WORDS_PER_MINUTE: usize = 200;
pub const EXCERPT_CHARS: usize = 150;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://[^\s]+").expect("url regex"));

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PublishError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("content failed verification (score {score})")]
    Rejected { score: u8, warnings: Vec<String> },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What an author submits. `sources_text`/`tags_text` carry the raw form
/// fields (one source per line, comma-separated tags) and are merged with
/// the list fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: String,
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub tags_text: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub sources_text: Option<String>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub author_email: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

impl PostDraft {
    pub fn check_required(&self) -> Result<(), PublishError> {
        let fields = [
            ("title", &self.title),
            ("content", &self.content),
            ("author", &self.author),
            ("authorEmail", &self.author_email),
        ];
        match fields.iter().find(|(_, v)| v.trim().is_empty()) {
            Some((name, _)) => Err(PublishError::MissingField(*name)),
            None => Ok(()),
        }
    }

    pub fn declared_sources(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .sources
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(text) = &self.sources_text {
            out.extend(parse_sources(text));
        }
        out
    }

    pub fn declared_tags(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .tags
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(text) = &self.tags_text {
            out.extend(parse_tags(text));
        }
        out
    }
}

/// Turn a scored draft into a storable post, or refuse it.
pub fn prepare_post(
    draft: PostDraft,
    verification: &VerificationResult,
    now: DateTime<Utc>,
) -> Result<NewPost, PublishError> {
    draft.check_required()?;

    let (status, published_at) = match verification.recommendation {
        Recommendation::Reject => {
            return Err(PublishError::Rejected {
                score: verification.score,
                warnings: verification.warnings.clone(),
            })
        }
        Recommendation::Approve => (PostStatus::Published, Some(now)),
        Recommendation::Review => (PostStatus::Pending, None),
    };

    let sources = draft.declared_sources();
    let tags = draft.declared_tags();
    let excerpt = draft
        .excerpt
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| default_excerpt(&draft.content));
    let image_url = draft
        .image_url
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string());

    Ok(NewPost {
        read_time: read_time_minutes(&draft.content),
        title: draft.title,
        excerpt,
        content: draft.content,
        category: draft.category,
        tags,
        sources,
        author: draft.author,
        author_email: draft.author_email,
        status,
        featured: draft.featured,
        image_url,
        verification_result: verification.clone(),
        published_at,
    })
}

/// Score a draft server-side, gate it and store it.
pub async fn submit_post(
    store: &dyn PostStore,
    verifier: &ContentVerifier,
    draft: PostDraft,
) -> Result<Post, PublishError> {
    draft.check_required()?;
    let sources = draft.declared_sources();
    let verification = verifier.verify(&draft.title, &draft.content, &sources);

    let new = match prepare_post(draft, &verification, Utc::now()) {
        Ok(p) => p,
        Err(e) => {
            tracing::info!(target: "verifier", score = verification.score, "submission refused");
            return Err(e);
        }
    };
    let id = anon_hash(&new.title);
    let post = store.create_post(new).await?;
    tracing::info!(
        target: "verifier",
        post_id = post.id,
        id = %id,
        status = ?post.status,
        score = post.verification_score,
        "post stored"
    );
    Ok(post)
}

/// One source per line; blank lines dropped.
pub fn parse_sources(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

pub fn parse_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Every `http(s)://` run in the text, in order of appearance.
pub fn extract_urls(content: &str) -> Vec<String> {
    URL_RE
        .find_iter(content)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn read_time_minutes(content: &str) -> u32 {
    let words = content.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}

pub fn default_excerpt(content: &str) -> String {
    let mut s: String = content.chars().take(EXCERPT_CHARS).collect();
    s.push_str("...");
    s
}
