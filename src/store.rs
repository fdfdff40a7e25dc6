//! store.rs: post/comment records and the persistence seam.
//!
//! `PostStore` is the boundary the HTTP layer and the moderation helpers talk
//! to. `InMemoryStore` keeps everything in process; ids come from a counter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::lexicon::Category;
use crate::verification::VerificationResult;

pub type PostId = u64;
pub type CommentId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Published,
    Pending,
    Rejected,
}

impl PostStatus {
    pub fn from_slug(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "published" => Some(Self::Published),
            "pending" => Some(Self::Pending),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    Pending,
    Approved,
}

/// A post as handed to the store; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub sources: Vec<String>,
    pub author: String,
    pub author_email: String,
    pub status: PostStatus,
    pub featured: bool,
    pub image_url: String,
    pub read_time: u32,
    pub verification_result: VerificationResult,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub sources: Vec<String>,
    pub author: String,
    pub author_email: String,
    pub status: PostStatus,
    pub featured: bool,
    pub image_url: String,
    pub read_time: u32,
    pub views: u64,
    pub likes: u64,
    pub verification_score: u8,
    pub verification_result: VerificationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Partial update. `None` leaves the field as it is; counter deltas are
/// applied relative to the stored value and floor at zero.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub status: Option<PostStatus>,
    pub published_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub views_delta: i64,
    pub likes_delta: i64,
    pub sources: Option<Vec<String>>,
    pub verification_result: Option<VerificationResult>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostSort {
    #[default]
    CreatedAt,
    PublishedAt,
    Views,
    Likes,
    Title,
}

#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    pub status: Option<PostStatus>,
    pub category: Option<Category>,
    pub featured: Option<bool>,
    /// Case-insensitive substring over title, excerpt and tags.
    pub search: Option<String>,
    pub sort: PostSort,
    pub limit: Option<usize>,
}

impl Post {
    fn mentions(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.excerpt.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub post_id: PostId,
    pub author: String,
    pub author_email: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author: String,
    pub author_email: String,
    pub content: String,
    pub status: CommentStatus,
    pub likes: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct CommentQuery {
    pub post_id: Option<PostId>,
    pub status: Option<CommentStatus>,
    pub limit: Option<usize>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("post {0} not found")]
    PostNotFound(PostId),
    #[error("comment {0} not found")]
    CommentNotFound(CommentId),
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn create_post(&self, new: NewPost) -> Result<Post, StoreError>;
    async fn update_post(&self, id: PostId, patch: PostPatch) -> Result<Post, StoreError>;
    async fn get_post(&self, id: PostId) -> Result<Post, StoreError>;
    async fn list_posts(&self, query: &PostQuery) -> Vec<Post>;

    async fn create_comment(&self, new: NewComment) -> Result<Comment, StoreError>;
    async fn update_comment(
        &self,
        id: CommentId,
        status: CommentStatus,
    ) -> Result<Comment, StoreError>;
    async fn list_comments(&self, query: &CommentQuery) -> Vec<Comment>;
}

#[derive(Debug, Default)]
struct Tables {
    posts: BTreeMap<PostId, Post>,
    comments: BTreeMap<CommentId, Comment>,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Tables>,
    next_id: AtomicU64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[async_trait]
impl PostStore for InMemoryStore {
    async fn create_post(&self, new: NewPost) -> Result<Post, StoreError> {
        let now = Utc::now();
        let post = Post {
            id: self.next_id(),
            verification_score: new.verification_result.score,
            title: new.title,
            excerpt: new.excerpt,
            content: new.content,
            category: new.category,
            tags: new.tags,
            sources: new.sources,
            author: new.author,
            author_email: new.author_email,
            status: new.status,
            featured: new.featured,
            image_url: new.image_url,
            read_time: new.read_time,
            views: 0,
            likes: 0,
            verification_result: new.verification_result,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
            published_at: new.published_at,
        };
        let mut t = self.inner.write().expect("store lock poisoned");
        t.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update_post(&self, id: PostId, patch: PostPatch) -> Result<Post, StoreError> {
        let mut t = self.inner.write().expect("store lock poisoned");
        let post = t.posts.get_mut(&id).ok_or(StoreError::PostNotFound(id))?;

        if let Some(s) = patch.status {
            post.status = s;
        }
        if let Some(at) = patch.published_at {
            post.published_at = Some(at);
        }
        if let Some(r) = patch.rejection_reason {
            post.rejection_reason = Some(r);
        }
        post.views = post.views.saturating_add_signed(patch.views_delta);
        post.likes = post.likes.saturating_add_signed(patch.likes_delta);
        if let Some(s) = patch.sources {
            post.sources = s;
        }
        if let Some(r) = patch.verification_result {
            post.verification_score = r.score;
            post.verification_result = r;
        }
        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    async fn get_post(&self, id: PostId) -> Result<Post, StoreError> {
        let t = self.inner.read().expect("store lock poisoned");
        t.posts.get(&id).cloned().ok_or(StoreError::PostNotFound(id))
    }

    async fn list_posts(&self, q: &PostQuery) -> Vec<Post> {
        let needle = q
            .search
            .as_deref()
            .map(str::to_lowercase)
            .filter(|n| !n.is_empty());
        let t = self.inner.read().expect("store lock poisoned");
        let mut rows: Vec<Post> = t
            .posts
            .values()
            .filter(|p| q.status.map_or(true, |s| p.status == s))
            .filter(|p| q.category.map_or(true, |c| p.category == c))
            .filter(|p| q.featured.map_or(true, |f| p.featured == f))
            .filter(|p| needle.as_deref().map_or(true, |n| p.mentions(n)))
            .cloned()
            .collect();

        // Descending on the sort key; newer id breaks ties. Unpublished posts
        // sort last under PublishedAt.
        match q.sort {
            PostSort::CreatedAt => rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id))),
            PostSort::PublishedAt => {
                rows.sort_by(|a, b| (b.published_at, b.id).cmp(&(a.published_at, a.id)))
            }
            PostSort::Views => rows.sort_by(|a, b| (b.views, b.id).cmp(&(a.views, a.id))),
            PostSort::Likes => rows.sort_by(|a, b| (b.likes, b.id).cmp(&(a.likes, a.id))),
            PostSort::Title => rows.sort_by(|a, b| (&b.title, b.id).cmp(&(&a.title, a.id))),
        }
        if let Some(n) = q.limit {
            rows.truncate(n);
        }
        rows
    }

    async fn create_comment(&self, new: NewComment) -> Result<Comment, StoreError> {
        let mut t = self.inner.write().expect("store lock poisoned");
        if !t.posts.contains_key(&new.post_id) {
            return Err(StoreError::PostNotFound(new.post_id));
        }
        let now = Utc::now();
        let c = Comment {
            id: self.next_id(),
            post_id: new.post_id,
            author: new.author,
            author_email: new.author_email,
            content: new.content,
            status: CommentStatus::Pending,
            likes: 0,
            created_at: now,
            updated_at: now,
        };
        t.comments.insert(c.id, c.clone());
        Ok(c)
    }

    async fn update_comment(
        &self,
        id: CommentId,
        status: CommentStatus,
    ) -> Result<Comment, StoreError> {
        let mut t = self.inner.write().expect("store lock poisoned");
        let c = t.comments.get_mut(&id).ok_or(StoreError::CommentNotFound(id))?;
        c.status = status;
        c.updated_at = Utc::now();
        Ok(c.clone())
    }

    async fn list_comments(&self, q: &CommentQuery) -> Vec<Comment> {
        let t = self.inner.read().expect("store lock poisoned");
        let mut rows: Vec<Comment> = t
            .comments
            .values()
            .filter(|c| q.post_id.map_or(true, |p| c.post_id == p))
            .filter(|c| q.status.map_or(true, |s| c.status == s))
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        if let Some(n) = q.limit {
            rows.truncate(n);
        }
        rows
    }
}
