// src/moderation.rs
//! Moderator actions and reader interactions over a `PostStore`.

use chrono::Utc;
use tracing::info;

use crate::analyze::ContentVerifier;
use crate::publish::extract_urls;
use crate::store::{
    Comment, CommentId, CommentQuery, CommentStatus, NewComment, Post, PostId, PostPatch,
    PostQuery, PostStatus, PostStore, StoreError,
};

/// Posts waiting for a human, newest first.
pub async fn pending_posts(store: &dyn PostStore) -> Vec<Post> {
    let q = PostQuery {
        status: Some(PostStatus::Pending),
        ..PostQuery::default()
    };
    store.list_posts(&q).await
}

pub async fn approve_post(store: &dyn PostStore, id: PostId) -> Result<Post, StoreError> {
    let post = store
        .update_post(
            id,
            PostPatch {
                status: Some(PostStatus::Published),
                published_at: Some(Utc::now()),
                ..PostPatch::default()
            },
        )
        .await?;
    info!(target: "verifier", post_id = id, "post approved by moderator");
    Ok(post)
}

pub async fn reject_post(
    store: &dyn PostStore,
    id: PostId,
    reason: &str,
) -> Result<Post, StoreError> {
    let post = store
        .update_post(
            id,
            PostPatch {
                status: Some(PostStatus::Rejected),
                rejection_reason: Some(reason.trim().to_string()),
                ..PostPatch::default()
            },
        )
        .await?;
    info!(target: "verifier", post_id = id, "post rejected by moderator");
    Ok(post)
}

/// Score the stored text again, citing the URLs found in the body. Status is
/// left for the moderator to decide.
pub async fn reverify_post(
    store: &dyn PostStore,
    verifier: &ContentVerifier,
    id: PostId,
) -> Result<Post, StoreError> {
    let post = store.get_post(id).await?;
    let urls = extract_urls(&post.content);
    let result = verifier.verify(&post.title, &post.content, &urls);
    info!(
        target: "verifier",
        post_id = id,
        before = post.verification_score,
        after = result.score,
        "post re-verified"
    );
    store
        .update_post(
            id,
            PostPatch {
                sources: Some(urls),
                verification_result: Some(result),
                ..PostPatch::default()
            },
        )
        .await
}

pub async fn approve_comment(store: &dyn PostStore, id: CommentId) -> Result<Comment, StoreError> {
    store.update_comment(id, CommentStatus::Approved).await
}

/// Fetch a post for a reader; counts as one view.
pub async fn read_post(store: &dyn PostStore, id: PostId) -> Result<Post, StoreError> {
    store
        .update_post(
            id,
            PostPatch {
                views_delta: 1,
                ..PostPatch::default()
            },
        )
        .await
}

/// `liked = true` adds one like, `false` removes one. Never goes below zero.
pub async fn set_like(store: &dyn PostStore, id: PostId, liked: bool) -> Result<Post, StoreError> {
    store
        .update_post(
            id,
            PostPatch {
                likes_delta: if liked { 1 } else { -1 },
                ..PostPatch::default()
            },
        )
        .await
}

/// New comments wait for moderation.
pub async fn add_comment(store: &dyn PostStore, new: NewComment) -> Result<Comment, StoreError> {
    store.create_comment(new).await
}

/// What readers see under a post: approved comments, newest first.
pub async fn visible_comments(store: &dyn PostStore, post_id: PostId) -> Vec<Comment> {
    let q = CommentQuery {
        post_id: Some(post_id),
        status: Some(CommentStatus::Approved),
        limit: None,
    };
    store.list_comments(&q).await
}
