// src/api.rs
//! HTTP surface: verification, posts, comments and the moderation queue.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::analyze::{ContentVerifier, SubScores, Thresholds, Weights};
use crate::lexicon::Category;
use crate::moderation;
use crate::publish::{self, parse_sources, PostDraft, PublishError};
use crate::store::{
    Comment, CommentId, NewComment, Post, PostId, PostQuery, PostSort, PostStatus, PostStore,
    StoreError,
};
use crate::verification::VerificationResult;

pub const ENV_DEBUG_ROUTES: &str = "DEBUG_ROUTES";

#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<ContentVerifier>,
    pub store: Arc<dyn PostStore>,
}

impl AppState {
    pub fn new(verifier: Arc<ContentVerifier>, store: Arc<dyn PostStore>) -> Self {
        Self { verifier, store }
    }
}

/// `DEBUG_ROUTES=1` exposes `/debug/*` and `/metrics`.
pub fn debug_routes_enabled() -> bool {
    std::env::var(ENV_DEBUG_ROUTES)
        .map(|v| v.trim() == "1")
        .unwrap_or(false)
}

pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/verify", post(verify))
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post))
        .route("/posts/{id}/like", post(like_post))
        .route("/posts/{id}/comments", get(list_comments).post(create_comment))
        .route("/moderation/pending", get(pending))
        .route("/moderation/posts/{id}/approve", post(approve_post))
        .route("/moderation/posts/{id}/reject", post(reject_post))
        .route("/moderation/posts/{id}/reverify", post(reverify_post))
        .route("/moderation/comments/{id}/approve", post(approve_comment));

    if debug_routes_enabled() {
        app = app.route("/debug/breakdown", get(debug_breakdown));
    }

    app.layer(CorsLayer::very_permissive()).with_state(state)
}

// ---------- errors ----------

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Rejected { score: u8, warnings: Vec<String> },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::Rejected { score, warnings } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": "content failed verification",
                    "score": score,
                    "warnings": warnings,
                }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::NotFound(e.to_string())
    }
}

impl From<PublishError> for ApiError {
    fn from(e: PublishError) -> Self {
        match e {
            PublishError::MissingField(field) => {
                ApiError::BadRequest(format!("missing required field: {field}"))
            }
            PublishError::Rejected { score, warnings } => ApiError::Rejected { score, warnings },
            PublishError::Store(s) => s.into(),
        }
    }
}

type ApiResult<T> = Result<T, ApiError>;

// ---------- verification ----------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyReq {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    sources: Vec<String>,
    /// Raw textarea value, one source per line.
    #[serde(default, alias = "sources_text")]
    sources_text: Option<String>,
}

async fn verify(
    State(state): State<AppState>,
    Json(body): Json<VerifyReq>,
) -> ApiResult<Json<VerificationResult>> {
    if body.title.trim().is_empty() || body.content.trim().is_empty() {
        return Err(ApiError::BadRequest("title and content are required".into()));
    }
    let mut sources = body.sources;
    if let Some(text) = &body.sources_text {
        sources.extend(parse_sources(text));
    }
    Ok(Json(state.verifier.verify(&body.title, &body.content, &sources)))
}

// ---------- posts ----------

async fn create_post(
    State(state): State<AppState>,
    Json(draft): Json<PostDraft>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let post = publish::submit_post(state.store.as_ref(), &state.verifier, draft).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

#[derive(Debug, Default, Deserialize)]
struct ListParams {
    status: Option<String>,
    category: Option<String>,
    featured: Option<bool>,
    #[serde(alias = "q")]
    search: Option<String>,
    sort: Option<String>,
    limit: Option<usize>,
}

impl ListParams {
    fn into_query(self) -> ApiResult<PostQuery> {
        let status = match self.status.as_deref() {
            None => PostStatus::Published,
            Some(s) => PostStatus::from_slug(s)
                .ok_or_else(|| ApiError::BadRequest(format!("unknown status `{s}`")))?,
        };
        let category = self
            .category
            .as_deref()
            .map(|c| {
                Category::from_slug(c)
                    .ok_or_else(|| ApiError::BadRequest(format!("unknown category `{c}`")))
            })
            .transpose()?;
        let sort = match self.sort.as_deref() {
            None | Some("published_at") | Some("publishedAt") => PostSort::PublishedAt,
            Some("created_at") | Some("createdAt") => PostSort::CreatedAt,
            Some("views") => PostSort::Views,
            Some("likes") => PostSort::Likes,
            Some("title") => PostSort::Title,
            Some(other) => return Err(ApiError::BadRequest(format!("unknown sort `{other}`"))),
        };
        Ok(PostQuery {
            status: Some(status),
            category,
            featured: self.featured,
            search: self.search,
            sort,
            limit: self.limit,
        })
    }
}

async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Post>>> {
    let q = params.into_query()?;
    Ok(Json(state.store.list_posts(&q).await))
}

async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
) -> ApiResult<Json<Post>> {
    Ok(Json(moderation::read_post(state.store.as_ref(), id).await?))
}

#[derive(Debug, Deserialize)]
struct LikeReq {
    liked: bool,
}

async fn like_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
    Json(body): Json<LikeReq>,
) -> ApiResult<Json<Post>> {
    Ok(Json(moderation::set_like(state.store.as_ref(), id, body.liked).await?))
}

// ---------- comments ----------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentReq {
    #[serde(default)]
    author: String,
    #[serde(default)]
    author_email: String,
    #[serde(default)]
    content: String,
}

async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
) -> ApiResult<Json<Vec<Comment>>> {
    state.store.get_post(id).await?;
    Ok(Json(moderation::visible_comments(state.store.as_ref(), id).await))
}

async fn create_comment(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
    Json(body): Json<CommentReq>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    if [&body.author, &body.author_email, &body.content]
        .iter()
        .any(|v| v.trim().is_empty())
    {
        return Err(ApiError::BadRequest(
            "author, authorEmail and content are required".into(),
        ));
    }
    let c = moderation::add_comment(
        state.store.as_ref(),
        NewComment {
            post_id: id,
            author: body.author,
            author_email: body.author_email,
            content: body.content,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(c)))
}

// ---------- moderation ----------

async fn pending(State(state): State<AppState>) -> Json<Vec<Post>> {
    Json(moderation::pending_posts(state.store.as_ref()).await)
}

async fn approve_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
) -> ApiResult<Json<Post>> {
    Ok(Json(moderation::approve_post(state.store.as_ref(), id).await?))
}

#[derive(Debug, Deserialize)]
struct RejectReq {
    #[serde(default)]
    reason: String,
}

async fn reject_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
    Json(body): Json<RejectReq>,
) -> ApiResult<Json<Post>> {
    if body.reason.trim().is_empty() {
        return Err(ApiError::BadRequest("reason is required".into()));
    }
    Ok(Json(
        moderation::reject_post(state.store.as_ref(), id, &body.reason).await?,
    ))
}

async fn reverify_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
) -> ApiResult<Json<Post>> {
    Ok(Json(
        moderation::reverify_post(state.store.as_ref(), &state.verifier, id).await?,
    ))
}

async fn approve_comment(
    State(state): State<AppState>,
    Path(id): Path<CommentId>,
) -> ApiResult<Json<Comment>> {
    Ok(Json(
        moderation::approve_comment(state.store.as_ref(), id).await?,
    ))
}

// ---------- debug ----------

#[derive(Debug, Deserialize)]
struct BreakdownParams {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    /// One source per line.
    #[serde(default)]
    sources: String,
}

#[derive(Debug, Serialize)]
struct BreakdownOut {
    sub_scores: SubScores,
    weights: Weights,
    thresholds: Thresholds,
    result: VerificationResult,
}

/// GET /debug/breakdown?title=...&content=...&sources=...
async fn debug_breakdown(
    State(state): State<AppState>,
    Query(q): Query<BreakdownParams>,
) -> ApiResult<Json<BreakdownOut>> {
    let sources = parse_sources(&q.sources);
    let (sub_scores, _) = state
        .verifier
        .breakdown(&q.title, &q.content, &sources)
        .map_err(|e| ApiError::BadRequest(format!("{e:#}")))?;
    Ok(Json(BreakdownOut {
        sub_scores,
        weights: *state.verifier.weights(),
        thresholds: *state.verifier.thresholds(),
        result: state.verifier.verify(&q.title, &q.content, &sources),
    }))
}
