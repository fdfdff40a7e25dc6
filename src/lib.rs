// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod analyze;
pub mod api;
pub mod config;
pub mod lexicon;
pub mod logging;
pub mod metrics;
pub mod moderation;
pub mod publish;
pub mod registry;
pub mod store;
pub mod verification;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tracing::info;

pub use crate::analyze::{default_verifier, verify_content, ContentVerifier};
pub use crate::api::{router, AppState};
pub use crate::config::VerifierConfig;
pub use crate::store::{InMemoryStore, PostStore};
pub use crate::verification::{Recommendation, SourceType, VerificationResult, VerifiedSource};

/// Build the full application router from env/config: verifier, in-memory
/// store, and the `/metrics` + `/debug/*` routes when `DEBUG_ROUTES=1`.
/// The metrics recorder is installed either way.
pub async fn app() -> Result<Router> {
    let metrics = crate::metrics::Metrics::global()?;
    let cfg = VerifierConfig::load().context("loading verifier config")?;
    let verifier = ContentVerifier::from_config(&cfg).context("building verifier")?;
    info!(
        target: "verifier",
        approve = verifier.thresholds().approve,
        review = verifier.thresholds().review,
        "verifier ready"
    );

    let state = AppState::new(Arc::new(verifier), Arc::new(InMemoryStore::new()));
    let mut app = router(state);

    if api::debug_routes_enabled() {
        app = app.merge(metrics.router());
        info!(target: "verifier", "debug routes enabled");
    }
    Ok(app)
}
