use anyhow::{Context, Result};
use axum::{routing::get, Router};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use crate::verification::VerificationResult;

pub const VERIFICATIONS_TOTAL: &str = "verifications_total";
pub const VERIFICATION_FALLBACKS_TOTAL: &str = "verification_fallbacks_total";
pub const VERIFICATION_SCORE: &str = "verification_score";

static GLOBAL: OnceCell<Metrics> = OnceCell::new();

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder. Call once per process.
    pub fn init() -> Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;
        Ok(Self { handle })
    }

    /// Process-wide recorder, installed on first call.
    pub fn global() -> Result<&'static Self> {
        GLOBAL.get_or_try_init(Self::init)
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

/// No-op until a recorder is installed.
pub fn record_verification(r: &VerificationResult) {
    counter!(VERIFICATIONS_TOTAL, "recommendation" => r.recommendation.as_str()).increment(1);
    histogram!(VERIFICATION_SCORE).record(f64::from(r.score));
}

pub fn record_fallback() {
    counter!(VERIFICATION_FALLBACKS_TOTAL).increment(1);
}
