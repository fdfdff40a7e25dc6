// tests/config_loading.rs
//
// Config resolution from env + file, and the app() wiring that depends on it.
// Everything here mutates process env, so tests run serially.

use std::io::Write as _;

use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use serial_test::serial;
use tower::ServiceExt;

use content_credibility::config::{
    ENV_APPROVE_THRESHOLD, ENV_REVIEW_THRESHOLD, ENV_VERIFIER_CONFIG_PATH,
};
use content_credibility::{ContentVerifier, Recommendation, VerifierConfig};

fn clear_env() {
    for k in [
        ENV_VERIFIER_CONFIG_PATH,
        ENV_APPROVE_THRESHOLD,
        ENV_REVIEW_THRESHOLD,
        "DEBUG_ROUTES",
    ] {
        std::env::remove_var(k);
    }
}

fn write_config(body: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().expect("temp file");
    f.write_all(body.as_bytes()).expect("write config");
    f
}

#[test]
#[serial]
fn env_path_is_used_and_lists_are_merged() {
    clear_env();
    let f = write_config(
        r#"
[sources]
academic = ["example-blog.net"]

[scoring]
approve_threshold = 70
review_threshold = 50
"#,
    );
    std::env::set_var(ENV_VERIFIER_CONFIG_PATH, f.path());

    let cfg = VerifierConfig::load().expect("load config");
    assert_eq!(cfg.thresholds().approve, 70);
    assert_eq!(cfg.thresholds().review, 50);

    let v = ContentVerifier::from_config(&cfg).expect("verifier");
    let r = v.verify("t", "c", &["https://example-blog.net/x", "https://arxiv.org/abs/1"]);
    assert_eq!(r.sources[0].credibility_score, 95);
    // arxiv.org is no longer academic; .org suffix applies
    assert_eq!(r.sources[1].credibility_score, 75);
    clear_env();
}

#[test]
#[serial]
fn missing_env_path_is_an_error() {
    clear_env();
    std::env::set_var(ENV_VERIFIER_CONFIG_PATH, "/definitely/not/here.toml");
    let err = VerifierConfig::load().unwrap_err();
    assert!(err.to_string().contains("non-existent"), "{err}");
    clear_env();
}

#[test]
#[serial]
fn threshold_env_overrides_file_values() {
    clear_env();
    let f = write_config("[scoring]\napprove_threshold = 90\n");
    std::env::set_var(ENV_VERIFIER_CONFIG_PATH, f.path());
    std::env::set_var(ENV_APPROVE_THRESHOLD, "100");
    std::env::set_var(ENV_REVIEW_THRESHOLD, "0");

    let cfg = VerifierConfig::load().expect("load config");
    assert_eq!(cfg.thresholds().approve, 100);
    assert_eq!(cfg.thresholds().review, 0);

    // Nothing can be rejected now.
    let v = ContentVerifier::from_config(&cfg).unwrap();
    let r = v.verify("BOMBA: fake news!!!!!!", "", &[] as &[&str]);
    assert_eq!(r.recommendation, Recommendation::Review);
    clear_env();
}

#[test]
#[serial]
fn inverted_env_thresholds_fail_validation() {
    clear_env();
    let f = write_config("");
    std::env::set_var(ENV_VERIFIER_CONFIG_PATH, f.path());
    std::env::set_var(ENV_REVIEW_THRESHOLD, "95");

    let err = VerifierConfig::load().unwrap_err();
    assert!(err.to_string().contains("review <= approve"), "{err}");
    clear_env();
}

#[test]
#[serial]
fn malformed_file_reports_its_path() {
    clear_env();
    let f = write_config("[scoring\nw_language = ");
    std::env::set_var(ENV_VERIFIER_CONFIG_PATH, f.path());
    let err = VerifierConfig::load().unwrap_err();
    assert!(
        format!("{err:#}").contains(&f.path().display().to_string()),
        "{err:#}"
    );
    clear_env();
}

#[tokio::test]
#[serial]
async fn debug_app_exposes_metrics_series() {
    clear_env();
    std::env::set_var("DEBUG_ROUTES", "1");
    let app = content_credibility::app().await.expect("app");

    let req = Request::post("/verify")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"title":"Guia","content":"Texto curto"}"#))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body::to_bytes(resp.into_body(), 1_048_576).await.unwrap();
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("verifications_total"), "{text}");
    assert!(text.contains("verification_score"), "{text}");
    clear_env();
}
