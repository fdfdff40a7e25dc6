// tests/verify_properties.rs
//
// Behavioural checks of the public scorer through `verify_content` and the
// shared default verifier.

use content_credibility::analyze::sources::NO_SOURCE_WARNING;
use content_credibility::analyze::Dimension;
use content_credibility::{
    default_verifier, verify_content, Recommendation, SourceType, VerificationResult,
};

const SCENARIO_TITLE: &str = "URGENTE: descoberta revolucionária!!!";

fn scenario_content() -> String {
    [
        "This article describes how the public API of the city transit system was documented during 2024, \
         and how HTTP calls are grouped by route so that mobile clients can poll timetables without hammering the servers.",
        "Each REST endpoint returns stop names, planned departures and delay notices. The notes below summarise the \
         request limits, the paging rules and the caching headers that clients should respect when polling for changes, \
         plus a short checklist for teams that mirror the feed into their own dashboards and want to keep their copies \
         fresh without extra load.",
    ]
    .join("\n\n")
}

fn band_of(score: u8) -> Recommendation {
    if score >= 80 {
        Recommendation::Approve
    } else if score >= 60 {
        Recommendation::Review
    } else {
        Recommendation::Reject
    }
}

fn samples() -> Vec<(String, String, Vec<String>)> {
    vec![
        ("".into(), "".into(), vec![]),
        (
            "Guia de TLS".into(),
            "Configurando TLS 1.3 em 2024.\n\nPasso a passo com exemplos.".into(),
            vec!["https://www.ieee.org/paper".into()],
        ),
        (
            "BOMBA: CHOCANTE: governo esconde verdade oculta!!!!!!".into(),
            "fake news conspiração método secreto médicos odeiam".into(),
            vec!["not a url".into(), "".into(), "http://example-blog.net".into()],
        ),
        (SCENARIO_TITLE.into(), scenario_content(), vec!["https://scholar.google.com/x".into()]),
    ]
}

#[tokio::test]
async fn score_is_bounded_and_recommendation_follows_the_bands() {
    for (title, content, sources) in samples() {
        let r = verify_content(&title, &content, &sources).await;
        assert!(r.score <= 100, "score out of range for {title:?}");
        assert_eq!(r.recommendation, band_of(r.score), "band mismatch for {title:?}");
        assert_eq!(r.is_verified, r.recommendation == Recommendation::Approve);
    }
}

#[tokio::test]
async fn one_verified_source_per_non_blank_input_in_order() {
    let sources = vec![
        "https://arxiv.org/abs/1".to_string(),
        "   ".to_string(),
        "example-blog.net/post".to_string(),
        "".to_string(),
        "https://www.gov.br/anpd".to_string(),
    ];
    let r = verify_content("t", "c", &sources).await;
    let urls: Vec<&str> = r.sources.iter().map(|s| s.url.as_str()).collect();
    assert_eq!(
        urls,
        vec!["https://arxiv.org/abs/1", "example-blog.net/post", "https://www.gov.br/anpd"]
    );
    assert_eq!(r.sources[2].domain, "gov.br");
    assert_eq!(r.sources[2].source_type, SourceType::Government);
}

#[test]
fn no_sources_means_neutral_source_score_and_a_warning() {
    let v = default_verifier();
    let (subs, findings) = v
        .breakdown("title", "content", &["", "  "])
        .expect("breakdown");
    assert_eq!(subs.get(Dimension::Sources), 50.0);
    assert!(findings.warnings.iter().any(|w| w == NO_SOURCE_WARNING));
    assert!(findings.sources.is_empty());
}

#[tokio::test]
async fn shouting_and_exclamations_hit_the_language_score() {
    let v = default_verifier();
    let (subs, findings) = v
        .breakdown("Look at THIS", "wow! really! no! way!", &[] as &[&str])
        .expect("breakdown");
    assert!(subs.language < 100.0);
    let language_warnings: Vec<&String> = findings
        .warnings
        .iter()
        .filter(|w| w.starts_with("Sensationalist") || w.starts_with("Excessive"))
        .collect();
    assert!(language_warnings.len() >= 2, "{language_warnings:?}");
}

#[tokio::test]
async fn trusted_and_unknown_domains_are_classified() {
    let r = verify_content(
        "t",
        "c",
        &["https://scholar.google.com/citations?q=x", "https://example-blog.net/a"],
    )
    .await;
    assert_eq!(r.sources[0].domain, "scholar.google.com");
    assert_eq!(r.sources[0].credibility_score, 95);
    assert_eq!(r.sources[0].source_type, SourceType::Academic);
    assert_eq!(r.sources[1].domain, "example-blog.net");
    assert_eq!(r.sources[1].credibility_score, 60);
    assert_eq!(r.sources[1].source_type, SourceType::Unknown);
}

#[test]
fn fake_news_costs_fifteen_points_once() {
    let v = default_verifier();
    let (subs, findings) = v
        .breakdown("Sobre FAKE News", "texto", &[] as &[&str])
        .expect("breakdown");
    assert_eq!(subs.keywords, 85.0);
    let hits: Vec<&String> = findings
        .warnings
        .iter()
        .filter(|w| w.contains("fake news"))
        .collect();
    assert_eq!(hits, vec!["Suspicious keyword found: \"fake news\""]);
}

#[tokio::test]
async fn repeated_calls_agree() {
    for (title, content, sources) in samples() {
        let a: VerificationResult = verify_content(&title, &content, &sources).await;
        let b = verify_content(&title, &content, &sources).await;
        assert_eq!(a, b);
    }
}

#[tokio::test]
async fn sensational_title_with_good_body_lands_in_review() {
    let content = scenario_content();
    let sources = ["https://scholar.google.com/x"];

    let (subs, _) = default_verifier()
        .breakdown(SCENARIO_TITLE, &content, &sources)
        .expect("breakdown");
    assert_eq!(subs.sources, 95.0);
    assert_eq!(subs.keywords, 85.0);
    assert_eq!(subs.structure, 100.0);
    // URGENTE: + !!! + four capitalised tokens
    assert_eq!(subs.language, 40.0);
    assert_eq!(subs.category, 70.0);

    let r = verify_content(SCENARIO_TITLE, &content, &sources).await;
    assert_eq!(r.score, 79);
    assert_eq!(r.recommendation, Recommendation::Review);
    assert!(!r.is_verified);
    assert_eq!(
        r.warnings,
        vec![
            "Sensationalist language detected: URGENTE:".to_string(),
            "Sensationalist language detected: !!!".to_string(),
            "Sensationalist language detected: URGENTE, API, HTTP, REST".to_string(),
            "Suspicious keyword found: \"descoberta revolucionária\"".to_string(),
            "Content may be miscategorized".to_string(),
        ]
    );
}
