use std::path::Path;

use context_atlas::atlas_dump::AtlasDump;
use context_atlas::config::Config;
use context_atlas::dataset::build_points;
use context_atlas::engine::{AtlasSession, RebuildTrigger, ViewTransform};
use context_atlas::render::render_svg;
use context_atlas::text_metrics::HeuristicTextMetrics;

fn fixture_session() -> (AtlasSession, Config) {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("piano.json");
    let json = std::fs::read_to_string(path).expect("fixture read failed");
    let config = Config::default();
    let points = build_points(&json, &config.frame).expect("fixture should be well-formed");
    let mut session = AtlasSession::new(
        points,
        "piano",
        config.frame.width,
        config.engine.clone(),
        config.theme.clone(),
    );
    session.rebuild(RebuildTrigger::NewQuery, &HeuristicTextMetrics);
    (session, config)
}

#[test]
fn tight_cluster_earns_a_visible_label() {
    let (session, config) = fixture_session();

    let violin = session
        .labels
        .iter()
        .find(|label| label.word == "violin")
        .expect("six clustered occurrences clear the count gate");
    assert_eq!(violin.count, 6);
    assert!(violin.visible);

    // The anchor sits inside the cluster, in frame coordinates.
    let x_range = (
        config.frame.margin + config.frame.right_offset,
        config.frame.width - config.frame.margin * 5.0,
    );
    assert!(violin.anchor.0 > x_range.0 && violin.anchor.0 < x_range.1);

    // The colored points are exactly the violin sentences.
    let colored: Vec<&str> = session
        .points
        .iter()
        .filter(|p| p.current_label_word.as_deref() == Some("violin"))
        .map(|p| p.sentence.as_str())
        .collect();
    assert_eq!(colored.len(), 6);
    assert!(colored.iter().all(|s| s.contains("violin")));
}

#[test]
fn diffuse_layer_drops_the_label() {
    let (mut session, _) = fixture_session();
    assert!(session.labels.iter().any(|label| label.word == "violin"));

    // At layer 0 the same sentences are scattered around a circle.
    session.rebuild(RebuildTrigger::LayerChange(0), &HeuristicTextMetrics);
    assert!(!session.labels.iter().any(|label| label.word == "violin"));
    // No label means no claimed points.
    assert!(session.points.iter().all(|p| p.color.is_none()));
}

#[test]
fn zoom_reculls_without_moving_anchors() {
    let (mut session, _) = fixture_session();
    let anchors: Vec<(f32, f32)> = session.labels.iter().map(|l| l.anchor).collect();

    session.rebuild(
        RebuildTrigger::ZoomChange(ViewTransform::new(1.0 / 16.0, 0.0, 0.0)),
        &HeuristicTextMetrics,
    );
    let after: Vec<(f32, f32)> = session.labels.iter().map(|l| l.anchor).collect();
    assert_eq!(anchors, after);
}

#[test]
fn subsearch_highlights_matching_sentences() {
    let (mut session, _) = fixture_session();
    session.subsearch_word = Some("far".to_string());
    session.highlight(None, false);
    assert_eq!(session.points.iter().filter(|p| p.highlighted).count(), 4);

    session.highlight(Some("violin"), true);
    assert_eq!(session.points.iter().filter(|p| p.highlighted).count(), 10);
    assert_eq!(session.points.iter().filter(|p| p.selected).count(), 10);
}

#[test]
fn svg_and_dump_reflect_session_state() {
    let (session, config) = fixture_session();

    let svg = render_svg(&session, &config.frame, false);
    assert!(svg.contains("<svg") && svg.contains("</svg>"));
    assert!(svg.contains(">violin</text>"));

    let dump = AtlasDump::from_session(&session);
    assert_eq!(dump.word, "piano");
    assert_eq!(dump.layer, AtlasSession::DEFAULT_LAYER);
    assert_eq!(dump.points.len(), 10);
    let json = serde_json::to_string(&dump).unwrap();
    assert!(json.contains("\"violin\""));
}
