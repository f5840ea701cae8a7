//! The label discovery and placement engine.
//!
//! One [`AtlasSession`] owns all state derived from one query word's result
//! set. UI events map to [`RebuildTrigger`]s, each rerunning exactly the
//! stages it invalidates:
//!
//! - `NewQuery`: tokenize + index + cluster + place + recolor
//! - `LayerChange`: cluster + place + recolor (anchors move per layer)
//! - `ZoomChange`: place + recolor only, against cached anchors
//! - `Pan`: nothing; translation does not change which boxes intersect

pub mod cluster;
pub mod highlight;
pub mod index;
pub mod placement;
pub mod types;

pub use cluster::detect_labels;
pub use index::{build_index, Occurrence, OccurrenceIndex};
pub use placement::{font_size, resolve_overlaps, TextMetrics};
pub use types::{AxisAlignedBox, DescriptionLabel, Point, ViewTransform, LAYER_COUNT};

use crate::config::EngineConfig;
use crate::theme::Theme;

/// Which UI event caused a recomputation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RebuildTrigger {
    NewQuery,
    LayerChange(usize),
    ZoomChange(ViewTransform),
    Pan(ViewTransform),
}

/// All engine state for the current query word. A new query word discards
/// the whole session; there is never more than one logical session active.
pub struct AtlasSession {
    pub config: EngineConfig,
    pub theme: Theme,
    pub query_word: String,
    pub points: Vec<Point>,
    pub index: OccurrenceIndex,
    pub labels: Vec<DescriptionLabel>,
    pub current_layer: usize,
    pub transform: ViewTransform,
    pub viewport_width: f32,
    pub subsearch_word: Option<String>,
}

impl AtlasSession {
    /// Default layer; the last one tends to carry the most sense separation.
    pub const DEFAULT_LAYER: usize = 11;

    pub fn new(
        points: Vec<Point>,
        query_word: &str,
        viewport_width: f32,
        config: EngineConfig,
        theme: Theme,
    ) -> Self {
        Self {
            config,
            theme,
            query_word: query_word.to_string(),
            points,
            index: OccurrenceIndex::new(),
            labels: Vec::new(),
            current_layer: Self::DEFAULT_LAYER,
            transform: ViewTransform::identity(),
            viewport_width,
            subsearch_word: None,
        }
    }

    /// Rerun the stages the trigger invalidates.
    pub fn rebuild(&mut self, trigger: RebuildTrigger, metrics: &dyn TextMetrics) {
        match trigger {
            RebuildTrigger::NewQuery => {
                self.index = build_index(&self.points, &self.query_word);
                self.recluster();
                self.place_and_color(metrics);
            }
            RebuildTrigger::LayerChange(layer) => {
                self.current_layer = layer.min(LAYER_COUNT - 1);
                // Layer switches reset the view, as the zoom controller does.
                self.transform = ViewTransform::identity();
                self.recluster();
                self.place_and_color(metrics);
            }
            RebuildTrigger::ZoomChange(transform) => {
                self.transform = transform;
                self.place_and_color(metrics);
            }
            RebuildTrigger::Pan(transform) => {
                self.transform = transform;
            }
        }
    }

    /// Highlight (and optionally select) the points matching `word` or the
    /// session's sub-search word.
    pub fn highlight(&mut self, word: Option<&str>, also_select: bool) {
        highlight::highlight_by_word(
            &mut self.points,
            word,
            self.subsearch_word.as_deref(),
            &self.query_word,
            also_select,
        );
    }

    fn recluster(&mut self) {
        self.labels = detect_labels(
            &self.index,
            self.current_layer,
            self.viewport_width,
            &self.query_word,
            &self.config,
        );
    }

    /// Cull overlapping labels under the current transform, then recolor
    /// points from scratch so dot colors track the surviving labels.
    fn place_and_color(&mut self, metrics: &dyn TextMetrics) {
        highlight::reset_colors(&mut self.points);
        resolve_overlaps(&mut self.labels, self.transform, metrics, &self.config);
        let visible: Vec<String> = self
            .labels
            .iter()
            .filter(|label| label.visible)
            .map(|label| label.word.clone())
            .collect();
        for word in visible {
            highlight::color_by_word(
                &mut self.points,
                &self.labels,
                &word,
                &self.query_word,
                &self.theme,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_metrics::HeuristicTextMetrics;

    // A result set where only "violin" occurs in 6 sentences, clustered
    // together at every layer, plus filler sentences elsewhere.
    fn session() -> AtlasSession {
        let adjectives = ["old", "shiny", "wooden", "broken", "tuned", "antique"];
        let mut points = Vec::new();
        for (i, adjective) in adjectives.iter().enumerate() {
            let mut point = Point::new(
                format!("an {adjective} violin by the piano"),
                "NN".to_string(),
                vec![(100.0 + i as f32, 100.0 + i as f32 * 0.5); LAYER_COUNT],
            );
            // Give layer 3 a different, still tight, location.
            point.coords[3] = (700.0 + i as f32, 300.0);
            points.push(point);
        }
        for (i, color) in ["red", "green", "blue", "cream"].iter().enumerate() {
            points.push(Point::new(
                format!("filler {color} room with a piano"),
                "NN".to_string(),
                vec![(i as f32 * 150.0, 600.0); LAYER_COUNT],
            ));
        }
        AtlasSession::new(
            points,
            "piano",
            1000.0,
            EngineConfig::default(),
            Theme::default(),
        )
    }

    #[test]
    fn new_query_builds_labels_and_colors() {
        let mut session = session();
        session.rebuild(RebuildTrigger::NewQuery, &HeuristicTextMetrics);

        assert!(session.labels.iter().any(|l| l.word == "violin"));
        let colored = session
            .points
            .iter()
            .filter(|p| p.current_label_word.as_deref() == Some("violin"))
            .count();
        assert_eq!(colored, 6);
    }

    #[test]
    fn layer_change_moves_anchors_and_resets_transform() {
        let mut session = session();
        session.rebuild(RebuildTrigger::NewQuery, &HeuristicTextMetrics);
        let anchor_last = session
            .labels
            .iter()
            .find(|l| l.word == "violin")
            .unwrap()
            .anchor;

        session.rebuild(
            RebuildTrigger::ZoomChange(ViewTransform::new(2.0, 0.0, 0.0)),
            &HeuristicTextMetrics,
        );
        session.rebuild(RebuildTrigger::LayerChange(3), &HeuristicTextMetrics);

        let anchor_layer3 = session
            .labels
            .iter()
            .find(|l| l.word == "violin")
            .unwrap()
            .anchor;
        assert_ne!(anchor_last, anchor_layer3);
        assert!(anchor_layer3.0 >= 700.0);
        assert_eq!(session.transform, ViewTransform::identity());
    }

    #[test]
    fn zoom_change_keeps_anchors() {
        let mut session = session();
        session.rebuild(RebuildTrigger::NewQuery, &HeuristicTextMetrics);
        let anchors: Vec<(f32, f32)> = session.labels.iter().map(|l| l.anchor).collect();

        session.rebuild(
            RebuildTrigger::ZoomChange(ViewTransform::new(0.25, 10.0, 10.0)),
            &HeuristicTextMetrics,
        );
        let after: Vec<(f32, f32)> = session.labels.iter().map(|l| l.anchor).collect();
        assert_eq!(anchors, after);
        assert_eq!(session.transform.k, 0.25);
    }

    #[test]
    fn pan_only_stores_the_transform() {
        let mut session = session();
        session.rebuild(RebuildTrigger::NewQuery, &HeuristicTextMetrics);
        let visibility: Vec<bool> = session.labels.iter().map(|l| l.visible).collect();

        session.rebuild(
            RebuildTrigger::Pan(ViewTransform::new(1.0, -400.0, 250.0)),
            &HeuristicTextMetrics,
        );
        let after: Vec<bool> = session.labels.iter().map(|l| l.visible).collect();
        assert_eq!(visibility, after);
        assert_eq!(session.transform.x, -400.0);
    }

    #[test]
    fn subsearch_word_participates_in_highlighting() {
        let mut session = session();
        session.rebuild(RebuildTrigger::NewQuery, &HeuristicTextMetrics);
        session.subsearch_word = Some("filler".to_string());
        session.highlight(None, false);
        let highlighted = session.points.iter().filter(|p| p.highlighted).count();
        assert_eq!(highlighted, 4);
    }
}
