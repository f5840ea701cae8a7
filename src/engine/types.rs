use std::collections::HashSet;

use crate::tokenize::{self, TokenizeMode};

/// Number of network layers a point carries coordinates for.
pub const LAYER_COUNT: usize = 12;

/// Zoom scale extent, matching the pan/zoom controller's constraint.
pub const ZOOM_EXTENT: (f32, f32) = (1.0 / 32.0, 4.0);

/// One sentence in the result set: its normalized text and its projected
/// coordinate at every layer, plus the mutable display state the engine
/// maintains for it.
#[derive(Debug, Clone)]
pub struct Point {
    /// Sentence text, lowercased with whitespace collapsed.
    pub sentence: String,
    /// Part-of-speech tag of the query word in this sentence.
    pub pos: String,
    /// One 2D coordinate per layer, in data space.
    pub coords: Vec<(f32, f32)>,
    pub selected: bool,
    pub highlighted: bool,
    /// Assigned palette color, if a description label claimed this point.
    pub color: Option<String>,
    /// Which description word colored this point.
    pub current_label_word: Option<String>,
    membership: Option<HashSet<String>>,
}

impl Point {
    pub fn new(sentence: String, pos: String, coords: Vec<(f32, f32)>) -> Self {
        Self {
            sentence,
            pos,
            coords,
            selected: false,
            highlighted: false,
            color: None,
            current_label_word: None,
            membership: None,
        }
    }

    pub fn coord(&self, layer: usize) -> (f32, f32) {
        self.coords[layer]
    }

    /// The candidate-word set of this point's sentence, built lazily on the
    /// first query and cached for the life of the point.
    pub fn membership(&mut self, query_word: &str) -> &HashSet<String> {
        self.membership.get_or_insert_with(|| {
            tokenize::extract_candidate_words(&self.sentence, query_word, TokenizeMode::SEARCH)
        })
    }
}

/// A description word that earned a label: how often it occurs, where its
/// cluster anchors at the active layer, and whether it survived overlap
/// resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionLabel {
    pub word: String,
    pub count: usize,
    /// Representative coordinate in the active layer's data space. Screen
    /// conversion happens only at placement time.
    pub anchor: (f32, f32),
    pub visible: bool,
}

/// The current pan/zoom mapping from data space to screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub k: f32,
    pub x: f32,
    pub y: f32,
}

impl ViewTransform {
    pub fn identity() -> Self {
        Self {
            k: 1.0,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn new(k: f32, x: f32, y: f32) -> Self {
        Self {
            k: k.clamp(ZOOM_EXTENT.0, ZOOM_EXTENT.1),
            x,
            y,
        }
    }

    pub fn apply(&self, point: (f32, f32)) -> (f32, f32) {
        (point.0 * self.k + self.x, point.1 * self.k + self.y)
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Screen-space bounding box of a rendered label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAlignedBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl AxisAlignedBox {
    pub fn intersects(&self, other: &AxisAlignedBox) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_scale_is_clamped() {
        assert_eq!(ViewTransform::new(100.0, 0.0, 0.0).k, ZOOM_EXTENT.1);
        assert_eq!(ViewTransform::new(0.0, 0.0, 0.0).k, ZOOM_EXTENT.0);
    }

    #[test]
    fn transform_applies_scale_then_translate() {
        let t = ViewTransform::new(2.0, 10.0, -5.0);
        assert_eq!(t.apply((3.0, 4.0)), (16.0, 3.0));
    }

    #[test]
    fn boxes_touching_at_edges_do_not_intersect() {
        let a = AxisAlignedBox {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        let b = AxisAlignedBox {
            x: 10.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        assert!(!a.intersects(&b));
        let c = AxisAlignedBox {
            x: 9.0,
            y: 9.0,
            width: 10.0,
            height: 10.0,
        };
        assert!(a.intersects(&c));
    }

    #[test]
    fn membership_is_cached() {
        let mut point = Point::new(
            "the grand piano sounded great".to_string(),
            "NN".to_string(),
            vec![(0.0, 0.0); LAYER_COUNT],
        );
        assert!(point.membership("piano").contains("grand piano"));
        // Second call hits the cache.
        assert!(point.membership("piano").contains("sounded"));
    }
}
