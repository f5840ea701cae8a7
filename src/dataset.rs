//! Loading and normalizing the per-word projection dataset.
//!
//! Input is the JSON a projection pipeline writes per query word:
//! `labels` holds one sentence record per point, `data` holds the projected
//! coordinates as `[layer][point][2]`. Every layer is normalized
//! independently so its own extent fills the frame; inter-layer transitions
//! are deliberately not a single affine map.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::config::FrameConfig;
use crate::engine::types::{Point, LAYER_COUNT};

#[derive(Debug, Clone, Deserialize)]
pub struct SentenceRecord {
    pub sentence: String,
    #[serde(default)]
    pub pos: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    pub labels: Vec<SentenceRecord>,
    /// Coordinates indexed `[layer][point]`.
    pub data: Vec<Vec<[f32; 2]>>,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("expected {LAYER_COUNT} layers, found {found}")]
    LayerCount { found: usize },
    #[error("layer {layer} has {found} points, expected {expected}")]
    RaggedLayer {
        layer: usize,
        expected: usize,
        found: usize,
    },
    #[error("{labels} sentence labels for {points} points")]
    LabelMismatch { labels: usize, points: usize },
    #[error("malformed dataset json: {0}")]
    Parse(#[from] serde_json::Error),
}

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

pub fn parse_dataset(json: &str) -> Result<Dataset, DatasetError> {
    let dataset: Dataset = serde_json::from_str(json)?;
    validate(&dataset)?;
    Ok(dataset)
}

fn validate(dataset: &Dataset) -> Result<(), DatasetError> {
    if dataset.data.len() != LAYER_COUNT {
        return Err(DatasetError::LayerCount {
            found: dataset.data.len(),
        });
    }
    let expected = dataset.data[0].len();
    for (layer, points) in dataset.data.iter().enumerate() {
        if points.len() != expected {
            return Err(DatasetError::RaggedLayer {
                layer,
                expected,
                found: points.len(),
            });
        }
    }
    if dataset.labels.len() != expected {
        return Err(DatasetError::LabelMismatch {
            labels: dataset.labels.len(),
            points: expected,
        });
    }
    Ok(())
}

/// Map every layer's coordinates into the frame, each layer independently
/// min-max scaled so its own x/y extent fills the viewport minus margins.
pub fn center_frame(data: &mut [Vec<[f32; 2]>], frame: &FrameConfig) {
    let x_range = (
        frame.margin + frame.right_offset,
        frame.width - frame.margin * 5.0,
    );
    let y_range = (frame.margin, frame.height - frame.margin);

    for layer in data.iter_mut() {
        if layer.is_empty() {
            continue;
        }
        let (mut min_x, mut max_x) = (f32::INFINITY, f32::NEG_INFINITY);
        let (mut min_y, mut max_y) = (f32::INFINITY, f32::NEG_INFINITY);
        for &[x, y] in layer.iter() {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        for point in layer.iter_mut() {
            point[0] = rescale(point[0], min_x, max_x, x_range);
            point[1] = rescale(point[1], min_y, max_y, y_range);
        }
    }
}

fn rescale(value: f32, min: f32, max: f32, range: (f32, f32)) -> f32 {
    let span = max - min;
    if span == 0.0 {
        // A degenerate extent maps to the middle of the range.
        return (range.0 + range.1) / 2.0;
    }
    range.0 + (value - min) / span * (range.1 - range.0)
}

/// Parse, validate, normalize, and assemble one `Point` per sentence.
/// Sentences are lowercased with whitespace collapsed.
pub fn build_points(json: &str, frame: &FrameConfig) -> Result<Vec<Point>, DatasetError> {
    let mut dataset = parse_dataset(json)?;
    center_frame(&mut dataset.data, frame);

    let count = dataset.labels.len();
    let mut points = Vec::with_capacity(count);
    for (i, record) in dataset.labels.iter().enumerate() {
        let sentence = WHITESPACE
            .replace_all(record.sentence.trim(), " ")
            .to_lowercase();
        let coords = (0..LAYER_COUNT)
            .map(|layer| {
                let [x, y] = dataset.data[layer][i];
                (x, y)
            })
            .collect();
        points.push(Point::new(sentence, record.pos.clone(), coords));
    }
    Ok(points)
}
