//! Greedy overlap culling for description labels.
//!
//! Labels arrive sorted by count descending, so higher-frequency labels get
//! first claim on screen space. Each label's box is measured at its
//! transformed screen position; a label that intersects any previously kept
//! box is hidden and claims no space itself.

use crate::config::EngineConfig;

use super::types::{AxisAlignedBox, DescriptionLabel, ViewTransform};

/// Text measurement capability, so placement stays host-independent.
/// Implementations measure the box a word would occupy when rendered at
/// `position` (text baseline origin) with the given font size.
pub trait TextMetrics {
    fn measure(&self, text: &str, font_size: f32, position: (f32, f32)) -> AxisAlignedBox;
}

/// Label font size grows sub-linearly with occurrence count and is capped.
pub fn font_size(label: &DescriptionLabel, config: &EngineConfig) -> f32 {
    ((label.count as f32).sqrt() * config.font_scale).min(config.font_cap)
}

/// Mutate the `visible` flags so that no two visible labels overlap on
/// screen under `transform`.
///
/// O(n^2) box tests; label counts are small after frequency/spread
/// filtering. Must re-run when the zoom scale changes. A pure pan only
/// translates every box uniformly, so re-running is wasteful but correct.
pub fn resolve_overlaps(
    labels: &mut [DescriptionLabel],
    transform: ViewTransform,
    metrics: &dyn TextMetrics,
    config: &EngineConfig,
) {
    let mut placed: Vec<AxisAlignedBox> = Vec::new();
    for label in labels.iter_mut() {
        let position = transform.apply(label.anchor);
        let bbox = metrics.measure(&label.word, font_size(label, config), position);
        if placed.iter().any(|kept| kept.intersects(&bbox)) {
            label.visible = false;
        } else {
            label.visible = true;
            placed.push(bbox);
        }
    }
}
