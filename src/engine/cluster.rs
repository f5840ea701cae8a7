//! Decides which candidate words form a tight enough spatial cluster to
//! deserve a label, and where that label anchors.

use std::cmp::Ordering;

use crate::config::EngineConfig;

use super::index::OccurrenceIndex;
use super::types::DescriptionLabel;

/// Distance between two projected points.
///
/// Degenerates to the signed horizontal difference when the y-coordinates
/// are exactly equal. This affects tie behavior when distances are sorted
/// (a negative difference sorts before 0) and is preserved deliberately.
pub(crate) fn dist(a: (f32, f32), b: (f32, f32)) -> f32 {
    if a.1 == b.1 {
        return b.0 - a.0;
    }
    (b.0 - a.0).hypot(b.1 - a.1)
}

/// Full pairwise distance matrix, flattened row-major to an `n * n` list,
/// self-distances included.
fn pairwise_dists(points: &[(f32, f32)]) -> Vec<f32> {
    let mut dists = Vec::with_capacity(points.len() * points.len());
    for a in points {
        for b in points {
            dists.push(dist(*a, *b));
        }
    }
    dists
}

/// For each sufficiently frequent candidate word, decide whether its
/// occurrences cluster tightly enough at `active_layer` to be labeled, and
/// compute the label's anchor. Returned labels are sorted by count
/// descending, ties broken by word order.
pub fn detect_labels(
    index: &OccurrenceIndex,
    active_layer: usize,
    viewport_width: f32,
    query_word: &str,
    config: &EngineConfig,
) -> Vec<DescriptionLabel> {
    let mut labels = Vec::new();
    for (word, occurrences) in index {
        let count = occurrences.len();
        if count <= config.min_occurrences || word == query_word {
            continue;
        }

        let layer_points: Vec<(f32, f32)> = occurrences
            .iter()
            .map(|occurrence| occurrence.coords[active_layer])
            .collect();
        let dists = pairwise_dists(&layer_points);
        let mut sorted = dists.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        // The spread is a percentile of the flattened distance list: the
        // median for small clusters, the 25th percentile (with a looser
        // bound) for large ones, which naturally carry more outliers.
        let max_spread = viewport_width / config.spread_fraction;
        let visible = if count < config.large_cluster_count {
            sorted[sorted.len() / 2] < max_spread
        } else {
            sorted[sorted.len() / 4] < max_spread * config.large_cluster_slack
        };

        if visible {
            let anchor = cluster_anchor(&dists, count, &layer_points, config.core_divisor);
            labels.push(DescriptionLabel {
                word: word.clone(),
                count,
                anchor,
                visible: true,
            });
        }
    }
    labels.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    labels
}

/// Anchor a label at the mean of its cluster core: the `ceil(count / divisor)`
/// occurrences with the lowest mean distance to all others. The core is never
/// empty; for counts just above the gate it is a single occurrence, so the
/// anchor coincides with the most central point.
fn cluster_anchor(
    dists: &[f32],
    count: usize,
    layer_points: &[(f32, f32)],
    core_divisor: usize,
) -> (f32, f32) {
    let mut mean_dists: Vec<(usize, f32)> = (0..count)
        .map(|i| {
            let row = &dists[i * count..(i + 1) * count];
            (i, row.iter().sum::<f32>() / count as f32)
        })
        .collect();
    mean_dists.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    let core_size = count.div_ceil(core_divisor);
    let core = &mean_dists[..core_size];
    let (sum_x, sum_y) = core.iter().fold((0.0, 0.0), |acc, &(i, _)| {
        (acc.0 + layer_points[i].0, acc.1 + layer_points[i].1)
    });
    (sum_x / core_size as f32, sum_y / core_size as f32)
}
