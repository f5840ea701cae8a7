use std::collections::BTreeMap;

use crate::tokenize::{extract_candidate_words, TokenizeMode};

use super::types::Point;

/// All places a candidate word occurs: one entry per point whose sentence
/// contains the word, carrying that point's full per-layer coordinates.
#[derive(Debug, Clone)]
pub struct Occurrence {
    /// Index of the contributing point in the session's point array.
    pub point: usize,
    /// The point's coordinate at every layer.
    pub coords: Vec<(f32, f32)>,
}

/// Candidate word -> occurrences, in deterministic word order.
pub type OccurrenceIndex = BTreeMap<String, Vec<Occurrence>>;

/// Aggregate, across all points, which candidate words occur where.
///
/// A point contributes at most one occurrence per distinct word: duplicate
/// mentions within one sentence collapse, and two tokenizations yielding the
/// same word do not double-count. Points are not mutated.
pub fn build_index(points: &[Point], query_word: &str) -> OccurrenceIndex {
    let mut index = OccurrenceIndex::new();
    for (i, point) in points.iter().enumerate() {
        let words = extract_candidate_words(&point.sentence, query_word, TokenizeMode::INDEX);
        for word in words {
            let entry = index.entry(word).or_default();
            if entry.iter().any(|occurrence| occurrence.point == i) {
                continue;
            }
            entry.push(Occurrence {
                point: i,
                coords: point.coords.clone(),
            });
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::LAYER_COUNT;

    fn point(sentence: &str) -> Point {
        Point::new(
            sentence.to_string(),
            "NN".to_string(),
            vec![(1.0, 2.0); LAYER_COUNT],
        )
    }

    #[test]
    fn one_occurrence_per_point_per_word() {
        let points = vec![point("the violin and the violin again near the piano")];
        let index = build_index(&points, "piano");
        assert_eq!(index["violin"].len(), 1);
    }

    #[test]
    fn occurrences_follow_point_iteration_order() {
        let points = vec![
            point("a violin by the piano"),
            point("another violin near a piano"),
        ];
        let index = build_index(&points, "piano");
        let ids: Vec<usize> = index["violin"].iter().map(|o| o.point).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn occurrences_carry_all_layer_coords() {
        let points = vec![point("a violin by the piano")];
        let index = build_index(&points, "piano");
        assert_eq!(index["violin"][0].coords.len(), LAYER_COUNT);
    }

    #[test]
    fn empty_sentences_contribute_nothing() {
        let points = vec![point("")];
        assert!(build_index(&points, "piano").is_empty());
    }
}
