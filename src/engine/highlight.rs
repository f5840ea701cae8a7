//! Point-level membership queries for hover and search interactions.

use crate::theme::Theme;
use crate::tokenize::{extract_candidate_words, TokenizeMode};

use super::types::{DescriptionLabel, Point};

/// Whether a point's sentence contains the word, via the memoized
/// per-point membership cache.
pub fn is_highlighted(point: &mut Point, word: &str, query_word: &str) -> bool {
    point.membership(query_word).contains(word)
}

/// Color every point whose membership contains `word` with the word's
/// palette entry. Points not containing the word keep whatever color they
/// already have: colors accumulate across calls until `reset_colors`.
pub fn color_by_word(
    points: &mut [Point],
    labels: &[DescriptionLabel],
    word: &str,
    query_word: &str,
    theme: &Theme,
) {
    let Some(palette_idx) = labels.iter().position(|label| label.word == word) else {
        return;
    };
    let color = &theme.dot_palette[palette_idx % theme.dot_palette.len()];
    for point in points.iter_mut() {
        if point.membership(query_word).contains(word) {
            point.color = Some(color.clone());
            point.current_label_word = Some(word.to_string());
        }
    }
}

/// Clear color assignments on all points. Required before recoloring after
/// a label-set change, since the palette is indexed by label order.
pub fn reset_colors(points: &mut [Point]) {
    for point in points.iter_mut() {
        point.color = None;
        point.current_label_word = None;
    }
}

/// Mark points highlighted when their plain-mode word set contains `word`
/// or the active sub-search word. Optionally selects them, too. Passing
/// neither word clears all highlights.
pub fn highlight_by_word(
    points: &mut [Point],
    word: Option<&str>,
    subsearch_word: Option<&str>,
    query_word: &str,
    also_select: bool,
) {
    for point in points.iter_mut() {
        let words = extract_candidate_words(&point.sentence, query_word, TokenizeMode::SEARCH);
        let subsearched = subsearch_word.is_some_and(|w| !w.is_empty() && words.contains(w));
        let highlighted = word.is_some_and(|w| !w.is_empty() && words.contains(w));
        point.highlighted = subsearched || highlighted;
        if also_select {
            point.selected = subsearched || highlighted;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::LAYER_COUNT;

    fn point(sentence: &str) -> Point {
        Point::new(
            sentence.to_string(),
            "NN".to_string(),
            vec![(0.0, 0.0); LAYER_COUNT],
        )
    }

    fn label(word: &str, count: usize) -> DescriptionLabel {
        DescriptionLabel {
            word: word.to_string(),
            count,
            anchor: (0.0, 0.0),
            visible: true,
        }
    }

    #[test]
    fn colors_accumulate_until_reset() {
        let mut points = vec![
            point("a violin by the piano"),
            point("a cello by the piano"),
        ];
        let labels = vec![label("violin", 8), label("cello", 7)];
        let theme = Theme::default();

        color_by_word(&mut points, &labels, "violin", "piano", &theme);
        color_by_word(&mut points, &labels, "cello", "piano", &theme);
        assert_eq!(points[0].current_label_word.as_deref(), Some("violin"));
        assert_eq!(points[1].current_label_word.as_deref(), Some("cello"));
        assert_ne!(points[0].color, points[1].color);

        reset_colors(&mut points);
        assert!(points.iter().all(|p| p.color.is_none()));
        assert!(points.iter().all(|p| p.current_label_word.is_none()));
    }

    #[test]
    fn unknown_word_colors_nothing() {
        let mut points = vec![point("a violin by the piano")];
        let labels = vec![label("violin", 8)];
        color_by_word(&mut points, &labels, "oboe", "piano", &Theme::default());
        assert!(points[0].color.is_none());
    }

    #[test]
    fn highlight_matches_word_or_subsearch() {
        let mut points = vec![
            point("a violin by the piano"),
            point("a cello by the piano"),
            point("an empty room with a piano"),
        ];
        highlight_by_word(&mut points, Some("violin"), Some("cello"), "piano", false);
        assert!(points[0].highlighted);
        assert!(points[1].highlighted);
        assert!(!points[2].highlighted);
        assert!(!points[0].selected);

        highlight_by_word(&mut points, Some("violin"), None, "piano", true);
        assert!(points[0].selected);
        assert!(!points[1].selected);
    }

    #[test]
    fn clearing_words_clears_highlights() {
        let mut points = vec![point("a violin by the piano")];
        highlight_by_word(&mut points, Some("violin"), None, "piano", true);
        assert!(points[0].highlighted);
        highlight_by_word(&mut points, None, None, "piano", true);
        assert!(!points[0].highlighted);
        assert!(!points[0].selected);
    }

    #[test]
    fn membership_query_uses_cache() {
        let mut p = point("a grand piano in the hall");
        assert!(is_highlighted(&mut p, "grand piano", "piano"));
        assert!(is_highlighted(&mut p, "grand", "piano"));
        assert!(!is_highlighted(&mut p, "violin", "piano"));
    }
}
