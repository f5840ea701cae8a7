//! Candidate-word extraction from sentence labels.
//!
//! A sentence is reduced to the set of words that could describe the cluster
//! it belongs to: punctuation stripped, digits collapsed to placeholders,
//! stop words and the query word itself removed. When the query word appears
//! in the sentence, the non-stop-word neighbors form two-word compounds with
//! it ("grand piano", "piano keys"), so multi-word senses survive as a unit.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Common English function words, excluded from candidate sets and from
/// compound formation. Must stay sorted: lookup is a binary search.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "back", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "cannot", "could", "did", "do", "does", "doing", "down", "during",
    "each", "even", "few", "first", "for", "from", "further", "get", "go", "had", "has", "have",
    "having", "he", "her", "here", "hers", "herself", "him", "himself", "his", "how", "i", "if",
    "in", "into", "is", "it", "its", "itself", "just", "like", "made", "make", "many", "may",
    "me", "more", "most", "much", "must", "my", "myself", "no", "nor", "not", "now", "of",
    "off", "on", "once", "one", "only", "or", "other", "ought", "our", "ours", "ourselves",
    "out", "over", "own", "said", "same", "she", "should", "so", "some", "such", "than", "that",
    "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
    "those", "through", "time", "to", "too", "two", "under", "until", "up", "upon", "us", "very",
    "was", "way", "we", "well", "were", "what", "when", "where", "which", "while", "who", "whom",
    "why", "will", "with", "would", "you", "your", "yours", "yourself", "yourselves",
];

static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]|_").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static YEARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").unwrap());
static NUMBERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d*$").unwrap());
static NUMERICALS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(st|nd|rd|th)$").unwrap());

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.binary_search(&word).is_ok()
}

/// How candidate words are extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizeMode {
    /// Form two-word compounds from the query word and its neighbors.
    pub compounds: bool,
    /// When a compound is formed, drop the lone neighbor words so
    /// "new york" is kept as a unit while lone "new" is not a candidate.
    pub drop_lone_neighbors: bool,
}

impl TokenizeMode {
    /// Mode used when building the word occurrence index.
    pub const INDEX: Self = Self {
        compounds: true,
        drop_lone_neighbors: true,
    };
    /// Plain search mode, used for highlight and membership queries.
    pub const SEARCH: Self = Self {
        compounds: true,
        drop_lone_neighbors: false,
    };
}

impl Default for TokenizeMode {
    fn default() -> Self {
        Self::SEARCH
    }
}

/// Extract the deduplicated candidate-word set for one sentence.
///
/// Deterministic for fixed inputs. The query word, stop words, and the
/// literal `"constructor"` never appear in the result. If the query word is
/// absent from the sentence, no compounds are formed.
pub fn extract_candidate_words(
    sentence: &str,
    query_word: &str,
    mode: TokenizeMode,
) -> HashSet<String> {
    let stripped = PUNCTUATION.replace_all(sentence, "");
    let collapsed = WHITESPACE.replace_all(&stripped, " ");
    let mut words: Vec<String> = collapsed
        .trim()
        .split(' ')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();

    let query_idx = words.iter().position(|w| w == query_word);

    if mode.compounds
        && let Some(idx) = query_idx
    {
        let sentence_len = words.len();
        if idx > 0 && !is_stop_word(&words[idx - 1]) {
            words.push(format!("{} {}", words[idx - 1], query_word));
        }
        if idx + 1 < sentence_len && !is_stop_word(&words[idx + 1]) {
            words.push(format!("{} {}", query_word, words[idx + 1]));
        }
        if mode.drop_lone_neighbors {
            // Remove the following neighbor first so the preceding index
            // stays valid.
            if idx + 1 < sentence_len {
                words.remove(idx + 1);
            }
            if idx > 0 {
                words.remove(idx - 1);
            }
        }
    }

    words
        .into_iter()
        .map(normalize_digits)
        .filter(|w| !is_stop_word(w))
        .filter(|w| w != query_word)
        .filter(|w| w != "constructor")
        .collect()
}

/// Collapse digit tokens to placeholders so "1999", "1987", ... all count as
/// the same candidate. Applied before stop-word filtering.
fn normalize_digits(word: String) -> String {
    if YEARS.is_match(&word) {
        "[years]".to_string()
    } else if NUMBERS.is_match(&word) {
        "[numbers]".to_string()
    } else if NUMERICALS.is_match(&word) {
        "[numericals]".to_string()
    } else {
        word
    }
}
