//! Part-of-speech tags and colors, for the POS coloring mode.

/// Penn Treebank tags with readable descriptions, as produced by NLTK.
pub const POS_TAGS: &[(&str, &str)] = &[
    ("CC", "conjunction, coordinating"),
    ("CD", "numeral, cardinal"),
    ("DT", "determiner"),
    ("EX", "existential there"),
    ("FW", "foreign word"),
    ("IN", "preposition or conjunction, subordinating"),
    ("JJ", "adjective or numeral, ordinal"),
    ("JJR", "adjective, comparative"),
    ("JJS", "adjective, superlative"),
    ("LS", "list item marker"),
    ("MD", "modal auxiliary"),
    ("NN", "noun, common, singular or mass"),
    ("NNP", "noun, proper, singular"),
    ("NNPS", "noun, proper, plural"),
    ("NNS", "noun, common, plural"),
    ("PDT", "pre-determiner"),
    ("POS", "genitive marker"),
    ("PRP", "pronoun, personal"),
    ("PRP$", "pronoun, possessive"),
    ("RB", "adverb"),
    ("RBR", "adverb, comparative"),
    ("RBS", "adverb, superlative"),
    ("RP", "particle"),
    ("SYM", "symbol"),
    ("TO", "'to' as preposition or infinitive marker"),
    ("UH", "interjection"),
    ("VB", "verb, base form"),
    ("VBD", "verb, past tense"),
    ("VBG", "verb, present participle or gerund"),
    ("VBN", "verb, past participle"),
    ("VBP", "verb, present tense, not 3rd person singular"),
    ("VBZ", "verb, present tense, 3rd person singular"),
    ("WDT", "WH-determiner"),
    ("WP", "WH-pronoun"),
    ("WP$", "WH-pronoun, possessive"),
    ("WRB", "Wh-adverb"),
];

const POS_PALETTE: &[&str] = &[
    "#440154", "#481f70", "#443983", "#3b528b", "#31688e", "#287c8e", "#21918c", "#20a486",
    "#35b779", "#5ec962", "#90d743", "#c8e020",
];

pub fn pos_description(tag: &str) -> Option<&'static str> {
    POS_TAGS
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, description)| *description)
}

/// Deterministic color for a tag, spread over a viridis-like ramp by the
/// tag's index in the fixed tag list. Unknown tags share the last entry.
pub fn pos_color(tag: &str) -> &'static str {
    let idx = POS_TAGS
        .iter()
        .position(|(t, _)| *t == tag)
        .unwrap_or(POS_TAGS.len() - 1);
    let scaled = idx * (POS_PALETTE.len() - 1) / (POS_TAGS.len() - 1);
    POS_PALETTE[scaled]
}
