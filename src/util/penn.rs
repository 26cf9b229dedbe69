//! Penn Treebank tag tables shared by the validator, the subcategorization
//! check and the PARSEVAL constituent extraction.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// The full Penn Treebank tagset, including punctuation labels.
pub(crate) static PENN_TAGS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "CC", "CD", "DT", "EX", "FW", "IN", "JJ", "JJR", "JJS", "LS", "MD", "NN", "NNS", "NNP",
        "NNPS", "PDT", "POS", "PRP", "PRP$", "RB", "RBR", "RBS", "RP", "SYM", "TO", "UH", "VB",
        "VBD", "VBG", "VBN", "VBP", "VBZ", "WDT", "WP", "WP$", "WRB", ".", ",", ":", "''", "``",
        "-LRB-", "-RRB-",
    ]
    .into_iter()
    .collect()
});

pub(crate) static NOUN_TAGS: [&str; 4] = ["NN", "NNS", "NNP", "NNPS"];

pub(crate) static VERB_TAGS: [&str; 6] = ["VB", "VBD", "VBG", "VBN", "VBP", "VBZ"];

/// Tags a determiner may skip over before reaching its noun.
pub(crate) static MODIFIER_TAGS: [&str; 4] = ["JJ", "JJR", "JJS", "RB"];

/// Tags which open a noun phrase directly after a verb.
pub(crate) static NP_START_TAGS: [&str; 8] =
    ["DT", "PRP", "NNP", "NNPS", "CD", "PRP$", "NN", "NNS"];

pub(crate) fn is_penn_tag(label: &str) -> bool {
    PENN_TAGS.contains(label)
}
