//! Lexicon files and the external tagger contract.
//!
//! A [Lexicon] carries the `POS -> word` lists merged from one or more JSON
//! files and attaches them to a grammar as terminal rules. A
//! [FeatureLexicon] maps words to their per-POS morphological feature
//! entries. The [ITagging] trait is the seam an external morphological
//! tagger plugs into; [LexiconTagger] is the small in-crate implementation
//! backed by the feature lexicon.


use crate::{
    FeatureLexicon, FeatureMap, Grammar, GrammarError, ITagging, Lexicon, LexiconTagger,
    ParseError, TaggedSentence,
};
use serde_json::Value;
use std::path::Path;

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(text: &str) -> Result<Self, GrammarError> {
        let mut lexicon = Lexicon::new();
        lexicon.merge_json(text)?;
        Ok(lexicon)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GrammarError> {
        let mut lexicon = Lexicon::new();
        lexicon.merge_json_file(path)?;
        Ok(lexicon)
    }

    /// Merge a `{ "POS": ["word", ...], ... }` object into the lexicon,
    /// lowercasing every word. Returns the number of new words.
    pub fn merge_json(&mut self, text: &str) -> Result<usize, GrammarError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|err| GrammarError::new("lexicon", err.to_string()))?;
        let entries = value
            .as_object()
            .ok_or_else(|| GrammarError::new("lexicon", "expected a JSON object"))?;

        let mut added = 0;
        for (pos, words) in entries {
            let words = words
                .as_array()
                .ok_or_else(|| GrammarError::new(pos.clone(), "lexicon entry is not an array"))?;
            let class = self.entries.entry(pos.clone()).or_default();
            for word in words {
                let word = word.as_str().ok_or_else(|| {
                    GrammarError::new(pos.clone(), "lexicon word is not a string")
                })?;
                let word = word.to_lowercase();
                if !class.contains(&word) {
                    class.push(word);
                    added += 1;
                }
            }
        }
        Ok(added)
    }

    pub fn merge_json_file(&mut self, path: impl AsRef<Path>) -> Result<usize, GrammarError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| GrammarError::new(path.display().to_string(), err.to_string()))?;
        self.merge_json(&text)
    }

    pub fn pos_tags(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn words(&self, pos: &str) -> Option<&Vec<String>> {
        self.entries.get(pos)
    }

    /// Total number of words over all POS classes.
    pub fn word_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Attach every `POS -> word` pair to the grammar as a terminal rule.
    /// Returns the number of rules actually added.
    pub fn attach_to_grammar(&self, grammar: &mut Grammar) -> usize {
        let mut added = 0;
        for (pos, words) in &self.entries {
            for word in words {
                let production = vec![word.clone()];
                let new = grammar
                    .productions(pos)
                    .map(|productions| !productions.contains(&production))
                    .unwrap_or(true);
                if new {
                    added += 1;
                }
                grammar.add_production(pos, production);
            }
        }
        added
    }
}

impl FeatureLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `{ "word": [ { "pos": "NN", "lemma": "book", ... }, ... ] }`
    /// object. Entry values that are not strings are ignored.
    pub fn from_json(text: &str) -> Result<Self, GrammarError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|err| GrammarError::new("feature lexicon", err.to_string()))?;
        let words = value
            .as_object()
            .ok_or_else(|| GrammarError::new("feature lexicon", "expected a JSON object"))?;

        let mut lexicon = FeatureLexicon::new();
        for (word, entries) in words {
            let entries = entries.as_array().ok_or_else(|| {
                GrammarError::new(word.clone(), "feature lexicon entry is not an array")
            })?;
            for entry in entries {
                let entry = entry.as_object().ok_or_else(|| {
                    GrammarError::new(word.clone(), "feature entry is not an object")
                })?;
                let features: FeatureMap = entry
                    .iter()
                    .filter_map(|(key, value)| {
                        value.as_str().map(|value| (key.clone(), value.to_string()))
                    })
                    .collect();
                lexicon.insert(word, features);
            }
        }
        Ok(lexicon)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GrammarError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| GrammarError::new(path.display().to_string(), err.to_string()))?;
        Self::from_json(&text)
    }

    pub fn insert(&mut self, word: &str, features: FeatureMap) {
        self.words.entry(word.to_lowercase()).or_default().push(features);
    }

    pub fn entries(&self, word: &str) -> Option<&Vec<FeatureMap>> {
        self.words.get(&word.to_lowercase())
    }

    /// The feature entry of a word for a specific POS tag.
    pub fn features_for(&self, word: &str, pos: &str) -> Option<&FeatureMap> {
        self.entries(word)?
            .iter()
            .find(|entry| entry.get("pos").map(String::as_str) == Some(pos))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl TaggedSentence {
    pub fn new(tokens: Vec<String>, pos_tags: Vec<String>, features: Vec<FeatureMap>) -> Self {
        Self {
            tokens,
            pos_tags,
            features,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl LexiconTagger {
    pub fn new(lexicon: FeatureLexicon) -> Self {
        Self { lexicon }
    }
}

impl ITagging for LexiconTagger {
    /// Tokenize on whitespace, strip surrounding punctuation, lowercase, and
    /// tag every token with its first feature lexicon entry. Unknown words
    /// fail the analysis with the byte position of the token.
    fn analyze(&self, sentence: &str) -> Result<TaggedSentence, ParseError> {
        let mut tokens = Vec::new();
        let mut pos_tags = Vec::new();
        let mut features = Vec::new();

        let mut pointer = 0;
        for raw in sentence.split_whitespace() {
            let offset = sentence[pointer..]
                .find(raw)
                .map(|found| found + pointer)
                .unwrap_or(pointer);
            pointer = offset + raw.len();

            let word = raw
                .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_lowercase();
            if word.is_empty() {
                continue;
            }

            let entry = self
                .lexicon
                .entries(&word)
                .and_then(|entries| entries.first())
                .ok_or_else(|| {
                    ParseError::new(offset, format!("word '{}' is not in the lexicon", word))
                })?;
            let pos = entry.get("pos").cloned().ok_or_else(|| {
                ParseError::new(offset, format!("lexicon entry for '{}' has no POS", word))
            })?;

            tokens.push(word);
            pos_tags.push(pos);
            features.push(entry.clone());
        }

        Ok(TaggedSentence::new(tokens, pos_tags, features))
    }
}
