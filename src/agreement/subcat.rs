//! Verb subcategorization frames and the argument structure check.
//!
//! The lexicon accepts two JSON shapes under the `verbs` key: the dict form
//! `{"go": {"frames": [...], "allows_np": false, "requires_pp": true}}` and
//! the legacy flat form `{"go": ["intransitive", "pp_required"]}`. Both are
//! normalized to [SubcatEntry] at load.

use crate::util::penn;
use crate::{FeatureMap, GrammarError, SubcatEntry, SubcatLexicon};
use serde_json::Value;
use std::path::Path;

impl SubcatEntry {
    pub fn new(frames: Vec<String>, allows_np: bool, requires_pp: bool) -> Self {
        Self {
            frames,
            allows_np,
            requires_pp,
        }
    }

    /// Normalize the legacy flat frame list: `transitive` or `ditransitive`
    /// allow an NP object, `pp_required` demands a prepositional phrase.
    pub fn from_frames(frames: Vec<String>) -> Self {
        let allows_np = frames
            .iter()
            .any(|frame| frame == "transitive" || frame == "ditransitive");
        let requires_pp = frames.iter().any(|frame| frame == "pp_required");
        Self {
            frames,
            allows_np,
            requires_pp,
        }
    }
}

impl SubcatLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, lemma: &str, entry: SubcatEntry) {
        self.verbs.insert(lemma.to_lowercase(), entry);
    }

    pub fn get(&self, lemma: &str) -> Option<&SubcatEntry> {
        self.verbs.get(lemma)
    }

    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    pub fn from_json(text: &str) -> Result<Self, GrammarError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|err| GrammarError::new("subcategorization", err.to_string()))?;
        let verbs = value
            .get("verbs")
            .and_then(Value::as_object)
            .ok_or_else(|| GrammarError::new("subcategorization", "missing object field 'verbs'"))?;

        let mut lexicon = SubcatLexicon::new();
        for (lemma, info) in verbs {
            let entry = match info {
                Value::Object(map) => {
                    let frames = map
                        .get("frames")
                        .and_then(Value::as_array)
                        .map(|list| {
                            list.iter()
                                .filter_map(Value::as_str)
                                .map(str::to_string)
                                .collect()
                        })
                        .unwrap_or_default();
                    let allows_np = map.get("allows_np").and_then(Value::as_bool).unwrap_or(true);
                    let requires_pp = map
                        .get("requires_pp")
                        .and_then(Value::as_bool)
                        .unwrap_or(false);
                    SubcatEntry::new(frames, allows_np, requires_pp)
                }
                Value::Array(list) => SubcatEntry::from_frames(
                    list.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect(),
                ),
                _ => {
                    return Err(GrammarError::new(
                        lemma.clone(),
                        "verb entry must be an object or a frame list",
                    ))
                }
            };
            lexicon.insert(lemma, entry);
        }
        Ok(lexicon)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GrammarError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| GrammarError::new(path.display().to_string(), err.to_string()))?;
        Self::from_json(&text)
    }

    /// Validate the argument structure after the first verb of the sentence.
    /// Unknown lemmas and verbless sentences pass silently.
    pub fn check_arguments(&self, pos_tags: &[String], features: &[FeatureMap]) -> Vec<String> {
        let mut errors = Vec::new();

        let Some(verb_index) = pos_tags
            .iter()
            .position(|pos| penn::VERB_TAGS.contains(&pos.as_str()))
        else {
            return errors;
        };

        let lemma = features[verb_index]
            .get("lemma")
            .map(|lemma| lemma.to_lowercase())
            .unwrap_or_default();
        let Some(entry) = self.get(&lemma) else {
            return errors;
        };

        let after_verb = &pos_tags[verb_index + 1..];
        let has_np = after_verb
            .first()
            .map(|pos| penn::NP_START_TAGS.contains(&pos.as_str()))
            .unwrap_or(false);
        let has_pp = after_verb
            .iter()
            .enumerate()
            .any(|(index, pos)| pos.as_str() == "IN" && index + 1 < after_verb.len());

        if has_np && !has_pp {
            if entry.requires_pp {
                errors.push(format!(
                    "Verb '{}' requires a preposition with its object",
                    lemma
                ));
            } else if !entry.allows_np {
                errors.push(format!("Verb '{}' does not take a direct object (NP)", lemma));
            }
        }

        if entry.requires_pp && !has_pp && !has_np && !after_verb.is_empty() {
            errors.push(format!("Verb '{}' requires a prepositional phrase", lemma));
        }

        errors
    }
}
