//! Pre-parse validation of determiner-noun agreement, subject-verb agreement
//! and verb subcategorization.
//!
//! The validator runs over the POS tag sequence and the per-token feature
//! maps before the chart is filled, so feature mismatches never reach the
//! grammar. All violations of a sentence are collected; any violation makes
//! the sentence ungrammatical without parsing it.

mod subcat;


use crate::util::penn;
use crate::{AgreementChecker, AgreementRule, FeatureMap, GrammarError, SubcatLexicon};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

static SINGULAR_INDEFINITES: [&str; 12] = [
    "everyone",
    "everybody",
    "someone",
    "somebody",
    "anyone",
    "anybody",
    "no one",
    "nobody",
    "everything",
    "something",
    "anything",
    "nothing",
];

static PLURAL_INDEFINITES: [&str; 4] = ["many", "few", "several", "both"];

/// Read a feature with the `any` default the agreement rules assume.
fn feature<'m>(features: &'m FeatureMap, key: &str) -> &'m str {
    features.get(key).map(String::as_str).unwrap_or("any")
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SubjectFeatures {
    person: String,
    num: String,
}

impl SubjectFeatures {
    fn third(num: &str) -> Self {
        Self {
            person: "3".to_string(),
            num: num.to_string(),
        }
    }

    fn from_token(features: &FeatureMap) -> Self {
        Self {
            person: feature(features, "person").to_string(),
            num: feature(features, "num").to_string(),
        }
    }
}

fn noun_number(tag: &str) -> &'static str {
    if tag == "NN" || tag == "NNP" {
        "sg"
    } else {
        "pl"
    }
}

fn is_noun_like(tag: &str) -> bool {
    penn::NOUN_TAGS.contains(&tag) || tag == "PRP"
}

impl AgreementRule {
    pub fn new(
        description: impl Into<String>,
        constituents: Vec<String>,
        check_type: impl Into<String>,
        allow_any: bool,
    ) -> Self {
        Self {
            description: description.into(),
            constituents,
            check_type: check_type.into(),
            allow_any,
        }
    }
}

impl AgreementChecker {
    /// A checker with the built-in English agreement rules.
    pub fn new() -> Self {
        let mut rules = BTreeMap::new();
        rules.insert(
            "dt_nn_agreement".to_string(),
            AgreementRule::new(
                "Determiner must agree with noun in number",
                vec!["DT".to_string(), "NN".to_string()],
                "number_match",
                true,
            ),
        );
        rules.insert(
            "dt_nns_agreement".to_string(),
            AgreementRule::new(
                "Determiner must agree with plural noun",
                vec!["DT".to_string(), "NNS".to_string()],
                "number_match",
                true,
            ),
        );
        rules.insert(
            "subject_verb_agreement_vbz".to_string(),
            AgreementRule::new(
                "3rd person singular subject requires VBZ",
                vec!["NP".to_string(), "VBZ".to_string()],
                "subject_verb_3sg",
                false,
            ),
        );
        rules.insert(
            "subject_verb_agreement_vbp".to_string(),
            AgreementRule::new(
                "Non-3rd singular subject requires VBP",
                vec!["NP".to_string(), "VBP".to_string()],
                "subject_verb_non3sg",
                false,
            ),
        );
        Self { rules }
    }

    pub fn rules(&self) -> &BTreeMap<String, AgreementRule> {
        &self.rules
    }

    /// Merge rules from a JSON object keyed by rule name. Missing fields take
    /// defaults; rules with an unknown `check_type` are kept but never
    /// dispatched. Returns the number of merged rules.
    pub fn load_rules(&mut self, text: &str) -> Result<usize, GrammarError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|err| GrammarError::new("agreement rules", err.to_string()))?;
        let rules = value
            .as_object()
            .ok_or_else(|| GrammarError::new("agreement rules", "expected a JSON object"))?;

        let mut merged = 0;
        for (name, rule) in rules {
            let Some(rule) = rule.as_object() else {
                continue;
            };
            let description = rule
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string();
            let constituents = rule
                .get("constituents")
                .and_then(Value::as_array)
                .map(|list| {
                    list.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            let check_type = rule
                .get("check_type")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string();
            let allow_any = rule
                .get("allow_any")
                .and_then(Value::as_bool)
                .unwrap_or(false);

            self.rules.insert(
                name.clone(),
                AgreementRule::new(description, constituents, check_type, allow_any),
            );
            merged += 1;
        }
        Ok(merged)
    }

    pub fn load_rules_file(&mut self, path: impl AsRef<Path>) -> Result<usize, GrammarError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| GrammarError::new(path.display().to_string(), err.to_string()))?;
        self.load_rules(&text)
    }

    /// Determiner-noun number agreement. A determiner with `num` of `any`
    /// always passes; otherwise the noun number is read from the POS tag
    /// (`NN` singular, `NNS` plural) before the feature map.
    pub fn check_dt_noun(
        &self,
        dt_features: &FeatureMap,
        noun_features: &FeatureMap,
        noun_pos: &str,
    ) -> Result<(), String> {
        let dt_num = feature(dt_features, "num");
        if dt_num == "any" {
            return Ok(());
        }

        let noun_num = match noun_pos {
            "NN" => "sg",
            "NNS" => "pl",
            _ => feature(noun_features, "num"),
        };

        if dt_num == noun_num {
            Ok(())
        } else {
            Err(format!(
                "DT-Noun number disagreement: DT({}) + {}({})",
                dt_num, noun_pos, noun_num
            ))
        }
    }

    /// Subject-verb agreement for present tense verbs. `VBZ` demands a third
    /// person singular subject, `VBP` rejects one; past tense and undecidable
    /// (`any`) subjects pass.
    pub fn check_subject_verb(
        &self,
        subject_features: &FeatureMap,
        verb_features: &FeatureMap,
    ) -> Result<(), String> {
        let person = feature(subject_features, "person");
        let num = feature(subject_features, "num");

        let verb_pos = verb_features
            .get("head_pos")
            .or_else(|| verb_features.get("pos"))
            .map(String::as_str)
            .unwrap_or("");
        let tense = feature(verb_features, "tense");

        if tense == "past" {
            return Ok(());
        }

        match verb_pos {
            "VBZ" => {
                if (person == "3" && num == "sg") || person == "any" || num == "any" {
                    Ok(())
                } else {
                    Err(format!(
                        "Subject-Verb disagreement: NP({}p, {}) + VBZ (requires 3sg)",
                        person, num
                    ))
                }
            }
            "VBP" => {
                if person == "3" && num == "sg" {
                    Err("Subject-Verb disagreement: NP(3sg) + VBP (requires non-3sg)".to_string())
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }

    /// Validate a whole sentence: the determiner-noun scan, subject-verb
    /// agreement on the first present tense verb, and the verb argument
    /// structure against the subcategorization lexicon. All errors of the
    /// sentence are collected.
    pub fn check_sequence(
        &self,
        pos_tags: &[String],
        features: &[FeatureMap],
        subcat: &SubcatLexicon,
    ) -> (bool, Vec<String>) {
        if pos_tags.is_empty() || pos_tags.len() != features.len() {
            return (
                false,
                vec!["POS tags and feature maps must be non-empty and aligned".to_string()],
            );
        }

        let mut errors = Vec::new();

        // determiner-noun scan, skipping adjective and adverb runs
        let mut i = 0;
        while i < pos_tags.len() {
            if pos_tags[i] == "DT" {
                let mut j = i + 1;
                while j < pos_tags.len() && penn::MODIFIER_TAGS.contains(&pos_tags[j].as_str()) {
                    j += 1;
                }
                if j < pos_tags.len() && matches!(pos_tags[j].as_str(), "NN" | "NNS") {
                    if let Err(error) = self.check_dt_noun(&features[i], &features[j], &pos_tags[j])
                    {
                        errors.push(error);
                    }
                    i = j + 1;
                    continue;
                }
            }
            i += 1;
        }

        // subject-verb agreement on the first VBZ/VBP
        if let Some(subject) = self.identify_subject(pos_tags, features) {
            if let Some(verb_index) = pos_tags
                .iter()
                .position(|pos| pos.as_str() == "VBZ" || pos.as_str() == "VBP")
            {
                let mut verb_features = features[verb_index].clone();
                verb_features.insert("head_pos".to_string(), pos_tags[verb_index].clone());

                let mut subject_features = FeatureMap::new();
                subject_features.insert("person".to_string(), subject.person);
                subject_features.insert("num".to_string(), subject.num);

                if let Err(error) = self.check_subject_verb(&subject_features, &verb_features) {
                    errors.push(error);
                }
            }
        }

        errors.extend(subcat.check_arguments(pos_tags, features));

        (errors.is_empty(), errors)
    }

    /// Determine the subject features from the start of the sentence by the
    /// first applicable pattern. Coordinated subjects override with a
    /// mandatory plural; indefinite pronoun lemmas and the quantifier shape
    /// `DT IN DT .. NN|NNS` act as fallbacks.
    fn identify_subject(
        &self,
        pos_tags: &[String],
        features: &[FeatureMap],
    ) -> Option<SubjectFeatures> {
        let mut subject: Option<SubjectFeatures> = None;
        let first = pos_tags[0].as_str();

        if first == "PRP" {
            subject = Some(SubjectFeatures::from_token(&features[0]));
        } else if pos_tags.len() >= 2
            && first == "DT"
            && matches!(pos_tags[1].as_str(), "NN" | "NNS")
        {
            subject = Some(SubjectFeatures::third(noun_number(&pos_tags[1])));
        } else if pos_tags.len() >= 3
            && first == "DT"
            && pos_tags[1] == "JJ"
            && matches!(pos_tags[2].as_str(), "NN" | "NNS")
        {
            subject = Some(SubjectFeatures::third(noun_number(&pos_tags[2])));
        } else if matches!(first, "NNP" | "NNPS") {
            subject = Some(SubjectFeatures::third(noun_number(first)));
        } else if first == "NNS" {
            subject = Some(SubjectFeatures::third("pl"));
        } else if first == "NN" {
            subject = Some(SubjectFeatures::third("sg"));
        } else if pos_tags.len() >= 2
            && first == "PRP$"
            && matches!(pos_tags[1].as_str(), "NN" | "NNS")
        {
            subject = Some(SubjectFeatures::third(noun_number(&pos_tags[1])));
        } else if pos_tags.len() >= 3
            && first == "PRP$"
            && pos_tags[1] == "JJ"
            && matches!(pos_tags[2].as_str(), "NN" | "NNS")
        {
            subject = Some(SubjectFeatures::third(noun_number(&pos_tags[2])));
        } else if first == "EX" {
            // existential there agrees with the nearest following head
            for (index, pos) in pos_tags.iter().enumerate().skip(1) {
                if penn::NOUN_TAGS.contains(&pos.as_str()) {
                    subject = Some(SubjectFeatures::third(noun_number(pos)));
                    break;
                }
                if pos.as_str() == "PRP" {
                    subject = Some(SubjectFeatures::from_token(&features[index]));
                    break;
                }
            }
        }

        // coordinated subjects are always plural and override
        let window = pos_tags.len().min(5);
        if subject.is_none() || pos_tags[..window].iter().any(|pos| pos.as_str() == "CC") {
            if let Some(cc_index) = pos_tags[..window]
                .iter()
                .position(|pos| pos.as_str() == "CC")
            {
                if cc_index > 0 {
                    let noun_before = pos_tags[..cc_index]
                        .iter()
                        .any(|pos| is_noun_like(pos.as_str()));
                    let after_end = pos_tags.len().min(cc_index + 3);
                    let noun_after = pos_tags
                        .get(cc_index + 1..after_end)
                        .map(|window| {
                            window
                                .iter()
                                .any(|pos| is_noun_like(pos.as_str()) || pos.as_str() == "DT")
                        })
                        .unwrap_or(false);
                    if noun_before && noun_after {
                        subject = Some(SubjectFeatures::third("pl"));
                    }
                }
            }
        }

        // indefinite pronouns by lemma
        if subject.is_none() {
            let lemma = features[0]
                .get("lemma")
                .map(|lemma| lemma.to_lowercase())
                .unwrap_or_default();
            if SINGULAR_INDEFINITES.contains(&lemma.as_str()) {
                subject = Some(SubjectFeatures::third("sg"));
            } else if PLURAL_INDEFINITES.contains(&lemma.as_str()) {
                subject = Some(SubjectFeatures::third("pl"));
            }
        }

        // quantifier shape: number comes from the inner noun
        if subject.is_none()
            && pos_tags.len() >= 4
            && pos_tags[0] == "DT"
            && pos_tags[1] == "IN"
            && pos_tags[2] == "DT"
        {
            let end = pos_tags.len().min(6);
            for pos in &pos_tags[3..end] {
                if matches!(pos.as_str(), "NN" | "NNS") {
                    subject = Some(SubjectFeatures::third(noun_number(pos)));
                    break;
                }
            }
        }

        subject
    }
}

impl Default for AgreementChecker {
    fn default() -> Self {
        Self::new()
    }
}
