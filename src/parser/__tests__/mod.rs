use crate::{
    EnglishParser, FeatureLexicon, FeatureMap, Grammar, Lexicon, LexiconTagger, SubcatEntry,
    SubcatLexicon, TaggedSentence,
};

fn features(pairs: &[(&str, &str)]) -> FeatureMap {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn tagged(tokens: &[&str], pos_tags: &[&str], features: Vec<FeatureMap>) -> TaggedSentence {
    TaggedSentence::new(
        tokens.iter().map(|token| token.to_string()).collect(),
        pos_tags.iter().map(|tag| tag.to_string()).collect(),
        features,
    )
}

fn english_parser() -> EnglishParser {
    let mut parser = EnglishParser::new().unwrap();

    let mut subcat = SubcatLexicon::new();
    subcat.insert(
        "buy",
        SubcatEntry::new(vec!["transitive".to_string()], true, false),
    );
    subcat.insert(
        "go",
        SubcatEntry::new(vec!["intransitive".to_string()], false, true),
    );
    subcat.insert(
        "run",
        SubcatEntry::new(vec!["intransitive".to_string()], false, false),
    );
    parser.set_subcat(subcat);
    parser
}

#[test]
pub fn declarative_sentence_test() {
    let parser = english_parser();
    let sentence = tagged(
        &["i", "bought", "a", "book"],
        &["PRP", "VBD", "DT", "NN"],
        vec![
            features(&[("person", "1"), ("num", "sg"), ("lemma", "i")]),
            features(&[("tense", "past"), ("lemma", "buy")]),
            features(&[("num", "sg"), ("lemma", "a")]),
            features(&[("num", "sg"), ("lemma", "book")]),
        ],
    );

    let outcome = parser.parse_tagged(&sentence);
    assert!(outcome.grammatical, "errors: {:?}", outcome.errors);
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.pos_sequence, vec!["PRP", "VBD", "DT", "NN"]);

    let expected = outcome.parse_trees.iter().find(|tree| {
        tree.label() == "S"
            && tree.children().len() == 2
            && tree.children()[0].label() == "NP"
            && tree.children()[1].label() == "VP"
    });
    assert!(
        expected.is_some(),
        "no S -> NP VP tree among {:?}",
        outcome
            .parse_trees
            .iter()
            .map(|tree| tree.to_bracket())
            .collect::<Vec<_>>()
    );
}

#[test]
pub fn subject_verb_mismatch_test() {
    let parser = english_parser();
    let sentence = tagged(
        &["i", "buys", "a", "book"],
        &["PRP", "VBZ", "DT", "NN"],
        vec![
            features(&[("person", "1"), ("num", "sg"), ("lemma", "i")]),
            features(&[("tense", "pres"), ("lemma", "buy")]),
            features(&[("num", "sg"), ("lemma", "a")]),
            features(&[("num", "sg"), ("lemma", "book")]),
        ],
    );

    let outcome = parser.parse_tagged(&sentence);
    assert!(!outcome.grammatical);
    assert!(outcome
        .errors
        .iter()
        .any(|error| error.contains("NP(1p, sg) + VBZ")));
    assert!(outcome.parse_trees.is_empty(), "validation short-circuits parsing");
}

#[test]
pub fn dt_noun_mismatch_test() {
    let parser = english_parser();
    let sentence = tagged(
        &["i", "bought", "a", "books"],
        &["PRP", "VBD", "DT", "NNS"],
        vec![
            features(&[("person", "1"), ("num", "sg"), ("lemma", "i")]),
            features(&[("tense", "past"), ("lemma", "buy")]),
            features(&[("num", "sg"), ("lemma", "a")]),
            features(&[("num", "pl"), ("lemma", "book")]),
        ],
    );

    let outcome = parser.parse_tagged(&sentence);
    assert!(!outcome.grammatical);
    assert!(outcome
        .errors
        .iter()
        .any(|error| error.contains("DT(sg) + NNS(pl)")));
}

#[test]
pub fn adjective_noun_phrase_test() {
    let parser = english_parser();
    let sentence = tagged(
        &["the", "big", "cat", "runs", "quickly"],
        &["DT", "JJ", "NN", "VBZ", "RB"],
        vec![
            features(&[("num", "any"), ("lemma", "the")]),
            features(&[("lemma", "big")]),
            features(&[("num", "sg"), ("lemma", "cat")]),
            features(&[("tense", "pres"), ("lemma", "run")]),
            features(&[("lemma", "quickly")]),
        ],
    );

    let outcome = parser.parse_tagged(&sentence);
    assert!(outcome.grammatical, "errors: {:?}", outcome.errors);

    // the reconstructed NP keeps its flat DT JJ NN shape
    let found = outcome.parse_trees.iter().any(|tree| {
        tree.find_label("NP")
            .map(|np| {
                let labels: Vec<&str> = np.children().iter().map(|child| child.label()).collect();
                labels == ["DT", "JJ", "NN"]
            })
            .unwrap_or(false)
    });
    assert!(
        found,
        "no flat NP among {:?}",
        outcome
            .parse_trees
            .iter()
            .map(|tree| tree.to_bracket())
            .collect::<Vec<_>>()
    );
}

#[test]
pub fn subcategorization_violation_test() {
    let parser = english_parser();
    let sentence = tagged(
        &["i", "went", "the", "school"],
        &["PRP", "VBD", "DT", "NN"],
        vec![
            features(&[("person", "1"), ("num", "sg"), ("lemma", "i")]),
            features(&[("tense", "past"), ("lemma", "go")]),
            features(&[("num", "any"), ("lemma", "the")]),
            features(&[("num", "sg"), ("lemma", "school")]),
        ],
    );

    let outcome = parser.parse_tagged(&sentence);
    assert!(!outcome.grammatical);
    assert!(outcome.errors.iter().any(|error| error.contains("go")));
}

#[test]
pub fn imperative_sentence_test() {
    let parser = english_parser();
    let sentence = tagged(
        &["please", "buy", "a", "book"],
        &["UH", "VB", "DT", "NN"],
        vec![
            features(&[("lemma", "please")]),
            features(&[("lemma", "buy")]),
            features(&[("num", "sg"), ("lemma", "a")]),
            features(&[("num", "sg"), ("lemma", "book")]),
        ],
    );

    let outcome = parser.parse_tagged(&sentence);
    assert!(outcome.grammatical, "errors: {:?}", outcome.errors);

    let tree = &outcome.parse_trees[0];
    assert_eq!(tree.label(), "S");
    assert_eq!(tree.words().len(), 4, "the root spans all four tokens");
}

#[test]
pub fn input_shape_test() {
    let parser = english_parser();

    let outcome = parser.parse_tagged(&TaggedSentence::new(Vec::new(), Vec::new(), Vec::new()));
    assert!(!outcome.grammatical);
    assert!(!outcome.errors.is_empty());

    let mismatched = TaggedSentence::new(
        vec!["i".to_string()],
        vec!["PRP".to_string(), "VBD".to_string()],
        vec![features(&[])],
    );
    let outcome = parser.parse_tagged(&mismatched);
    assert!(!outcome.grammatical);
}

#[test]
pub fn no_parse_test() {
    let parser = english_parser();
    let sentence = tagged(
        &["and", "and"],
        &["CC", "CC"],
        vec![features(&[("lemma", "and")]), features(&[("lemma", "and")])],
    );

    let outcome = parser.parse_tagged(&sentence);
    assert!(!outcome.grammatical);
    assert_eq!(
        outcome.errors,
        vec!["No valid parse found for POS sequence".to_string()]
    );
}

#[test]
pub fn outcome_determinism_test() {
    let parser = english_parser();
    let sentence = tagged(
        &["i", "bought", "a", "book"],
        &["PRP", "VBD", "DT", "NN"],
        vec![
            features(&[("person", "1"), ("num", "sg"), ("lemma", "i")]),
            features(&[("tense", "past"), ("lemma", "buy")]),
            features(&[("num", "sg"), ("lemma", "a")]),
            features(&[("num", "sg"), ("lemma", "book")]),
        ],
    );

    let first = parser.parse_tagged(&sentence).to_string();
    let second = parser.parse_tagged(&sentence).to_string();
    assert_eq!(first, second);
}

#[test]
pub fn cnf_grammar_file_round_trip_test() {
    let parser = english_parser();
    let json = parser.cnf_grammar().to_json(true);

    let (cnf, is_cnf) = Grammar::from_json(&json).unwrap();
    assert!(is_cnf);

    let loaded = EnglishParser::with_cnf_grammar(cnf).unwrap();
    let sentence = tagged(
        &["i", "bought", "a", "book"],
        &["PRP", "VBD", "DT", "NN"],
        vec![
            features(&[("person", "1"), ("num", "sg"), ("lemma", "i")]),
            features(&[("tense", "past"), ("lemma", "buy")]),
            features(&[("num", "sg"), ("lemma", "a")]),
            features(&[("num", "sg"), ("lemma", "book")]),
        ],
    );
    let outcome = loaded.parse_tagged(&sentence);
    assert!(outcome.grammatical, "errors: {:?}", outcome.errors);
}

#[test]
pub fn lexicon_attachment_test() {
    let mut parser = english_parser();
    let lexicon = Lexicon::from_json(r#"{"DT": ["the", "a"], "NN": ["book", "cat"]}"#).unwrap();

    let added = parser.load_lexicon(&lexicon);
    assert_eq!(added, 4);
    assert!(parser.grammar().is_non_terminal("DT"));
    assert!(parser
        .grammar()
        .productions("NN")
        .unwrap()
        .contains(&vec!["book".to_string()]));
    // the structural CNF grammar stays word free
    assert!(!parser.cnf_grammar().obtain_terminals().contains("book"));
}

#[test]
pub fn configuration_test() {
    let mut parser = english_parser();
    parser.set_max_trees(3);

    let merged = parser
        .load_agreement_rules(r#"{"custom_rule": {"check_type": "unknown_check"}}"#)
        .unwrap();
    assert_eq!(merged, 1);
    assert!(parser.agreement().rules().contains_key("custom_rule"));
    assert!(parser.subcat().get("go").is_some());

    let sentence = tagged(
        &["i", "bought", "a", "book"],
        &["PRP", "VBD", "DT", "NN"],
        vec![
            features(&[("person", "1"), ("num", "sg"), ("lemma", "i")]),
            features(&[("tense", "past"), ("lemma", "buy")]),
            features(&[("num", "sg"), ("lemma", "a")]),
            features(&[("num", "sg"), ("lemma", "book")]),
        ],
    );
    let outcome = parser.parse_tagged(&sentence);
    assert!(outcome.grammatical);
    assert!(outcome.parse_trees.len() <= 3);
}

#[test]
pub fn tagger_integration_test() {
    let lexicon = FeatureLexicon::from_json(
        r#"{
            "i": [{"pos": "PRP", "lemma": "i", "person": "1", "num": "sg"}],
            "bought": [{"pos": "VBD", "lemma": "buy", "tense": "past"}],
            "a": [{"pos": "DT", "lemma": "a", "num": "sg"}],
            "book": [{"pos": "NN", "lemma": "book", "num": "sg"}]
        }"#,
    )
    .unwrap();
    let tagger = LexiconTagger::new(lexicon);
    let parser = english_parser();

    let outcome = parser.parse_with("I bought a book.", &tagger);
    assert!(outcome.grammatical, "errors: {:?}", outcome.errors);
    assert_eq!(outcome.tokens, vec!["i", "bought", "a", "book"]);

    let outcome = parser.parse_with("I bought a unicorn", &tagger);
    assert!(!outcome.grammatical);
    assert!(!outcome.errors.is_empty());
}
