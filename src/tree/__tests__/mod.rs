use crate::{parseval, CkyParser, CnfConverter, Grammar, NodeCounts, ParseTree, TreeReconstructor};

#[test]
pub fn bracket_round_trip_test() {
    let text = "(S (NP (DT the) (NN dog)) (VP (VBZ runs) (RB quickly)))";
    let tree = ParseTree::from_bracket(text).unwrap();

    assert_eq!(tree.to_bracket(), text);
    assert_eq!(tree.label(), "S");
    assert_eq!(tree.words(), vec!["the", "dog", "runs", "quickly"]);

    let determiner = tree.find_label("DT").unwrap();
    assert!(determiner.is_leaf());
    assert_eq!(determiner.word(), Some("the"));
}

#[test]
pub fn bracket_error_test() {
    assert!(ParseTree::from_bracket("").is_err());
    assert!(ParseTree::from_bracket("(S (NP)").is_err());
    assert!(ParseTree::from_bracket("(S (NP the cat))").is_err());
    assert!(ParseTree::from_bracket("(S (NP (DT the))) trailing").is_err());
}

#[test]
pub fn pretty_format_test() {
    let tree = ParseTree::from_bracket("(S (NP (DT the) (NN dog)) (VP (VBZ runs)))").unwrap();
    let expected = "(S\n  (NP\n    (DT the)\n    (NN dog))\n  (VP\n    (VBZ runs)))";
    assert_eq!(tree.to_pretty(), expected);
}

#[test]
pub fn counts_and_depth_test() {
    let tree = ParseTree::from_bracket("(S (NP (DT the) (NN dog)) (VP (VBZ runs)))").unwrap();

    assert_eq!(
        tree.node_counts(),
        NodeCounts {
            total: 6,
            internal: 3,
            leaf: 3
        }
    );
    assert_eq!(tree.depth(), 3);
}

#[test]
pub fn labeled_spans_test() {
    let tree = ParseTree::from_bracket("(S (NP (DT the) (NN dog)) (VP (VBZ runs)))").unwrap();
    let spans = tree.labeled_spans();

    assert!(spans.contains(&("NP".to_string(), 0, 2, "the dog".to_string())));
    assert!(spans.contains(&("VP".to_string(), 2, 3, "runs".to_string())));
    assert!(spans.contains(&("S".to_string(), 0, 3, "the dog runs".to_string())));
    // post-order collection puts the root last
    assert_eq!(spans.last().unwrap().0, "S");
}

#[test]
pub fn reconstruct_flattening_test() {
    let grammar = Grammar::from_rules_str(
        "
        S -> NP VP
        NP -> Det Adj N | Det N | N
        VP -> V NP | V
        Det -> the | a
        Adj -> big | small | lazy
        N -> cat | dog | fox
        V -> sees | chases | jumps
        ",
        "S",
    )
    .unwrap();

    let mut converter = CnfConverter::new(&grammar);
    let cnf = converter.convert().unwrap();
    let parser = CkyParser::new(&cnf).unwrap();
    let (accepted, trees) =
        parser.parse(&["the", "big", "cat", "sees", "the", "small", "dog"], None);
    assert!(accepted);

    let reconstructor = TreeReconstructor::with_original_grammar(&grammar);
    let tree = reconstructor.reconstruct(&trees[0]);

    fn assert_no_auxiliary(tree: &ParseTree, reconstructor: &TreeReconstructor) {
        for child in tree.children() {
            assert!(
                !reconstructor.is_auxiliary(child.label()),
                "auxiliary {} survived reconstruction",
                child.label()
            );
            assert_no_auxiliary(child, reconstructor);
        }
    }
    assert_no_auxiliary(&tree, &reconstructor);

    let np = tree.find_label("NP").unwrap();
    let labels: Vec<&str> = np.children().iter().map(|child| child.label()).collect();
    assert_eq!(labels, vec!["Det", "Adj", "N"]);
    assert_eq!(tree.words(), vec!["the", "big", "cat", "sees", "the", "small", "dog"]);
}

#[test]
pub fn auxiliary_detection_test() {
    let mut reconstructor = TreeReconstructor::new();

    // prefix fallback
    assert!(reconstructor.is_auxiliary("Y0"));
    assert!(reconstructor.is_auxiliary("T12"));
    assert!(reconstructor.is_auxiliary("S0"));
    assert!(!reconstructor.is_auxiliary("NP"));
    assert!(!reconstructor.is_auxiliary("S"));
    assert!(!reconstructor.is_auxiliary("TO"));

    // the explicit set takes priority
    reconstructor.set_auxiliary_symbols(["AUX".to_string()].into_iter().collect());
    assert!(reconstructor.is_auxiliary("AUX"));
}

#[test]
pub fn reconstruct_keeps_root_test() {
    let reconstructor = TreeReconstructor::new();
    let tree = ParseTree::from_bracket("(S0 (NP (PRP i)) (Y0 (VBD ran) (RB fast)))").unwrap();
    let reconstructed = reconstructor.reconstruct(&tree);

    // the auxiliary root keeps its label, the inner Y0 is spliced
    assert_eq!(
        reconstructed.to_bracket(),
        "(S0 (NP (PRP i)) (VBD ran) (RB fast))"
    );
}

#[test]
pub fn parseval_self_evaluation_test() {
    let gold = ParseTree::from_bracket(
        "(S (NP (DT the) (NN dog)) (VP (VBZ runs) (PP (IN across) (NP (DT the) (NN park)))))",
    )
    .unwrap();

    let score = parseval::evaluate(&gold, &gold);
    assert_eq!(score.precision, 1.0);
    assert_eq!(score.recall, 1.0);
    assert_eq!(score.f1, 1.0);
}

#[test]
pub fn parseval_score_test() {
    let gold = ParseTree::from_bracket(
        "(S (NP (DT the) (NN dog)) (VP (VBZ runs) (PP (IN across) (NP (DT the) (NN park)))))",
    )
    .unwrap();
    // flat system tree missing the PP constituent
    let system = ParseTree::from_bracket(
        "(S (NP (DT the) (NN dog)) (VP (VBZ runs) (IN across) (NP (DT the) (NN park))))",
    )
    .unwrap();

    let score = parseval::evaluate(&gold, &system);
    assert_eq!(score.matching, 3);
    assert_eq!(score.gold_total, 4);
    assert_eq!(score.system_total, 3);
    assert_eq!(score.precision, 1.0);
    assert_eq!(score.recall, 0.75);
}

#[test]
pub fn parseval_s0_normalization_test() {
    let system = ParseTree::from_bracket("(S0 (NP (PRP i)) (VP (VBD ran)))").unwrap();
    let constituents = parseval::constituents(&system, true);

    assert!(constituents.contains(&parseval::Constituent {
        label: "S".to_string(),
        start: 0,
        end: 2,
    }));
}
