use crate::{is_valid_cnf, CkyParser, CnfConverter, Grammar, EPSILON};

fn simple_grammar() -> Grammar {
    Grammar::from_rules_str(
        "
        S -> NP VP
        NP -> Det N | N
        VP -> V NP | V
        Det -> the | a
        N -> cat | dog | mouse
        V -> sees | chases
        ",
        "S",
    )
    .unwrap()
}

#[test]
pub fn simple_conversion_test() {
    let grammar = simple_grammar();
    let mut converter = CnfConverter::new(&grammar);
    let cnf = converter.convert().unwrap();

    assert!(is_valid_cnf(&cnf));
    // S never occurs on a right-hand side, so the start symbol is kept
    assert_eq!(converter.start_symbol(), "S");
    // unit elimination copied the words of N into NP
    assert!(cnf
        .productions("NP")
        .unwrap()
        .contains(&vec!["cat".to_string()]));
}

#[test]
pub fn epsilon_elimination_test() {
    let grammar = Grammar::from_rules_str(
        "
        S -> NP VP
        NP -> Det Nom | Nom
        Nom -> Adj Nom | N
        VP -> V NP | V S | V
        Det -> the | a | ε
        Adj -> big | small
        N -> cat | dog
        V -> sees | thinks
        ",
        "S",
    )
    .unwrap();

    let mut converter = CnfConverter::new(&grammar);
    let cnf = converter.convert().unwrap();

    assert!(is_valid_cnf(&cnf));
    // S occurs on a right-hand side, so a fresh start was introduced
    assert_eq!(converter.start_symbol(), "S0");

    for (non_terminal, productions) in cnf.rules() {
        for production in productions {
            assert!(
                !(production.len() == 1 && production[0] == EPSILON),
                "ε survived under {}",
                non_terminal
            );
        }
    }

    // the language still accepts sentences with and without the determiner
    let parser = CkyParser::new(&cnf).unwrap();
    assert!(parser.parse(&["the", "cat", "sees", "a", "dog"], None).0);
    assert!(parser.parse(&["cat", "sees", "dog"], None).0);
    assert!(parser.parse(&["big", "cat", "thinks"], None).0);
    assert!(!parser.parse(&["the", "sees"], None).0);
}

#[test]
pub fn nullable_start_test() {
    let grammar = Grammar::from_rules_str(
        "
        S -> A B
        A -> a | ε
        B -> b | ε
        ",
        "S",
    )
    .unwrap();

    let mut converter = CnfConverter::new(&grammar);
    let cnf = converter.convert().unwrap();

    assert!(is_valid_cnf(&cnf));
    // S itself is nullable and keeps the ε-production
    assert!(cnf
        .productions(converter.start_symbol())
        .unwrap()
        .contains(&vec![EPSILON.to_string()]));

    let parser = CkyParser::new(&cnf).unwrap();
    assert!(parser.parse(&["a", "b"], None).0);
    assert!(parser.parse(&["a"], None).0);
    assert!(parser.parse(&["b"], None).0);
    assert!(!parser.parse(&["b", "a"], None).0);
}

#[test]
pub fn idempotence_test() {
    let grammar = simple_grammar();
    let mut converter = CnfConverter::new(&grammar);
    let cnf = converter.convert().unwrap();

    let mut second_converter = CnfConverter::new(&cnf);
    let second_cnf = second_converter.convert().unwrap();
    assert!(is_valid_cnf(&second_cnf));

    // sampled language preservation across the second conversion
    let parser = CkyParser::new(&cnf).unwrap();
    let second_parser = CkyParser::new(&second_cnf).unwrap();
    let samples: [&[&str]; 4] = [
        &["the", "cat", "sees", "the", "dog"],
        &["cat", "sees", "dog"],
        &["the", "cat"],
        &["sees"],
    ];
    for sentence in samples {
        assert_eq!(
            parser.parse(sentence, None).0,
            second_parser.parse(sentence, None).0,
            "acceptance diverged on {:?}",
            sentence
        );
    }
}

#[test]
pub fn binary_split_test() {
    let grammar = Grammar::from_rules_str(
        "
        S -> Det Adj N
        Det -> the
        Adj -> big
        N -> cat
        ",
        "S",
    )
    .unwrap();

    let mut converter = CnfConverter::new(&grammar);
    let cnf = converter.convert().unwrap();

    assert!(is_valid_cnf(&cnf));
    assert!(
        converter
            .auxiliary_symbols()
            .iter()
            .any(|symbol| symbol.starts_with('Y')),
        "the ternary rule should introduce a Y symbol"
    );

    let parser = CkyParser::new(&cnf).unwrap();
    assert!(parser.parse(&["the", "big", "cat"], None).0);
    assert!(!parser.parse(&["the", "cat"], None).0);
}

#[test]
pub fn terminal_lifting_test() {
    // a^n c b^n with terminals inside a mixed rule
    let grammar = Grammar::from_rules_str("S -> a S b | c", "S").unwrap();

    let mut converter = CnfConverter::new(&grammar);
    let cnf = converter.convert().unwrap();
    assert!(is_valid_cnf(&cnf));

    let parser = CkyParser::new(&cnf).unwrap();
    assert!(parser.parse(&["c"], None).0);
    assert!(parser.parse(&["a", "c", "b"], None).0);
    assert!(parser.parse(&["a", "a", "c", "b", "b"], None).0);
    assert!(!parser.parse(&["a", "c"], None).0);
    assert!(!parser.parse(&["c", "b", "a"], None).0);
}

#[test]
pub fn fresh_name_collision_test() {
    // the grammar already occupies the S0 name
    let grammar = Grammar::from_rules_str(
        "
        S -> S0 a
        S0 -> S | b
        ",
        "S",
    )
    .unwrap();

    let mut converter = CnfConverter::new(&grammar);
    let cnf = converter.convert().unwrap();

    assert!(is_valid_cnf(&cnf));
    assert_eq!(
        converter.start_symbol(),
        "S1",
        "the fresh start must skip the occupied S0"
    );
}

#[test]
pub fn conversion_deduplicates_test() {
    let grammar = Grammar::from_rules_str(
        "
        S -> A | B
        A -> x y
        B -> x y
        ",
        "S",
    )
    .unwrap();

    let mut converter = CnfConverter::new(&grammar);
    let cnf = converter.convert().unwrap();

    for (non_terminal, productions) in cnf.rules() {
        for (index, production) in productions.iter().enumerate() {
            assert!(
                !productions[index + 1..].contains(production),
                "duplicate production under {}",
                non_terminal
            );
        }
    }
}
