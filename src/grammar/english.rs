//! The built-in English structural grammar over Penn Treebank tags.
//!
//! The non-terminals are `S`, `NP`, `VP` and `PP`; every other symbol is a
//! Penn POS tag and stays a terminal of the structural grammar. Lexical
//! `POS -> word` rules are attached separately from a [Lexicon](crate::Lexicon).

use crate::{Grammar, Production};

fn production(symbols: &[&str]) -> Production {
    symbols.iter().map(|symbol| symbol.to_string()).collect()
}

impl Grammar {
    /// The built-in English grammar: declaratives, imperatives, yes/no and
    /// wh-questions, plus coordination on `S`, `NP` and `VP`.
    pub fn english() -> Grammar {
        let mut grammar = Grammar::new("S");

        let sentence: &[&[&str]] = &[
            // declaratives
            &["NP", "VP"],
            &["NP", "VP", "PP"],
            &["NP", "VP", "RB"],
            &["NP", "VP", "PP", "RB"],
            &["NP", "VP", "PP", "NP"],
            &["NP", "VP", "NP"],
            // imperatives
            &["VP"],
            &["VP", "PP"],
            &["RB", "VP"],
            // yes/no questions
            &["MD", "NP", "VP"],
            &["VBZ", "NP", "VP"],
            &["VBP", "NP", "VP"],
            &["VBD", "NP", "VP"],
            &["VBZ", "NP", "NP"],
            &["VBP", "NP", "NP"],
            &["VBD", "NP", "NP"],
            &["VBZ", "NP", "JJ"],
            &["VBZ", "NP", "RB", "JJ"],
            &["VBP", "NP", "JJ"],
            &["VBD", "NP", "JJ"],
            // wh-questions
            &["WRB", "VBZ", "NP", "VP"],
            &["WRB", "VBP", "NP", "VP"],
            &["WRB", "VBD", "NP", "VP"],
            &["WRB", "MD", "NP", "VP"],
            &["WP", "VBZ", "NP", "VP"],
            &["WP", "VBP", "NP", "VP"],
            &["WP", "VBD", "NP", "VP"],
            &["WP", "MD", "NP", "VP"],
            &["WDT", "NN", "VBZ", "NP", "VP"],
            &["WDT", "NN", "VBP", "NP", "VP"],
            &["WDT", "NN", "VBD", "NP", "VP"],
            &["WDT", "NNS", "VBZ", "NP", "VP"],
            &["WP", "VP"],
            &["WDT", "NN", "VP"],
            &["WDT", "NNS", "VP"],
            &["WP", "VBZ", "VP"],
            &["WP", "VBP", "VP"],
            &["WP", "VBD", "VP"],
            &["WRB", "VBZ", "NP", "VP", "RB"],
            &["WRB", "VBP", "NP", "VP", "RB"],
            &["WRB", "VBD", "NP", "VP", "RB"],
            &["WRB", "MD", "NP", "VP", "RB"],
            // negated imperatives
            &["VB", "RB", "VP"],
            &["VBP", "RB", "VP"],
            // interjection openers
            &["UH", "VP"],
            &["UH", "VP", "PP"],
            // coordination
            &["S", "CC", "S"],
        ];

        let noun_phrase: &[&[&str]] = &[
            &["PRP"],
            // proper nouns
            &["NNP"],
            &["NNPS"],
            &["NNP", "NNP"],
            // bare and determined nouns
            &["NN"],
            &["NNS"],
            &["DT", "NN"],
            &["DT", "NNS"],
            &["DT", "NN", "NN"],
            // adjectival modification
            &["DT", "JJ", "NN"],
            &["DT", "JJ", "NNS"],
            &["DT", "RB", "JJ", "NN"],
            &["DT", "RB", "JJ", "NNS"],
            &["DT", "JJR", "NN"],
            &["DT", "JJR", "NNS"],
            &["DT", "JJS", "NN"],
            &["DT", "JJS", "NNS"],
            &["DT", "RBS", "JJ", "NN"],
            &["DT", "RBS", "JJ", "NNS"],
            &["JJ", "NN"],
            &["JJ", "NNS"],
            &["RB", "JJ", "NN"],
            &["RB", "JJ", "NNS"],
            &["JJR", "NN"],
            &["JJR", "NNS"],
            &["JJS", "NN"],
            &["JJS", "NNS"],
            &["RBS", "JJ", "NN"],
            &["DT", "JJ", "JJ", "NN"],
            &["DT", "JJ", "JJ", "NNS"],
            // possessives
            &["PRP$", "NN"],
            &["PRP$", "NNS"],
            &["PRP$", "JJ", "NN"],
            &["PRP$", "JJ", "NNS"],
            // cardinals
            &["CD", "NN"],
            &["CD", "NNS"],
            &["CD", "JJ", "NNS"],
            &["DT", "CD", "NNS"],
            // postmodification
            &["NP", "PP"],
            // gerunds and participles
            &["VBG"],
            &["DT", "VBG"],
            &["DT", "VBN", "NN"],
            &["DT", "VBN", "NNS"],
            &["VBN", "NN"],
            &["VBN", "NNS"],
            &["NN", "NN"],
            // existential there
            &["EX"],
            // coordination
            &["NP", "CC", "NP"],
            &["PRP", "CC", "PRP"],
        ];

        let verb_phrase: &[&[&str]] = &[
            // intransitives
            &["VB"],
            &["VBD"],
            &["VBP"],
            &["VBZ"],
            &["VBG"],
            // transitives
            &["VB", "NP"],
            &["VBD", "NP"],
            &["VBP", "NP"],
            &["VBZ", "NP"],
            &["VBG", "NP"],
            &["VBN", "NP"],
            // ditransitives
            &["VB", "NP", "NP"],
            &["VBD", "NP", "NP"],
            &["VBP", "NP", "NP"],
            &["VBZ", "NP", "NP"],
            // verb with prepositional complement
            &["VB", "PP"],
            &["VBD", "PP"],
            &["VBP", "PP"],
            &["VBZ", "PP"],
            &["VB", "NP", "PP"],
            &["VBD", "NP", "PP"],
            &["VBP", "NP", "PP"],
            &["VBZ", "NP", "PP"],
            // adverbial modification
            &["VB", "RB"],
            &["VBD", "RB"],
            &["VBP", "RB"],
            &["VBZ", "RB"],
            &["VB", "RB", "RB"],
            &["VBD", "RB", "RB"],
            &["VBZ", "RB", "RB"],
            &["VB", "RBR"],
            &["VB", "RBS"],
            &["VBD", "NP", "RB"],
            &["VBP", "NP", "RB"],
            &["VBZ", "NP", "RB"],
            // modals
            &["MD", "VB"],
            &["MD", "VB", "NP"],
            &["MD", "VB", "PP"],
            &["MD", "VB", "NP", "PP"],
            &["MD", "VB", "VBN", "NP"],
            &["MD", "VB", "VBN"],
            // auxiliaries and progressives
            &["VBZ", "VBG"],
            &["VBP", "VBG"],
            &["VBD", "VBG"],
            &["MD", "VBG"],
            &["VBZ", "VBG", "NP"],
            &["VBP", "VBG", "NP"],
            &["VBD", "VBG", "NP"],
            &["VBZ", "VBN"],
            &["VBP", "VBN"],
            &["VBZ", "VBN", "PP"],
            &["VBP", "VBN", "PP"],
            &["VBD", "VBN", "PP"],
            // negation
            &["VBZ", "RB", "VP"],
            &["VBP", "RB", "VP"],
            &["MD", "RB", "VP"],
            &["VBD", "RB", "VP"],
            // to-infinitives
            &["VB", "TO", "VB"],
            &["VBD", "TO", "VB"],
            &["VBP", "TO", "VB"],
            &["VBZ", "TO", "VB"],
            &["VB", "TO", "VB", "NP"],
            &["VBD", "TO", "VB", "NP"],
            &["VBP", "TO", "VB", "NP"],
            &["VBZ", "TO", "VB", "NP"],
            // copulas with adjectives
            &["VBZ", "JJ"],
            &["VBZ", "RB", "JJ"],
            &["VBZ", "JJR"],
            &["VBZ", "JJS"],
            &["VBP", "JJ"],
            &["VBP", "RB", "JJ"],
            &["VBD", "JJ"],
            &["VBD", "RB", "JJ"],
            // phrasal verbs
            &["VB", "RP"],
            &["VBD", "RP"],
            &["VBP", "RP"],
            &["VBZ", "RP"],
            &["VB", "RP", "NP"],
            &["VBD", "RP", "NP"],
            // copulas with adverb and prepositional complement
            &["VBD", "RB", "PP"],
            &["VBD", "RB", "RB", "PP"],
            &["VBZ", "RB", "PP"],
            &["VBP", "RB", "PP"],
            // copulas with adjective and noun phrase
            &["VBZ", "JJ", "NP"],
            &["VBZ", "RB", "JJ", "NP"],
            &["VBZ", "RBS", "JJ", "NP"],
            &["VBP", "JJ", "NP"],
            &["VBD", "JJ", "NP"],
            &["VB", "JJ", "NP"],
            &["VB", "RB", "JJ", "NP"],
            // copulas with adjective and complement clause
            &["VBD", "JJ", "PP"],
            &["VBD", "RB", "JJ", "PP"],
            &["VBZ", "JJ", "PP"],
            &["VBP", "JJ", "PP"],
            &["VBD", "JJ", "S"],
            &["VBZ", "JJ", "S"],
            // coordination
            &["VP", "CC", "VP"],
        ];

        let prepositional_phrase: &[&[&str]] = &[
            &["IN", "NP"],
            &["TO", "NP"],
            &["IN", "NP", "PP"],
            &["TO", "VB"],
        ];

        for symbols in sentence {
            grammar.add_production("S", production(symbols));
        }
        for symbols in noun_phrase {
            grammar.add_production("NP", production(symbols));
        }
        for symbols in verb_phrase {
            grammar.add_production("VP", production(symbols));
        }
        for symbols in prepositional_phrase {
            grammar.add_production("PP", production(symbols));
        }

        grammar
    }
}
