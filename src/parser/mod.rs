//! The orchestrated English parser.
//!
//! Wiring order matters: the structural grammar is converted to CNF first,
//! so Penn tags stay terminals of the chart grammar, and lexical rules from
//! a [Lexicon] are attached to the full grammar afterwards. A parse runs the
//! agreement and subcategorization validator, then the POS constrained
//! chart, then the tree reconstructor.

#[cfg(test)]
mod __tests__;

use crate::{
    AgreementChecker, CkyParser, CnfConverter, EnglishParser, Grammar, GrammarError, ITagging,
    Lexicon, ParseOutcome, SubcatLexicon, Symbol, TaggedSentence, TreeReconstructor,
};
use std::fmt::{Display, Formatter};

impl ParseOutcome {
    fn failure(tokens: Vec<String>, pos_sequence: Vec<Symbol>, errors: Vec<String>) -> Self {
        Self {
            grammatical: false,
            tokens,
            pos_sequence,
            errors,
            parse_trees: Vec::new(),
        }
    }
}

impl Display for ParseOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Tokens: {}", self.tokens.join(" "))?;
        if self.grammatical {
            writeln!(f, "GRAMMATICAL")?;
            writeln!(f, "POS sequence: {}", self.pos_sequence.join(" "))?;
            if let Some(tree) = self.parse_trees.first() {
                writeln!(f, "{}", tree.to_pretty())?;
                writeln!(f, "Bracket: {}", tree.to_bracket())?;
            }
        } else {
            writeln!(f, "UNGRAMMATICAL")?;
            for error in &self.errors {
                writeln!(f, "  - {}", error)?;
            }
        }
        Ok(())
    }
}

impl EnglishParser {
    /// A parser over the built-in English grammar.
    pub fn new() -> Result<Self, GrammarError> {
        Self::with_grammar(Grammar::english())
    }

    /// A parser over a caller supplied grammar. The grammar is validated and
    /// its structural rules converted to CNF; attach lexical rules afterwards
    /// with [load_lexicon](EnglishParser::load_lexicon).
    pub fn with_grammar(cfg: Grammar) -> Result<Self, GrammarError> {
        cfg.validate()?;

        let mut converter = CnfConverter::new(&cfg);
        let cnf = converter.convert()?;
        let cky = CkyParser::new(&cnf)?;
        let reconstructor =
            TreeReconstructor::from_non_terminals(converter.original_non_terminals().clone());

        Ok(Self {
            original_start: cfg.start_symbol().to_string(),
            cfg,
            cnf,
            cky,
            reconstructor,
            agreement: AgreementChecker::new(),
            subcat: SubcatLexicon::new(),
        })
    }

    /// A parser over a grammar that is already in CNF, for grammar files
    /// saved with `is_cnf`. Without the pre-conversion grammar the
    /// reconstructor falls back to the reserved prefix heuristics.
    pub fn with_cnf_grammar(cnf: Grammar) -> Result<Self, GrammarError> {
        let cky = CkyParser::new(&cnf)?;

        Ok(Self {
            original_start: cnf.start_symbol().to_string(),
            cfg: cnf.clone(),
            cnf,
            cky,
            reconstructor: TreeReconstructor::new(),
            agreement: AgreementChecker::new(),
            subcat: SubcatLexicon::new(),
        })
    }

    /// Attach the lexical `POS -> word` rules to the full grammar. The
    /// structural CNF the chart runs on is untouched; the chart bridges from
    /// tags to words through its POS constraints.
    pub fn load_lexicon(&mut self, lexicon: &Lexicon) -> usize {
        lexicon.attach_to_grammar(&mut self.cfg)
    }

    pub fn set_subcat(&mut self, subcat: SubcatLexicon) {
        self.subcat = subcat;
    }

    pub fn subcat(&self) -> &SubcatLexicon {
        &self.subcat
    }

    /// Merge agreement rules from JSON text into the validator.
    pub fn load_agreement_rules(&mut self, text: &str) -> Result<usize, GrammarError> {
        self.agreement.load_rules(text)
    }

    pub fn agreement(&self) -> &AgreementChecker {
        &self.agreement
    }

    /// The full grammar, including attached lexical rules.
    pub fn grammar(&self) -> &Grammar {
        &self.cfg
    }

    /// The structural grammar in CNF the chart parses with.
    pub fn cnf_grammar(&self) -> &Grammar {
        &self.cnf
    }

    pub fn set_max_trees(&mut self, max_trees: usize) {
        self.cky.set_max_trees(max_trees);
    }

    /// Judge and parse one tagged sentence.
    ///
    /// Validator errors short-circuit the chart; a chart failure reports the
    /// single error `No valid parse found for POS sequence`. Tokens are
    /// lowercased before they reach the chart.
    pub fn parse_tagged(&self, tagged: &TaggedSentence) -> ParseOutcome {
        let tokens: Vec<String> = tagged
            .tokens
            .iter()
            .map(|token| token.to_lowercase())
            .collect();
        let pos_sequence = tagged.pos_tags.clone();

        if tokens.is_empty()
            || tokens.len() != pos_sequence.len()
            || tokens.len() != tagged.features.len()
        {
            return ParseOutcome::failure(
                tokens,
                pos_sequence,
                vec!["tokens, POS tags and features must be non-empty and aligned".to_string()],
            );
        }

        let (agreement_ok, errors) =
            self.agreement
                .check_sequence(&pos_sequence, &tagged.features, &self.subcat);
        if !agreement_ok {
            return ParseOutcome::failure(tokens, pos_sequence, errors);
        }

        let (success, trees) = self
            .cky
            .parse(tokens.as_slice(), Some(pos_sequence.as_slice()));
        if !success || trees.is_empty() {
            return ParseOutcome::failure(
                tokens,
                pos_sequence,
                vec!["No valid parse found for POS sequence".to_string()],
            );
        }

        let mut parse_trees = self.reconstructor.reconstruct_all(&trees);
        // a fresh start symbol from CNF conversion keeps its label on the
        // chart root; restore the original start symbol here
        for tree in &mut parse_trees {
            if tree.label() == self.cky.start_symbol() && tree.label() != self.original_start {
                tree.set_label(self.original_start.clone());
            }
        }

        ParseOutcome {
            grammatical: true,
            tokens,
            pos_sequence,
            errors: Vec::new(),
            parse_trees,
        }
    }

    /// Analyze a raw sentence with the supplied tagger, then judge and parse
    /// it. A tagger failure reports as an ungrammatical outcome.
    pub fn parse_with(&self, sentence: &str, tagger: &dyn ITagging) -> ParseOutcome {
        match tagger.analyze(sentence) {
            Ok(tagged) => self.parse_tagged(&tagged),
            Err(error) => ParseOutcome::failure(Vec::new(), Vec::new(), vec![error.message]),
        }
    }
}
