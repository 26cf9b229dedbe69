//! Chart parsing tool (chart_pt) is a library to judge and parse English sentences into
//! constituent parse [trees](ParseTree) over a context-free grammar written with Penn
//! Treebank part-of-speech tags.
//!
//! # Overview
//! A sentence is judged grammatical when it passes two independent gates. The
//! [AgreementChecker] first validates the part-of-speech sequence and the per-token
//! morphological features against determiner-noun agreement, subject-verb agreement and
//! verb subcategorization rules. The [CkyParser] then fills an O(n³) chart over a grammar
//! in Chomsky Normal Form and enumerates a bounded number of parse trees from the
//! recorded back-pointers.
//!
//! # Design
//! Grammar rules are written or loaded as an ordinary context-free grammar. The
//! [CnfConverter] transforms the grammar with the five classical steps (new start symbol,
//! ε-elimination, unit-production elimination, terminal lifting and binary split) while
//! preserving the described language. Because the transformation introduces auxiliary
//! symbols, the trees produced by the chart are binary; the [TreeReconstructor] flattens
//! the auxiliary nodes back into the n-ary shape of the original grammar.
//!
//! The [EnglishParser] wires the pieces together. It converts only the structural rules
//! to CNF, so the Penn tags remain terminals of the chart grammar, and it bridges from a
//! tag to the covering non-terminals with a unit back-pointer on the chart diagonal.
//! Lexical `POS -> word` rules are attached to the full grammar afterwards for tree
//! display and reconstruction.
//!
//! # Example
//! ```
//! use chart_pt::{CkyParser, CnfConverter, Grammar, TreeReconstructor};
//!
//! let grammar = Grammar::from_rules_str(
//!     "
//!     S -> NP VP
//!     NP -> Det N | Det Adj N | N
//!     VP -> V NP | V
//!     Det -> the | a
//!     Adj -> lazy
//!     N -> cat | dog
//!     V -> sees | chases
//!     ",
//!     "S",
//! )
//! .unwrap();
//!
//! let mut converter = CnfConverter::new(&grammar);
//! let cnf = converter.convert().unwrap();
//!
//! let parser = CkyParser::new(&cnf).unwrap();
//! let reconstructor = TreeReconstructor::with_original_grammar(&grammar);
//!
//! let tokens = ["the", "lazy", "dog", "chases", "a", "cat"];
//! let (accepted, trees) = parser.parse(&tokens, None);
//! assert!(accepted);
//!
//! let tree = reconstructor.reconstruct(&trees[0]);
//! assert_eq!(
//!     tree.to_bracket(),
//!     "(S (NP (Det the) (Adj lazy) (N dog)) (VP (V chases) (NP (Det a) (N cat))))"
//! );
//! ```

mod agreement;
mod cky;
mod cnf;
mod error;
mod grammar;
mod lexicon;
mod parser;
mod tree;
mod util;

pub use cnf::is_valid_cnf;
pub use tree::parseval;
pub use util::Log;

use once_cell::sync::OnceCell;
use std::collections::{BTreeMap, HashMap, HashSet};

/// The distinguished empty production symbol. The JSON and string grammar
/// formats also accept the spelling `epsilon`.
pub const EPSILON: &str = "ε";

/// Default cap on the number of trees enumerated per non-terminal and span.
pub const DEFAULT_MAX_TREES: usize = 10;

/// A grammar symbol. A symbol that appears as a rule key of a [Grammar] is a
/// non-terminal; every other symbol is a terminal.
pub type Symbol = String;

/// An ordered sequence of symbols forming the right-hand side of a rule.
pub type Production = Vec<Symbol>;

/// Morphological features of a single token, keyed by feature name
/// (`num`, `person`, `tense`, `lemma`, `pos`, ...). Absent keys read as `any`.
pub type FeatureMap = BTreeMap<String, String>;

#[derive(Debug, Clone)]
/// A context-free grammar: an ordered mapping from non-terminal to its
/// productions, plus a designated start symbol.
pub struct Grammar {
    rules: BTreeMap<Symbol, Vec<Production>>,
    start_symbol: Symbol,
    terminals: OnceCell<HashSet<Symbol>>,
}

#[derive(Debug, Clone)]
/// Size summary of a [Grammar].
pub struct GrammarStats {
    pub non_terminals: usize,
    pub terminals: usize,
    pub total_rules: usize,
}

#[derive(Debug)]
/// Transforms a context-free grammar into Chomsky Normal Form with the five
/// classical conversion steps.
pub struct CnfConverter {
    grammar: BTreeMap<Symbol, Vec<Production>>,
    start_symbol: Symbol,
    non_terminals: HashSet<Symbol>,
    terminals: HashSet<Symbol>,
    original_non_terminals: HashSet<Symbol>,
    counters: HashMap<char, usize>,
    debugger: OnceCell<Log<&'static str>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// How a non-terminal entered a chart cell. Each constructor carries exactly
/// the data its tree reconstruction case needs.
pub enum BackPointer {
    /// Produced directly from a word on the chart diagonal.
    Terminal(String),
    /// Produced from another symbol covering the same span, recorded when the
    /// diagonal is bridged from a POS tag to the non-terminals deriving it.
    Unit(Symbol, usize, usize),
    /// Produced by a binary rule `A -> B C` with the recorded split point.
    Binary(Symbol, Symbol, usize),
}

#[derive(Debug)]
/// A CKY chart parser over a grammar in Chomsky Normal Form.
pub struct CkyParser {
    start_symbol: Symbol,
    terminal_rules: HashMap<Symbol, Vec<Symbol>>,
    binary_rules: HashMap<(Symbol, Symbol), Vec<Symbol>>,
    max_trees: usize,
    debugger: OnceCell<Log<&'static str>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A constituent parse tree. Leaves pair a preterminal label with the covered
/// word; internal nodes carry a label and an ordered child list.
pub enum ParseTree {
    Leaf { label: Symbol, word: String },
    Node { label: Symbol, children: Vec<ParseTree> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Node counts of a [ParseTree].
pub struct NodeCounts {
    pub total: usize,
    pub internal: usize,
    pub leaf: usize,
}

#[derive(Debug, Clone)]
/// Flattens the auxiliary non-terminals introduced by CNF conversion, turning
/// a binary chart tree back into a tree over the original grammar symbols.
pub struct TreeReconstructor {
    auxiliary_prefixes: Vec<String>,
    auxiliary_symbols: HashSet<Symbol>,
    original_non_terminals: HashSet<Symbol>,
}

#[derive(Debug, Clone)]
/// A named agreement rule. Rules loaded from a file merge into the default
/// table by name; rules with an unrecognized `check_type` are kept but never
/// dispatched.
pub struct AgreementRule {
    pub description: String,
    pub constituents: Vec<String>,
    pub check_type: String,
    pub allow_any: bool,
}

#[derive(Debug, Clone)]
/// Pre-parse validator for determiner-noun agreement, subject-verb agreement
/// and verb subcategorization over a POS sequence with per-token features.
pub struct AgreementChecker {
    rules: BTreeMap<String, AgreementRule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Argument structure of a single verb lemma.
pub struct SubcatEntry {
    pub frames: Vec<String>,
    pub allows_np: bool,
    pub requires_pp: bool,
}

#[derive(Debug, Clone, Default)]
/// Verb subcategorization frames keyed by lemma.
pub struct SubcatLexicon {
    verbs: BTreeMap<String, SubcatEntry>,
}

#[derive(Debug, Clone, Default)]
/// Word lists per Penn POS tag, merged across lexicon files and attached to a
/// grammar as terminal rules.
pub struct Lexicon {
    entries: BTreeMap<Symbol, Vec<String>>,
}

#[derive(Debug, Clone, Default)]
/// Feature-enriched lexicon: every word maps to one feature entry per POS.
pub struct FeatureLexicon {
    words: BTreeMap<String, Vec<FeatureMap>>,
}

#[derive(Debug, Clone)]
/// The analysis an external tagger delivers for one sentence. The three lists
/// are index-aligned and of equal length.
pub struct TaggedSentence {
    pub tokens: Vec<String>,
    pub pos_tags: Vec<String>,
    pub features: Vec<FeatureMap>,
}

/// The contract an external morphological tagger implements. The parser only
/// consumes the produced [TaggedSentence]; it never calls back.
pub trait ITagging {
    fn analyze(&self, sentence: &str) -> Result<TaggedSentence, ParseError>;
}

#[derive(Debug, Clone)]
/// A minimal [ITagging] implementation backed by a [FeatureLexicon], enough to
/// run the parser end to end without an external tagger.
pub struct LexiconTagger {
    lexicon: FeatureLexicon,
}

#[derive(Debug, Clone)]
/// The result record of one parse invocation.
pub struct ParseOutcome {
    pub grammatical: bool,
    pub tokens: Vec<String>,
    pub pos_sequence: Vec<Symbol>,
    pub errors: Vec<String>,
    pub parse_trees: Vec<ParseTree>,
}

/// The full English sentence parser: validator, structural CNF chart parser
/// and tree reconstructor wired together over one grammar.
pub struct EnglishParser {
    cfg: Grammar,
    cnf: Grammar,
    original_start: Symbol,
    cky: CkyParser,
    reconstructor: TreeReconstructor,
    agreement: AgreementChecker,
    subcat: SubcatLexicon,
}

#[derive(Debug)]
/// An error returned for a malformed grammar or a failed CNF invariant.
pub struct GrammarError {
    what: String,
    message: String,
}

#[derive(Debug, Clone)]
/// An error to indicate failure while reading structured input, carrying the
/// position the reader stopped at.
pub struct ParseError {
    pub pointer: usize,
    pub message: String,
}
