//! The CKY chart parser.
//!
//! The chart is a triangular array of cells; cell `(i, j)` holds every
//! non-terminal deriving `tokens[i..=j]` together with the back-pointer
//! entries that put it there. Recognition succeeds when the start symbol
//! reaches cell `(0, n - 1)`; parse trees are then enumerated from the
//! back-pointers, capped at [max_trees](CkyParser::max_trees) per
//! non-terminal and span.


use crate::cnf::is_valid_cnf;
use crate::{
    BackPointer, CkyParser, Grammar, GrammarError, Log, ParseTree, Symbol, DEFAULT_MAX_TREES,
    EPSILON,
};
use once_cell::sync::OnceCell;
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
/// One chart cell: covering non-terminals in insertion order, so tree
/// enumeration is deterministic, plus the back-pointers per non-terminal.
struct ChartCell {
    order: Vec<Symbol>,
    entries: HashMap<Symbol, Vec<BackPointer>>,
}

impl ChartCell {
    fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(symbol)
    }

    fn add(&mut self, symbol: &str, entry: BackPointer) {
        match self.entries.get_mut(symbol) {
            Some(entries) => entries.push(entry),
            None => {
                self.order.push(symbol.to_string());
                self.entries.insert(symbol.to_string(), vec![entry]);
            }
        }
    }

    fn symbols(&self) -> &[Symbol] {
        &self.order
    }

    fn entries_for(&self, symbol: &str) -> &[BackPointer] {
        self.entries.get(symbol).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl CkyParser {
    /// Build the reverse rule indexes for a CNF grammar. Returns an error
    /// when the grammar fails the CNF validity predicate.
    pub fn new(grammar: &Grammar) -> Result<Self, GrammarError> {
        if !is_valid_cnf(grammar) {
            return Err(GrammarError::new(
                grammar.start_symbol(),
                "the chart parser requires a grammar in Chomsky Normal Form",
            ));
        }

        let mut terminal_rules: HashMap<Symbol, Vec<Symbol>> = HashMap::new();
        let mut binary_rules: HashMap<(Symbol, Symbol), Vec<Symbol>> = HashMap::new();

        for (non_terminal, productions) in grammar.rules() {
            for production in productions {
                match production.as_slice() {
                    [single] if single.as_str() != EPSILON => terminal_rules
                        .entry(single.clone())
                        .or_default()
                        .push(non_terminal.clone()),
                    [left, right] => binary_rules
                        .entry((left.clone(), right.clone()))
                        .or_default()
                        .push(non_terminal.clone()),
                    // the ε-production of the start symbol never fires for
                    // the n >= 1 inputs the chart accepts
                    _ => {}
                }
            }
        }

        Ok(Self {
            start_symbol: grammar.start_symbol().to_string(),
            terminal_rules,
            binary_rules,
            max_trees: DEFAULT_MAX_TREES,
            debugger: OnceCell::new(),
        })
    }

    pub fn set_log(&self, debugger: Log<&'static str>) -> Result<(), String> {
        self.debugger
            .set(debugger)
            .map_err(|err| format!("Debugger {} is already set for this parser.", err))
    }

    pub fn max_trees(&self) -> usize {
        self.max_trees
    }

    /// Cap the number of trees enumerated per non-terminal and span.
    pub fn set_max_trees(&mut self, max_trees: usize) {
        self.max_trees = max_trees;
    }

    pub fn start_symbol(&self) -> &str {
        &self.start_symbol
    }

    /// Parse a token sequence, optionally constrained by an equal length POS
    /// tag sequence.
    ///
    /// With constraints, the diagonal cell of position `i` receives the tag
    /// itself with a [Terminal](BackPointer::Terminal) entry for the word,
    /// and every non-terminal with a rule deriving the tag is bridged in
    /// with a [Unit](BackPointer::Unit) entry. Without constraints, the
    /// diagonal is filled from the lexical rules of the grammar.
    ///
    /// Unknown tokens leave their diagonal cell empty and the parse fails;
    /// an empty input or a length mismatch also reports failure.
    pub fn parse<S: AsRef<str>>(
        &self,
        tokens: &[S],
        pos_constraints: Option<&[S]>,
    ) -> (bool, Vec<ParseTree>) {
        let n = tokens.len();
        if n == 0 {
            return (false, Vec::new());
        }
        if let Some(tags) = pos_constraints {
            if tags.len() != n {
                return (false, Vec::new());
            }
        }

        let mut chart: Vec<Vec<ChartCell>> = vec![vec![ChartCell::default(); n]; n];

        match pos_constraints {
            Some(tags) => {
                for i in 0..n {
                    let word = tokens[i].as_ref();
                    let tag = tags[i].as_ref();
                    chart[i][i].add(tag, BackPointer::Terminal(word.to_string()));

                    if let Some(parents) = self.terminal_rules.get(tag) {
                        for non_terminal in parents {
                            if !chart[i][i].contains(non_terminal) {
                                chart[i][i]
                                    .add(non_terminal, BackPointer::Unit(tag.to_string(), i, i));
                            }
                        }
                    }
                }
            }
            None => {
                for i in 0..n {
                    let word = tokens[i].as_ref();
                    if let Some(parents) = self.terminal_rules.get(word) {
                        for non_terminal in parents {
                            chart[i][i].add(non_terminal, BackPointer::Terminal(word.to_string()));
                        }
                    }
                }
            }
        }

        for span in 2..=n {
            for i in 0..=n - span {
                let j = i + span - 1;
                let mut additions: Vec<(Symbol, BackPointer)> = Vec::new();

                for k in i..j {
                    for left in chart[i][k].symbols() {
                        for right in chart[k + 1][j].symbols() {
                            if let Some(parents) =
                                self.binary_rules.get(&(left.clone(), right.clone()))
                            {
                                for parent in parents {
                                    additions.push((
                                        parent.clone(),
                                        BackPointer::Binary(left.clone(), right.clone(), k),
                                    ));
                                }
                            }
                        }
                    }
                }

                for (symbol, entry) in additions {
                    if let Some(debugger) = self.debugger.get() {
                        debugger.log_verbose(format_args!("({}, {}) <- {}", i, j, symbol));
                    }
                    chart[i][j].add(&symbol, entry);
                }
            }
        }

        let success = chart[0][n - 1].contains(&self.start_symbol);
        if let Some(debugger) = self.debugger.get() {
            debugger.log_result(format_args!(
                "recognition {} over {} tokens",
                success, n
            ));
        }

        if success {
            let trees = self.build_trees(&chart, 0, n - 1, &self.start_symbol);
            (true, trees)
        } else {
            (false, Vec::new())
        }
    }

    /// Recursively expand the back-pointers of `symbol` over span `(i, j)`.
    /// The [max_trees](CkyParser::max_trees) cap applies at every level.
    fn build_trees(
        &self,
        chart: &[Vec<ChartCell>],
        i: usize,
        j: usize,
        symbol: &str,
    ) -> Vec<ParseTree> {
        let mut trees = Vec::new();

        for entry in chart[i][j].entries_for(symbol).iter().take(self.max_trees) {
            match entry {
                BackPointer::Terminal(word) => {
                    trees.push(ParseTree::Leaf {
                        label: symbol.to_string(),
                        word: word.clone(),
                    });
                }
                BackPointer::Unit(child, child_i, child_j) => {
                    for subtree in self.build_trees(chart, *child_i, *child_j, child) {
                        trees.push(ParseTree::Node {
                            label: symbol.to_string(),
                            children: vec![subtree],
                        });
                        if trees.len() >= self.max_trees {
                            return trees;
                        }
                    }
                }
                BackPointer::Binary(left, right, split) => {
                    let left_trees = self.build_trees(chart, i, *split, left);
                    let right_trees = self.build_trees(chart, split + 1, j, right);

                    for left_tree in &left_trees {
                        for right_tree in &right_trees {
                            trees.push(ParseTree::Node {
                                label: symbol.to_string(),
                                children: vec![left_tree.clone(), right_tree.clone()],
                            });
                            if trees.len() >= self.max_trees {
                                return trees;
                            }
                        }
                    }
                }
            }

            if trees.len() >= self.max_trees {
                break;
            }
        }

        trees
    }
}
