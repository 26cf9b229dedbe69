//! De-binarization of CNF chart trees.
//!
//! CNF conversion introduces auxiliary non-terminals for lifted terminals
//! (`T` prefix), binarized tails (`Y` prefix) and the fresh start symbol
//! (`S0`). The reconstructor walks a chart tree bottom-up and splices the
//! children of every auxiliary node into its parent, restoring the n-ary
//! shape of the original grammar. The root keeps its label even when it is
//! itself auxiliary; callers that want the original start symbol rename the
//! root afterwards.

use crate::{Grammar, ParseTree, Symbol, TreeReconstructor};
use std::collections::HashSet;

impl TreeReconstructor {
    /// A reconstructor that falls back to the reserved prefix heuristics
    /// (`Y`, `T` and the `S0` start, optionally followed by digits).
    pub fn new() -> Self {
        Self {
            auxiliary_prefixes: vec!["Y".to_string(), "T".to_string(), "S0".to_string()],
            auxiliary_symbols: HashSet::new(),
            original_non_terminals: HashSet::new(),
        }
    }

    /// Capture the non-terminal set of the original grammar; any label
    /// outside the set is treated as auxiliary. This is the preferred
    /// detection strategy.
    pub fn with_original_grammar(grammar: &Grammar) -> Self {
        Self::from_non_terminals(grammar.non_terminal_set())
    }

    pub fn from_non_terminals(original_non_terminals: HashSet<Symbol>) -> Self {
        let mut reconstructor = Self::new();
        reconstructor.original_non_terminals = original_non_terminals;
        reconstructor
    }

    /// Explicitly name the auxiliary non-terminals. Checked before the other
    /// strategies.
    pub fn set_auxiliary_symbols(&mut self, auxiliary_symbols: HashSet<Symbol>) {
        self.auxiliary_symbols = auxiliary_symbols;
    }

    /// Replace the reserved prefixes used by the fallback heuristic.
    pub fn set_auxiliary_prefixes(&mut self, prefixes: Vec<String>) {
        self.auxiliary_prefixes = prefixes;
    }

    /// Whether a label should be flattened away, in priority order: the
    /// explicit auxiliary set, absence from the original non-terminal set,
    /// then the reserved prefix pattern.
    pub fn is_auxiliary(&self, label: &str) -> bool {
        if !self.auxiliary_symbols.is_empty() && self.auxiliary_symbols.contains(label) {
            return true;
        }

        if !self.original_non_terminals.is_empty()
            && !self.original_non_terminals.contains(label)
        {
            return true;
        }

        self.auxiliary_prefixes.iter().any(|prefix| {
            label.starts_with(prefix.as_str())
                && label[prefix.len()..].chars().all(|c| c.is_ascii_digit())
        })
    }

    /// Flatten every auxiliary node of a chart tree. Leaves pass through
    /// unchanged and the root keeps its label.
    pub fn reconstruct(&self, tree: &ParseTree) -> ParseTree {
        match tree {
            ParseTree::Leaf { .. } => tree.clone(),
            ParseTree::Node { label, children } => {
                let mut flattened: Vec<ParseTree> = Vec::with_capacity(children.len());
                for child in children {
                    let converted = self.reconstruct(child);
                    match converted {
                        ParseTree::Node {
                            label: child_label,
                            children: grand_children,
                        } if self.is_auxiliary(&child_label) => {
                            flattened.extend(grand_children);
                        }
                        other => flattened.push(other),
                    }
                }
                ParseTree::Node {
                    label: label.clone(),
                    children: flattened,
                }
            }
        }
    }

    pub fn reconstruct_all(&self, trees: &[ParseTree]) -> Vec<ParseTree> {
        trees.iter().map(|tree| self.reconstruct(tree)).collect()
    }
}

impl Default for TreeReconstructor {
    fn default() -> Self {
        Self::new()
    }
}
