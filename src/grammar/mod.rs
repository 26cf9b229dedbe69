//! Construction, validation and serialization of context-free grammars.

mod english;
mod json;


use crate::{Grammar, GrammarError, GrammarStats, Production, Symbol, EPSILON};
use once_cell::sync::OnceCell;
use std::collections::{BTreeMap, HashSet};
use std::fmt::{Display, Formatter};

/// Map the alternative `epsilon` spelling onto the distinguished ε symbol.
pub(crate) fn normalize_symbol(symbol: &str) -> Symbol {
    if symbol == EPSILON || symbol.eq_ignore_ascii_case("epsilon") {
        EPSILON.to_string()
    } else {
        symbol.to_string()
    }
}

impl Grammar {
    /// Create an empty grammar with the given start symbol.
    pub fn new(start_symbol: impl Into<Symbol>) -> Self {
        Self {
            rules: BTreeMap::new(),
            start_symbol: start_symbol.into(),
            terminals: OnceCell::new(),
        }
    }

    /// Create a grammar from an already assembled rule map and validate it.
    pub fn with_rules(
        start_symbol: impl Into<Symbol>,
        rules: BTreeMap<Symbol, Vec<Production>>,
    ) -> Result<Self, GrammarError> {
        let mut grammar = Grammar::new(start_symbol);
        for (non_terminal, productions) in rules {
            for production in productions {
                grammar.add_production(&non_terminal, production);
            }
        }
        grammar.validate()?;
        Ok(grammar)
    }

    /// Parse a grammar from the line oriented string form.
    ///
    /// Each line reads `NonTerminal -> production | production | ...` with the
    /// symbols of a production separated by spaces. Empty productions are
    /// written `ε` or `epsilon`. Lines without `->` are skipped.
    pub fn from_rules_str(text: &str, start_symbol: &str) -> Result<Self, GrammarError> {
        let mut grammar = Grammar::new(start_symbol);

        for line in text.lines() {
            let line = line.trim();
            let Some((non_terminal, alternatives)) = line.split_once("->") else {
                continue;
            };
            let non_terminal = non_terminal.trim();
            if non_terminal.is_empty() {
                return Err(GrammarError::new(line, "production line has no left-hand side"));
            }

            for alternative in alternatives.split('|') {
                let production: Production = alternative
                    .split_whitespace()
                    .map(normalize_symbol)
                    .collect();
                grammar.add_production(non_terminal, production);
            }
        }

        grammar.validate()?;
        Ok(grammar)
    }

    /// Append a production, skipping structural duplicates under the same
    /// left-hand side.
    pub fn add_production(&mut self, non_terminal: &str, production: Production) {
        let productions = self.rules.entry(non_terminal.to_string()).or_default();
        if !productions.contains(&production) {
            productions.push(production);
            self.terminals = OnceCell::new();
        }
    }

    pub fn rules(&self) -> &BTreeMap<Symbol, Vec<Production>> {
        &self.rules
    }

    pub fn productions(&self, non_terminal: &str) -> Option<&Vec<Production>> {
        self.rules.get(non_terminal)
    }

    pub fn start_symbol(&self) -> &str {
        &self.start_symbol
    }

    pub fn is_non_terminal(&self, symbol: &str) -> bool {
        self.rules.contains_key(symbol)
    }

    /// The set of non-terminals, cloned for callers that outlive the grammar.
    pub fn non_terminal_set(&self) -> HashSet<Symbol> {
        self.rules.keys().cloned().collect()
    }

    /// The terminal symbols of the grammar. Derived on first use and cached
    /// until the next mutation.
    pub fn obtain_terminals(&self) -> &HashSet<Symbol> {
        self.terminals.get_or_init(|| {
            self.rules
                .values()
                .flatten()
                .flatten()
                .filter(|symbol| {
                    !self.rules.contains_key(symbol.as_str()) && symbol.as_str() != EPSILON
                })
                .cloned()
                .collect()
        })
    }

    /// Number of non-terminals.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Total number of productions over all non-terminals.
    pub fn rule_count(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn stats(&self) -> GrammarStats {
        GrammarStats {
            non_terminals: self.rules.len(),
            terminals: self.obtain_terminals().len(),
            total_rules: self.rule_count(),
        }
    }

    /// Check the grammar well-formedness invariants: no empty productions,
    /// ε only as a singleton right-hand side, and a defined start symbol.
    pub fn validate(&self) -> Result<(), GrammarError> {
        if !self.rules.is_empty() && !self.rules.contains_key(&self.start_symbol) {
            return Err(GrammarError::new(
                self.start_symbol.clone(),
                "start symbol has no productions",
            ));
        }

        for (non_terminal, productions) in &self.rules {
            for production in productions {
                if production.is_empty() {
                    return Err(GrammarError::new(
                        non_terminal.clone(),
                        "has an empty production; use ε for the empty string",
                    ));
                }
                if production.len() > 1 && production.iter().any(|symbol| symbol.as_str() == EPSILON)
                {
                    return Err(GrammarError::new(
                        non_terminal.clone(),
                        "ε may only appear as a singleton production",
                    ));
                }
            }
        }

        Ok(())
    }

    /// Remove duplicated productions per non-terminal, keeping the first
    /// occurrence. Returns the number of removed productions.
    pub fn deduplicate(&mut self) -> usize {
        let mut removed = 0;

        for productions in self.rules.values_mut() {
            let mut seen: Vec<Production> = Vec::with_capacity(productions.len());
            productions.retain(|production| {
                if seen.contains(production) {
                    removed += 1;
                    false
                } else {
                    seen.push(production.clone());
                    true
                }
            });
        }

        if removed > 0 {
            self.terminals = OnceCell::new();
        }
        removed
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (non_terminal, productions) in &self.rules {
            let alternatives: Vec<String> = productions
                .iter()
                .map(|production| production.join(" "))
                .collect();
            writeln!(f, "{} -> {}", non_terminal, alternatives.join(" | "))?;
        }
        Ok(())
    }
}
