//! Transformation of a context-free grammar into Chomsky Normal Form.
//!
//! The conversion runs the five classical steps in order: a fresh start
//! symbol when the old one appears on a right-hand side, ε-elimination over
//! the nullable fixpoint, unit-production elimination over the closed pair
//! relation, terminal lifting in mixed rules, and the binary split of long
//! productions. Auxiliary symbols are drawn from the reserved prefixes `S`,
//! `T` and `Y` with per-prefix counters that skip existing names.

#[cfg(test)]
mod __tests__;

use crate::{CnfConverter, Grammar, GrammarError, Log, Production, Symbol, EPSILON};
use once_cell::sync::OnceCell;
use std::collections::{BTreeMap, HashMap, HashSet};

fn is_epsilon(production: &Production) -> bool {
    production.len() == 1 && production[0] == EPSILON
}

fn push_unique(productions: &mut Vec<Production>, production: Production) {
    if !productions.contains(&production) {
        productions.push(production);
    }
}

/// Check that every production of the grammar is a binary pair of
/// non-terminals, a single terminal, or ε on a start symbol that does not
/// appear on any right-hand side.
pub fn is_valid_cnf(grammar: &Grammar) -> bool {
    let start_symbol = grammar.start_symbol();
    let start_on_rhs = grammar
        .rules()
        .values()
        .flatten()
        .any(|production| production.iter().any(|symbol| symbol.as_str() == start_symbol));

    for (non_terminal, productions) in grammar.rules() {
        for production in productions {
            match production.as_slice() {
                [single] if single.as_str() == EPSILON => {
                    if non_terminal.as_str() != start_symbol || start_on_rhs {
                        return false;
                    }
                }
                [single] => {
                    if grammar.is_non_terminal(single) {
                        return false;
                    }
                }
                [left, right] => {
                    if !grammar.is_non_terminal(left) || !grammar.is_non_terminal(right) {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }
    true
}

impl CnfConverter {
    /// Capture the rules, the symbol sets and the start symbol of a grammar.
    /// The grammar itself is left untouched; [convert](CnfConverter::convert)
    /// returns a new one.
    pub fn new(grammar: &Grammar) -> Self {
        let rules = grammar.rules().clone();
        let non_terminals: HashSet<Symbol> = rules.keys().cloned().collect();
        let terminals = grammar.obtain_terminals().clone();

        Self {
            grammar: rules,
            start_symbol: grammar.start_symbol().to_string(),
            original_non_terminals: non_terminals.clone(),
            non_terminals,
            terminals,
            counters: HashMap::new(),
            debugger: OnceCell::new(),
        }
    }

    pub fn set_log(&self, debugger: Log<&'static str>) -> Result<(), String> {
        self.debugger
            .set(debugger)
            .map_err(|err| format!("Debugger {} is already set for this converter.", err))
    }

    /// The start symbol after conversion, possibly a fresh `S` prefixed name.
    pub fn start_symbol(&self) -> &str {
        &self.start_symbol
    }

    /// The non-terminal set of the grammar the converter was created from.
    /// Thread this to the [TreeReconstructor](crate::TreeReconstructor) so
    /// auxiliary nodes are recognized by set membership instead of prefix
    /// heuristics.
    pub fn original_non_terminals(&self) -> &HashSet<Symbol> {
        &self.original_non_terminals
    }

    /// The non-terminals introduced by the conversion so far.
    pub fn auxiliary_symbols(&self) -> HashSet<Symbol> {
        self.non_terminals
            .difference(&self.original_non_terminals)
            .cloned()
            .collect()
    }

    /// Run the five conversion steps and the final deduplication pass, then
    /// confirm the result with [is_valid_cnf].
    pub fn convert(&mut self) -> Result<Grammar, GrammarError> {
        self.log_step(format_args!(
            "converting grammar with {} non-terminals",
            self.grammar.len()
        ));

        self.step1_new_start_symbol();
        self.step2_eliminate_epsilon_productions();
        self.step3_eliminate_unit_productions();
        self.step4_replace_terminals_in_mixed_rules();
        self.step5_break_long_productions();

        let mut grammar = Grammar {
            rules: self.grammar.clone(),
            start_symbol: self.start_symbol.clone(),
            terminals: OnceCell::new(),
        };
        grammar.deduplicate();

        if !is_valid_cnf(&grammar) {
            return Err(GrammarError::new(
                self.start_symbol.clone(),
                "conversion did not produce a valid CNF grammar",
            ));
        }

        self.log_step(format_args!(
            "conversion finished with {} rules over {} non-terminals",
            grammar.rule_count(),
            grammar.len()
        ));
        Ok(grammar)
    }

    /// Produce a fresh non-terminal for the given reserved prefix. Counters
    /// are monotonic per prefix and skip any name already in use.
    fn fresh_symbol(&mut self, prefix: char) -> Symbol {
        loop {
            let counter = self.counters.entry(prefix).or_insert(0);
            let candidate = format!("{}{}", prefix, counter);
            *counter += 1;
            if !self.non_terminals.contains(&candidate) && !self.terminals.contains(&candidate) {
                self.non_terminals.insert(candidate.clone());
                return candidate;
            }
        }
    }

    fn start_symbol_on_rhs(&self) -> bool {
        self.grammar
            .values()
            .flatten()
            .any(|production| production.iter().any(|symbol| *symbol == self.start_symbol))
    }

    /// Step 1: when the start symbol occurs on a right-hand side, introduce a
    /// fresh start with the single production `S0 -> S`.
    fn step1_new_start_symbol(&mut self) {
        if self.start_symbol_on_rhs() {
            let new_start = self.fresh_symbol('S');
            self.grammar
                .insert(new_start.clone(), vec![vec![self.start_symbol.clone()]]);
            self.log_step(format_args!(
                "step 1: start symbol {} occurs on a right-hand side, added {}",
                self.start_symbol, new_start
            ));
            self.start_symbol = new_start;
        } else {
            self.log_step(format_args!("step 1: start symbol kept"));
        }
    }

    /// The nullable non-terminals: direct ε-productions first, then the
    /// fixpoint over productions whose symbols are all nullable.
    fn nullable_set(&self) -> HashSet<Symbol> {
        let mut nullable: HashSet<Symbol> = self
            .grammar
            .iter()
            .filter(|(_, productions)| productions.iter().any(|p| is_epsilon(p)))
            .map(|(non_terminal, _)| non_terminal.clone())
            .collect();

        loop {
            let mut changed = false;
            for (non_terminal, productions) in &self.grammar {
                if nullable.contains(non_terminal) {
                    continue;
                }
                if productions
                    .iter()
                    .any(|production| production.iter().all(|symbol| nullable.contains(symbol)))
                {
                    nullable.insert(non_terminal.clone());
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        nullable
    }

    /// Step 2: drop ε-productions, expanding every production over all
    /// subsets of its nullable positions. The start symbol keeps `ε` when it
    /// is itself nullable.
    fn step2_eliminate_epsilon_productions(&mut self) {
        let nullable = self.nullable_set();
        let mut new_grammar: BTreeMap<Symbol, Vec<Production>> = BTreeMap::new();

        for (non_terminal, productions) in &self.grammar {
            for production in productions {
                if is_epsilon(production) {
                    continue;
                }

                let nullable_positions: Vec<usize> = production
                    .iter()
                    .enumerate()
                    .filter(|(_, symbol)| nullable.contains(*symbol))
                    .map(|(position, _)| position)
                    .collect();

                // Every subset of the nullable positions, in ascending
                // bitmask order. Deduplication absorbs the collisions.
                let subsets = 1u64
                    .checked_shl(nullable_positions.len() as u32)
                    .unwrap_or(u64::MAX);
                for mask in 0..subsets {
                    let dropped: HashSet<usize> = nullable_positions
                        .iter()
                        .enumerate()
                        .filter(|(bit, _)| mask & (1u64 << bit) != 0)
                        .map(|(_, position)| *position)
                        .collect();

                    let new_production: Production = production
                        .iter()
                        .enumerate()
                        .filter(|(position, _)| !dropped.contains(position))
                        .map(|(_, symbol)| symbol.clone())
                        .collect();

                    if !new_production.is_empty() {
                        push_unique(
                            new_grammar.entry(non_terminal.clone()).or_default(),
                            new_production,
                        );
                    }
                }
            }
        }

        if nullable.contains(&self.start_symbol) {
            push_unique(
                new_grammar.entry(self.start_symbol.clone()).or_default(),
                vec![EPSILON.to_string()],
            );
        }

        self.grammar = new_grammar;
        self.log_step(format_args!(
            "step 2: ε-productions eliminated ({} nullable non-terminals)",
            nullable.len()
        ));
    }

    /// Step 3: close the unit pair relation `A -> B` by fixpoint and copy the
    /// non-unit productions of every reachable `B` into `A`.
    fn step3_eliminate_unit_productions(&mut self) {
        let mut pairs: Vec<(Symbol, Symbol)> = Vec::new();
        let mut seen: HashSet<(Symbol, Symbol)> = HashSet::new();

        let mut push_pair =
            |pairs: &mut Vec<(Symbol, Symbol)>, pair: (Symbol, Symbol)| {
                if seen.insert(pair.clone()) {
                    pairs.push(pair);
                }
            };

        for non_terminal in self.grammar.keys() {
            push_pair(&mut pairs, (non_terminal.clone(), non_terminal.clone()));
        }
        for (non_terminal, productions) in &self.grammar {
            for production in productions {
                if production.len() == 1 && self.non_terminals.contains(&production[0]) {
                    push_pair(&mut pairs, (non_terminal.clone(), production[0].clone()));
                }
            }
        }

        loop {
            let mut discovered: Vec<(Symbol, Symbol)> = Vec::new();
            for (a, b) in &pairs {
                for (c, d) in &pairs {
                    if b == c {
                        discovered.push((a.clone(), d.clone()));
                    }
                }
            }

            let before = pairs.len();
            for pair in discovered {
                push_pair(&mut pairs, pair);
            }
            if pairs.len() == before {
                break;
            }
        }

        let mut new_grammar: BTreeMap<Symbol, Vec<Production>> = BTreeMap::new();
        for (a, b) in &pairs {
            if let Some(productions) = self.grammar.get(b) {
                for production in productions {
                    let unit =
                        production.len() == 1 && self.non_terminals.contains(&production[0]);
                    if !unit {
                        push_unique(new_grammar.entry(a.clone()).or_default(), production.clone());
                    }
                }
            }
        }

        self.grammar = new_grammar;
        self.log_step(format_args!(
            "step 3: unit productions eliminated ({} unit pairs)",
            pairs.len()
        ));
    }

    /// Step 4: in every production longer than one symbol, replace each
    /// terminal `t` with a lifted non-terminal `T_k -> t`, reusing the lifted
    /// name across productions.
    fn step4_replace_terminals_in_mixed_rules(&mut self) {
        let old_grammar = std::mem::take(&mut self.grammar);
        let mut terminal_vars: HashMap<Symbol, Symbol> = HashMap::new();
        let mut new_grammar: BTreeMap<Symbol, Vec<Production>> = BTreeMap::new();

        for (non_terminal, productions) in &old_grammar {
            for production in productions {
                if production.len() == 1 {
                    push_unique(
                        new_grammar.entry(non_terminal.clone()).or_default(),
                        production.clone(),
                    );
                    continue;
                }

                let mut new_production = Vec::with_capacity(production.len());
                for symbol in production {
                    if self.terminals.contains(symbol) {
                        let lifted = match terminal_vars.get(symbol) {
                            Some(existing) => existing.clone(),
                            None => {
                                let fresh = self.fresh_symbol('T');
                                terminal_vars.insert(symbol.clone(), fresh.clone());
                                new_grammar.insert(fresh.clone(), vec![vec![symbol.clone()]]);
                                fresh
                            }
                        };
                        new_production.push(lifted);
                    } else {
                        new_production.push(symbol.clone());
                    }
                }
                push_unique(
                    new_grammar.entry(non_terminal.clone()).or_default(),
                    new_production,
                );
            }
        }

        self.grammar = new_grammar;
        self.log_step(format_args!(
            "step 4: lifted {} terminals out of mixed rules",
            terminal_vars.len()
        ));
    }

    /// Step 5: split every production longer than two symbols into a chain of
    /// binary rules over fresh `Y_k` non-terminals.
    fn step5_break_long_productions(&mut self) {
        let old_grammar = std::mem::take(&mut self.grammar);
        let mut new_grammar: BTreeMap<Symbol, Vec<Production>> = BTreeMap::new();

        for (non_terminal, productions) in &old_grammar {
            for production in productions {
                if production.len() <= 2 {
                    push_unique(
                        new_grammar.entry(non_terminal.clone()).or_default(),
                        production.clone(),
                    );
                    continue;
                }

                let mut current = non_terminal.clone();
                for symbol in &production[..production.len() - 2] {
                    let fresh = self.fresh_symbol('Y');
                    push_unique(
                        new_grammar.entry(current.clone()).or_default(),
                        vec![symbol.clone(), fresh.clone()],
                    );
                    current = fresh;
                }

                let tail = &production[production.len() - 2..];
                push_unique(
                    new_grammar.entry(current).or_default(),
                    vec![tail[0].clone(), tail[1].clone()],
                );
            }
        }

        self.grammar = new_grammar;
        self.log_step(format_args!("step 5: long productions binarized"));
    }

    fn log_step(&self, message: std::fmt::Arguments) {
        if let Some(debugger) = self.debugger.get() {
            debugger.log_default(message);
        }
    }
}
