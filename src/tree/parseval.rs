//! PARSEVAL constituent evaluation.
//!
//! A constituent is a labeled span `(label, start, end)` of a parse tree.
//! POS preterminals are excluded by Penn tagset membership, the spanning
//! root is excluded by default, and an `S0` label left by the fresh start
//! symbol of CNF conversion counts as `S`.

use crate::util::penn;
use crate::ParseTree;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// A labeled span of a parse tree; `end` is exclusive.
pub struct Constituent {
    pub label: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Labeled precision, recall and F1 over constituent sets.
pub struct ParsevalScore {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub matching: usize,
    pub gold_total: usize,
    pub system_total: usize,
}

/// Collect the phrase constituents of a tree. Leaves and nodes labeled with
/// a Penn tag are skipped; the spanning root constituent is dropped unless
/// `include_root` is set.
pub fn constituents(tree: &ParseTree, include_root: bool) -> HashSet<Constituent> {
    let mut collected = HashSet::new();
    let length = walk(tree, 0, &mut collected);
    if !include_root {
        collected.retain(|constituent| !(constituent.start == 0 && constituent.end == length));
    }
    collected
}

fn walk(tree: &ParseTree, start: usize, collected: &mut HashSet<Constituent>) -> usize {
    match tree {
        ParseTree::Leaf { .. } => start + 1,
        ParseTree::Node { label, children } => {
            let mut end = start;
            for child in children {
                end = walk(child, end, collected);
            }
            if !penn::is_penn_tag(label) {
                let label = if label.as_str() == "S0" {
                    "S"
                } else {
                    label.as_str()
                };
                collected.insert(Constituent {
                    label: label.to_string(),
                    start,
                    end,
                });
            }
            end
        }
    }
}

/// Score a system tree against a gold tree over their constituent sets.
pub fn evaluate(gold: &ParseTree, system: &ParseTree) -> ParsevalScore {
    score(&constituents(gold, false), &constituents(system, false))
}

/// Score two constituent sets directly.
pub fn score(gold: &HashSet<Constituent>, system: &HashSet<Constituent>) -> ParsevalScore {
    let matching = gold.intersection(system).count();
    let precision = if system.is_empty() {
        0.0
    } else {
        matching as f64 / system.len() as f64
    };
    let recall = if gold.is_empty() {
        0.0
    } else {
        matching as f64 / gold.len() as f64
    };
    let f1 = if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    };

    ParsevalScore {
        precision,
        recall,
        f1,
        matching,
        gold_total: gold.len(),
        system_total: system.len(),
    }
}
