//! Parse tree notations, measurements and reconstruction.

pub mod parseval;
mod reconstruct;

#[cfg(test)]
mod __tests__;

use crate::{NodeCounts, ParseError, ParseTree, Symbol};
use once_cell::sync::Lazy;
use ptree::TreeItem;
use regex::Regex;
use std::borrow::Cow;
use std::fmt::{Display, Formatter};

static BRACKET_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(|\)|[^\s()]+").expect("bracket token pattern"));

impl ParseTree {
    pub fn leaf(label: impl Into<Symbol>, word: impl Into<String>) -> Self {
        ParseTree::Leaf {
            label: label.into(),
            word: word.into(),
        }
    }

    pub fn node(label: impl Into<Symbol>, children: Vec<ParseTree>) -> Self {
        ParseTree::Node {
            label: label.into(),
            children,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ParseTree::Leaf { label, .. } | ParseTree::Node { label, .. } => label,
        }
    }

    pub(crate) fn set_label(&mut self, new_label: impl Into<Symbol>) {
        match self {
            ParseTree::Leaf { label, .. } | ParseTree::Node { label, .. } => {
                *label = new_label.into()
            }
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, ParseTree::Leaf { .. })
    }

    /// The covered word of a leaf.
    pub fn word(&self) -> Option<&str> {
        match self {
            ParseTree::Leaf { word, .. } => Some(word),
            ParseTree::Node { .. } => None,
        }
    }

    pub fn children(&self) -> &[ParseTree] {
        match self {
            ParseTree::Leaf { .. } => &[],
            ParseTree::Node { children, .. } => children,
        }
    }

    /// The covered words, left to right.
    pub fn words(&self) -> Vec<&str> {
        match self {
            ParseTree::Leaf { word, .. } => vec![word.as_str()],
            ParseTree::Node { children, .. } => {
                children.iter().flat_map(|child| child.words()).collect()
            }
        }
    }

    /// Single line bracket notation, `(NT child1 child2)` with `(NT word)`
    /// leaves.
    pub fn to_bracket(&self) -> String {
        self.to_string()
    }

    /// Indented multi-line notation with two spaces per level.
    pub fn to_pretty(&self) -> String {
        let mut out = String::new();
        self.write_pretty(&mut out, 0);
        out
    }

    fn write_pretty(&self, out: &mut String, indent: usize) {
        for _ in 0..indent {
            out.push_str("  ");
        }
        match self {
            ParseTree::Leaf { label, word } => {
                out.push('(');
                out.push_str(label);
                out.push(' ');
                out.push_str(word);
                out.push(')');
            }
            ParseTree::Node { label, children } => {
                out.push('(');
                out.push_str(label);
                for child in children {
                    out.push('\n');
                    child.write_pretty(out, indent + 1);
                }
                out.push(')');
            }
        }
    }

    /// Parse the single line bracket notation produced by
    /// [to_bracket](ParseTree::to_bracket).
    pub fn from_bracket(text: &str) -> Result<ParseTree, ParseError> {
        let tokens: Vec<(usize, &str)> = BRACKET_TOKEN
            .find_iter(text)
            .map(|found| (found.start(), found.as_str()))
            .collect();

        if tokens.is_empty() {
            return Err(ParseError::new(0, "empty bracket notation".to_string()));
        }

        let mut index = 0;
        let tree = parse_bracket_node(&tokens, &mut index)?;
        if index != tokens.len() {
            return Err(ParseError::new(
                tokens[index].0,
                "trailing input after the tree".to_string(),
            ));
        }
        Ok(tree)
    }

    pub fn depth(&self) -> usize {
        match self {
            ParseTree::Leaf { .. } => 1,
            ParseTree::Node { children, .. } => {
                1 + children
                    .iter()
                    .map(ParseTree::depth)
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    pub fn node_counts(&self) -> NodeCounts {
        match self {
            ParseTree::Leaf { .. } => NodeCounts {
                total: 1,
                internal: 0,
                leaf: 1,
            },
            ParseTree::Node { children, .. } => {
                let mut counts = NodeCounts {
                    total: 1,
                    internal: 1,
                    leaf: 0,
                };
                for child in children {
                    let child_counts = child.node_counts();
                    counts.total += child_counts.total;
                    counts.internal += child_counts.internal;
                    counts.leaf += child_counts.leaf;
                }
                counts
            }
        }
    }

    /// Every labeled span `(label, start, end, text)` of the tree, collected
    /// post-order. Leaves cover a single position; `end` is exclusive.
    pub fn labeled_spans(&self) -> Vec<(Symbol, usize, usize, String)> {
        let mut spans = Vec::new();
        self.collect_spans(0, &mut spans);
        spans
    }

    fn collect_spans(
        &self,
        start: usize,
        spans: &mut Vec<(Symbol, usize, usize, String)>,
    ) -> usize {
        match self {
            ParseTree::Leaf { label, word } => {
                spans.push((label.clone(), start, start + 1, word.clone()));
                start + 1
            }
            ParseTree::Node { label, children } => {
                let mut end = start;
                for child in children {
                    end = child.collect_spans(end, spans);
                }
                spans.push((label.clone(), start, end, self.words().join(" ")));
                end
            }
        }
    }

    /// Depth-first search for the first node or leaf with the given label.
    pub fn find_label(&self, label: &str) -> Option<&ParseTree> {
        if self.label() == label {
            return Some(self);
        }
        self.children()
            .iter()
            .find_map(|child| child.find_label(label))
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.find_label(label).is_some()
    }

    /// Print the tree to standard output with branch drawing.
    pub fn print(&self) -> Result<(), std::io::Error> {
        ptree::print_tree(self)
    }
}

fn parse_bracket_node(
    tokens: &[(usize, &str)],
    index: &mut usize,
) -> Result<ParseTree, ParseError> {
    let open = tokens
        .get(*index)
        .ok_or_else(|| ParseError::new(0, "unexpected end of bracket notation".to_string()))?;
    if open.1 != "(" {
        return Err(ParseError::new(
            open.0,
            format!("expected '(' but found '{}'", open.1),
        ));
    }
    *index += 1;

    let label = tokens
        .get(*index)
        .ok_or_else(|| ParseError::new(open.0, "constituent has no label".to_string()))?;
    if label.1 == "(" || label.1 == ")" {
        return Err(ParseError::new(label.0, "constituent has no label".to_string()));
    }
    *index += 1;

    let mut children: Vec<ParseTree> = Vec::new();
    let mut bare_words: Vec<&str> = Vec::new();

    loop {
        let token = tokens.get(*index).ok_or_else(|| {
            ParseError::new(open.0, format!("constituent '{}' is not closed", label.1))
        })?;
        match token.1 {
            ")" => {
                *index += 1;
                break;
            }
            "(" => children.push(parse_bracket_node(tokens, index)?),
            word => {
                bare_words.push(word);
                *index += 1;
            }
        }
    }

    match (children.is_empty(), bare_words.as_slice()) {
        (true, [word]) => Ok(ParseTree::leaf(label.1, *word)),
        (false, []) => Ok(ParseTree::node(label.1, children)),
        (true, []) => Err(ParseError::new(
            open.0,
            format!("constituent '{}' has no children", label.1),
        )),
        (true, _) => Err(ParseError::new(
            open.0,
            format!("constituent '{}' has more than one word", label.1),
        )),
        (false, _) => Err(ParseError::new(
            open.0,
            format!("constituent '{}' mixes words and constituents", label.1),
        )),
    }
}

impl Display for ParseTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseTree::Leaf { label, word } => write!(f, "({} {})", label, word),
            ParseTree::Node { label, children } => {
                write!(f, "({}", label)?;
                for child in children {
                    write!(f, " {}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl TreeItem for ParseTree {
    type Child = Self;

    fn write_self<W: std::io::Write>(&self, f: &mut W, _: &ptree::Style) -> std::io::Result<()> {
        match self {
            ParseTree::Leaf { label, word } => write!(f, "{} {}", label, word),
            ParseTree::Node { label, .. } => write!(f, "{}", label),
        }
    }

    fn children(&self) -> Cow<[Self::Child]> {
        match self {
            ParseTree::Leaf { .. } => Cow::from(&[][..]),
            ParseTree::Node { children, .. } => Cow::from(children),
        }
    }
}
