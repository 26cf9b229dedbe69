//! JSON serialization of grammars.
//!
//! The on-disk shape is `{ "start_symbol": "S", "rules": { "S": [["NP","VP"]] },
//! "is_cnf": bool }` where `is_cnf` is optional and defaults to `false`.

use super::normalize_symbol;
use crate::{Grammar, GrammarError, Production};
use serde_json::{json, Map, Value};
use std::path::Path;

impl Grammar {
    /// Parse a grammar from JSON text. Returns the grammar and the value of
    /// the optional `is_cnf` flag.
    pub fn from_json(text: &str) -> Result<(Grammar, bool), GrammarError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|err| GrammarError::new("grammar", err.to_string()))?;

        let start_symbol = value
            .get("start_symbol")
            .and_then(Value::as_str)
            .ok_or_else(|| GrammarError::new("grammar", "missing string field 'start_symbol'"))?;

        let rules = value
            .get("rules")
            .and_then(Value::as_object)
            .ok_or_else(|| GrammarError::new("grammar", "missing object field 'rules'"))?;

        let mut grammar = Grammar::new(start_symbol);
        for (non_terminal, productions) in rules {
            for production in as_production_list(non_terminal, productions)? {
                grammar.add_production(non_terminal, production);
            }
        }

        let is_cnf = value.get("is_cnf").and_then(Value::as_bool).unwrap_or(false);

        grammar.validate()?;
        Ok((grammar, is_cnf))
    }

    /// Read and parse a grammar file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<(Grammar, bool), GrammarError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| GrammarError::new(path.display().to_string(), err.to_string()))?;
        Grammar::from_json(&text)
    }

    /// Serialize the grammar into the JSON shape accepted by
    /// [from_json](Grammar::from_json).
    pub fn to_json(&self, is_cnf: bool) -> String {
        let mut rules = Map::new();
        for (non_terminal, productions) in &self.rules {
            let list: Vec<Value> = productions
                .iter()
                .map(|production| {
                    Value::Array(
                        production
                            .iter()
                            .map(|symbol| Value::String(symbol.clone()))
                            .collect(),
                    )
                })
                .collect();
            rules.insert(non_terminal.clone(), Value::Array(list));
        }

        json!({
            "start_symbol": self.start_symbol,
            "rules": Value::Object(rules),
            "is_cnf": is_cnf,
        })
        .to_string()
    }
}

fn as_production_list(non_terminal: &str, value: &Value) -> Result<Vec<Production>, GrammarError> {
    let list = value
        .as_array()
        .ok_or_else(|| GrammarError::new(non_terminal, "rules entry is not an array"))?;

    list.iter()
        .map(|production| {
            let symbols = production.as_array().ok_or_else(|| {
                GrammarError::new(non_terminal, "production is not an array of symbols")
            })?;
            symbols
                .iter()
                .map(|symbol| {
                    symbol.as_str().map(normalize_symbol).ok_or_else(|| {
                        GrammarError::new(non_terminal, "production symbol is not a string")
                    })
                })
                .collect()
        })
        .collect()
}
