//! Constant shorthand mappings
//!
//! This module provides the symbol table used by the constant substitution
//! stage. Shorthands like `->` or `pi` are replaced by their LaTeX
//! equivalents before any structural rewriting happens.
//!
//! Entry order matters: the table is applied top to bottom, and a key that
//! is a prefix or suffix of a later key (`->` and `<->`) wins.

use indexmap::IndexMap;
use phf::phf_ordered_map;

/// Shorthand to LaTeX mapping, in application order
pub static DEFAULT_SHORTHANDS: phf::OrderedMap<&'static str, &'static str> = phf_ordered_map! {
    "pi" => r"\pi",

    // Arrows
    "->" => r"\to",
    "<-" => r"\gets",
    "<->" => r"\leftrightarrow",

    // Logical implication
    "<==" => r"\impliedby",
    "==>" => r"\implies",
    "<=>" => r"\iff",

    // Comparison operators
    "<=" => r"\leq",
    ">=" => r"\geq",

    // Other symbols
    "inf" => r"\infty",
    "deg" => r"\degree",
    "degC" => r"\degreeCelsius",
};

/// An ordered, replaceable shorthand table owned by a converter.
///
/// Keys are unique. Inserting an existing key replaces its markup but keeps
/// its original position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShorthandTable {
    entries: IndexMap<String, String>,
}

impl ShorthandTable {
    /// Create an empty table
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Add or replace an entry
    pub fn insert(&mut self, shorthand: impl Into<String>, markup: impl Into<String>) {
        self.entries.insert(shorthand.into(), markup.into());
    }

    /// Builder form of [`ShorthandTable::insert`]
    pub fn with(mut self, shorthand: impl Into<String>, markup: impl Into<String>) -> Self {
        self.insert(shorthand, markup);
        self
    }

    /// Remove an entry, keeping the order of the others
    pub fn remove(&mut self, shorthand: &str) -> Option<String> {
        self.entries.shift_remove(shorthand)
    }

    pub fn get(&self, shorthand: &str) -> Option<&str> {
        self.entries.get(shorthand).map(|s| s.as_str())
    }

    /// Iterate entries in application order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ShorthandTable {
    fn default() -> Self {
        DEFAULT_SHORTHANDS
            .entries()
            .map(|(k, v)| (*k, *v))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ShorthandTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = ShorthandTable::empty();
        for (k, v) in iter {
            table.insert(k, v);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shorthands() {
        let table = ShorthandTable::default();
        assert_eq!(table.len(), DEFAULT_SHORTHANDS.len());
        assert_eq!(table.get("pi"), Some(r"\pi"));
        assert_eq!(table.get("<=>"), Some(r"\iff"));
        assert_eq!(table.get("degC"), Some(r"\degreeCelsius"));
        assert_eq!(table.get("alpha"), None);
    }

    #[test]
    fn test_default_order_is_declaration_order() {
        let table = ShorthandTable::default();
        let keys: Vec<_> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys.first(), Some(&"pi"));
        let arrow = keys.iter().position(|k| *k == "->").unwrap();
        let both = keys.iter().position(|k| *k == "<->").unwrap();
        assert!(arrow < both);
        assert_eq!(keys.last(), Some(&"degC"));
    }

    #[test]
    fn test_insert_keeps_position() {
        let mut table = ShorthandTable::default();
        let len = table.len();
        table.insert("pi", r"\varpi");
        assert_eq!(table.len(), len);
        assert_eq!(table.iter().next(), Some(("pi", r"\varpi")));
    }

    #[test]
    fn test_remove() {
        let mut table = ShorthandTable::empty().with("a", "A").with("b", "B");
        assert_eq!(table.remove("a"), Some("A".to_string()));
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![("b", "B")]);
    }
}
