/*
    This module is for storing and manipulating grammars
*/

use std::fmt::Display;

use indexmap::IndexMap;
use itertools::Itertools;

pub const START_SYMBOL: &str = "S";

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum SymbolKind {
    Terminal,
    Nonterminal,
    // The `->` between a rule's name and its alternatives
    Arrow,
    // The `|` between alternatives
    Separator,
    // Stands in for a missing symbol at the end of a line
    EndMarker,
}

impl Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolKind::Terminal => write!(f, "terminal"),
            SymbolKind::Nonterminal => write!(f, "nonterminal"),
            SymbolKind::Arrow => write!(f, "arrow"),
            SymbolKind::Separator => write!(f, "separator"),
            SymbolKind::EndMarker => write!(f, "end of line"),
        }
    }
}

// The base unit in a grammar rule
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Symbol {
    surface: String,
    kind: SymbolKind,
}

impl Symbol {
    pub fn new(surface: impl Into<String>, kind: SymbolKind) -> Self {
        Symbol { surface: surface.into(), kind }
    }

    pub fn terminal(surface: impl Into<String>) -> Self {
        Symbol::new(surface, SymbolKind::Terminal)
    }

    pub fn nonterminal(surface: impl Into<String>) -> Self {
        Symbol::new(surface, SymbolKind::Nonterminal)
    }

    pub fn end_marker() -> Self {
        Symbol::new("EOL", SymbolKind::EndMarker)
    }

    /// Classifies one whitespace-free chunk of grammar text.
    ///
    /// A terminal is anything wrapped in double quotes; its surface is stored
    /// without them. A lone `"` is not a terminal.
    pub fn classify(raw: &str) -> Self {
        if raw == "->" {
            Symbol::new(raw, SymbolKind::Arrow)
        } else if raw == "|" {
            Symbol::new(raw, SymbolKind::Separator)
        } else if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
            Symbol::terminal(&raw[1..raw.len() - 1])
        } else {
            Symbol::nonterminal(raw)
        }
    }

    pub fn surface(&self) -> &str {
        &self.surface
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn is_terminal(&self) -> bool {
        self.kind == SymbolKind::Terminal
    }

    pub fn is_nonterminal(&self) -> bool {
        self.kind == SymbolKind::Nonterminal
    }
}

// Renders the symbol the way it is written in grammar source
impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            SymbolKind::Terminal => write!(f, "\"{}\"", self.surface),
            _ => write!(f, "{}", self.surface),
        }
    }
}

// The symbols in a single alternative
pub type Alternative = Vec<Symbol>;

// The alternatives of a rewrite rule
pub type Rewrite = Vec<Alternative>;

#[derive(Debug, PartialEq, Clone)]
pub struct Rule {
    pub rewrite: Rewrite,
    // 0-based line the rule was declared on
    pub line: usize,
}

/// A set of rewrite rules keyed by nonterminal name.
///
/// Rules iterate in the order their names were first declared. Every engine
/// relies on that order (and on the order of alternatives inside a rule) to
/// pick between competing matches.
#[derive(Debug, PartialEq, Clone)]
pub struct Grammar {
    pub start_symbol: String,
    rules: IndexMap<String, Rule>,
}

impl Default for Grammar {
    fn default() -> Self {
        Grammar::new()
    }
}

impl Grammar {
    pub fn new() -> Self {
        Grammar {
            start_symbol: START_SYMBOL.to_string(),
            rules: IndexMap::new(),
        }
    }

    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start_symbol = start.into();
        self
    }

    /// Adds a rule, replacing any earlier rule with the same name.
    ///
    /// A replaced rule keeps its place in iteration order. The previous rule
    /// is returned.
    pub fn insert(&mut self, name: impl Into<String>, rewrite: Rewrite, line: usize) -> Option<Rule> {
        self.rules.insert(name.into(), Rule { rewrite, line })
    }

    pub fn get(&self, name: &str) -> Option<&Rewrite> {
        self.rules.get(name).map(|rule| &rule.rewrite)
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn rules(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (name, rule) in self.rules() {
            let alternatives = rule.rewrite.iter()
                .map(|alternative| alternative.iter().join(" "))
                .join(" | ");
            writeln!(f, "{} -> {}", name, alternatives)?;
        }
        Ok(())
    }
}
