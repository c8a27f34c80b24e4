/*
    This module holds the trees the parsers build
*/

use std::fmt::Display;

use itertools::Itertools;

/// A labeled node with ordered children.
///
/// Leaves carry the surface of a matched terminal. Internal nodes carry the
/// name of the nonterminal they were built from.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Tree {
    label: String,
    children: Vec<Tree>,
}

impl Tree {
    pub fn new(label: impl Into<String>, children: Vec<Tree>) -> Self {
        Tree { label: label.into(), children }
    }

    pub fn leaf(label: impl Into<String>) -> Self {
        Tree::new(label, Vec::new())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[Tree] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Labels of the leaves, left to right.
    pub fn leaves(&self) -> Vec<&str> {
        if self.is_leaf() {
            return vec![self.label()];
        }
        self.children.iter().flat_map(Tree::leaves).collect()
    }

    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Tree::depth).max().unwrap_or(0)
    }
}

// `(S (NP 'the' ...) ...)` for nodes, `'cat'` for leaves
impl Display for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_leaf() {
            write!(f, "'{}'", self.label)
        } else {
            write!(f, "({} {})", self.label, self.children.iter().join(" "))
        }
    }
}
