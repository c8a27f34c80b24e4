use std::collections::VecDeque;
use std::iter::zip;

use itertools::Itertools;
use log::{debug, trace};

use crate::grammar::{Grammar, Symbol};
use crate::tree::Tree;
use super::{ParseError, ParseResult, Parser};

pub const DEFAULT_MAX_REDUCTIONS: usize = 4096;

#[derive(Debug, PartialEq, Clone)]
enum StackItem {
    // Shifted input that no rule has consumed yet
    Symbol(Symbol),
    Tree(Tree),
}

impl StackItem {
    fn label(&self) -> &str {
        match self {
            StackItem::Symbol(symbol) => symbol.surface(),
            StackItem::Tree(tree) => tree.label(),
        }
    }

    fn into_tree(self) -> Tree {
        match self {
            StackItem::Symbol(symbol) => Tree::leaf(symbol.surface()),
            StackItem::Tree(tree) => tree,
        }
    }
}

// Trees only match nonterminals of the same name, raw input only matches
// terminals with the same surface
fn matches_suffix(alternative: &[Symbol], suffix: &[StackItem]) -> bool {
    alternative.len() == suffix.len() && zip(alternative, suffix).all(|(symbol, item)| match item {
        StackItem::Tree(tree) => symbol.is_nonterminal() && symbol.surface() == tree.label(),
        StackItem::Symbol(raw) => symbol.is_terminal() && symbol.surface() == raw.surface(),
    })
}

/// Shifts input onto a stack one token at a time, reducing the stack after
/// every shift for as long as some rule applies.
///
/// Reductions are searched for from the longest stack suffix down, then by
/// rule order, then by alternative order. The first hit wins; there is no
/// other conflict resolution.
#[derive(Debug, Clone)]
pub struct ShiftReduceParser<'g> {
    grammar: &'g Grammar,
    max_reductions: usize,
}

impl<'g> ShiftReduceParser<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        ShiftReduceParser { grammar, max_reductions: DEFAULT_MAX_REDUCTIONS }
    }

    /// Caps the reductions between two shifts, which is what stops rule
    /// cycles like `A -> B` and `B -> A` from spinning forever.
    pub fn max_reductions(mut self, max_reductions: usize) -> Self {
        self.max_reductions = max_reductions;
        self
    }

    // Start of the reducible suffix and the rule that reduces it
    fn find_reduction(&self, stack: &[StackItem]) -> Option<(usize, &'g str)> {
        let grammar = self.grammar;
        (0..stack.len()).find_map(|start| {
            grammar.rules()
                .find(|(_, rule)| rule.rewrite.iter().any(|alternative| matches_suffix(alternative, &stack[start..])))
                .map(|(name, _)| (start, name))
        })
    }

    fn reduce(&self, stack: &mut Vec<StackItem>) -> ParseResult<()> {
        let mut reductions = 0;

        while let Some((start, name)) = self.find_reduction(stack) {
            reductions += 1;
            if reductions > self.max_reductions {
                return Err(ParseError::ReductionLimit(self.max_reductions));
            }

            let children = stack.drain(start..).map(StackItem::into_tree).collect_vec();
            debug!("reduce {} -> {}", name, children.iter().map(Tree::label).join(" "));
            stack.push(StackItem::Tree(Tree::new(name, children)));
        }

        Ok(())
    }
}

impl Parser for ShiftReduceParser<'_> {
    fn parse(&self, tokens: &[&str]) -> ParseResult<Tree> {
        let mut remaining: VecDeque<Symbol> = tokens.iter().map(|token| Symbol::classify(token)).collect();
        let mut stack = Vec::new();

        while let Some(symbol) = remaining.pop_front() {
            trace!("shift {}", symbol);
            stack.push(StackItem::Symbol(symbol));
            self.reduce(&mut stack)?;
        }

        match (stack.pop(), stack.is_empty()) {
            (Some(StackItem::Tree(tree)), true) => {
                trace!("accepted {}, {} level(s) deep", tree.label(), tree.depth());
                Ok(tree)
            }
            (last, _) => {
                stack.extend(last);
                Err(ParseError::ParsingFailed(stack.iter().map(|item| item.label().to_string()).collect()))
            }
        }
    }
}
