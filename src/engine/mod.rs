/*
    This module holds the parsing strategies
*/

mod shift_reduce;
mod top_down;

use std::fmt::Display;

use itertools::Itertools;

use crate::grammar::Grammar;
use crate::tree::Tree;

pub use shift_reduce::ShiftReduceParser;
pub use top_down::{EmptyTerminal, TopDownParser};

#[derive(Debug, PartialEq, Clone)]
pub enum ParseError {
    // A production refers to a nonterminal with no rule
    UndefinedRule(String),
    // An alternative started matching and then a later symbol did not
    Expected {
        expected: String,
        found: Option<String>,
        position: usize
    },
    // None of the start symbol's alternatives matched
    NoRuleMatched(String),
    // The start symbol matched but input was left over
    UnconsumedInput {
        token: String,
        position: usize
    },
    // Shift-reduce finished with anything other than a single tree
    ParsingFailed(Vec<String>),
    RecursionLimit(usize),
    ReductionLimit(usize),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UndefinedRule(name) => write!(f, "`{}` is an undefined rule", name),
            ParseError::Expected { expected, found: Some(found), position } =>
                write!(f, "`{}` expected but `{}` found at token {}", expected, found, position),
            ParseError::Expected { expected, found: None, position } =>
                write!(f, "`{}` expected but end of input found at token {}", expected, position),
            ParseError::NoRuleMatched(start) => write!(f, "Input does not match any rule for `{}`", start),
            ParseError::UnconsumedInput { token, position } =>
                write!(f, "Unexpected `{}` at token {} after a complete parse", token, position),
            ParseError::ParsingFailed(stack) => write!(f, "Parsing failed, stack ended as [{}]", stack.iter().join(" ")),
            ParseError::RecursionLimit(limit) => write!(f, "Rule nesting exceeded {} levels", limit),
            ParseError::ReductionLimit(limit) => write!(f, "More than {} reductions without a shift", limit),
        }
    }
}

impl std::error::Error for ParseError {}

pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Something that turns a sequence of terminal surfaces into a tree.
pub trait Parser {
    fn parse(&self, tokens: &[&str]) -> ParseResult<Tree>;
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, clap::ValueEnum)]
pub enum Strategy {
    /// Top-down, empty terminals never match
    TopDown,
    /// Top-down, empty terminals match at the end of input
    TopDownEpsilon,
    /// Bottom-up shift-reduce
    ShiftReduce,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::TopDown, Strategy::TopDownEpsilon, Strategy::ShiftReduce];

    pub fn parser<'g>(self, grammar: &'g Grammar) -> Box<dyn Parser + 'g> {
        match self {
            Strategy::TopDown => Box::new(TopDownParser::strict(grammar)),
            Strategy::TopDownEpsilon => Box::new(TopDownParser::with_epsilon(grammar)),
            Strategy::ShiftReduce => Box::new(ShiftReduceParser::new(grammar)),
        }
    }
}
