use log::trace;

use crate::grammar::{Grammar, Symbol};
use crate::tree::Tree;
use super::{ParseError, ParseResult, Parser};

pub const DEFAULT_MAX_DEPTH: usize = 512;

// What an empty terminal (`""`) matches
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EmptyTerminal {
    // Only an empty input token
    Strict,
    // Also the end of input
    MatchAtEnd,
}

// A matched subtree and the position just past it
type Match = Option<(Tree, usize)>;

/// Expands the start symbol and matches it against the input left to right.
///
/// Alternatives are tried in order, but only up to their first symbol. Once
/// an alternative's first symbol has matched, the rest of it must match too
/// or the whole parse fails. A rule that matches nothing consumes nothing, so
/// the next alternative starts from the same position.
///
/// Tokens left over once the start symbol has matched are ignored unless
/// [`TopDownParser::require_full_input`] is set.
#[derive(Debug, Clone)]
pub struct TopDownParser<'g> {
    grammar: &'g Grammar,
    empty_terminal: EmptyTerminal,
    max_depth: usize,
    require_full_input: bool,
}

impl<'g> TopDownParser<'g> {
    pub fn strict(grammar: &'g Grammar) -> Self {
        TopDownParser {
            grammar,
            empty_terminal: EmptyTerminal::Strict,
            max_depth: DEFAULT_MAX_DEPTH,
            require_full_input: false,
        }
    }

    pub fn with_epsilon(grammar: &'g Grammar) -> Self {
        TopDownParser { empty_terminal: EmptyTerminal::MatchAtEnd, ..TopDownParser::strict(grammar) }
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    // Reject input that is still left once the start symbol has matched
    pub fn require_full_input(mut self, require_full_input: bool) -> Self {
        self.require_full_input = require_full_input;
        self
    }

    fn match_rule(&self, name: &str, tokens: &[&str], pos: usize, depth: usize) -> ParseResult<Match> {
        if depth > self.max_depth {
            return Err(ParseError::RecursionLimit(self.max_depth));
        }
        let rewrite = self.grammar.get(name)
            .ok_or_else(|| ParseError::UndefinedRule(name.to_string()))?;

        for alternative in rewrite {
            let Some((first, rest)) = alternative.split_first() else {
                continue;
            };
            let Some((tree, mut pos)) = self.match_symbol(first, tokens, pos, depth)? else {
                continue;
            };
            trace!("{}: committed to `{}` at token {}", name, first, pos);

            let mut children = vec![tree];
            for symbol in rest {
                let (tree, next) = self.match_symbol(symbol, tokens, pos, depth)?
                    .ok_or_else(|| ParseError::Expected {
                        expected: symbol.surface().to_string(),
                        found: tokens.get(pos).map(|token| token.to_string()),
                        position: pos
                    })?;
                children.push(tree);
                pos = next;
            }
            return Ok(Some((Tree::new(name, children), pos)));
        }

        Ok(None)
    }

    fn match_symbol(&self, symbol: &Symbol, tokens: &[&str], pos: usize, depth: usize) -> ParseResult<Match> {
        if symbol.is_nonterminal() {
            return self.match_rule(symbol.surface(), tokens, pos, depth + 1);
        }

        Ok(match tokens.get(pos) {
            Some(&token) if token == symbol.surface() => Some((Tree::leaf(token), pos + 1)),
            None if self.empty_terminal == EmptyTerminal::MatchAtEnd && symbol.surface().is_empty() =>
                Some((Tree::leaf(""), pos)),
            _ => None
        })
    }
}

impl Parser for TopDownParser<'_> {
    fn parse(&self, tokens: &[&str]) -> ParseResult<Tree> {
        let start = &self.grammar.start_symbol;

        match self.match_rule(start, tokens, 0, 0)? {
            None => Err(ParseError::NoRuleMatched(start.clone())),
            Some((_, pos)) if self.require_full_input && pos < tokens.len() => Err(ParseError::UnconsumedInput {
                token: tokens[pos].to_string(),
                position: pos
            }),
            Some((tree, pos)) => {
                trace!("{} matched {} of {} token(s), {} level(s) deep", start, pos, tokens.len(), tree.depth());
                Ok(tree)
            }
        }
    }
}
