/*
    This module generates sentences
*/

use rand::prelude::*;
use std::fmt::Display;

use crate::grammar::*;
use crate::error_handling::*;

// Deepest nonterminal nesting a sentence may reach
pub const MAX_DEPTH: usize = 64;

#[derive(Debug, PartialEq)]
pub enum GenerateErrorType {
    // An undefined nonterminal was used
    UndefinedNonterminal(String),
    // Expansion kept choosing recursive alternatives
    DepthExceeded(usize),
}

impl ErrorType for GenerateErrorType {}

impl Display for GenerateErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateErrorType::UndefinedNonterminal(nonterminal) => write!(f, "No definition for nonterminal `{}`", nonterminal),
            GenerateErrorType::DepthExceeded(depth) => write!(f, "Sentence nested deeper than {} rules", depth),
        }
    }
}

pub type GenerateError = Error<GenerateErrorType>;
pub type GenResult<T> = Result<T, GenerateError>;

/// Expands the grammar's start symbol into a random sentence.
///
/// Empty terminals produce no token.
pub fn generate<R: Rng + ?Sized>(grammar: &Grammar, rng: &mut R) -> GenResult<Vec<String>> {
    generate_with_override(grammar, &grammar.start_symbol, rng)
}

// Generates a sentence in the given grammar starting with the given symbol
pub fn generate_with_override<R: Rng + ?Sized>(grammar: &Grammar, start: &str, rng: &mut R) -> GenResult<Vec<String>> {
    let mut sentence = Vec::new();
    generate_nonterminal(start, grammar, &Location::default(), 0, rng, &mut sentence)?;
    Ok(sentence)
}

fn generate_nonterminal<R: Rng + ?Sized>(
    nonterminal: &str,
    grammar: &Grammar,
    location: &Location,
    depth: usize,
    rng: &mut R,
    sentence: &mut Vec<String>
) -> GenResult<()> {
    if depth > MAX_DEPTH {
        return Err(GenerateError {
            location: location.clone(),
            error: GenerateErrorType::DepthExceeded(MAX_DEPTH)
        });
    }

    let rule = grammar
        .rule(nonterminal)
        .ok_or_else(|| GenerateError {
            location: location.clone(),
            error: GenerateErrorType::UndefinedNonterminal(nonterminal.to_string())
        })?;
    generate_rewrite(&rule.rewrite, grammar, &Location::line(rule.line), depth, rng, sentence)
}

fn generate_rewrite<R: Rng + ?Sized>(
    rewrite: &Rewrite,
    grammar: &Grammar,
    location: &Location,
    depth: usize,
    rng: &mut R,
    sentence: &mut Vec<String>
) -> GenResult<()> {
    let alternative = match rewrite.choose(rng) {
        Some(a) => a,
        None => return Ok(()),
    };

    for symbol in alternative {
        if symbol.is_nonterminal() {
            generate_nonterminal(symbol.surface(), grammar, location, depth + 1, rng, sentence)?;
        } else if !symbol.surface().is_empty() {
            sentence.push(symbol.surface().to_string());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;

    use super::*;
    use crate::loader::parse_str;

    #[test]
    fn generate_from_start() {
        let grammar = parse_str("S -> NP \"sleeps\"\nNP -> \"the\" N\nN -> \"cat\" | \"dog\"\n").unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let sentence = generate(&grammar, &mut rng).unwrap();
            assert_eq!(sentence.len(), 3);
            assert_eq!(sentence[0], "the");
            assert!(sentence[1] == "cat" || sentence[1] == "dog");
            assert_eq!(sentence[2], "sleeps");
        }
    }

    #[test]
    fn generate_is_seeded() {
        let grammar = parse_str("S -> \"a\" S | \"b\" S | \"c\"\n").unwrap();

        let first = generate(&grammar, &mut StdRng::seed_from_u64(42));
        let second = generate(&grammar, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn generate_drops_empty_terminals() {
        let grammar = parse_str("S -> \"x\" Opt\nOpt -> \"\"\n").unwrap();

        assert_eq!(generate(&grammar, &mut StdRng::seed_from_u64(0)), Ok(vec!["x".to_string()]));
    }

    #[test]
    fn generate_with_other_start() {
        let grammar = parse_str("S -> N N\nN -> \"cat\"\n").unwrap();

        assert_eq!(
            generate_with_override(&grammar, "N", &mut StdRng::seed_from_u64(0)),
            Ok(vec!["cat".to_string()])
        );
    }

    #[test]
    fn generate_undefined() {
        let grammar = parse_str("S -> A\n\nA -> B\n").unwrap();

        assert_eq!(generate(&grammar, &mut StdRng::seed_from_u64(0)), Err(GenerateError {
            location: Location::line(2),
            error: GenerateErrorType::UndefinedNonterminal("B".to_string())
        }));
    }

    #[test]
    fn generate_endless_recursion() {
        let grammar = parse_str("S -> \"x\" S\n").unwrap();
        let error = generate(&grammar, &mut StdRng::seed_from_u64(0)).unwrap_err();

        assert_eq!(error.error, GenerateErrorType::DepthExceeded(MAX_DEPTH));
    }
}
