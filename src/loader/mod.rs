/*
    This module loads grammars written as `A -> B "c" | "d"` lines
*/

mod lexer;
mod verifier;

use std::fmt::Display;
use std::path::Path;

use crate::grammar::*;
use crate::error_handling::*;
use log::{debug, info};

pub use verifier::verify_rules;

#[derive(Debug)]
pub enum CompileErrorType {
    // A symbol of the wrong kind (or no symbol) was found. `expected` is
    // `None` when nothing in particular would have been valid there.
    Syntax {
        expected: Option<SymbolKind>,
        found: Symbol
    },
    // A nonterminal is referenced but never given a rule
    UndefinedNonterminal(String),
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                CompileErrorType::Syntax { expected: a, found: x },
                CompileErrorType::Syntax { expected: b, found: y }
            ) => a == b && x == y,
            (CompileErrorType::UndefinedNonterminal(a), CompileErrorType::UndefinedNonterminal(b)) => a == b,
            (CompileErrorType::FileError(a), CompileErrorType::FileError(b)) => a.kind() == b.kind(),
            _ => false
        }
    }
}

impl Display for CompileErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileErrorType::Syntax { expected: Some(expected), found } =>
                write!(f, "{} expected but `{}` ({}) found", expected, found.surface(), found.kind()),
            CompileErrorType::Syntax { expected: None, found } =>
                write!(f, "Unexpected `{}` ({}) found", found.surface(), found.kind()),
            CompileErrorType::UndefinedNonterminal(nonterminal) =>
                write!(f, "Could not find definition for `{}`", nonterminal),
            CompileErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;

fn unexpected(found: Symbol) -> CompileErrorType {
    CompileErrorType::Syntax { expected: None, found }
}

fn expected(kind: SymbolKind, found: Option<&Symbol>) -> CompileErrorType {
    CompileErrorType::Syntax {
        expected: Some(kind),
        found: found.cloned().unwrap_or_else(Symbol::end_marker)
    }
}

fn parse_rewrite(symbols: &[Symbol]) -> Result<Rewrite> {
    let mut rewrite = Rewrite::new();
    let mut alternative = Alternative::new();
    let mut last_separator = None;

    for symbol in symbols {
        match symbol.kind() {
            SymbolKind::Separator => {
                if alternative.is_empty() {
                    return Err(unexpected(symbol.clone()));
                }
                rewrite.push(std::mem::take(&mut alternative));
                last_separator = Some(symbol);
            }
            SymbolKind::Terminal | SymbolKind::Nonterminal => alternative.push(symbol.clone()),
            SymbolKind::Arrow | SymbolKind::EndMarker => return Err(unexpected(symbol.clone())),
        }
    }

    // A dangling `|` leaves nothing to close the last alternative
    if alternative.is_empty() {
        return Err(unexpected(last_separator.cloned().unwrap_or_else(Symbol::end_marker)));
    }
    rewrite.push(alternative);

    Ok(rewrite)
}

fn parse_line(symbols: &[Symbol]) -> Result<(String, Rewrite)> {
    let name = match symbols.first() {
        Some(symbol) if symbol.is_nonterminal() => symbol.surface().to_string(),
        found => return Err(expected(SymbolKind::Nonterminal, found))
    };

    match symbols.get(1) {
        Some(symbol) if symbol.kind() == SymbolKind::Arrow => {}
        found => return Err(expected(SymbolKind::Arrow, found))
    }

    if symbols.len() < 3 {
        return Err(unexpected(Symbol::end_marker()));
    }

    Ok((name, parse_rewrite(&symbols[2..])?))
}

fn parse_source(text: &str, file: Option<&Path>) -> LineResult<Grammar> {
    let mut grammar = Grammar::new();
    let location = |line| Location { file: file.map(Path::to_path_buf), line };

    let rule_lines = text.lines()
        .enumerate()
        .filter(|(_, line)| lexer::is_rule_line(line));

    for (num, line) in rule_lines {
        let (name, rewrite) = parse_line(&lexer::lex_line(line))
            .map_err(|error| CompileError { location: location(num), error })?;

        debug!("line {}: {} has {} alternative(s)", num, name, rewrite.len());
        if grammar.insert(name.clone(), rewrite, num).is_some() {
            debug!("line {}: `{}` redeclared, replacing earlier rule", num, name);
        }
    }

    info!("loaded grammar with {} rule(s)", grammar.len());
    Ok(grammar)
}

/// Loads a grammar from source text.
///
/// Blank lines and lines starting with `;` are skipped. Loading stops at the
/// first malformed line. Declaring a nonterminal twice keeps only the second
/// declaration.
///
/// Error lines are 0-based physical lines, so blank and comment lines are
/// counted even though they are skipped.
pub fn parse_str(text: &str) -> LineResult<Grammar> {
    parse_source(text, None)
}

pub fn parse_file(path: &Path) -> LineResult<Grammar> {
    let text = std::fs::read_to_string(path).map_err(|e| CompileError {
        location: Location::in_file(path.to_path_buf(), 0),
        error: CompileErrorType::FileError(e)
    })?;

    parse_source(&text, Some(path))
}

#[cfg(test)]
mod tests {
    use std::iter::zip;
    use std::path::PathBuf;

    use super::*;

    fn arrow() -> Symbol {
        Symbol::new("->", SymbolKind::Arrow)
    }

    fn separator() -> Symbol {
        Symbol::new("|", SymbolKind::Separator)
    }

    fn syntax_error(line: usize, expected: Option<SymbolKind>, found: Symbol) -> CompileError {
        CompileError {
            location: Location::line(line),
            error: CompileErrorType::Syntax { expected, found }
        }
    }

    #[test]
    fn parse_normal_rewrite() {
        let lines = vec![
            vec![Symbol::nonterminal("Det"), Symbol::nonterminal("N")],
            vec![Symbol::terminal("cat"), separator(), Symbol::terminal("dog")],
        ];
        let answers = vec![
            vec![vec![Symbol::nonterminal("Det"), Symbol::nonterminal("N")]],
            vec![vec![Symbol::terminal("cat")], vec![Symbol::terminal("dog")]],
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(parse_rewrite(&line[..]).unwrap(), answer);
        }
    }

    #[test]
    fn parse_malformed_rewrite() {
        assert_eq!(parse_rewrite(&[separator(), Symbol::terminal("x")]), Err(unexpected(separator())));
        assert_eq!(parse_rewrite(&[Symbol::terminal("x"), separator()]), Err(unexpected(separator())));
        assert_eq!(
            parse_rewrite(&[Symbol::terminal("x"), separator(), separator(), Symbol::terminal("y")]),
            Err(unexpected(separator()))
        );
        assert_eq!(parse_rewrite(&[Symbol::terminal("x"), arrow()]), Err(unexpected(arrow())));
    }

    #[test]
    fn parse_normal_line() {
        let lexed = lexer::lex_line("N -> \"cat\" | \"dog\" Adj");

        assert_eq!(parse_line(&lexed[..]), Ok(("N".to_string(), vec![
            vec![Symbol::terminal("cat")],
            vec![Symbol::terminal("dog"), Symbol::nonterminal("Adj")]
        ])));
    }

    #[test]
    fn parse_malformed_line() {
        // Blank
        assert_eq!(parse_line(&[]), Err(expected(SymbolKind::Nonterminal, None)));

        // Improper definition
        assert_eq!(
            parse_line(&lexer::lex_line("\"x\" -> A")),
            Err(expected(SymbolKind::Nonterminal, Some(&Symbol::terminal("x"))))
        );
        assert_eq!(
            parse_line(&lexer::lex_line("| -> A")),
            Err(expected(SymbolKind::Nonterminal, Some(&separator())))
        );

        // Missing arrow
        assert_eq!(
            parse_line(&lexer::lex_line("A B C")),
            Err(expected(SymbolKind::Arrow, Some(&Symbol::nonterminal("B"))))
        );
        assert_eq!(parse_line(&lexer::lex_line("A")), Err(expected(SymbolKind::Arrow, None)));

        // Nothing after the arrow
        assert_eq!(parse_line(&lexer::lex_line("A ->")), Err(unexpected(Symbol::end_marker())));
    }

    #[test]
    fn parse_lowercase_nonterminal() {
        let grammar = parse_str("a -> \"x\"\n").unwrap();
        assert_eq!(grammar.get("a"), Some(&vec![vec![Symbol::terminal("x")]]));
    }

    #[test]
    fn parse_missing_left_side() {
        assert_eq!(
            parse_str("-> \"x\"\n"),
            Err(syntax_error(0, Some(SymbolKind::Nonterminal), arrow()))
        );
    }

    #[test]
    fn parse_trailing_separator() {
        assert_eq!(parse_str("A -> \"x\" |\n"), Err(syntax_error(0, None, separator())));
    }

    #[test]
    fn parse_reports_first_error_line() {
        let text = "S -> A\n\n; comment\nA -> \"x\"\nB \"y\"\nC ->\n";
        assert_eq!(
            parse_str(text),
            Err(syntax_error(4, Some(SymbolKind::Arrow), Symbol::terminal("y")))
        );
    }

    #[test]
    fn error_line_counts_blank_lines() {
        assert_eq!(
            parse_str("S -> \"a\"\n\n\nB \"y\"\n"),
            Err(syntax_error(3, Some(SymbolKind::Arrow), Symbol::terminal("y")))
        );
    }

    #[test]
    fn parse_redeclared_rule() {
        let grammar = parse_str("A -> \"x\"\nB -> A\nA -> \"y\" | \"z\"\n").unwrap();

        assert_eq!(grammar.get("A"), Some(&vec![vec![Symbol::terminal("y")], vec![Symbol::terminal("z")]]));
        assert_eq!(grammar.rules().map(|(name, _)| name).collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn error_messages() {
        let errors = vec![
            syntax_error(0, Some(SymbolKind::Nonterminal), arrow()),
            syntax_error(3, None, separator()),
            syntax_error(1, None, Symbol::end_marker()),
        ];
        let answers = vec![
            "[line 0] nonterminal expected but `->` (arrow) found",
            "[line 3] Unexpected `|` (separator) found",
            "[line 1] Unexpected `EOL` (end of line) found",
        ];

        for (error, answer) in zip(errors, answers) {
            assert_eq!(error.to_string(), answer);
        }
    }

    #[test]
    fn parse_normal_file() {
        let example_path = PathBuf::from("example_data/english.cfg");
        let grammar = parse_file(&example_path).unwrap();

        let mut answer = Grammar::new();
        answer.insert("S", vec![vec![Symbol::nonterminal("NP"), Symbol::nonterminal("VP")]], 2);
        answer.insert("NP", vec![vec![Symbol::nonterminal("Det"), Symbol::nonterminal("N")]], 3);
        answer.insert("N", vec![vec![Symbol::terminal("cat")], vec![Symbol::terminal("dog")]], 4);
        answer.insert("Det", vec![vec![Symbol::terminal("the")], vec![Symbol::terminal("a")]], 5);
        answer.insert("VP", vec![vec![Symbol::nonterminal("V"), Symbol::nonterminal("NP")]], 6);
        answer.insert("V", vec![vec![Symbol::terminal("likes")]], 7);

        assert_eq!(grammar, answer);
    }

    #[test]
    fn parse_malformed_file() {
        let example_path = PathBuf::from("example_data/malformed.cfg");

        assert_eq!(parse_file(&example_path), Err(CompileError {
            location: Location::in_file(example_path.clone(), 3),
            error: CompileErrorType::Syntax {
                expected: Some(SymbolKind::Nonterminal),
                found: Symbol::terminal("the")
            }
        }));
    }

    #[test]
    fn parse_missing_file() {
        let example_path = PathBuf::from("example_data/does_not_exist.cfg");
        let error = parse_file(&example_path).unwrap_err();

        assert_eq!(error.location, Location::in_file(example_path, 0));
        assert_eq!(error.error, CompileErrorType::FileError(std::io::ErrorKind::NotFound.into()));
    }
}
