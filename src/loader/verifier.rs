use crate::error_handling::Location;
use crate::grammar::{Alternative, Grammar, Rule};
use super::CompileErrorType::UndefinedNonterminal;
use super::{CompileError, CompileErrors};

fn get_alternative_undefined_symbols(alternative: &Alternative, location: &Location, grammar: &Grammar) -> CompileErrors {
    // Keep only the nonterminals, then only the ones without a rule
    alternative.iter()
        .filter(|symbol| symbol.is_nonterminal())
        .filter(|symbol| !grammar.contains(symbol.surface()))
        .map(|symbol| CompileError {
            location: location.to_owned(),
            error: UndefinedNonterminal(symbol.surface().to_owned())
        })
        .collect()
}

fn get_rule_undefined_symbols(rule: &Rule, location: &Location, grammar: &Grammar) -> CompileErrors {
    rule.rewrite.iter()
        .flat_map(|alternative| get_alternative_undefined_symbols(alternative, location, grammar))
        .collect()
}

/// Lists every reference to a nonterminal that has no rule, located at the
/// line of the referencing rule.
///
/// `base` supplies the file the grammar came from, if any.
pub fn verify_rules(grammar: &Grammar, base: &Location) -> CompileErrors {
    let mut errors: CompileErrors = grammar.rules()
        .flat_map(|(_, rule)| {
            let location = Location { line: rule.line, ..base.clone() };
            get_rule_undefined_symbols(rule, &location, grammar)
        })
        .collect();

    if !grammar.is_empty() && !grammar.contains(&grammar.start_symbol) {
        errors.push(CompileError {
            location: base.clone(),
            error: UndefinedNonterminal(grammar.start_symbol.clone())
        });
    }

    errors
}
