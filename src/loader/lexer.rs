use itertools::Itertools;

use crate::grammar::Symbol;

// Lines starting with `;` are comments
pub fn is_rule_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    !trimmed.is_empty() && !trimmed.starts_with(';')
}

pub fn lex_line(line: &str) -> Vec<Symbol> {
    line.split_whitespace().map(Symbol::classify).collect_vec()
}
