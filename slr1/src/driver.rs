use std::fmt;

use lexan::Token;

use crate::augmented::AugmentedGrammar;
use crate::symbol::Symbol;
use crate::table::{Action, SlrTable};

/// The sequence of production numbers applied, in reduce order — a
/// rightmost derivation read backwards (§4.7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation(pub Vec<u32>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub position: usize,
    pub found: String,
    pub expected: Vec<Symbol>,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, dest: &mut fmt::Formatter) -> fmt::Result {
        let expected: Vec<String> = self.expected.iter().map(|s| s.name().to_string()).collect();
        write!(
            dest,
            "syntax error at token {}: found '{}', expected one of: {}",
            self.position,
            self.found,
            expected.join(", ")
        )
    }
}

impl std::error::Error for SyntaxError {}

/// Drives the shift/reduce loop over `tokens` to completion or the
/// first syntax error (§4.7). A GOTO miss immediately after a reduce
/// signals a broken table, not a malformed source, so it panics rather
/// than returning an error.
pub fn parse(grammar: &AugmentedGrammar, table: &SlrTable, tokens: &[Token]) -> Result<Derivation, SyntaxError> {
    let mut stack: Vec<usize> = vec![0];
    let mut derivation = Vec::new();
    let mut position = 0;

    loop {
        let state = *stack.last().expect("stack is never empty");
        let lookahead = if position < tokens.len() {
            Symbol::terminal(tokens[position].tag())
        } else {
            Symbol::end_marker()
        };

        match table.action(state, &lookahead) {
            None => {
                let found = if position < tokens.len() {
                    tokens[position].lexeme().to_string()
                } else {
                    Symbol::end_marker().name().to_string()
                };
                return Err(SyntaxError { position, found, expected: table.expected_terminals(state) });
            }
            Some(Action::Shift(next)) => {
                stack.push(next);
                position += 1;
            }
            Some(Action::Reduce(number)) => {
                let production = grammar.production(number).expect("valid production number");
                for _ in 0..production.body().len() {
                    stack.pop();
                }
                let back_state = *stack.last().expect("stack is never empty");
                let next = table
                    .goto(back_state, production.head())
                    .unwrap_or_else(|| panic!("no GOTO entry for state {} on '{}'", back_state, production.head()));
                stack.push(next);
                derivation.push(number);
            }
            Some(Action::Accept) => return Ok(Derivation(derivation)),
        }
    }
}
