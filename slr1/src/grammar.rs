use std::collections::BTreeSet;
use std::fmt;

use crate::production::Production;
use crate::symbol::Symbol;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    UnknownSymbol(Symbol, u32),
    StartNotNonTerminal,
    StartUndeclared,
    DuplicateProductionNumber(u32),
    NonDenseNumbering(u32),
}

impl fmt::Display for GrammarError {
    fn fmt(&self, dest: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GrammarError::UnknownSymbol(sym, number) => {
                write!(dest, "production {}: symbol '{}' is not declared", number, sym)
            }
            GrammarError::StartNotNonTerminal => write!(dest, "start symbol is not a nonterminal"),
            GrammarError::StartUndeclared => write!(dest, "start symbol is not among the declared nonterminals"),
            GrammarError::DuplicateProductionNumber(n) => write!(dest, "production number {} used more than once", n),
            GrammarError::NonDenseNumbering(n) => write!(dest, "production numbering is not dense at {}", n),
        }
    }
}

impl std::error::Error for GrammarError {}

/// A context-free grammar: productions numbered `1..=n` (§3; number `0`
/// is reserved for the augmented start production added by the SLR
/// builder), plus declared terminal and nonterminal vocabularies.
#[derive(Debug, Clone)]
pub struct Grammar {
    productions: Vec<Production>,
    terminals: BTreeSet<Symbol>,
    nonterminals: BTreeSet<Symbol>,
    start: Symbol,
}

impl Grammar {
    pub fn new(
        productions: Vec<Production>,
        terminals: BTreeSet<Symbol>,
        nonterminals: BTreeSet<Symbol>,
        start: Symbol,
    ) -> Result<Self, GrammarError> {
        if !start.is_non_terminal() {
            return Err(GrammarError::StartNotNonTerminal);
        }
        if !nonterminals.contains(&start) {
            return Err(GrammarError::StartUndeclared);
        }

        let mut seen_numbers = BTreeSet::new();
        for production in &productions {
            if !seen_numbers.insert(production.number()) {
                return Err(GrammarError::DuplicateProductionNumber(production.number()));
            }
            if !nonterminals.contains(production.head()) {
                return Err(GrammarError::UnknownSymbol(production.head().clone(), production.number()));
            }
            for sym in production.body() {
                if !terminals.contains(sym) && !nonterminals.contains(sym) {
                    return Err(GrammarError::UnknownSymbol(sym.clone(), production.number()));
                }
            }
        }
        for (expected, number) in (1..=productions.len() as u32).zip(seen_numbers.iter().copied()) {
            if expected != number {
                return Err(GrammarError::NonDenseNumbering(expected));
            }
        }

        Ok(Grammar {
            productions,
            terminals,
            nonterminals,
            start,
        })
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn production(&self, number: u32) -> Option<&Production> {
        self.productions.iter().find(|p| p.number() == number)
    }

    pub fn productions_for(&self, head: &Symbol) -> Vec<&Production> {
        self.productions.iter().filter(|p| p.head() == head).collect()
    }

    pub fn terminals(&self) -> &BTreeSet<Symbol> {
        &self.terminals
    }

    pub fn nonterminals(&self) -> &BTreeSet<Symbol> {
        &self.nonterminals
    }

    pub fn start(&self) -> &Symbol {
        &self.start
    }
}
