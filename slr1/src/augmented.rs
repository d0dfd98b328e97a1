use std::collections::BTreeSet;

use crate::grammar::Grammar;
use crate::production::Production;
use crate::symbol::Symbol;

/// The input grammar plus a fresh production 0, `S' -> S` (§4.6), used by
/// the canonical-collection and table builders. Production numbers
/// `1..=n` are untouched, so derivations reported to callers use the
/// caller's own numbering.
pub struct AugmentedGrammar<'g> {
    grammar: &'g Grammar,
    production0: Production,
    start: Symbol,
}

impl<'g> AugmentedGrammar<'g> {
    pub fn build(grammar: &'g Grammar) -> Self {
        let mut candidate = format!("{}'", grammar.start().name());
        let existing: BTreeSet<&str> = grammar.nonterminals().iter().map(|s| s.name()).collect();
        while existing.contains(candidate.as_str()) {
            candidate.push('\'');
        }
        let start = Symbol::non_terminal(candidate);
        let production0 = Production::new(start.clone(), vec![grammar.start().clone()], 0);
        AugmentedGrammar { grammar, production0, start }
    }

    pub fn start(&self) -> &Symbol {
        &self.start
    }

    pub fn production(&self, number: u32) -> Option<&Production> {
        if number == 0 {
            Some(&self.production0)
        } else {
            self.grammar.production(number)
        }
    }

    pub fn productions_for(&self, head: &Symbol) -> Vec<&Production> {
        if *head == self.start {
            vec![&self.production0]
        } else {
            self.grammar.productions_for(head)
        }
    }

    pub fn symbol_after_dot(&self, item: (u32, usize)) -> Option<Symbol> {
        let production = self.production(item.0).expect("valid production number");
        production.body().get(item.1).cloned()
    }

    pub fn is_complete(&self, item: (u32, usize)) -> bool {
        let production = self.production(item.0).expect("valid production number");
        item.1 >= production.body().len()
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }
}
