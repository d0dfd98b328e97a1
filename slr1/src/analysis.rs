use std::collections::{BTreeMap, BTreeSet};

use crate::grammar::Grammar;
use crate::symbol::Symbol;

/// Cached FIRST and FOLLOW sets for a grammar, computed once by monotone
/// fixed-point iteration (§4.5).
pub struct GrammarAnalysis<'g> {
    grammar: &'g Grammar,
    first: BTreeMap<Symbol, BTreeSet<Symbol>>,
    follow: BTreeMap<Symbol, BTreeSet<Symbol>>,
}

impl<'g> GrammarAnalysis<'g> {
    pub fn compute(grammar: &'g Grammar) -> Self {
        let first = compute_first(grammar);
        let follow = compute_follow(grammar, &first);
        GrammarAnalysis { grammar, follow, first }
    }

    /// FIRST of a single symbol: `{t}` for a terminal, the cached set for
    /// a nonterminal.
    pub fn first(&self, symbol: &Symbol) -> BTreeSet<Symbol> {
        first_of_symbol(&self.first, symbol)
    }

    /// FIRST of a symbol sequence: union of FIRST(Y_i) for the leading
    /// run of nullable symbols, plus FIRST of the first non-nullable one;
    /// `ε` is included only if every symbol in the sequence is nullable.
    pub fn first_of_sequence(&self, sequence: &[Symbol]) -> BTreeSet<Symbol> {
        first_of_sequence(&self.first, sequence)
    }

    pub fn follow(&self, nonterminal: &Symbol) -> BTreeSet<Symbol> {
        self.follow.get(nonterminal).cloned().unwrap_or_default()
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }
}

/// FIRST of a single symbol against an in-progress (or finished) FIRST
/// table: `{t}` for a terminal, the table's entry for a nonterminal.
fn first_of_symbol(first: &BTreeMap<Symbol, BTreeSet<Symbol>>, sym: &Symbol) -> BTreeSet<Symbol> {
    if sym.is_terminal() {
        let mut set = BTreeSet::new();
        set.insert(sym.clone());
        set
    } else {
        first.get(sym).cloned().unwrap_or_default()
    }
}

/// FIRST of a symbol sequence against an in-progress (or finished) FIRST
/// table: union of FIRST(Y_i) for the leading run of nullable symbols,
/// plus FIRST of the first non-nullable one; `ε` is included only if
/// every symbol in the sequence is nullable.
fn first_of_sequence(first: &BTreeMap<Symbol, BTreeSet<Symbol>>, sequence: &[Symbol]) -> BTreeSet<Symbol> {
    let mut result = BTreeSet::new();
    let mut all_nullable = true;
    for symbol in sequence {
        let sym_first = first_of_symbol(first, symbol);
        for s in sym_first.iter().filter(|s| !s.is_epsilon()) {
            result.insert(s.clone());
        }
        if !sym_first.contains(&Symbol::epsilon()) {
            all_nullable = false;
            break;
        }
    }
    if all_nullable {
        result.insert(Symbol::epsilon());
    }
    result
}

fn compute_first(grammar: &Grammar) -> BTreeMap<Symbol, BTreeSet<Symbol>> {
    let mut first: BTreeMap<Symbol, BTreeSet<Symbol>> =
        grammar.nonterminals().iter().map(|nt| (nt.clone(), BTreeSet::new())).collect();

    loop {
        let mut changed = false;
        for production in grammar.productions() {
            if production.is_epsilon() {
                let head_set = first.get_mut(production.head()).expect("declared nonterminal");
                changed |= head_set.insert(Symbol::epsilon());
                continue;
            }
            let addition = first_of_sequence(&first, production.body());
            let head_set = first.get_mut(production.head()).expect("declared nonterminal");
            for s in addition {
                changed |= head_set.insert(s);
            }
        }
        if !changed {
            break;
        }
    }
    first
}

fn compute_follow(grammar: &Grammar, first: &BTreeMap<Symbol, BTreeSet<Symbol>>) -> BTreeMap<Symbol, BTreeSet<Symbol>> {
    let mut follow: BTreeMap<Symbol, BTreeSet<Symbol>> =
        grammar.nonterminals().iter().map(|nt| (nt.clone(), BTreeSet::new())).collect();
    follow.get_mut(grammar.start()).expect("start is declared").insert(Symbol::end_marker());

    loop {
        let mut changed = false;
        for production in grammar.productions() {
            let body = production.body();
            for (i, sym) in body.iter().enumerate() {
                if !sym.is_non_terminal() {
                    continue;
                }
                let beta = &body[i + 1..];
                let first_beta = first_of_sequence(first, beta);
                let mut addition: BTreeSet<Symbol> = first_beta.iter().filter(|s| !s.is_epsilon()).cloned().collect();
                if beta.is_empty() || first_beta.contains(&Symbol::epsilon()) {
                    addition.extend(follow.get(production.head()).cloned().unwrap_or_default());
                }
                let entry = follow.get_mut(sym).expect("declared nonterminal");
                for s in addition {
                    changed |= entry.insert(s);
                }
            }
        }
        if !changed {
            break;
        }
    }
    follow
}
