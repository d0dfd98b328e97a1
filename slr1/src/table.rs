use std::collections::BTreeMap;
use std::fmt;

use crate::analysis::GrammarAnalysis;
use crate::augmented::AugmentedGrammar;
use crate::collection::CanonicalCollection;
use crate::symbol::Symbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Shift(usize),
    Reduce(u32),
    Accept,
}

impl fmt::Display for Action {
    fn fmt(&self, dest: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Action::Shift(s) => write!(dest, "shift {}", s),
            Action::Reduce(p) => write!(dest, "reduce {}", p),
            Action::Accept => write!(dest, "accept"),
        }
    }
}

/// A state/symbol pair for which two different actions were derived.
/// The table keeps whichever action was written first and records the
/// rest here; construction never aborts on a conflict (§4.6).
#[derive(Debug, Clone)]
pub struct Conflict {
    pub state: usize,
    pub symbol: Symbol,
    pub kept: Action,
    pub rejected: Action,
}

impl fmt::Display for Conflict {
    fn fmt(&self, dest: &mut fmt::Formatter) -> fmt::Result {
        write!(
            dest,
            "state {}, symbol '{}': kept {}, discarded {}",
            self.state, self.symbol, self.kept, self.rejected
        )
    }
}

/// The ACTION/GOTO tables for an augmented grammar, built with FOLLOW
/// sets standing in for per-item lookahead (SLR(1), §4.6).
pub struct SlrTable {
    action: BTreeMap<(usize, Symbol), Action>,
    goto: BTreeMap<(usize, Symbol), usize>,
    conflicts: Vec<Conflict>,
}

impl SlrTable {
    pub fn build(grammar: &AugmentedGrammar, collection: &CanonicalCollection, analysis: &GrammarAnalysis) -> Self {
        let mut action: BTreeMap<(usize, Symbol), Action> = BTreeMap::new();
        let mut conflicts = Vec::new();

        for (i, set) in collection.states().iter().enumerate() {
            for &item in set.iter() {
                if grammar.is_complete(item) {
                    let production = grammar.production(item.0).expect("valid production number");
                    if item.0 == 0 {
                        set_action(&mut action, &mut conflicts, i, Symbol::end_marker(), Action::Accept);
                    } else {
                        for lookahead in analysis.follow(production.head()) {
                            set_action(&mut action, &mut conflicts, i, lookahead.clone(), Action::Reduce(item.0));
                        }
                    }
                } else if let Some(symbol) = grammar.symbol_after_dot(item) {
                    if symbol.is_terminal() {
                        if let Some(&j) = collection.transitions().get(&(i, symbol.clone())) {
                            set_action(&mut action, &mut conflicts, i, symbol, Action::Shift(j));
                        }
                    }
                }
            }
        }

        let goto: BTreeMap<(usize, Symbol), usize> = collection
            .transitions()
            .iter()
            .filter(|((_, symbol), _)| symbol.is_non_terminal())
            .map(|(key, &j)| (key.clone(), j))
            .collect();

        SlrTable { action, goto, conflicts }
    }

    pub fn action(&self, state: usize, symbol: &Symbol) -> Option<Action> {
        self.action.get(&(state, symbol.clone())).copied()
    }

    pub fn goto(&self, state: usize, symbol: &Symbol) -> Option<usize> {
        self.goto.get(&(state, symbol.clone())).copied()
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    /// The terminals for which `state` has an ACTION entry, for
    /// syntax-error reporting (§4.7).
    pub fn expected_terminals(&self, state: usize) -> Vec<Symbol> {
        self.action.keys().filter(|(s, _)| *s == state).map(|(_, sym)| sym.clone()).collect()
    }
}

fn set_action(
    action: &mut BTreeMap<(usize, Symbol), Action>,
    conflicts: &mut Vec<Conflict>,
    state: usize,
    symbol: Symbol,
    new: Action,
) {
    match action.get(&(state, symbol.clone())) {
        None => {
            action.insert((state, symbol), new);
        }
        Some(&existing) if existing == new => {}
        Some(&existing) => conflicts.push(Conflict { state, symbol, kept: existing, rejected: new }),
    }
}
