use std::collections::BTreeSet;

use crate::augmented::AugmentedGrammar;
use crate::symbol::Symbol;

pub type Item = (u32, usize);

/// A set of LR(0) items kept two ways at once (§9 design note): a
/// `Vec` that preserves first-occurrence insertion order, for the
/// deterministic symbol scan that closure and goto rely on, and a
/// `BTreeSet` that serves as the canonical equality/hash key used to
/// recognize when two item sets denote the same automaton state.
#[derive(Debug, Clone, Default)]
pub struct ItemSet {
    ordered: Vec<Item>,
    canonical: BTreeSet<Item>,
}

impl ItemSet {
    pub fn new() -> Self {
        ItemSet::default()
    }

    /// Inserts `item`, appending it to the insertion-ordered list only if
    /// it was not already present. Returns whether it was new.
    pub fn insert(&mut self, item: Item) -> bool {
        if self.canonical.insert(item) {
            self.ordered.push(item);
            true
        } else {
            false
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.ordered.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn canonical_key(&self) -> BTreeSet<Item> {
        self.canonical.clone()
    }
}

/// Closes `seed` under the rule: if `A -> α·Bβ` is in the set, add
/// `B -> ·γ` for every production of `B` (§4.6). New items are appended
/// to the worklist in the order their triggering items were scanned, so
/// the resulting set's insertion order is deterministic given `seed`'s.
pub fn closure(grammar: &AugmentedGrammar, mut set: ItemSet) -> ItemSet {
    let mut cursor = 0;
    while cursor < set.ordered.len() {
        let item = set.ordered[cursor];
        cursor += 1;
        if let Some(Symbol::NonTerminal(_)) = grammar.symbol_after_dot(item) {
            let after = grammar.symbol_after_dot(item).unwrap();
            for production in grammar.productions_for(&after) {
                set.insert((production.number(), 0));
            }
        }
    }
    set
}

/// The successor state reached from `set` on symbol `x`: advance every
/// item whose next symbol is `x`, then close (§4.6).
pub fn goto(grammar: &AugmentedGrammar, set: &ItemSet, x: &Symbol) -> ItemSet {
    let mut kernel = ItemSet::new();
    for &item in set.iter() {
        if grammar.symbol_after_dot(item).as_ref() == Some(x) {
            kernel.insert((item.0, item.1 + 1));
        }
    }
    closure(grammar, kernel)
}

/// The first-occurrence-ordered list of symbols immediately following
/// the dot across `set`'s items, used to drive goto transitions out of
/// a state in a deterministic order.
pub fn symbols_after_dot(grammar: &AugmentedGrammar, set: &ItemSet) -> Vec<Symbol> {
    let mut seen = BTreeSet::new();
    let mut symbols = Vec::new();
    for &item in set.iter() {
        if let Some(symbol) = grammar.symbol_after_dot(item) {
            if seen.insert(symbol.clone()) {
                symbols.push(symbol);
            }
        }
    }
    symbols
}
