use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::augmented::AugmentedGrammar;
use crate::item::{closure, goto, symbols_after_dot, Item, ItemSet};
use crate::symbol::Symbol;

/// The canonical collection of LR(0) item sets reachable from the
/// augmented start state, with the goto transitions between them
/// (§4.6). States are numbered in BFS discovery order, starting at 0.
pub struct CanonicalCollection {
    states: Vec<ItemSet>,
    transitions: BTreeMap<(usize, Symbol), usize>,
}

impl CanonicalCollection {
    pub fn build(grammar: &AugmentedGrammar) -> Self {
        let mut seed = ItemSet::new();
        seed.insert((0, 0));
        let initial = closure(grammar, seed);

        let mut states = vec![initial.clone()];
        let mut index: BTreeMap<BTreeSet<Item>, usize> = BTreeMap::new();
        index.insert(initial.canonical_key(), 0);
        let mut transitions = BTreeMap::new();

        let mut queue = VecDeque::new();
        queue.push_back(0usize);
        while let Some(i) = queue.pop_front() {
            for x in symbols_after_dot(grammar, &states[i]) {
                let target = goto(grammar, &states[i], &x);
                if target.is_empty() {
                    continue;
                }
                let key = target.canonical_key();
                let j = match index.get(&key) {
                    Some(&j) => j,
                    None => {
                        let j = states.len();
                        states.push(target);
                        index.insert(key, j);
                        queue.push_back(j);
                        j
                    }
                };
                transitions.insert((i, x), j);
            }
        }

        CanonicalCollection { states, transitions }
    }

    pub fn states(&self) -> &[ItemSet] {
        &self.states
    }

    pub fn transitions(&self) -> &BTreeMap<(usize, Symbol), usize> {
        &self.transitions
    }
}
