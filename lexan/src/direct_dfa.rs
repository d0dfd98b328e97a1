//! Build a DFA directly from an annotated [`RegexTree`], without going
//! through an NFA (§4.2).

use std::collections::{BTreeMap, BTreeSet};

use crate::automaton::{Automaton, State};
use crate::regex_tree::RegexTree;

fn state_name(positions: &BTreeSet<u32>) -> String {
    let mut inner: Vec<String> = positions.iter().map(|p| p.to_string()).collect();
    inner.sort();
    format!("{{{}}}", inner.join(","))
}

/// Direct subset-construction-free DFA build via `firstpos`/`followpos`
/// (§4.2). Accepting states are those whose position set contains the
/// position of the augmented `#` end-marker.
pub fn build(tree: &RegexTree) -> Automaton {
    let first = tree.firstpos_root();
    if first.is_empty() {
        return Automaton::trivial(tree.nullable_root());
    }

    let alphabet = tree.alphabet();
    let end_marker_pos = tree.end_marker_pos();

    let initial_set = first.clone();
    let initial_name = state_name(&initial_set);
    let initial = State::new(initial_name.clone());

    let mut states: BTreeSet<State> = BTreeSet::new();
    states.insert(initial.clone());
    let mut finals: BTreeSet<State> = BTreeSet::new();
    let mut transitions: BTreeMap<(State, Option<char>), BTreeSet<State>> = BTreeMap::new();

    let mut named: BTreeMap<String, BTreeSet<u32>> = BTreeMap::new();
    named.insert(initial_name.clone(), initial_set.clone());

    let mut worklist: Vec<String> = vec![initial_name];
    let mut processed: BTreeSet<String> = BTreeSet::new();

    while let Some(name) = worklist.pop() {
        if !processed.insert(name.clone()) {
            continue;
        }
        let positions = named.get(&name).unwrap().clone();
        let state = State::new(name.clone());
        if positions.contains(&end_marker_pos) {
            finals.insert(state.clone());
        }

        for symbol in alphabet.iter() {
            let mut dest: BTreeSet<u32> = BTreeSet::new();
            for pos in positions.iter() {
                if tree.leaf_char(*pos) == *symbol {
                    dest.extend(tree.followpos(*pos).iter().copied());
                }
            }
            if dest.is_empty() {
                continue;
            }
            let dest_name = state_name(&dest);
            let dest_state = State::new(dest_name.clone());
            states.insert(dest_state.clone());
            if !named.contains_key(&dest_name) {
                named.insert(dest_name.clone(), dest);
                worklist.push(dest_name.clone());
            }
            transitions
                .entry((state.clone(), Some(*symbol)))
                .or_default()
                .insert(dest_state);
        }
    }

    Automaton::new(states, alphabet, transitions, initial, finals)
}
