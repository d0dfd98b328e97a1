//! Determinize, remove unreachable/dead states, partition-refine
//! equivalents, and compose `minimize` (§4.3).

use std::collections::{BTreeMap, BTreeSet};

use crate::automaton::{Automaton, State};

/// Union of two automata via a fresh initial state with ε-transitions to
/// each operand's initial state. The result is nondeterministic (§4.3).
pub fn union(a: &Automaton, b: &Automaton) -> Automaton {
    let existing: BTreeSet<String> = a
        .states
        .iter()
        .chain(b.states.iter())
        .map(|s| s.name().to_string())
        .collect();
    let mut k = 0;
    while existing.contains(&format!("q_union_{}", k)) {
        k += 1;
    }
    let fresh = State::new(format!("q_union_{}", k));

    let mut states = a.states.clone();
    states.extend(b.states.iter().cloned());
    states.insert(fresh.clone());

    let mut alphabet = a.alphabet.clone();
    alphabet.extend(b.alphabet.iter().copied());

    let mut transitions = a.transitions.clone();
    for (key, dests) in b.transitions.iter() {
        transitions
            .entry(key.clone())
            .or_default()
            .extend(dests.iter().cloned());
    }
    let mut initial_targets = BTreeSet::new();
    initial_targets.insert(a.initial.clone());
    initial_targets.insert(b.initial.clone());
    transitions.insert((fresh.clone(), None), initial_targets);

    let mut finals = a.finals.clone();
    finals.extend(b.finals.iter().cloned());

    Automaton::new(states, alphabet, transitions, fresh, finals)
}

/// Subset construction with ε-closure. Returns the determinized automaton
/// plus a back-mapping from each new state to the frozen set of original
/// states it represents (§4.3, used by the lexer builder to resolve
/// pattern priority per §9).
pub fn determinize(a: &Automaton) -> (Automaton, BTreeMap<State, BTreeSet<State>>) {
    let subset_name = |subset: &BTreeSet<State>| -> String {
        let mut names: Vec<&str> = subset.iter().map(|s| s.name()).collect();
        names.sort();
        names.join("")
    };

    let initial_subset = a.epsilon_closure(&{
        let mut s = BTreeSet::new();
        s.insert(a.initial.clone());
        s
    });
    let initial_name = subset_name(&initial_subset);
    let initial = State::new(initial_name.clone());

    let mut back_map: BTreeMap<State, BTreeSet<State>> = BTreeMap::new();
    back_map.insert(initial.clone(), initial_subset.clone());

    let mut named: BTreeMap<String, BTreeSet<State>> = BTreeMap::new();
    named.insert(initial_name.clone(), initial_subset);

    let mut states: BTreeSet<State> = BTreeSet::new();
    states.insert(initial.clone());
    let mut transitions: BTreeMap<(State, Option<char>), BTreeSet<State>> = BTreeMap::new();
    let mut finals: BTreeSet<State> = BTreeSet::new();

    let mut worklist = vec![initial_name];
    let mut processed: BTreeSet<String> = BTreeSet::new();

    while let Some(name) = worklist.pop() {
        if !processed.insert(name.clone()) {
            continue;
        }
        let subset = named.get(&name).unwrap().clone();
        let state = State::new(name.clone());
        if subset.iter().any(|s| a.finals.contains(s)) {
            finals.insert(state.clone());
        }

        for symbol in a.alphabet.iter() {
            let moved = a.mov(&subset, *symbol);
            let target = a.epsilon_closure(&moved);
            if target.is_empty() {
                continue;
            }
            let target_name = subset_name(&target);
            let target_state = State::new(target_name.clone());
            states.insert(target_state.clone());
            if !named.contains_key(&target_name) {
                named.insert(target_name.clone(), target.clone());
                back_map.insert(target_state.clone(), target.clone());
                worklist.push(target_name.clone());
            }
            transitions.insert((state.clone(), Some(*symbol)), {
                let mut d = BTreeSet::new();
                d.insert(target_state);
                d
            });
        }
    }

    (
        Automaton::new(states, a.alphabet.clone(), transitions, initial, finals),
        back_map,
    )
}

/// Retain only states reachable from `initial`. A no-op if already minimal.
pub fn remove_unreachable(a: &Automaton) -> Automaton {
    let mut reachable: BTreeSet<State> = BTreeSet::new();
    let mut worklist = vec![a.initial.clone()];
    while let Some(s) = worklist.pop() {
        if !reachable.insert(s.clone()) {
            continue;
        }
        for ((src, _), dests) in a.transitions.iter() {
            if *src == s {
                worklist.extend(dests.iter().cloned());
            }
        }
    }

    let transitions = a
        .transitions
        .iter()
        .filter(|((src, _), _)| reachable.contains(src))
        .map(|(k, v)| {
            (
                k.clone(),
                v.iter().filter(|d| reachable.contains(d)).cloned().collect(),
            )
        })
        .collect();
    let finals = a.finals.intersection(&reachable).cloned().collect();

    Automaton::new(
        reachable.clone(),
        a.alphabet.clone(),
        transitions,
        a.initial.clone(),
        finals,
    )
}

/// Retain only states from which at least one final state is reachable.
pub fn remove_dead(a: &Automaton) -> Automaton {
    let alive: BTreeSet<State> = a
        .states
        .iter()
        .filter(|s| {
            let mut from = BTreeSet::new();
            from.insert((*s).clone());
            a.reaches(&from, &a.finals)
        })
        .cloned()
        .collect();

    let transitions = a
        .transitions
        .iter()
        .filter_map(|((src, sym), dests)| {
            if !alive.contains(src) {
                return None;
            }
            let kept: BTreeSet<State> = dests.iter().filter(|d| alive.contains(d)).cloned().collect();
            if kept.is_empty() {
                None
            } else {
                Some(((src.clone(), *sym), kept))
            }
        })
        .collect();
    let finals = a.finals.intersection(&alive).cloned().collect();

    Automaton::new(alive, a.alphabet.clone(), transitions, a.initial.clone(), finals)
}

/// Partition-refine a DFA's states by Hopcroft/Moore-style signature
/// refinement until stable (§4.3).
pub fn remove_equivalent(a: &Automaton) -> Automaton {
    assert!(a.is_deterministic(), "remove_equivalent requires a DFA");

    if a.states.len() <= 1 {
        return a.clone();
    }

    let non_finals: BTreeSet<State> = a.states.difference(&a.finals).cloned().collect();
    let mut blocks: Vec<BTreeSet<State>> = if non_finals.is_empty() {
        vec![a.finals.clone()]
    } else {
        vec![a.finals.clone(), non_finals]
    };

    let symbols: Vec<char> = a.alphabet.iter().copied().collect();

    loop {
        let block_of = |state: &State| -> Option<usize> {
            blocks.iter().position(|b| b.contains(state))
        };

        let mut next_blocks: Vec<BTreeSet<State>> = Vec::new();
        for block in blocks.iter() {
            let mut by_signature: BTreeMap<Vec<Option<usize>>, BTreeSet<State>> = BTreeMap::new();
            for state in block.iter() {
                let signature: Vec<Option<usize>> = symbols
                    .iter()
                    .map(|sym| {
                        let dests = a.transition(state, Some(*sym));
                        dests.iter().next().and_then(&block_of)
                    })
                    .collect();
                by_signature
                    .entry(signature)
                    .or_default()
                    .insert(state.clone());
            }
            next_blocks.extend(by_signature.into_values());
        }

        if next_blocks.len() == blocks.len() {
            blocks = next_blocks;
            break;
        }
        blocks = next_blocks;
    }

    let block_name = |block: &BTreeSet<State>| -> String {
        let mut names: Vec<&str> = block.iter().map(|s| s.name()).collect();
        names.sort();
        names.join("_")
    };

    let mut mapping: BTreeMap<State, State> = BTreeMap::new();
    let mut states = BTreeSet::new();
    for block in blocks.iter() {
        let merged = State::new(block_name(block));
        states.insert(merged.clone());
        for s in block.iter() {
            mapping.insert(s.clone(), merged.clone());
        }
    }

    let mut transitions: BTreeMap<(State, Option<char>), BTreeSet<State>> = BTreeMap::new();
    for ((src, sym), dests) in a.transitions.iter() {
        let new_src = mapping[src].clone();
        for dest in dests.iter() {
            let new_dest = mapping[dest].clone();
            transitions
                .entry((new_src.clone(), *sym))
                .or_default()
                .insert(new_dest);
        }
    }

    let initial = mapping[&a.initial].clone();
    let finals: BTreeSet<State> = a.finals.iter().map(|s| mapping[s].clone()).collect();

    Automaton::new(states, a.alphabet.clone(), transitions, initial, finals)
}

/// `minimize = remove_equivalent ∘ remove_dead ∘ remove_unreachable ∘ determinize`.
/// Determinization must precede equivalence refinement, and dead-state
/// removal must precede it too, or dead states create spurious
/// distinguishers (§4.3).
pub fn minimize(a: &Automaton) -> Automaton {
    let (determinized, _) = determinize(a);
    let reachable = remove_unreachable(&determinized);
    let alive = remove_dead(&reachable);
    remove_equivalent(&alive)
}
