//! A generic finite-automaton value type: epsilon closure, reachability,
//! union, and a table `Display` (§4.2 component list, item 2).

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A state, identified purely by its canonical name (§3: "two states are
/// equal iff their names are equal").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State(String);

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        State(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for State {
    fn fmt(&self, dest: &mut fmt::Formatter) -> fmt::Result {
        write!(dest, "{}", self.0)
    }
}

/// `None` stands for the distinguished `ε` alphabet symbol (§3).
pub type AlphaSym = Option<char>;

#[derive(Debug, Clone)]
pub struct Automaton {
    pub states: BTreeSet<State>,
    pub alphabet: BTreeSet<char>,
    pub transitions: BTreeMap<(State, AlphaSym), BTreeSet<State>>,
    pub initial: State,
    pub finals: BTreeSet<State>,
}

impl Automaton {
    pub fn new(
        states: BTreeSet<State>,
        alphabet: BTreeSet<char>,
        transitions: BTreeMap<(State, AlphaSym), BTreeSet<State>>,
        initial: State,
        finals: BTreeSet<State>,
    ) -> Self {
        Automaton {
            states,
            alphabet,
            transitions,
            initial,
            finals,
        }
    }

    /// A single-state automaton accepting (or not) only the empty string.
    pub fn trivial(accepting: bool) -> Self {
        let state = State::new("q0");
        let mut states = BTreeSet::new();
        states.insert(state.clone());
        let finals = if accepting {
            let mut f = BTreeSet::new();
            f.insert(state.clone());
            f
        } else {
            BTreeSet::new()
        };
        Automaton::new(states, BTreeSet::new(), BTreeMap::new(), state, finals)
    }

    pub fn transition(&self, state: &State, symbol: AlphaSym) -> BTreeSet<State> {
        self.transitions
            .get(&(state.clone(), symbol))
            .cloned()
            .unwrap_or_default()
    }

    pub fn mov(&self, states: &BTreeSet<State>, symbol: char) -> BTreeSet<State> {
        let mut result = BTreeSet::new();
        for s in states {
            result.extend(self.transition(s, Some(symbol)));
        }
        result
    }

    /// The set of states reachable from `states` by zero or more ε
    /// transitions.
    pub fn epsilon_closure(&self, states: &BTreeSet<State>) -> BTreeSet<State> {
        let mut reachable: BTreeSet<State> = states.clone();
        let mut worklist: Vec<State> = states.iter().cloned().collect();
        while let Some(s) = worklist.pop() {
            for next in self.transition(&s, None) {
                if reachable.insert(next.clone()) {
                    worklist.push(next);
                }
            }
        }
        reachable
    }

    /// `true` if `target` is reachable from any state in `from`, following
    /// every transition (including ε).
    pub fn reaches(&self, from: &BTreeSet<State>, target: &BTreeSet<State>) -> bool {
        let mut seen: BTreeSet<State> = BTreeSet::new();
        let mut worklist: Vec<State> = from.iter().cloned().collect();
        while let Some(s) = worklist.pop() {
            if !seen.insert(s.clone()) {
                continue;
            }
            if target.contains(&s) {
                return true;
            }
            for ((src, _), dests) in self.transitions.iter() {
                if *src == s {
                    worklist.extend(dests.iter().cloned());
                }
            }
        }
        false
    }

    pub fn is_deterministic(&self) -> bool {
        for ((_, symbol), dests) in self.transitions.iter() {
            if symbol.is_none() || dests.len() > 1 {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, dest: &mut fmt::Formatter) -> fmt::Result {
        let mut states: Vec<&State> = self.states.iter().collect();
        states.sort();
        let mut symbols: Vec<AlphaSym> = self.alphabet.iter().map(|c| Some(*c)).collect();
        if self.transitions.keys().any(|(_, s)| s.is_none()) {
            symbols.insert(0, None);
        }

        let col_header = |s: &AlphaSym| -> String {
            match s {
                Some(c) => c.to_string(),
                None => "\u{3b5}".to_string(),
            }
        };

        write!(dest, "{:<12}", "state")?;
        for sym in &symbols {
            write!(dest, "| {:<10}", col_header(sym))?;
        }
        writeln!(dest)?;

        for state in states {
            let mut marker = String::new();
            if *state == self.initial {
                marker.push('\u{2192}');
            }
            if self.finals.contains(state) {
                marker.push('*');
            }
            write!(dest, "{:<12}", format!("{}{}", marker, state))?;
            for sym in &symbols {
                let dests = self.transition(state, *sym);
                let text = if dests.is_empty() {
                    "-".to_string()
                } else {
                    dests
                        .iter()
                        .map(|s| s.name().to_string())
                        .collect::<Vec<_>>()
                        .join(",")
                };
                write!(dest, "| {:<10}", text)?;
            }
            writeln!(dest)?;
        }
        Ok(())
    }
}
