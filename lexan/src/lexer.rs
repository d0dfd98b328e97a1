//! Compile a set of named regular definitions into one prioritized DFA
//! with a state→pattern map, and drive longest-match tokenization (§4.4).

use std::collections::BTreeMap;

use crate::automaton::{AlphaSym, Automaton, State};
use crate::automaton_ops;
use crate::direct_dfa;
use crate::error::LexanError;
use crate::location::{Location, Token};
use crate::regex_tree::RegexTree;

pub struct LexerBuilder {
    patterns: Vec<(String, String)>,
}

impl LexerBuilder {
    /// `patterns` is priority-ordered: earlier entries win ties (§4.4).
    pub fn new(patterns: Vec<(String, String)>) -> Self {
        LexerBuilder { patterns }
    }

    pub fn build(self) -> Result<Lexer, LexanError> {
        if self.patterns.is_empty() {
            return Err(LexanError::NoDefinitions);
        }

        let mut combined: Option<Automaton> = None;
        let mut accepting_by_original: BTreeMap<State, String> = BTreeMap::new();

        for (name, pattern) in self.patterns.iter() {
            let tree = RegexTree::parse(pattern)?;
            let dfa = automaton_ops::minimize(&direct_dfa::build(&tree));
            let renamed = rename_states(&dfa, name);
            for state in renamed.finals.iter() {
                accepting_by_original
                    .entry(state.clone())
                    .or_insert_with(|| name.clone());
            }
            combined = Some(match combined {
                Some(acc) => automaton_ops::union(&acc, &renamed),
                None => renamed,
            });
        }

        let nfa = combined.expect("non-empty pattern list");
        let (dfa, back_map) = automaton_ops::determinize(&nfa);

        let priority: BTreeMap<&str, usize> = self
            .patterns
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.as_str(), i))
            .collect();

        let mut accepting_pattern: BTreeMap<State, String> = BTreeMap::new();
        for (new_state, originals) in back_map.iter() {
            let mut winner: Option<&str> = None;
            let mut winner_rank = usize::MAX;
            for orig in originals.iter() {
                if let Some(name) = accepting_by_original.get(orig) {
                    let rank = priority[name.as_str()];
                    if rank < winner_rank {
                        winner_rank = rank;
                        winner = Some(name.as_str());
                    }
                }
            }
            if let Some(name) = winner {
                accepting_pattern.insert(new_state.clone(), name.to_string());
            }
        }

        Ok(Lexer {
            automaton: dfa,
            accepting_pattern,
        })
    }
}

fn rename_states(a: &Automaton, prefix: &str) -> Automaton {
    let rename = |s: &State| State::new(format!("{}_{}", prefix, s.name()));
    let states = a.states.iter().map(&rename).collect();
    let finals = a.finals.iter().map(&rename).collect();
    let transitions = a
        .transitions
        .iter()
        .map(|((src, sym), dests)| {
            (
                (rename(src), *sym),
                dests.iter().map(&rename).collect(),
            )
        })
        .collect();
    Automaton::new(states, a.alphabet.clone(), transitions, rename(&a.initial), finals)
}

/// The unified, prioritized DFA and its state→pattern-name map (§4.4).
#[derive(Debug)]
pub struct Lexer {
    automaton: Automaton,
    accepting_pattern: BTreeMap<State, String>,
}

impl Lexer {
    /// Longest-match over the unified DFA from its single start state.
    pub fn tokenize_word(&self, word: &str) -> (String, String) {
        let mut state = self.automaton.initial.clone();
        let mut best: Option<(usize, String)> = None;
        if let Some(name) = self.accepting_pattern.get(&state) {
            best = Some((0, name.clone()));
        }

        let chars: Vec<char> = word.chars().collect();
        for (idx, ch) in chars.iter().enumerate() {
            let dests = self.automaton.transition(&state, AlphaSym::Some(*ch));
            let next = match dests.iter().next() {
                Some(s) => s.clone(),
                None => break,
            };
            state = next;
            if let Some(name) = self.accepting_pattern.get(&state) {
                best = Some((idx + 1, name.clone()));
            }
        }

        match best {
            Some((end, name)) if end == chars.len() => (word.to_string(), name),
            _ => (word.to_string(), Token::ERROR_TAG.to_string()),
        }
    }

    /// Read `text` as lines, skip blanks and `#`-comment lines, split each
    /// remaining line on whitespace, and tokenize each lexeme (§4.4
    /// "Scanner driver").
    pub fn tokenize_source(&self, text: &str, label: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut location = Location::new(label);
        for line in text.lines() {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                location.advance(line);
                location.advance("\n");
                continue;
            }
            for word in line.split_whitespace() {
                let offset = line.find(word).unwrap_or(0);
                let mut word_loc = location.clone();
                word_loc.advance(&line[..offset]);
                let (lexeme, tag) = self.tokenize_word(word);
                tokens.push(Token::new(&lexeme, &tag, word_loc));
            }
            location.advance(line);
            location.advance("\n");
        }
        tokens
    }
}
