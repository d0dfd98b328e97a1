//! Regular-expression-to-DFA machinery and a longest-match multi-pattern
//! scanner, forming the lexical half of the front-end generator.

mod automaton;
mod automaton_ops;
mod direct_dfa;
mod error;
mod lexer;
mod location;
mod regex_tree;

pub use automaton::{AlphaSym, Automaton, State};
pub use automaton_ops::{determinize, minimize, remove_dead, remove_equivalent, remove_unreachable, union};
pub use direct_dfa::build as build_direct_dfa;
pub use error::{LexanError, RegexError};
pub use lexer::{Lexer, LexerBuilder};
pub use location::{Location, Token};
pub use regex_tree::RegexTree;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nullable_and_firstpos_agree() {
        let tree = RegexTree::parse("a*").unwrap();
        // firstpos(root) is non-empty: the end-marker always contributes.
        assert!(!tree.firstpos_root().is_empty());
    }

    #[test]
    fn direct_dfa_accepts_language() {
        let tree = RegexTree::parse("(a|b)*abb").unwrap();
        let dfa = build_direct_dfa(&tree);
        assert!(recognize(&dfa, "abb"));
        assert!(recognize(&dfa, "aababb"));
        assert!(!recognize(&dfa, "ab"));
        assert!(!recognize(&dfa, ""));
    }

    fn recognize(a: &Automaton, word: &str) -> bool {
        let mut state = a.initial.clone();
        for ch in word.chars() {
            let dests = a.transition(&state, Some(ch));
            match dests.into_iter().next() {
                Some(s) => state = s,
                None => return false,
            }
        }
        a.finals.contains(&state)
    }

    #[test]
    fn minimize_preserves_language_and_shrinks() {
        let tree = RegexTree::parse("(a|b)*abb").unwrap();
        let direct = build_direct_dfa(&tree);
        let direct_count = direct.states.len();
        let min = minimize(&direct);
        assert!(min.states.len() <= direct_count);
        for word in ["abb", "aababb", "ab", "", "bbbabb"] {
            assert_eq!(recognize(&direct, word), recognize(&min, word), "word={}", word);
        }
    }

    #[test]
    fn minimize_is_idempotent() {
        let tree = RegexTree::parse("a(a|b)*b").unwrap();
        let min_once = minimize(&build_direct_dfa(&tree));
        let min_twice = minimize(&min_once);
        assert_eq!(min_once.states.len(), min_twice.states.len());
    }

    #[test]
    fn determinize_is_idempotent_on_a_dfa() {
        let tree = RegexTree::parse("ab*").unwrap();
        let dfa = minimize(&build_direct_dfa(&tree));
        let (redone, _) = determinize(&dfa);
        assert_eq!(dfa.states.len(), redone.states.len());
    }

    #[test]
    fn class_expansion_matches_range() {
        let tree = RegexTree::parse("[a-c]").unwrap();
        let dfa = build_direct_dfa(&tree);
        assert!(recognize(&dfa, "a"));
        assert!(recognize(&dfa, "b"));
        assert!(recognize(&dfa, "c"));
        assert!(!recognize(&dfa, "d"));
    }

    #[test]
    fn mixed_class_is_rejected() {
        assert!(RegexTree::parse("[a-9]").is_err());
    }

    #[test]
    fn plus_requires_one_or_more() {
        let dfa = build_direct_dfa(&RegexTree::parse("a+").unwrap());
        assert!(!recognize(&dfa, ""));
        assert!(recognize(&dfa, "a"));
        assert!(recognize(&dfa, "aaa"));
    }

    #[test]
    fn scenario_s1_id_and_num() {
        let lexer = LexerBuilder::new(vec![
            ("id".to_string(), "[a-zA-Z]([a-zA-Z]|[0-9])*".to_string()),
            ("num".to_string(), "[1-9]([0-9])*|0".to_string()),
        ])
        .build()
        .unwrap();
        assert_eq!(lexer.tokenize_word("a1"), ("a1".to_string(), "id".to_string()));
        assert_eq!(lexer.tokenize_word("0"), ("0".to_string(), "num".to_string()));
        assert_eq!(lexer.tokenize_word("teste2"), ("teste2".to_string(), "id".to_string()));
        assert_eq!(lexer.tokenize_word("21"), ("21".to_string(), "num".to_string()));
    }

    #[test]
    fn scenario_s2_priority_and_error() {
        let lexer = LexerBuilder::new(vec![
            ("er1".to_string(), "a?(a|b)+".to_string()),
            ("er2".to_string(), "b?(a|b)+".to_string()),
        ])
        .build()
        .unwrap();
        assert_eq!(lexer.tokenize_word("aa"), ("aa".to_string(), "er1".to_string()));
        // er1 and er2 both denote (a|b)+, but priority is resolved per
        // reached DFA state from its own back-mapped originals, not
        // globally: "aa" lands on a state whose originals are only er1's,
        // "bbbba" on one whose originals are only er2's.
        assert_eq!(lexer.tokenize_word("bbbba"), ("bbbba".to_string(), "er2".to_string()));
        assert_eq!(lexer.tokenize_word("@abc"), ("@abc".to_string(), Token::ERROR_TAG.to_string()));
    }

    #[test]
    fn longest_match_beats_declaration_order() {
        // id before kw: "letx" matches only id (kw="let" is a strict prefix,
        // not a full match of the word), so id's longer match wins (§8 item 9).
        let lexer = LexerBuilder::new(vec![
            ("id".to_string(), "[a-z]+".to_string()),
            ("kw".to_string(), "let".to_string()),
        ])
        .build()
        .unwrap();
        assert_eq!(lexer.tokenize_word("letx"), ("letx".to_string(), "id".to_string()));

        let lexer2 = LexerBuilder::new(vec![
            ("kw".to_string(), "let".to_string()),
            ("id".to_string(), "[a-z]+".to_string()),
        ])
        .build()
        .unwrap();
        assert_eq!(lexer2.tokenize_word("letx"), ("letx".to_string(), "id".to_string()));
        assert_eq!(lexer2.tokenize_word("let"), ("let".to_string(), "kw".to_string()));
    }

    #[test]
    fn empty_definitions_is_an_error() {
        assert_eq!(LexerBuilder::new(vec![]).build().unwrap_err(), LexanError::NoDefinitions);
    }
}
