//! Grammar representation, FIRST/FOLLOW analysis, SLR(1) table
//! construction, and a shift/reduce driver — the syntactic half of the
//! front-end generator.

mod analysis;
mod augmented;
mod collection;
mod driver;
mod grammar;
mod item;
mod production;
mod symbol;
mod table;

pub use analysis::GrammarAnalysis;
pub use augmented::AugmentedGrammar;
pub use collection::CanonicalCollection;
pub use driver::{parse, Derivation, SyntaxError};
pub use grammar::{Grammar, GrammarError};
pub use production::Production;
pub use symbol::Symbol;
pub use table::{Action, Conflict, SlrTable};

/// Builds the canonical collection and SLR(1) tables for `grammar` in
/// one call, augmenting it first (§4.6).
pub fn build_tables<'g>(
    grammar: &'g Grammar,
) -> (AugmentedGrammar<'g>, CanonicalCollection, SlrTable) {
    let augmented = AugmentedGrammar::build(grammar);
    let collection = CanonicalCollection::build(&augmented);
    let analysis = GrammarAnalysis::compute(grammar);
    let table = SlrTable::build(&augmented, &collection, &analysis);
    (augmented, collection, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexan::{Location, Token};
    use std::collections::BTreeSet;

    fn tok(lexeme: &str, tag: &str) -> Token {
        Token::new(lexeme, tag, Location::new("test"))
    }

    // E -> E + T | T
    // T -> T * F | F
    // F -> ( E ) | id
    fn expr_grammar() -> Grammar {
        let e = Symbol::non_terminal("E");
        let t = Symbol::non_terminal("T");
        let f = Symbol::non_terminal("F");
        let plus = Symbol::terminal("+");
        let star = Symbol::terminal("*");
        let lparen = Symbol::terminal("(");
        let rparen = Symbol::terminal(")");
        let id = Symbol::terminal("id");

        let productions = vec![
            Production::new(e.clone(), vec![e.clone(), plus.clone(), t.clone()], 1),
            Production::new(e.clone(), vec![t.clone()], 2),
            Production::new(t.clone(), vec![t.clone(), star.clone(), f.clone()], 3),
            Production::new(t.clone(), vec![f.clone()], 4),
            Production::new(f.clone(), vec![lparen.clone(), e.clone(), rparen.clone()], 5),
            Production::new(f.clone(), vec![id.clone()], 6),
        ];
        let terminals: BTreeSet<Symbol> = vec![plus, star, lparen, rparen, id].into_iter().collect();
        let nonterminals: BTreeSet<Symbol> = vec![e.clone(), t, f].into_iter().collect();
        Grammar::new(productions, terminals, nonterminals, e).unwrap()
    }

    #[test]
    fn first_and_follow_of_expression_grammar() {
        let grammar = expr_grammar();
        let analysis = GrammarAnalysis::compute(&grammar);
        let id = Symbol::terminal("id");
        let lparen = Symbol::terminal("(");
        for nt in ["E", "T", "F"] {
            let first = analysis.first(&Symbol::non_terminal(nt));
            assert!(first.contains(&id));
            assert!(first.contains(&lparen));
        }
        let follow_e = analysis.follow(&Symbol::non_terminal("E"));
        assert!(follow_e.contains(&Symbol::end_marker()));
        assert!(follow_e.contains(&Symbol::terminal(")")));
        assert!(follow_e.contains(&Symbol::terminal("+")));
    }

    #[test]
    fn grammar_rejects_undeclared_symbol() {
        let e = Symbol::non_terminal("E");
        let undeclared = Symbol::terminal("ghost");
        let productions = vec![Production::new(e.clone(), vec![undeclared], 1)];
        let nonterminals: BTreeSet<Symbol> = vec![e.clone()].into_iter().collect();
        let result = Grammar::new(productions, BTreeSet::new(), nonterminals, e);
        assert!(matches!(result, Err(GrammarError::UnknownSymbol(_, 1))));
    }

    #[test]
    fn scenario_s3_accepts_and_derives() {
        let grammar = expr_grammar();
        let (augmented, _collection, table) = build_tables(&grammar);
        let tokens = vec![
            tok("id", "id"),
            tok("+", "+"),
            tok("id", "id"),
            tok("*", "*"),
            tok("id", "id"),
        ];
        let derivation = parse(&augmented, &table, &tokens).unwrap();
        // id * id reduces to T before the outer + reduces E + T -> E.
        assert_eq!(*derivation.0.last().unwrap(), 1);
        assert!(derivation.0.contains(&3));
    }

    #[test]
    fn scenario_s4_reports_expected_set() {
        let grammar = expr_grammar();
        let (augmented, _collection, table) = build_tables(&grammar);
        let tokens = vec![tok("id", "id"), tok("+", "+"), tok("*", "*")];
        let error = parse(&augmented, &table, &tokens).unwrap_err();
        assert_eq!(error.position, 2);
        assert!(error.expected.contains(&Symbol::terminal("id")));
        assert!(error.expected.contains(&Symbol::terminal("(")));
    }

    #[test]
    fn no_conflicts_on_expression_grammar() {
        let grammar = expr_grammar();
        let (_augmented, _collection, table) = build_tables(&grammar);
        assert!(table.conflicts().is_empty());
    }

    #[test]
    fn scenario_s5_dangling_else_conflict() {
        // S -> if E then S | if E then S else S | other
        let s = Symbol::non_terminal("S");
        let e = Symbol::non_terminal("E");
        let if_ = Symbol::terminal("if");
        let then = Symbol::terminal("then");
        let else_ = Symbol::terminal("else");
        let other = Symbol::terminal("other");
        let cond = Symbol::terminal("cond");

        let productions = vec![
            Production::new(s.clone(), vec![if_.clone(), e.clone(), then.clone(), s.clone()], 1),
            Production::new(
                s.clone(),
                vec![if_.clone(), e.clone(), then.clone(), s.clone(), else_.clone(), s.clone()],
                2,
            ),
            Production::new(s.clone(), vec![other.clone()], 3),
            Production::new(e.clone(), vec![cond.clone()], 4),
        ];
        let terminals: BTreeSet<Symbol> = vec![if_, then, else_, other, cond].into_iter().collect();
        let nonterminals: BTreeSet<Symbol> = vec![s.clone(), e].into_iter().collect();
        let grammar = Grammar::new(productions, terminals, nonterminals, s).unwrap();

        let (_augmented, _collection, table) = build_tables(&grammar);
        assert!(!table.conflicts().is_empty());
    }
}
