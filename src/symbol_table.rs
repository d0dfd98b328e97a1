//! Ordered lexeme→entry table that folds identifier-like lexemes into
//! reserved-word or identifier tokens (spec.md §3, §4's component 10).

use std::collections::BTreeMap;

use lexan::Token;
use slr1::Grammar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Pr,
    Id,
    NumInt,
    NumReal,
    Lit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTableEntry {
    lexeme: String,
    category: Category,
    position: usize,
    ty: Option<String>,
    scope: Option<String>,
}

impl SymbolTableEntry {
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn ty(&self) -> Option<&str> {
        self.ty.as_deref()
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }
}

/// Maps a lexer pattern name onto the lexical category it contributes
/// to the table, per the naming convention `id`/`num_int`/`num_real`/
/// `lit` used by regular-definition files in this corpus.
fn category_for_tag(tag: &str) -> Option<Category> {
    match tag {
        "id" => Some(Category::Id),
        "num_int" => Some(Category::NumInt),
        "num_real" => Some(Category::NumReal),
        "lit" => Some(Category::Lit),
        _ => None,
    }
}

fn looks_like_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        _ => false,
    }
}

/// Lookup-or-insert table of lexemes, keyed by insertion position
/// starting at 0 (spec.md §3).
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: Vec<SymbolTableEntry>,
    index: BTreeMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    /// Pre-registers every grammar terminal that looks like an
    /// identifier (and is not itself one of the lexical-class pattern
    /// names) as a reserved word, so it folds rather than becomes an
    /// ordinary identifier entry.
    pub fn prime_reserved_words(&mut self, grammar: &Grammar) {
        for terminal in grammar.terminals() {
            let name = terminal.name();
            if looks_like_identifier(name) && category_for_tag(name).is_none() {
                self.lookup_or_insert(name, Category::Pr);
            }
        }
    }

    pub fn lookup_or_insert(&mut self, lexeme: &str, category: Category) -> &SymbolTableEntry {
        let position = match self.index.get(lexeme) {
            Some(&position) => position,
            None => {
                let position = self.entries.len();
                self.entries.push(SymbolTableEntry {
                    lexeme: lexeme.to_string(),
                    category,
                    position,
                    ty: None,
                    scope: None,
                });
                self.index.insert(lexeme.to_string(), position);
                position
            }
        };
        &self.entries[position]
    }

    pub fn get(&self, lexeme: &str) -> Option<&SymbolTableEntry> {
        self.index.get(lexeme).map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[SymbolTableEntry] {
        &self.entries
    }

    /// Applies folding to one token from the unified lexer (spec.md §3,
    /// §4.4): a lexeme pre-registered as a reserved word is rewritten to
    /// carry its own spelling as tag; anything else tagged with a known
    /// lexical class is recorded in the table but passed through
    /// unchanged (scenario S6).
    pub fn fold(&mut self, token: Token) -> Token {
        if let Some(entry) = self.get(token.lexeme()) {
            if entry.category() == Category::Pr {
                return Token::new(token.lexeme(), token.lexeme(), token.location().clone());
            }
        }
        if let Some(category) = category_for_tag(token.tag()) {
            self.lookup_or_insert(token.lexeme(), category);
        }
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexan::Location;

    #[test]
    fn lookup_or_insert_is_idempotent() {
        let mut table = SymbolTable::new();
        let first = table.lookup_or_insert("x", Category::Id).position();
        let second = table.lookup_or_insert("x", Category::Id).position();
        assert_eq!(first, second);
        assert_eq!(table.entries().len(), 1);
    }

    #[test]
    fn positions_are_assigned_in_insertion_order() {
        let mut table = SymbolTable::new();
        assert_eq!(table.lookup_or_insert("a", Category::Id).position(), 0);
        assert_eq!(table.lookup_or_insert("b", Category::Id).position(), 1);
        assert_eq!(table.lookup_or_insert("a", Category::Id).position(), 0);
    }

    #[test]
    fn scenario_s6_reserved_word_folding() {
        let mut table = SymbolTable::new();
        table.lookup_or_insert("while", Category::Pr);
        let token = Token::new("while", "id", Location::new("test"));
        let folded = table.fold(token);
        assert_eq!(folded.lexeme(), "while");
        assert_eq!(folded.tag(), "while");
    }

    #[test]
    fn non_reserved_identifier_keeps_its_class_tag() {
        let mut table = SymbolTable::new();
        let token = Token::new("count", "id", Location::new("test"));
        let folded = table.fold(token);
        assert_eq!(folded.tag(), "id");
        assert_eq!(table.get("count").unwrap().category(), Category::Id);
    }
}
