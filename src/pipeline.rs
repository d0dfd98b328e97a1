//! Reads specification files, drives the scanner and parser builders,
//! and reports results (spec.md §6, component 11).

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use lexan::{Lexer, LexerBuilder, Location, Token};
use slr1::{build_tables, parse, AugmentedGrammar, CanonicalCollection, Grammar, Production, SlrTable, Symbol};

use crate::error::Error;
use crate::symbol_table::SymbolTable;

/// Unicode operator glyphs some regular definitions use internally to
/// keep multi-character operators unambiguous in a regex; normalized
/// back to their canonical ASCII spelling when a token file is written
/// (spec.md §6).
const GLYPH_NORMALIZATION: &[(&str, &str)] =
    &[("\u{2265}", ">="), ("\u{2264}", "<="), ("\u{2260}", "!="), ("\u{2254}", ":=")];

fn normalize_lexeme(lexeme: &str) -> String {
    let mut result = lexeme.to_string();
    for (glyph, ascii) in GLYPH_NORMALIZATION {
        result = result.replace(glyph, ascii);
    }
    result
}

fn read_to_string(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|err| Error::Io(path.to_path_buf(), err))
}

/// Parses a regular-definition file: `name : regex` per line, `#`
/// comments and blank lines ignored, later duplicate names overwrite
/// but the first occurrence fixes priority order (spec.md §6).
pub fn parse_definitions(text: &str) -> Result<Vec<(String, String)>, Error> {
    let mut order: Vec<String> = Vec::new();
    let mut by_name: std::collections::BTreeMap<String, String> = std::collections::BTreeMap::new();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let colon = trimmed.find(':').ok_or(Error::InvalidDefinition(line_number))?;
        let name = trimmed[..colon].trim();
        let regex = trimmed[colon + 1..].trim();
        if name.is_empty() || regex.is_empty() {
            return Err(Error::InvalidDefinition(line_number));
        }
        if by_name.insert(name.to_string(), regex.to_string()).is_none() {
            order.push(name.to_string());
        }
    }

    Ok(order.into_iter().map(|name| { let regex = by_name.remove(&name).unwrap(); (name, regex) }).collect())
}

/// Splits a production body on whitespace, treating a `"..."` run as
/// one atom so a terminal may contain spaces or angle brackets
/// verbatim (spec.md §6's "configured escape delimiter").
fn tokenize_body(body: &str) -> Vec<String> {
    let mut atoms = Vec::new();
    let chars: Vec<char> = body.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }
        if chars[i] == '"' {
            let start = i + 1;
            let mut j = start;
            while j < chars.len() && chars[j] != '"' {
                j += 1;
            }
            atoms.push(chars[start..j].iter().collect());
            i = j + 1;
        } else {
            let start = i;
            while i < chars.len() && !chars[i].is_whitespace() {
                i += 1;
            }
            atoms.push(chars[start..i].iter().collect());
        }
    }
    atoms
}

const EPSILON_GLYPH: &str = "\u{3b5}";

fn parse_head(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(inner) = trimmed.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        inner.to_string()
    } else {
        trimmed.to_string()
    }
}

fn parse_atom(atom: &str) -> Symbol {
    if let Some(inner) = atom.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        Symbol::non_terminal(inner)
    } else {
        Symbol::terminal(atom)
    }
}

/// Parses a grammar file: one `<Head> ::= Body` production per line,
/// `#` comments and blank lines ignored, the first head fixing the
/// start symbol (spec.md §6).
pub fn parse_grammar(text: &str) -> Result<Grammar, Error> {
    let mut productions = Vec::new();
    let mut terminals: BTreeSet<Symbol> = BTreeSet::new();
    let mut nonterminals: BTreeSet<Symbol> = BTreeSet::new();
    let mut start: Option<Symbol> = None;
    let mut number = 0u32;

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let split_at = trimmed.find("::=").ok_or(Error::InvalidProduction(line_number))?;
        let head_name = parse_head(&trimmed[..split_at]);
        let body_text = trimmed[split_at + 3..].trim();
        if head_name.is_empty() {
            return Err(Error::InvalidProduction(line_number));
        }
        let head = Symbol::non_terminal(head_name);
        nonterminals.insert(head.clone());
        if start.is_none() {
            start = Some(head.clone());
        }

        let atoms = tokenize_body(body_text);
        let body = if atoms.is_empty() || atoms == [EPSILON_GLYPH.to_string()] {
            Vec::new()
        } else {
            atoms
                .iter()
                .map(|atom| {
                    let symbol = parse_atom(atom);
                    if symbol.is_non_terminal() {
                        nonterminals.insert(symbol.clone());
                    } else {
                        terminals.insert(symbol.clone());
                    }
                    symbol
                })
                .collect()
        };

        number += 1;
        productions.push(Production::new(head, body, number));
    }

    let start = start.ok_or(Error::InvalidProduction(0))?;
    Grammar::new(productions, terminals, nonterminals, start).map_err(Error::from)
}

/// Parses a `<lexeme, tag>`-per-line token file (spec.md §6).
pub fn parse_tokens(text: &str, label: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let inner = trimmed.trim_start_matches('<').trim_end_matches('>');
        if let Some(comma) = inner.rfind(',') {
            let lexeme = inner[..comma].trim();
            let tag = inner[comma + 1..].trim();
            tokens.push(Token::new(lexeme, tag, Location::new(label)));
        }
    }
    tokens
}

/// Renders a token list in the `<lexeme, tag>` file format, normalizing
/// internal operator glyphs back to ASCII (spec.md §6).
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut text = String::new();
    for token in tokens {
        text.push_str(&format!("<{}, {}>\n", normalize_lexeme(token.lexeme()), token.tag()));
    }
    text
}

/// Runs §4.1–§4.4: build the unified lexer from `definitions_path`,
/// tokenize `source_path`, and optionally persist the tokens to
/// `tokens_out`.
pub fn run_lexical(definitions_path: &Path, source_path: &Path, tokens_out: Option<&PathBuf>) -> Result<Vec<Token>, Error> {
    let definitions_text = read_to_string(definitions_path)?;
    let definitions = parse_definitions(&definitions_text)?;
    let lexer: Lexer = LexerBuilder::new(definitions).build()?;

    let source_text = read_to_string(source_path)?;
    let label = source_path.to_string_lossy().to_string();
    let tokens = lexer.tokenize_source(&source_text, &label);

    for token in &tokens {
        if token.is_error() {
            eprintln!("{}: lexical error: '{}' not accepted by any pattern", token.location(), token.lexeme());
        }
    }

    if let Some(out_path) = tokens_out {
        let rendered = render_tokens(&tokens);
        fs::write(out_path, rendered).map_err(|err| Error::Io(out_path.clone(), err))?;
    }

    Ok(tokens)
}

/// Runs §4.5–§4.7: build the SLR(1) tables from `grammar_path`, fold
/// `tokens` through a freshly primed symbol table, and drive the
/// parser.
pub fn run_syntactic(grammar_path: &Path, tokens_path: &Path) -> Result<(), Error> {
    let grammar_text = read_to_string(grammar_path)?;
    let grammar = parse_grammar(&grammar_text)?;

    let tokens_text = read_to_string(tokens_path)?;
    let label = tokens_path.to_string_lossy().to_string();
    let raw_tokens = parse_tokens(&tokens_text, &label);

    let mut symbol_table = SymbolTable::new();
    symbol_table.prime_reserved_words(&grammar);
    let tokens: Vec<Token> = raw_tokens.into_iter().map(|t| symbol_table.fold(t)).collect();

    let (augmented, _collection, table): (AugmentedGrammar, CanonicalCollection, SlrTable) = build_tables(&grammar);
    for conflict in table.conflicts() {
        eprintln!("conflict: {}", conflict);
    }

    match parse(&augmented, &table, &tokens) {
        Ok(derivation) => {
            println!("SENTENCE ACCEPTED");
            let rendered: Vec<String> = derivation.0.iter().map(|n| n.to_string()).collect();
            println!("derivation: {}", rendered.join(" "));
            Ok(())
        }
        Err(err) => {
            println!("SYNTAX ERROR");
            Err(Error::from(err))
        }
    }
}
