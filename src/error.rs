use std::fmt;
use std::io;
use std::path::PathBuf;

use lexan::LexanError;
use slr1::{GrammarError, SyntaxError};

/// Pipeline-level error taxonomy (spec.md §7), ordered roughly from
/// I/O up through the parser.
#[derive(Debug)]
pub enum Error {
    Io(PathBuf, io::Error),
    InvalidDefinition(usize),
    InvalidProduction(usize),
    Lexan(LexanError),
    Grammar(GrammarError),
    Syntax(SyntaxError),
}

impl fmt::Display for Error {
    fn fmt(&self, dest: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(path, err) => write!(dest, "{}: {}", path.display(), err),
            Error::InvalidDefinition(line) => write!(dest, "line {}: malformed regular definition", line),
            Error::InvalidProduction(line) => write!(dest, "line {}: malformed production", line),
            Error::Lexan(err) => write!(dest, "{}", err),
            Error::Grammar(err) => write!(dest, "{}", err),
            Error::Syntax(err) => write!(dest, "{}", err),
        }
    }
}

impl std::error::Error for Error {}

impl From<LexanError> for Error {
    fn from(err: LexanError) -> Self {
        Error::Lexan(err)
    }
}

impl From<GrammarError> for Error {
    fn from(err: GrammarError) -> Self {
        Error::Grammar(err)
    }
}

impl From<SyntaxError> for Error {
    fn from(err: SyntaxError) -> Self {
        Error::Syntax(err)
    }
}
