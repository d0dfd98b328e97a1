use std::fmt;

/// Failures that can arise while parsing a regular expression, per §4.1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegexError {
    /// A character class range such as `[a-Z]` or `[9-0]`.
    BadClassRange(String),
    /// An operator (`*`, `+`, `?`, `|`, concatenation) had no left operand.
    MissingOperand(String),
    /// A `(` was never closed, or a `)` had no matching `(`.
    UnbalancedParens(String),
    /// Characters remained after a complete expression was parsed.
    TrailingInput(String),
}

impl fmt::Display for RegexError {
    fn fmt(&self, dest: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RegexError::BadClassRange(s) => write!(dest, "bad character class range: {}", s),
            RegexError::MissingOperand(s) => write!(dest, "operator with no operand: {}", s),
            RegexError::UnbalancedParens(s) => write!(dest, "unbalanced parentheses: {}", s),
            RegexError::TrailingInput(s) => write!(dest, "unexpected trailing input: {}", s),
        }
    }
}

impl std::error::Error for RegexError {}

/// Top level error type for the `lexan` crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexanError {
    InvalidRegex(RegexError),
    /// The lexer builder was given no `(name, regex)` pairs.
    NoDefinitions,
}

impl fmt::Display for LexanError {
    fn fmt(&self, dest: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LexanError::InvalidRegex(err) => write!(dest, "invalid regular expression: {}", err),
            LexanError::NoDefinitions => write!(dest, "no regular definitions supplied"),
        }
    }
}

impl std::error::Error for LexanError {}

impl From<RegexError> for LexanError {
    fn from(err: RegexError) -> Self {
        LexanError::InvalidRegex(err)
    }
}
