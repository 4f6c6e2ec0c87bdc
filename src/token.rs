//! Token definitions for the term scanner.
//!
//! Covers the small token set of equality sentences: numbers, atoms,
//! variables and the punctuation `( ) , [ ] = ; .`.

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Token types.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Unsigned integer, kept in its written form
    Number(String),
    /// Atom: lowercase identifier, or a run of dots used as a functor
    Atom(String),
    /// Variable: uppercase or underscore identifier
    Variable(String),

    // Punctuation
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// . (end of sentence)
    Dot,
    /// =
    Equals,

    // Brackets
    /// (
    LParen,
    /// )
    RParen,
    /// [
    LBracket,
    /// ]
    RBracket,

    // Special
    /// End of input
    Eof,
}

impl Token {
    /// Returns true if this token can start a term.
    pub fn can_start_term(&self) -> bool {
        matches!(
            self,
            Token::Number(_) | Token::Atom(_) | Token::Variable(_) | Token::LBracket
        )
    }
}
