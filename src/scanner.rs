//! Scanner for equality sentences.
//!
//! Turns source text into tokens on demand: numbers, atoms, variables and
//! the punctuation of the sentence grammar. Whitespace between tokens is
//! skipped.

use crate::token::{Span, Token};

/// Lexical error with location information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalError {
    pub message: String,
    pub span: Span,
}

impl LexicalError {
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            span: Span::new(line, column),
        }
    }
}

impl std::fmt::Display for LexicalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Lexical error at {}:{}: {}",
            self.span.line, self.span.column, self.message
        )
    }
}

impl std::error::Error for LexicalError {}

/// Lazy scanner over a single source string.
pub struct Scanner<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    line: usize,
    column: usize,
    /// Where the most recent token started
    start: Span,
    /// Whether whitespace came right before the most recent token
    spaced: bool,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            line: 1,
            column: 1,
            start: Span::new(1, 1),
            spaced: false,
        }
    }

    /// Get current span for error reporting.
    pub fn span(&self) -> Span {
        Span::new(self.line, self.column)
    }

    /// Span of the most recently scanned token.
    pub fn token_span(&self) -> Span {
        self.start
    }

    /// Whether whitespace separated the most recent token from the one
    /// before it.
    pub fn preceded_by_space(&self) -> bool {
        self.spaced
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn advance(&mut self) -> Option<char> {
        let (_, c) = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Skip whitespace, returning whether there was any.
    fn skip_whitespace(&mut self) -> bool {
        let mut skipped = false;
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
                skipped = true;
            } else {
                break;
            }
        }
        skipped
    }

    /// Read an identifier (atom or variable).
    fn read_identifier(&mut self, first: char) -> String {
        let mut ident = String::new();
        ident.push(first);
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                ident.push(c);
                self.advance();
            } else {
                break;
            }
        }
        ident
    }

    /// Read an unsigned integer, keeping the digits as written.
    fn read_number(&mut self, first: char) -> String {
        let mut num = String::new();
        num.push(first);
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                num.push(c);
                self.advance();
            } else {
                break;
            }
        }
        num
    }

    /// Read a dot, or a run of dots naming a functor such as `.(H, T)`.
    fn read_dots(&mut self) -> Token {
        let mut dots = String::from(".");
        while self.peek() == Some('.') {
            dots.push('.');
            self.advance();
        }
        if dots.len() == 1 && self.peek() != Some('(') {
            Token::Dot
        } else {
            Token::Atom(dots)
        }
    }

    /// Get the next token.
    ///
    /// Once the input is exhausted every further call yields `Token::Eof`.
    pub fn next_token(&mut self) -> Result<Token, LexicalError> {
        self.spaced = self.skip_whitespace();

        let start_line = self.line;
        let start_col = self.column;
        self.start = Span::new(start_line, start_col);

        let c = match self.advance() {
            Some(c) => c,
            None => return Ok(Token::Eof),
        };

        let token = match c {
            '(' => Token::LParen,
            ')' => Token::RParen,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            ',' => Token::Comma,
            ';' => Token::Semicolon,
            '=' => Token::Equals,
            '.' => self.read_dots(),

            c if c.is_ascii_digit() => Token::Number(self.read_number(c)),

            c if c.is_ascii_uppercase() || c == '_' => Token::Variable(self.read_identifier(c)),

            c if c.is_ascii_lowercase() => Token::Atom(self.read_identifier(c)),

            _ => {
                return Err(LexicalError::new(
                    format!("Unexpected character '{}'", c),
                    start_line,
                    start_col,
                ))
            }
        };

        log::trace!("token {:?} at {}:{}", token, start_line, start_col);
        Ok(token)
    }

    /// Tokenize the entire input.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexicalError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            if token == Token::Eof {
                tokens.push(token);
                break;
            }
            tokens.push(token);
        }
        Ok(tokens)
    }
}
