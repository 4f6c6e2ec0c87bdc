//! Parser for equality sentences.
//!
//! Implements a recursive descent parser that builds terms into a
//! [`TermArena`], registers names in a [`SymbolTable`], and reads a whole
//! sentence into the flat item sequence that [`inorder_to_preorder`] folds
//! into an expression tree.

use crate::config::Config;
use crate::expr::{inorder_to_preorder, Connective, Infix, Node};
use crate::scanner::{LexicalError, Scanner};
use crate::symbol::SymbolTable;
use crate::term::{TermArena, TermId};
use crate::token::{Span, Token};
use crate::unify::Unifier;

/// The two ways a sentence can be malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Unrecognized character
    Lexical,
    /// Missing or unexpected bracket, operator or term
    Unbalanced,
}

/// Parse error with location information, when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub span: Option<Span>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, span: Option<Span>) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
        }
    }

    pub fn unbalanced(span: Option<Span>) -> Self {
        Self::new(ParseErrorKind::Unbalanced, "Unbalanced operator", span)
    }
}

impl From<LexicalError> for ParseError {
    fn from(e: LexicalError) -> Self {
        Self::new(ParseErrorKind::Lexical, e.message, Some(e.span))
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.span {
            Some(span) => write!(f, "Parse error at {}: {}", span, self.message),
            None => write!(f, "Parse error: {}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parser for one sentence.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    current: Token,
    span: Span,
    /// Whether whitespace came right before `current`
    spaced: bool,
    config: Config,
    arena: TermArena,
    symbols: SymbolTable,
    /// Equality operands, in source order
    terms: Vec<TermId>,
    tree: Option<Node>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input.
    pub fn new(input: &'a str) -> Result<Self, ParseError> {
        Self::with_config(input, Config::default())
    }

    pub fn with_config(input: &'a str, config: Config) -> Result<Self, ParseError> {
        let mut scanner = Scanner::new(input);
        let current = scanner.next_token()?;
        let span = scanner.token_span();
        let spaced = scanner.preceded_by_space();
        Ok(Self {
            scanner,
            current,
            span,
            spaced,
            config,
            arena: TermArena::new(),
            symbols: SymbolTable::new(),
            terms: Vec::new(),
            tree: None,
        })
    }

    /// Advance to the next token.
    fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self.scanner.next_token()?;
        self.span = self.scanner.token_span();
        self.spaced = self.scanner.preceded_by_space();
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn unbalanced(&self) -> ParseError {
        ParseError::unbalanced(Some(self.span))
    }

    /// Expect a specific token, error if not found.
    fn expect(&mut self, expected: &Token) -> Result<Token, ParseError> {
        if &self.current == expected {
            self.advance()
        } else {
            log::debug!("expected {:?}, found {:?} at {}", expected, self.current, self.span);
            Err(self.unbalanced())
        }
    }

    /// Parse exactly one term.
    pub fn create_term(&mut self) -> Result<TermId, ParseError> {
        let start = self.span;
        match self.advance()? {
            Token::Number(text) => Ok(self.arena.number(text)),

            Token::LBracket => {
                if self.current == Token::RBracket {
                    self.advance()?;
                    return Ok(self.arena.empty_list());
                }
                let elements = self.create_terms()?;
                self.expect(&Token::RBracket)?;
                Ok(self.arena.list(elements))
            }

            Token::Atom(name) | Token::Variable(name)
                if self.current == Token::LParen && !self.spaced =>
            {
                self.advance()?;
                // Allocated ahead of its arguments so the functor is
                // recorded before any name inside them.
                let id = self.arena.structure(name.as_str(), Vec::new());
                self.symbols.register(&name, id);
                let args = self.create_terms()?;
                self.expect(&Token::RParen)?;
                self.arena.set_arguments(id, args);
                Ok(id)
            }

            Token::Variable(name) => Ok(self.create_variable(&name)),

            Token::Atom(name) => {
                let id = self.arena.atom(name.as_str());
                self.symbols.register(&name, id);
                Ok(id)
            }

            unexpected => {
                log::debug!("no term starts with {:?} at {}", unexpected, start);
                Err(ParseError::unbalanced(Some(start)))
            }
        }
    }

    /// A fresh variable cell, linked into the co-bound set of any earlier
    /// occurrence of the same name in the current scope.
    fn create_variable(&mut self, name: &str) -> TermId {
        let id = self.arena.variable(name);
        self.symbols.register(name, id);
        match self.symbols.scoped_variable(name) {
            Some(first) => {
                let binding = self.arena.group_binding(first);
                self.arena.merge_groups(first, id, binding);
            }
            None => self.symbols.declare_variable(name, id),
        }
        id
    }

    /// Parse a comma-separated sequence of terms, possibly empty.
    pub fn create_terms(&mut self) -> Result<Vec<TermId>, ParseError> {
        let mut terms = Vec::new();
        if !self.current.can_start_term() {
            return Ok(terms);
        }
        terms.push(self.create_term()?);

        while self.current == Token::Comma {
            self.advance()?;
            terms.push(self.create_term()?);
        }

        Ok(terms)
    }

    /// Read one `.`-terminated sentence as a flat in-order item sequence.
    ///
    /// Every equality operand is also recorded in [`terms`](Self::terms).
    pub fn read_sentence_and_create_nodes(&mut self) -> Result<Vec<Infix>, ParseError> {
        let mut items = Vec::new();

        loop {
            let lhs = self.create_term()?;
            self.terms.push(lhs);
            items.push(Infix::Operand(lhs));

            self.expect(&Token::Equals)?;
            items.push(Infix::Operator(Connective::Equality));

            let rhs = self.create_term()?;
            self.terms.push(rhs);
            items.push(Infix::Operand(rhs));

            match self.current {
                Token::Comma => {
                    self.advance()?;
                    items.push(Infix::Operator(Connective::Comma));
                }
                Token::Semicolon => {
                    self.advance()?;
                    items.push(Infix::Operator(Connective::Semicolon));
                    if self.config.scoped_disjunctions {
                        self.symbols.open_scope();
                    }
                }
                Token::Dot => {
                    self.advance()?;
                    break;
                }
                _ => return Err(self.unbalanced()),
            }
        }

        if self.current != Token::Eof {
            return Err(self.unbalanced());
        }

        log::debug!("read sentence of {} items", items.len());
        Ok(items)
    }

    /// Read the sentence and fold it into an expression tree.
    pub fn build_expression_tree(&mut self) -> Result<&Node, ParseError> {
        let items = self.read_sentence_and_create_nodes()?;
        let tree = inorder_to_preorder(items)?;
        Ok(self.tree.insert(tree))
    }

    /// Read the sentence, build its tree and evaluate it once.
    ///
    /// Bindings made during evaluation stay observable through
    /// [`value`](Self::value).
    pub fn matchings(&mut self) -> Result<bool, ParseError> {
        self.build_expression_tree()?;
        Ok(self.evaluate())
    }

    /// Evaluate the expression tree; false when none has been built.
    pub fn evaluate(&mut self) -> bool {
        let Some(tree) = &self.tree else {
            return false;
        };
        let mut unifier = Unifier::new(&mut self.arena, &self.config);
        let result = tree.evaluate(&mut unifier);
        log::debug!("sentence evaluated to {}", result);
        result
    }

    pub fn expression_tree(&self) -> Option<&Node> {
        self.tree.as_ref()
    }

    /// Equality operands parsed so far, in source order.
    pub fn terms(&self) -> &[TermId] {
        &self.terms
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn arena(&self) -> &TermArena {
        &self.arena
    }

    pub fn symbol(&self, id: TermId) -> String {
        self.arena.symbol(id)
    }

    pub fn value(&self, id: TermId) -> String {
        self.arena.value(id)
    }

    /// Hand the parsed sentence over, once its tree has been built.
    pub fn into_sentence(self) -> Option<Sentence> {
        let tree = self.tree?;
        Some(Sentence {
            arena: self.arena,
            symbols: self.symbols,
            terms: self.terms,
            tree,
            config: self.config,
        })
    }
}

/// A parsed sentence with its expression tree.
#[derive(Debug)]
pub struct Sentence {
    arena: TermArena,
    symbols: SymbolTable,
    terms: Vec<TermId>,
    tree: Node,
    config: Config,
}

impl Sentence {
    /// Evaluate the expression tree, binding variables as a side effect.
    pub fn evaluate(&mut self) -> bool {
        let mut unifier = Unifier::new(&mut self.arena, &self.config);
        self.tree.evaluate(&mut unifier)
    }

    pub fn terms(&self) -> &[TermId] {
        &self.terms
    }

    pub fn expression_tree(&self) -> &Node {
        &self.tree
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn arena(&self) -> &TermArena {
        &self.arena
    }

    pub fn symbol(&self, id: TermId) -> String {
        self.arena.symbol(id)
    }

    pub fn value(&self, id: TermId) -> String {
        self.arena.value(id)
    }
}

/// Parse a sentence from source.
pub fn parse(input: &str) -> Result<Sentence, ParseError> {
    parse_with_config(input, Config::default())
}

pub fn parse_with_config(input: &str, config: Config) -> Result<Sentence, ParseError> {
    let mut parser = Parser::with_config(input, config)?;
    parser.build_expression_tree()?;
    parser.into_sentence().ok_or_else(|| ParseError::unbalanced(None))
}
