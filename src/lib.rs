//! prolog_terms: equality sentences over Prolog-style terms.
//!
//! Scans and parses a single `.`-terminated sentence of equalities joined by
//! `,` (conjunction) and `;` (disjunction), folds it into an expression tree,
//! and evaluates the tree by unifying terms. Variables stay bound afterwards,
//! so their resolved values can be read back.
//!
//! # Features
//!
//! - Numbers, atoms, variables, structs and lists
//! - Unification with occurs check
//! - Repeated variable names linked into one co-bound set
//! - Precedence: `=` binds tighter than `,`, which binds tighter than `;`
//!
//! # Example
//!
//! ```
//! let mut sentence = prolog_terms::parse("X = s(Y), Y = 1.").unwrap();
//! assert!(sentence.evaluate());
//! let x = sentence.terms()[0];
//! assert_eq!(sentence.value(x), "s(1)");
//! ```

pub mod config;
pub mod expr;
pub mod parser;
pub mod scanner;
pub mod symbol;
pub mod term;
pub mod token;
pub mod unify;

pub use config::Config;
pub use expr::{inorder_to_preorder, Connective, Infix, Node, Payload};
pub use parser::{parse, parse_with_config, ParseError, ParseErrorKind, Parser, Sentence};
pub use scanner::{LexicalError, Scanner};
pub use symbol::SymbolTable;
pub use term::{ListCell, Term, TermArena, TermId, Variable};
pub use token::{Span, Token};
pub use unify::{unify, Unifier};
