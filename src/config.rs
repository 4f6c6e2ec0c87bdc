//! Configuration of a parse.
//!
//! A [`Config`] is handed to [`Parser::with_config`](crate::Parser::with_config)
//! and travels with the sentence through tree building and evaluation.

/// The primary configuration structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Refuse to bind a variable to a compound term containing it.
    ///
    /// With this off, `X = s(X)` succeeds and rendering stops at the cycle.
    pub occurs_check: bool,

    /// Open a fresh variable scope after each top-level `;`, so that
    /// `X = 1; X = 2` names two different variables.
    pub scoped_disjunctions: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            occurs_check: true,
            scoped_disjunctions: true,
        }
    }
}
